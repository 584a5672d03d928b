use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// A clamped page within a collection of `total_count` rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub number: i64,
    pub last: i64,
    pub offset: i64,
    pub size: i64,
}

/// Sibling-page links; absent directions are omitted from the JSON.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_page: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_page: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_page: Option<String>,
}

/// Computes the effective page, the last page and the row offset.
///
/// The last page is never below 1, so an empty collection still has page 1.
/// A non-positive `page_size` is treated as 1.
#[must_use]
pub fn paginate(requested_page: i64, total_count: i64, page_size: i64) -> Page {
    let size = page_size.max(1);
    let total = total_count.max(0);
    let last = (total / size + i64::from(total % size != 0)).max(1);
    let number = requested_page.clamp(1, last);
    Page {
        number,
        last,
        offset: (number - 1) * size,
        size,
    }
}

/// Parses the `page` query parameter; anything but a non-zero integer means page 1.
#[must_use]
pub fn requested_page(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|page| *page != 0)
        .unwrap_or(1)
}

impl Page {
    #[must_use]
    pub fn links(&self, prefix: &str) -> PageLinks {
        let mut links = PageLinks::default();
        if self.number < self.last {
            links.next_page = Some(format!("{prefix}?page={}", self.number + 1));
            links.last_page = Some(format!("{prefix}?page={}", self.last));
        }
        if self.number > 1 {
            links.prev_page = Some(format!("{prefix}?page={}", self.number - 1));
            links.first_page = Some(format!("{prefix}?page=1"));
        }
        links
    }
}

/// One page of a collection, serialized as
/// `{<collection>: [...], pageNumber, totalPages, pageSize, totalCount, links}`.
#[derive(Debug)]
pub struct PageResponse<T> {
    pub collection: &'static str,
    pub items: Vec<T>,
    pub page: Page,
    pub total_count: i64,
    pub links: PageLinks,
}

impl<T> PageResponse<T> {
    #[must_use]
    pub fn new(collection: &'static str, route: &str, items: Vec<T>, page: Page, total_count: i64) -> Self {
        Self {
            collection,
            items,
            links: page.links(route),
            page,
            total_count,
        }
    }
}

impl<T: Serialize> Serialize for PageResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(6))?;
        map.serialize_entry(self.collection, &self.items)?;
        map.serialize_entry("pageNumber", &self.page.number)?;
        map.serialize_entry("totalPages", &self.page.last)?;
        map.serialize_entry("pageSize", &self.page.size)?;
        map.serialize_entry("totalCount", &self.total_count)?;
        map.serialize_entry("links", &self.links)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_paginate_clamps_low_page() {
        let page = paginate(0, 25, DEFAULT_PAGE_SIZE);
        assert_eq!(page, Page { number: 1, last: 3, offset: 0, size: 10 });
    }

    #[test]
    fn test_paginate_clamps_high_page() {
        let page = paginate(99, 25, DEFAULT_PAGE_SIZE);
        assert_eq!(page.number, 3);
        assert_eq!(page.last, 3);
        assert_eq!(page.offset, 20);
    }

    #[test]
    fn test_paginate_empty_collection() {
        let page = paginate(4, 0, DEFAULT_PAGE_SIZE);
        assert_eq!(page, Page { number: 1, last: 1, offset: 0, size: 10 });
        assert_eq!(page.links("/beers"), PageLinks::default());
    }

    #[test]
    fn test_paginate_exact_multiple() {
        assert_eq!(paginate(1, 30, 10).last, 3);
        assert_eq!(paginate(1, 31, 10).last, 4);
    }

    #[test]
    fn test_links_on_middle_page() {
        let links = paginate(2, 25, 10).links("/reviews");
        assert_eq!(links.next_page.as_deref(), Some("/reviews?page=3"));
        assert_eq!(links.last_page.as_deref(), Some("/reviews?page=3"));
        assert_eq!(links.prev_page.as_deref(), Some("/reviews?page=1"));
        assert_eq!(links.first_page.as_deref(), Some("/reviews?page=1"));
    }

    #[test]
    fn test_links_on_first_and_last_page() {
        let first = paginate(1, 25, 10).links("/photos");
        assert!(first.prev_page.is_none() && first.first_page.is_none());
        assert!(first.next_page.is_some() && first.last_page.is_some());

        let last = paginate(3, 25, 10).links("/photos");
        assert!(last.next_page.is_none() && last.last_page.is_none());
        assert!(last.prev_page.is_some() && last.first_page.is_some());
    }

    #[test]
    fn test_requested_page_parsing() {
        assert_eq!(requested_page(None), 1);
        assert_eq!(requested_page(Some("3")), 3);
        assert_eq!(requested_page(Some("0")), 1);
        assert_eq!(requested_page(Some("-2")), -2);
        assert_eq!(requested_page(Some("two")), 1);
    }

    #[test]
    fn test_page_response_json_shape() {
        let page = paginate(2, 12, 10);
        let response = PageResponse::new("beers", "/beers", vec![json!({"id": 11}), json!({"id": 12})], page, 12);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["beers"].as_array().unwrap().len(), 2);
        assert_eq!(value["pageNumber"], 2);
        assert_eq!(value["totalPages"], 2);
        assert_eq!(value["pageSize"], 10);
        assert_eq!(value["totalCount"], 12);
        assert_eq!(value["links"], json!({"prevPage": "/beers?page=1", "firstPage": "/beers?page=1"}));
    }

    proptest! {
        #[test]
        fn prop_effective_page_within_bounds(
            requested in any::<i64>(),
            total in 0i64..1_000_000,
            size in 1i64..500,
        ) {
            let page = paginate(requested, total, size);
            prop_assert!(page.number >= 1);
            prop_assert!(page.number <= page.last);
            prop_assert_eq!(page.offset, (page.number - 1) * size);
            prop_assert!(page.offset <= total.max(0));
            prop_assert_eq!(page.last, ((total + size - 1) / size).max(1));
        }
    }
}
