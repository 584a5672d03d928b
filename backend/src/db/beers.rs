use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::Resource;
use crate::db::{Gateway, Manufacturer, Photo, Review, StoreError};
use crate::validation::{FieldSpec, Schema};

#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
pub struct Beer {
    pub id: i64,
    pub manufacturerid: i64,
    pub name: String,
    pub abv: f64,
    pub ibu: i64,
    pub calories: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub style: String,
}

impl Resource for Beer {
    const TABLE: &'static str = "beers";
    const ROUTE: &'static str = "/beers";
    const NAME: &'static str = "beer";
    const COLLECTION: &'static str = "beers";
    const SCHEMA: Schema = Schema::new(&[
        FieldSpec::required("manufacturerid"),
        FieldSpec::required("name"),
        FieldSpec::required("abv"),
        FieldSpec::required("ibu"),
        FieldSpec::required("calories"),
        FieldSpec::required("type"),
    ]);
}

/// A beer together with everything that hangs off it.
#[derive(Debug, Serialize)]
pub struct BeerDetail {
    #[serde(flatten)]
    pub beer: Beer,
    pub reviews: Vec<Review>,
    pub photos: Vec<Photo>,
    pub manufacturer: Manufacturer,
}

/// Fetches a beer, its reviews, its photos and its manufacturer, in that order.
///
/// Returns `None` as soon as a step finds nothing. Empty review or photo lists do not stop
/// the chain; a missing beer or manufacturer does.
pub async fn get_beer_detail(gateway: &Gateway, id: i64) -> Result<Option<BeerDetail>, StoreError> {
    let Some(beer) = gateway.select_by_id::<Beer>(Beer::TABLE, id).await? else {
        return Ok(None);
    };
    let reviews = crate::db::get_reviews_by_beer_id(gateway, beer.id).await?;
    let photos = crate::db::get_photos_by_beer_id(gateway, beer.id).await?;
    let Some(manufacturer) = gateway
        .select_by_id::<Manufacturer>(Manufacturer::TABLE, beer.manufacturerid)
        .await?
    else {
        tracing::warn!(beer_id = beer.id, manufacturer_id = beer.manufacturerid, "Beer references a missing manufacturer");
        return Ok(None);
    };

    Ok(Some(BeerDetail {
        beer,
        reviews,
        photos,
        manufacturer,
    }))
}

/// All beers made by a manufacturer. Does not check that the manufacturer exists.
pub async fn get_beers_by_manufacturer_id(gateway: &Gateway, manufacturer_id: i64) -> Result<Vec<Beer>, StoreError> {
    gateway.select_where(Beer::TABLE, "manufacturerid", manufacturer_id).await
}
