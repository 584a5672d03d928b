use serde_json::{Map, Value};

/// A single declared field of a request body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
}

impl FieldSpec {
    #[must_use]
    pub const fn required(name: &'static str) -> Self {
        Self { name, required: true }
    }

    #[must_use]
    pub const fn optional(name: &'static str) -> Self {
        Self { name, required: false }
    }
}

/// Declarative shape of a request body, shared by every resource.
///
/// Only presence is checked. Values are passed to the store as-is, so a field of the
/// wrong type is caught by the store rather than here.
#[derive(Clone, Copy, Debug)]
pub struct Schema {
    fields: &'static [FieldSpec],
}

impl Schema {
    #[must_use]
    pub const fn new(fields: &'static [FieldSpec]) -> Self {
        Self { fields }
    }

    #[must_use]
    pub const fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Returns true iff every required field is present and not null.
    #[must_use]
    pub fn validate(&self, record: &Map<String, Value>) -> bool {
        self.fields
            .iter()
            .filter(|field| field.required)
            .all(|field| record.get(field.name).is_some_and(|value| !value.is_null()))
    }

    /// Copies the declared fields present in `record`, dropping everything else.
    #[must_use]
    pub fn extract_fields(&self, record: &Map<String, Value>) -> Map<String, Value> {
        self.fields
            .iter()
            .filter_map(|field| {
                record
                    .get(field.name)
                    .map(|value| (field.name.to_string(), value.clone()))
            })
            .collect()
    }
}

/// Reads an identifier out of a body value; accepts integers and numeric strings.
#[must_use]
pub fn value_as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
