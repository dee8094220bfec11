use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i64,
    pub street: String,
    pub number: String,
    pub city: String,
    pub country: String,
    pub image_url: String,
}

/// Field set a caller supplies on insert and update; the store owns the identifier.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewLocation {
    pub street: String,
    pub number: String,
    pub city: String,
    pub country: String,
    pub image_url: String,
}

impl Location {
    pub fn new(id: i64, fields: &NewLocation) -> Self {
        Self {
            id,
            street: fields.street.clone(),
            number: fields.number.clone(),
            city: fields.city.clone(),
            country: fields.country.clone(),
            image_url: fields.image_url.clone(),
        }
    }
}
