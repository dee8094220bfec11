use serde::{Deserialize, Serialize};

use crate::domain::models::holiday::Holiday;
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    pub contact_name: String,
    pub phone_number: String,
    pub holiday: Holiday,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub contact_name: String,
    pub phone_number: String,
    #[serde(rename = "holiday")]
    pub holiday_id: i64,
}

impl NewReservation {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.holiday_id <= 0 {
            return Err(AppError::Validation("invalid holiday id".into()));
        }
        Ok(())
    }
}

impl Reservation {
    pub fn new(id: i64, fields: &NewReservation, holiday: Holiday) -> Self {
        Self {
            id,
            contact_name: fields.contact_name.clone(),
            phone_number: fields.phone_number.clone(),
            holiday,
        }
    }
}
