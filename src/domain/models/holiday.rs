use serde::{Deserialize, Serialize};

use crate::domain::models::location::Location;
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub id: i64,
    pub title: String,
    pub start_date: String,
    pub duration: i32,
    pub price: f64,
    pub free_slots: i32,
    pub location: Location,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewHoliday {
    pub title: String,
    pub start_date: String,
    pub duration: i32,
    pub price: f64,
    pub free_slots: i32,
    #[serde(rename = "location")]
    pub location_id: i64,
}

impl NewHoliday {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.free_slots < 0 {
            return Err(AppError::Validation("freeSlots must not be negative".into()));
        }
        if self.location_id <= 0 {
            return Err(AppError::Validation("invalid location id".into()));
        }
        Ok(())
    }
}

impl Holiday {
    pub fn new(id: i64, fields: &NewHoliday, location: Location) -> Self {
        Self {
            id,
            title: fields.title.clone(),
            start_date: fields.start_date.clone(),
            duration: fields.duration,
            price: fields.price,
            free_slots: fields.free_slots,
            location,
        }
    }
}

/// Conjunctive filter for holiday listings. `None` means "do not filter".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HolidayFilter {
    /// Matches the joined location's city or country.
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub duration: Option<i32>,
}

impl HolidayFilter {
    /// Builds a filter from raw query values, where an empty string means absent.
    pub fn from_params(location: &str, start_date: &str, duration: &str) -> Result<Self, AppError> {
        let duration = match duration.trim() {
            "" => None,
            raw => Some(
                raw.parse::<i32>()
                    .map_err(|_| AppError::Validation(format!("invalid duration filter '{}'", raw)))?,
            ),
        };

        Ok(Self {
            location: non_empty(location),
            start_date: non_empty(start_date),
            duration,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.start_date.is_none() && self.duration.is_none()
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params_build_empty_filter() {
        let filter = HolidayFilter::from_params("", "", "").unwrap();
        assert!(filter.is_empty());
        assert_eq!(filter, HolidayFilter::default());
    }

    #[test]
    fn test_params_are_parsed() {
        let filter = HolidayFilter::from_params("London", "2024-06-01", "7").unwrap();
        assert_eq!(filter.location.as_deref(), Some("London"));
        assert_eq!(filter.start_date.as_deref(), Some("2024-06-01"));
        assert_eq!(filter.duration, Some(7));
    }

    #[test]
    fn test_non_numeric_duration_is_rejected() {
        let err = HolidayFilter::from_params("", "", "a week").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_negative_capacity_is_rejected() {
        let holiday = NewHoliday {
            title: "Trip".into(),
            start_date: "2024-06-01".into(),
            duration: 5,
            price: 100.0,
            free_slots: -1,
            location_id: 1,
        };
        assert!(matches!(holiday.validate(), Err(AppError::Validation(_))));
        assert!(NewHoliday { free_slots: 0, ..holiday }.validate().is_ok());
    }

    #[test]
    fn test_serializes_with_nested_location() {
        let holiday = Holiday {
            id: 1,
            title: "Paris Trip".into(),
            start_date: "2024-06-01".into(),
            duration: 5,
            price: 499.99,
            free_slots: 10,
            location: Location {
                id: 3,
                street: "Rue A".into(),
                number: "1".into(),
                city: "Paris".into(),
                country: "France".into(),
                image_url: "x".into(),
            },
        };
        let json = serde_json::to_value(&holiday).unwrap();
        assert_eq!(json["freeSlots"], 10);
        assert_eq!(json["startDate"], "2024-06-01");
        assert_eq!(json["location"]["imageUrl"], "x");
    }
}
