//! Column lists and flat row types for the hydrating joins.
//!
//! Identifiers are never quoted so the camelCase columns resolve the same way
//! on SQLite and on Postgres (which folds them to lower case).

use sqlx::FromRow;

use crate::domain::models::{holiday::Holiday, location::Location, reservation::Reservation};

pub(crate) const LOCATION_SELECT: &str =
    "SELECT l.id AS id, l.street AS street, l.number AS number, l.city AS city, \
     l.country AS country, l.imageUrl AS image_url \
     FROM locations l";

pub(crate) const HOLIDAY_SELECT: &str =
    "SELECT h.id AS id, h.title AS title, h.startDate AS start_date, h.duration AS duration, \
     h.price AS price, h.freeSlots AS free_slots, \
     l.id AS location_id, l.street AS location_street, l.number AS location_number, \
     l.city AS location_city, l.country AS location_country, l.imageUrl AS location_image_url \
     FROM holidays h JOIN locations l ON l.id = h.locationId";

pub(crate) const RESERVATION_SELECT: &str =
    "SELECT r.id AS id, r.contactName AS contact_name, r.phoneNumber AS phone_number, \
     h.id AS holiday_id, h.title AS holiday_title, h.startDate AS holiday_start_date, \
     h.duration AS holiday_duration, h.price AS holiday_price, h.freeSlots AS holiday_free_slots, \
     l.id AS location_id, l.street AS location_street, l.number AS location_number, \
     l.city AS location_city, l.country AS location_country, l.imageUrl AS location_image_url \
     FROM reservations r \
     JOIN holidays h ON h.id = r.holidayId \
     JOIN locations l ON l.id = h.locationId";

#[derive(Debug, FromRow)]
pub(crate) struct HolidayRow {
    id: i64,
    title: String,
    start_date: String,
    duration: i32,
    price: f64,
    free_slots: i32,
    location_id: i64,
    location_street: String,
    location_number: String,
    location_city: String,
    location_country: String,
    location_image_url: String,
}

impl From<HolidayRow> for Holiday {
    fn from(row: HolidayRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            start_date: row.start_date,
            duration: row.duration,
            price: row.price,
            free_slots: row.free_slots,
            location: Location {
                id: row.location_id,
                street: row.location_street,
                number: row.location_number,
                city: row.location_city,
                country: row.location_country,
                image_url: row.location_image_url,
            },
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct ReservationRow {
    id: i64,
    contact_name: String,
    phone_number: String,
    holiday_id: i64,
    holiday_title: String,
    holiday_start_date: String,
    holiday_duration: i32,
    holiday_price: f64,
    holiday_free_slots: i32,
    location_id: i64,
    location_street: String,
    location_number: String,
    location_city: String,
    location_country: String,
    location_image_url: String,
}

impl From<ReservationRow> for Reservation {
    fn from(row: ReservationRow) -> Self {
        Self {
            id: row.id,
            contact_name: row.contact_name,
            phone_number: row.phone_number,
            holiday: Holiday {
                id: row.holiday_id,
                title: row.holiday_title,
                start_date: row.holiday_start_date,
                duration: row.holiday_duration,
                price: row.holiday_price,
                free_slots: row.holiday_free_slots,
                location: Location {
                    id: row.location_id,
                    street: row.location_street,
                    number: row.location_number,
                    city: row.location_city,
                    country: row.location_country,
                    image_url: row.location_image_url,
                },
            },
        }
    }
}
