pub mod holiday;
pub mod location;
pub mod reservation;
