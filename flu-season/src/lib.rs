pub mod calendar_date;
pub mod country;
pub mod points;
pub mod records;
pub mod season;

pub use flu_utils::error::InvalidDateError;
