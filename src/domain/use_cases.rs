pub mod categories;
pub mod contact;
pub mod extractors;
pub mod projects;
pub mod uploads;
