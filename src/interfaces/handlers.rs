pub mod categories;
pub mod contact_me;
pub mod home;
pub mod json_error;
pub mod projects;
pub mod system;
pub mod uploads;
