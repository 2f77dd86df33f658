pub mod acknowledged;
pub mod category;
pub mod contact_me;
pub mod image;
pub mod project;
