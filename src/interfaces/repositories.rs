pub mod category;
pub mod json_repo;
pub mod project;
