pub mod auth;
pub mod db;
pub mod mail;
pub mod utils;
