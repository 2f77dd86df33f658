pub mod filename;
pub mod get_client_ip;
pub mod valid_id;
