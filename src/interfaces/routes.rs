use std::path::PathBuf;

use actix_files::Files;
use actix_web::web;

use crate::{constants::UPLOADS_URL_PATH, handlers::{home::home, system::health_check}};

mod categories;
mod contact;
mod json_error;
mod projects;
mod uploads;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);
    cfg.service(health_check);

    cfg.service(
        web::scope("/api")
            .configure(contact::config_routes)
            .configure(projects::config_routes)
            .configure(categories::config_routes)
            .configure(uploads::config_routes)
    );

    cfg.configure(json_error::config_routes);
}

/// Serves stored uploads read-only from `uploads_dir`.
pub fn configure_uploads(uploads_dir: PathBuf) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(Files::new(UPLOADS_URL_PATH, uploads_dir));
    }
}
