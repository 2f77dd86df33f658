use actix_web::web;

use crate::handlers::contact_me;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/contact")
            .route(web::post().to(contact_me::send_contact_message))
    );
}
