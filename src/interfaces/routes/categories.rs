use actix_web::web;

use crate::handlers::categories;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .service(
                web::resource("")
                    .route(web::get().to(categories::get_all_categories))
                    .route(web::post().to(categories::create_category))
            )
            .service(
                web::resource("/{category_id}")
                    .route(web::put().to(categories::update_category))
                    .route(web::delete().to(categories::delete_category))
            )
    );
}
