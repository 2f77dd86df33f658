use actix_cors::Cors;
use actix_web::{http::header, middleware::NormalizePath, web, App, HttpServer};
use studio_site_backend::{
    constants::{ADMIN_SECRET_HEADER, START_TIME},
    graceful_shutdown::shutdown_signal,
    handlers::json_error::route_not_found,
    routes::{configure_routes, configure_uploads},
    settings::AppConfig,
    AppState
};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .allowed_header(ADMIN_SECRET_HEADER)
        .max_age(3600);

    if origins.iter().any(|o| o == "*") {
        cors.allow_any_origin()
    } else {
        origins.iter().fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match AppConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(config.is_production());
    tracing::info!("Loaded configuration: {:?}", config);
    once_cell::sync::Lazy::force(&START_TIME);

    std::fs::create_dir_all(&config.data_dir)?;
    std::fs::create_dir_all(&config.uploads_dir)?;

    let app_state = web::Data::new(AppState::new(&config).await);
    if app_state.admin_guard.is_open() {
        tracing::warn!("ADMIN_PASSWORD is not set; catalog mutations are open to anyone");
    }

    let server_addr = format!("{}:{}", config.host, config.port);
    tracing::info!(
        "Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let cors_origins = config.cors_origins();
    let uploads_dir = config.uploads_dir.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(build_cors(&cors_origins))
            .wrap(NormalizePath::trim())
            .wrap(TracingLogger::default())
            .configure(configure_routes)
            .configure(configure_uploads(uploads_dir.clone()))
            .default_service(web::route().to(route_not_found))
    })
    .workers(config.worker_count)
    .bind(server_addr)?
    .disable_signals()
    .run();

    let handle = server.handle();

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => {
            handle.stop(true).await;
            Ok(())
        },
    }
}
