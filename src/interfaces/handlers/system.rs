use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use humantime::format_duration;
use serde::Serialize;
use std::time::Duration;

use crate::{constants::START_TIME, AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthCheckResponse {
    status: &'static str,
    timestamp: String,
    smtp_ready: bool,
    uptime: String,
    version: &'static str,
}

/// Readiness report; always 200 so it never gates the other routes.
#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now_utc = Utc::now();
    let uptime_secs = now_utc.signed_duration_since(*START_TIME).num_seconds().max(0) as u64;

    HttpResponse::Ok().json(HealthCheckResponse {
        status: "OK",
        timestamp: now_utc.to_rfc3339(),
        smtp_ready: state.contact_handler.mailer.is_ready(),
        uptime: format_duration(Duration::from_secs(uptime_secs)).to_string(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
