use actix_web::{web, HttpRequest, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::contact_me::ContactForm, errors::AppError, utils::get_client_ip::get_client_ip, AppState};

#[instrument(skip(req, state, form))]
pub async fn send_contact_message(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Json<ContactForm>,
) -> Result<impl Responder, AppError> {
    let origin = req.headers()
        .get("origin")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");
    tracing::info!(
        client_ip = %get_client_ip(&req, state.trust_forwarded_for),
        origin,
        "Contact form submitted"
    );

    let response = state.contact_handler
        .send_contact_message(form.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
