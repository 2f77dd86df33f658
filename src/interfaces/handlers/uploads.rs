use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::image::ImageUploadRequest, errors::AppError, use_cases::extractors::AdminAccess, AppState};

#[instrument(skip(_admin, state, data))]
pub async fn upload_image(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    data: web::Json<ImageUploadRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.upload_handler
        .store_image(data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
