use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{acknowledged::Acknowledged, category::{NewCategoryRequest, UpdateCategoryRequest}},
    errors::AppError,
    use_cases::extractors::AdminAccess,
    AppState,
};

#[instrument(skip(state))]
pub async fn get_all_categories(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let categories = state.category_handler.list_categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[instrument(skip(_admin, state, data))]
pub async fn create_category(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    data: web::Json<NewCategoryRequest>,
) -> Result<impl Responder, AppError> {
    let category = state.category_handler
        .create_category(data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(category))
}

#[instrument(skip(_admin, category_id, state, data))]
pub async fn update_category(
    _admin: AdminAccess,
    category_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateCategoryRequest>,
) -> Result<impl Responder, AppError> {
    let category = state.category_handler
        .update_category(&category_id, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(category))
}

#[instrument(skip(_admin, category_id, state))]
pub async fn delete_category(
    _admin: AdminAccess,
    category_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.category_handler.delete_category(&category_id).await?;
    Ok(HttpResponse::Ok().json(Acknowledged::ok()))
}
