use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{acknowledged::Acknowledged, project::{NewProjectRequest, UpdateProjectRequest}},
    errors::AppError,
    use_cases::extractors::AdminAccess,
    AppState,
};

#[instrument(skip(state))]
pub async fn get_all_projects(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.list_projects().await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(_admin, state, data))]
pub async fn create_project(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    data: web::Json<NewProjectRequest>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler
        .create_project(data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(_admin, project_id, state, data))]
pub async fn update_project(
    _admin: AdminAccess,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateProjectRequest>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler
        .update_project(&project_id, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(_admin, project_id, state))]
pub async fn delete_project(
    _admin: AdminAccess,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.project_handler.delete_project(&project_id).await?;
    Ok(HttpResponse::Ok().json(Acknowledged::ok()))
}
