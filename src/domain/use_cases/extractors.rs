use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::{constants::ADMIN_SECRET_HEADER, errors::AppError, AppState};

/// Extractor gating admin routes on the shared secret header.
/// Returns 401 when the secret is missing or wrong.
/// Usage: add `_admin: AdminAccess` as the first parameter of the handler so
/// it runs before the body is read.
#[derive(Debug)]
pub struct AdminAccess;

impl FromRequest for AdminAccess {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            tracing::error!("AppState missing in admin extractor");
            return ready(Err(AppError::InternalError("Internal server error".into()).into()));
        };

        let provided = req.headers()
            .get(ADMIN_SECRET_HEADER)
            .and_then(|value| value.to_str().ok());

        ready(
            state.admin_guard
                .authorize(provided)
                .map(|_| AdminAccess)
                .map_err(Into::into),
        )
    }
}
