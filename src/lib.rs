mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{auth, db, mail, utils};

use std::sync::Arc;

use auth::admin_guard::AdminGuard;
use mail::{mailer::Mailer, smtp::SmtpMailer};
use repositories::json_repo::{JsonCategoryRepo, JsonProjectRepo};
use use_cases::{categories::CategoryHandler, contact::ContactHandler, projects::ProjectHandler, uploads::UploadHandler};

/// Server context shared by every handler.
pub struct AppState {
    pub project_handler: AppProjectHandler,
    pub category_handler: AppCategoryHandler,
    pub contact_handler: ContactHandler,
    pub upload_handler: UploadHandler,
    pub admin_guard: AdminGuard,
    pub trust_forwarded_for: bool,
}

pub type AppProjectHandler = ProjectHandler<JsonProjectRepo>;
pub type AppCategoryHandler = CategoryHandler<JsonCategoryRepo, JsonProjectRepo>;

impl AppState {
    /// Builds the state with an SMTP mailer and verifies it once; a failed
    /// verification is logged and retried on the next contact request.
    pub async fn new(config: &settings::AppConfig) -> Self {
        let smtp = SmtpMailer::new(config.smtp_settings());
        if let Err(e) = smtp.init().await {
            tracing::error!(error = %e, "SMTP setup/verify failed; contact form will answer 503 until it recovers");
        }

        Self::with_mailer(config, Arc::new(smtp))
    }

    pub fn with_mailer(config: &settings::AppConfig, mailer: Arc<dyn Mailer>) -> Self {
        let project_repo = JsonProjectRepo::new(config.projects_file());
        let category_repo = JsonCategoryRepo::new(config.categories_file());

        AppState {
            project_handler: ProjectHandler::new(project_repo.clone()),
            category_handler: CategoryHandler::new(category_repo, project_repo),
            contact_handler: ContactHandler::new(mailer),
            upload_handler: UploadHandler::new(&config.uploads_dir),
            admin_guard: AdminGuard::new(config.admin_secrets()),
            trust_forwarded_for: config.trust_forwarded_for,
        }
    }
}
