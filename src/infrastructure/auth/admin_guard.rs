use std::sync::atomic::{AtomicBool, Ordering};

use zeroize::Zeroizing;

use crate::errors::AppError;

/// Shared-secret gate for catalog mutations and uploads.
///
/// With no secrets configured every request passes and a warning is logged
/// once. Otherwise the header value must equal one of the secrets exactly.
pub struct AdminGuard {
    secrets: Vec<Zeroizing<String>>,
    warned_open: AtomicBool,
}

impl AdminGuard {
    pub fn new(secrets: Vec<Zeroizing<String>>) -> Self {
        AdminGuard {
            secrets,
            warned_open: AtomicBool::new(false),
        }
    }

    pub fn is_open(&self) -> bool {
        self.secrets.is_empty()
    }

    pub fn authorize(&self, provided: Option<&str>) -> Result<(), AppError> {
        if self.is_open() {
            if !self.warned_open.swap(true, Ordering::Relaxed) {
                tracing::warn!("No admin password configured; admin routes are unprotected");
            }
            return Ok(());
        }

        match provided {
            Some(secret) if !secret.is_empty() && self.secrets.iter().any(|s| s.as_str() == secret) => Ok(()),
            Some(_) => {
                tracing::warn!("Rejected admin request with a wrong secret");
                Err(AppError::UnauthorizedAccess)
            }
            None => {
                tracing::warn!("Rejected admin request without a secret");
                Err(AppError::UnauthorizedAccess)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard(secrets: &[&str]) -> AdminGuard {
        AdminGuard::new(secrets.iter().map(|s| Zeroizing::new(s.to_string())).collect())
    }

    #[test]
    fn open_guard_lets_everything_through() {
        let guard = guard(&[]);

        assert!(guard.authorize(None).is_ok());
        assert!(guard.authorize(Some("anything")).is_ok());
        assert!(guard.warned_open.load(Ordering::Relaxed));
    }

    #[test]
    fn any_configured_secret_is_accepted() {
        let guard = guard(&["alpha", "beta"]);

        assert!(guard.authorize(Some("alpha")).is_ok());
        assert!(guard.authorize(Some("beta")).is_ok());
    }

    #[test]
    fn missing_empty_or_wrong_secrets_are_rejected() {
        let guard = guard(&["alpha"]);

        assert!(matches!(guard.authorize(None), Err(AppError::UnauthorizedAccess)));
        assert!(matches!(guard.authorize(Some("")), Err(AppError::UnauthorizedAccess)));
        assert!(matches!(guard.authorize(Some("Alpha")), Err(AppError::UnauthorizedAccess)));
    }
}
