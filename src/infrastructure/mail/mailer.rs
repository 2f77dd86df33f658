use async_trait::async_trait;

use crate::errors::MailError;

/// A message ready for the transport. Sender and recipient come from the transport's own settings.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMail {
    pub reply_to_name: String,
    pub reply_to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Whether a verified transport is currently held.
    fn is_ready(&self) -> bool;

    /// Returns true when ready, re-initializing once if it is not.
    async fn ensure_ready(&self) -> bool;

    /// Sends the message and returns its Message-ID.
    async fn send(&self, mail: &OutgoingMail) -> Result<String, MailError>;
}
