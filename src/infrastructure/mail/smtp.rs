//! SMTP delivery for contact-form messages.
//!
//! [`SmtpMailer`] holds at most one verified `lettre` transport. It is built
//! and verified at startup; if that fails the server keeps running and the
//! contact endpoint retries initialization on the next request.

use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use parking_lot::RwLock;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    errors::MailError,
    mail::mailer::{Mailer, OutgoingMail},
    settings::SmtpSettings,
};

type Transport = AsyncSmtpTransport<Tokio1Executor>;

pub struct SmtpMailer {
    settings: Option<SmtpSettings>,
    transport: RwLock<Option<Transport>>,
    init_lock: Mutex<()>,
}

impl SmtpMailer {
    pub fn new(settings: Option<SmtpSettings>) -> Self {
        SmtpMailer {
            settings,
            transport: RwLock::new(None),
            init_lock: Mutex::new(()),
        }
    }

    /// Builds the transport and verifies the connection; on success it replaces the held transport.
    pub async fn init(&self) -> Result<(), MailError> {
        let _guard = self.init_lock.lock().await;

        if self.transport.read().is_some() {
            return Ok(());
        }

        let settings = self.settings.as_ref().ok_or(MailError::NotConfigured)?;
        let transport = build_transport(settings)?;

        match transport.test_connection().await {
            Ok(true) => {
                tracing::info!(host = %settings.host, port = settings.port, "SMTP transport ready");
                *self.transport.write() = Some(transport);
                Ok(())
            }
            Ok(false) => Err(MailError::VerifyFailed {
                host: settings.host.clone(),
                port: settings.port,
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn current_transport(&self) -> Option<Transport> {
        self.transport.read().clone()
    }

    fn build_message(&self, settings: &SmtpSettings, mail: &OutgoingMail) -> Result<(Message, String), MailError> {
        let from: Mailbox = settings.from.parse()?;
        let to: Mailbox = settings.recipient.parse()?;
        let reply_to = Mailbox::new(
            Some(mail.reply_to_name.clone()).filter(|n| !n.trim().is_empty()),
            mail.reply_to.parse()?,
        );

        let message_id = format!("<{}@{}>", Uuid::new_v4(), from.email.domain());

        let message = Message::builder()
            .from(from)
            .to(to)
            .reply_to(reply_to)
            .subject(mail.subject.clone())
            .message_id(Some(message_id.clone()))
            .multipart(MultiPart::alternative_plain_html(
                mail.text_body.clone(),
                mail.html_body.clone(),
            ))?;

        Ok((message, message_id))
    }
}

fn build_transport(settings: &SmtpSettings) -> Result<Transport, MailError> {
    let builder = if settings.secure {
        Transport::relay(&settings.host)?
    } else {
        Transport::starttls_relay(&settings.host)?
    };

    let mut builder = builder.port(settings.port);
    if let (Some(user), Some(password)) = (&settings.user, &settings.password) {
        builder = builder.credentials(Credentials::new(user.clone(), password.to_string()));
    }

    Ok(builder.build())
}

#[async_trait]
impl Mailer for SmtpMailer {
    fn is_ready(&self) -> bool {
        self.transport.read().is_some()
    }

    async fn ensure_ready(&self) -> bool {
        if self.is_ready() {
            return true;
        }

        match self.init().await {
            Ok(()) => true,
            Err(e) => {
                let (host, port) = self.settings
                    .as_ref()
                    .map(|s| (s.host.as_str(), s.port))
                    .unwrap_or(("-", 0));
                tracing::warn!(host, port, error = %e, "SMTP transport still unavailable");
                false
            }
        }
    }

    async fn send(&self, mail: &OutgoingMail) -> Result<String, MailError> {
        let settings = self.settings.as_ref().ok_or(MailError::NotConfigured)?;
        let transport = self.current_transport().ok_or(MailError::NotReady)?;

        let (message, message_id) = self.build_message(settings, mail)?;
        transport.send(message).await?;

        tracing::info!(message_id = %message_id, "Contact email sent");
        Ok(message_id)
    }
}
