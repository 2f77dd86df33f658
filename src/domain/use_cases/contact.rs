use std::sync::Arc;

use ammonia::clean_text;
use validator::Validate;

use crate::{
    entities::contact_me::{ContactForm, ContactResponse},
    errors::AppError,
    mail::mailer::{Mailer, OutgoingMail},
};

pub struct ContactHandler {
    pub mailer: Arc<dyn Mailer>,
}

impl ContactHandler {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        ContactHandler { mailer }
    }

    /// Relays a contact form submission to the studio inbox
    pub async fn send_contact_message(&self, form: ContactForm) -> Result<ContactResponse, AppError> {
        form.validate()?;

        if !self.mailer.ensure_ready().await {
            return Err(AppError::ServiceUnavailable("Mail transport not ready".into()));
        }

        let mail = compose_mail(&form);
        let id = self.mailer.send(&mail).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to send contact email");
            AppError::InternalError("Failed to send email".into())
        })?;

        Ok(ContactResponse { ok: true, id })
    }
}

/// Builds the plain-text and HTML bodies; user input is escaped in the HTML part.
pub fn compose_mail(form: &ContactForm) -> OutgoingMail {
    let text_body = format!(
        "Name: {}\nEmail: {}\n\n{}",
        form.name, form.email, form.message
    );

    let message_html = clean_text(&form.message).replace("&#10;", "<br>");
    let html_body = format!(
        "<h2>New contact message</h2>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Subject:</strong> {}</p>\
         <hr>\
         <p>{}</p>",
        clean_text(&form.name),
        clean_text(&form.email),
        clean_text(&form.subject),
        message_html,
    );

    OutgoingMail {
        reply_to_name: form.name.clone(),
        reply_to: form.email.clone(),
        subject: form.subject.clone(),
        text_body,
        html_body,
    }
}
