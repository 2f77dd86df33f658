use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use studio_site_backend::{
    entities::contact_me::ContactForm,
    errors::{AppError, MailError},
    mail::mailer::{Mailer, OutgoingMail},
    use_cases::contact::{compose_mail, ContactHandler},
};

mock! {
    pub Mailer {}

    #[async_trait]
    impl Mailer for Mailer {
        fn is_ready(&self) -> bool;
        async fn ensure_ready(&self) -> bool;
        async fn send(&self, mail: &OutgoingMail) -> Result<String, MailError>;
    }
}

fn form() -> ContactForm {
    ContactForm {
        name: "Grace Hopper".into(),
        email: "grace@example.com".into(),
        subject: "Rebrand".into(),
        message: "Can we talk?".into(),
    }
}

#[actix_rt::test]
async fn invalid_form_never_touches_the_transport() {
    let mut mailer = MockMailer::new();
    mailer.expect_ensure_ready().never();
    mailer.expect_send().never();
    let handler = ContactHandler::new(Arc::new(mailer));

    let result = handler
        .send_contact_message(ContactForm { subject: String::new(), message: String::new(), ..form() })
        .await;

    match result {
        Err(AppError::ValidationError(errors)) => {
            let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
            assert_eq!(fields, vec!["message", "subject"]);
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[actix_rt::test]
async fn unready_transport_is_reported_without_sending() {
    let mut mailer = MockMailer::new();
    mailer.expect_ensure_ready().times(1).returning(|| false);
    mailer.expect_send().never();
    let handler = ContactHandler::new(Arc::new(mailer));

    let result = handler.send_contact_message(form()).await;

    assert!(matches!(result, Err(AppError::ServiceUnavailable(msg)) if msg == "Mail transport not ready"));
}

#[actix_rt::test]
async fn ready_transport_sends_with_sender_as_reply_to() {
    let mut mailer = MockMailer::new();
    mailer.expect_ensure_ready().times(1).returning(|| true);
    mailer
        .expect_send()
        .withf(|mail| {
            mail.reply_to == "grace@example.com"
                && mail.reply_to_name == "Grace Hopper"
                && mail.subject == "Rebrand"
                && mail.text_body == "Name: Grace Hopper\nEmail: grace@example.com\n\nCan we talk?"
        })
        .times(1)
        .returning(|_| Ok("<abc@studio.test>".to_string()));
    let handler = ContactHandler::new(Arc::new(mailer));

    let response = handler.send_contact_message(form()).await.unwrap();

    assert!(response.ok);
    assert_eq!(response.id, "<abc@studio.test>");
}

#[actix_rt::test]
async fn transport_failure_becomes_internal_error() {
    let mut mailer = MockMailer::new();
    mailer.expect_ensure_ready().returning(|| true);
    mailer
        .expect_send()
        .returning(|_| Err(MailError::Transport("550 mailbox unavailable".into())));
    let handler = ContactHandler::new(Arc::new(mailer));

    let result = handler.send_contact_message(form()).await;

    assert!(matches!(result, Err(AppError::InternalError(msg)) if msg == "Failed to send email"));
}

#[test]
fn html_body_escapes_user_input() {
    let mail = compose_mail(&ContactForm {
        name: "<script>alert(1)</script>".into(),
        message: "first\nsecond".into(),
        ..form()
    });

    assert!(!mail.html_body.contains("<script>"));
    assert!(mail.html_body.contains("&lt;script&gt;"));
    assert!(mail.html_body.contains("first<br>second"));
    assert!(mail.text_body.contains("<script>alert(1)</script>"));
}
