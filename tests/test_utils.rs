#![allow(dead_code)]

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::{
    net::TcpListener,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use studio_site_backend::{
    constants::ADMIN_SECRET_HEADER,
    errors::MailError,
    handlers::json_error::route_not_found,
    mail::mailer::{Mailer, OutgoingMail},
    routes::{configure_routes, configure_uploads},
    settings::{AppConfig, AppEnvironment},
    AppState,
};
use tempfile::TempDir;

pub const ADMIN_SECRET: &str = "test-admin-secret";

/// In-memory transport that records what it was asked to do.
pub struct RecordingMailer {
    ready: AtomicBool,
    fail_sends: bool,
    pub ready_checks: AtomicUsize,
    pub sent: Mutex<Vec<OutgoingMail>>,
}

impl RecordingMailer {
    pub fn ready() -> Self {
        Self::with_state(true, false)
    }

    pub fn unavailable() -> Self {
        Self::with_state(false, false)
    }

    pub fn failing() -> Self {
        Self::with_state(true, true)
    }

    fn with_state(ready: bool, fail_sends: bool) -> Self {
        RecordingMailer {
            ready: AtomicBool::new(ready),
            fail_sends,
            ready_checks: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    async fn ensure_ready(&self) -> bool {
        self.ready_checks.fetch_add(1, Ordering::SeqCst);
        self.is_ready()
    }

    async fn send(&self, mail: &OutgoingMail) -> Result<String, MailError> {
        if self.fail_sends {
            return Err(MailError::Transport("connection reset".into()));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(mail.clone());
        Ok(format!("<{}@test.local>", sent.len()))
    }
}

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub config: AppConfig,
    pub state: web::Data<AppState>,
    pub mailer: Arc<RecordingMailer>,
    _workdir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(vec![ADMIN_SECRET.to_string()], RecordingMailer::ready()).await
    }

    pub async fn spawn_with(admin_passwords: Vec<String>, mailer: RecordingMailer) -> Self {
        let workdir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = test_config(&workdir, admin_passwords);

        let mailer = Arc::new(mailer);
        let state = web::Data::new(AppState::with_mailer(&config, mailer.clone()));

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let server_state = state.clone();
        let uploads_dir = config.uploads_dir.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(server_state.clone())
                .wrap(NormalizePath::trim())
                .configure(configure_routes)
                .configure(configure_uploads(uploads_dir.clone()))
                .default_service(web::route().to(route_not_found))
        })
        .listen(listener)
        .expect("Failed to bind server")
        .workers(config.worker_count)
        .disable_signals()
        .run();

        tokio::spawn(server);

        let client = Client::new();
        while client.get(format!("{}/health", address)).send().await.is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        TestApp {
            address,
            client,
            config,
            state,
            mailer,
            _workdir: workdir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get_json(&self, path: &str) -> Value {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET")
            .json()
            .await
            .expect("Response was not JSON")
    }

    pub async fn admin_post(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .header(ADMIN_SECRET_HEADER, ADMIN_SECRET)
            .json(body)
            .send()
            .await
            .expect("Failed to send POST")
    }

    pub async fn admin_put(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(self.url(path))
            .header(ADMIN_SECRET_HEADER, ADMIN_SECRET)
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT")
    }

    pub async fn admin_delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(self.url(path))
            .header(ADMIN_SECRET_HEADER, ADMIN_SECRET)
            .send()
            .await
            .expect("Failed to send DELETE")
    }

    pub async fn create_project(&self, title: &str, category: &str) -> Value {
        let response = self
            .admin_post("/api/projects", &sample_project(title, category))
            .await;
        assert!(response.status().is_success(), "create project failed: {}", response.status());
        response.json().await.unwrap()
    }

    pub async fn create_category(&self, value: &str, label: &str) -> Value {
        let response = self
            .admin_post("/api/categories", &serde_json::json!({ "value": value, "label": label }))
            .await;
        assert!(response.status().is_success(), "create category failed: {}", response.status());
        response.json().await.unwrap()
    }

    /// Names of the files currently in the uploads directory.
    pub fn stored_uploads(&self) -> Vec<String> {
        match std::fs::read_dir(&self.config.uploads_dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

pub fn sample_project(title: &str, category: &str) -> Value {
    serde_json::json!({
        "title": title,
        "category": category,
        "description": format!("{} case study", title),
        "image": "/uploads/cover.png",
        "tags": ["strategy", "design"],
        "link": "#",
        "github": "#"
    })
}

fn test_config(workdir: &TempDir, admin_passwords: Vec<String>) -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "Studio Site Test".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        worker_count: 1,
        data_dir: workdir.path().join("data"),
        uploads_dir: workdir.path().join("uploads"),
        admin_passwords,
        ..AppConfig::default()
    }
}
