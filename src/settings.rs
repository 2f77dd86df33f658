use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, path::PathBuf, str::FromStr};
use zeroize::Zeroizing;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,

    #[serde(default)]
    pub admin_passwords: Vec<String>,

    /// Take the client address from `X-Forwarded-For` when logging.
    #[serde(default)]
    pub trust_forwarded_for: bool,

    #[serde(default)]
    pub smtp_host: Option<String>,

    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    #[serde(default)]
    pub smtp_secure: bool,

    #[serde(default)]
    pub smtp_user: Option<String>,

    #[serde(default)]
    pub smtp_password: Option<String>,

    #[serde(default)]
    pub smtp_from: Option<String>,

    #[serde(default)]
    pub contact_recipient: Option<String>,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Studio-Site-API".to_string()
}
fn default_port() -> u16 {
    6001
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_uploads_dir() -> PathBuf {
    PathBuf::from("uploads")
}
fn default_smtp_port() -> u16 {
    587
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            env: default_env(),
            name: default_name(),
            port: default_port(),
            host: default_host(),
            worker_count: default_worker_count(),
            cors_allowed_origins: default_cors_origins(),
            data_dir: default_data_dir(),
            uploads_dir: default_uploads_dir(),
            admin_passwords: Vec::new(),
            trust_forwarded_for: false,
            smtp_host: None,
            smtp_port: default_smtp_port(),
            smtp_secure: false,
            smtp_user: None,
            smtp_password: None,
            smtp_from: None,
            contact_recipient: None,
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("admin_passwords")
                    .with_list_parse_key("cors_allowed_origins")
                    .ignore_empty(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Un-prefixed variables used by existing deployments
        if env::var("APP_PORT").is_err() {
            if let Some(port) = env::var("PORT").ok().and_then(|p| p.parse().ok()) {
                config.port = port;
            }
        }
        if config.admin_passwords.is_empty() {
            config.admin_passwords = ["ADMIN_PASSWORD", "ADMIN_SECRET"]
                .iter()
                .filter_map(|key| env::var(key).ok())
                .collect();
        }
        fill_opt_env(&mut config.smtp_host, "SMTP_HOST");
        fill_opt_env(&mut config.smtp_user, "SMTP_USER");
        fill_opt_env(&mut config.smtp_password, "SMTP_PASS");
        fill_opt_env(&mut config.smtp_from, "SMTP_FROM");
        fill_opt_env(&mut config.contact_recipient, "CONTACT_RECIPIENT");
        if env::var("APP_SMTP_PORT").is_err() {
            if let Some(port) = env::var("SMTP_PORT").ok().and_then(|p| p.parse().ok()) {
                config.smtp_port = port;
            }
        }
        if env::var("APP_SMTP_SECURE").is_err() {
            if let Ok(secure) = env::var("SMTP_SECURE") {
                config.smtp_secure = secure.trim().eq_ignore_ascii_case("true");
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.port == 0 && self.env != AppEnvironment::Testing {
            errors.push("PORT must be greater than zero");
        }
        if self.data_dir.as_os_str().is_empty() {
            errors.push("DATA_DIR cannot be empty");
        }
        if self.uploads_dir.as_os_str().is_empty() {
            errors.push("UPLOADS_DIR cannot be empty");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        split_list(&self.cors_allowed_origins)
    }

    /// Accepted admin secrets, kept exactly as configured; empty entries removed.
    pub fn admin_secrets(&self) -> Vec<Zeroizing<String>> {
        self.admin_passwords
            .iter()
            .filter(|secret| !secret.is_empty())
            .cloned()
            .map(Zeroizing::new)
            .collect()
    }

    pub fn projects_file(&self) -> PathBuf {
        self.data_dir.join("projects.json")
    }

    pub fn categories_file(&self) -> PathBuf {
        self.data_dir.join("categories.json")
    }

    /// SMTP settings, or `None` when the relay is not configured well enough to send.
    pub fn smtp_settings(&self) -> Option<SmtpSettings> {
        let host = self.smtp_host.as_deref().map(str::trim).filter(|h| !h.is_empty())?;
        let user = self.smtp_user.clone().filter(|u| !u.trim().is_empty());

        let from = self.smtp_from.clone()
            .filter(|f| !f.trim().is_empty())
            .or_else(|| user.clone())?;
        let recipient = self.contact_recipient.clone()
            .filter(|r| !r.trim().is_empty())
            .or_else(|| user.clone())
            .unwrap_or_else(|| from.clone());

        Some(SmtpSettings {
            host: host.to_string(),
            port: self.smtp_port,
            secure: self.smtp_secure,
            user,
            password: self.smtp_password.clone().map(Zeroizing::new),
            from,
            recipient,
        })
    }
}

#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    /// Implicit TLS (usually port 465) when true, STARTTLS otherwise.
    pub secure: bool,
    pub user: Option<String>,
    pub password: Option<Zeroizing<String>>,
    pub from: String,
    pub recipient: String,
}

fn split_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.split(','))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn fill_opt_env(current: &mut Option<String>, env_key: &str) {
    if current.as_deref().map_or(true, |v| v.trim().is_empty()) {
        *current = env::var(env_key).ok().filter(|v| !v.trim().is_empty());
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for Option<String> {
    fn redact(&self) -> &str {
        self.as_deref().unwrap_or_default().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("data_dir", &self.data_dir)
            .field("uploads_dir", &self.uploads_dir)
            .field("admin_passwords", &format!("[{} configured]", self.admin_secrets().len()))
            .field("trust_forwarded_for", &self.trust_forwarded_for)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_secure", &self.smtp_secure)
            .field("smtp_user", &self.smtp_user)
            .field("smtp_password", &self.smtp_password.redact())
            .field("smtp_from", &self.smtp_from)
            .field("contact_recipient", &self.contact_recipient)
            .finish()
    }
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("from", &self.from)
            .field("recipient", &self.recipient)
            .finish()
    }
}
