use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

use crate::mailer::{MailError, SmtpSettings, DEFAULT_SMTP_PORT};
use crate::session::Flow;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    pub flow: Option<Flow>,
    pub images_dir: Option<PathBuf>,
    pub download_dir: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub smtp_host: Option<String>,
    #[serde(default, deserialize_with = "port_from_number_or_string")]
    pub smtp_port: Option<String>,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_sender: Option<String>,
    pub recipient_email: Option<String>,
    pub starttls_fallback: Option<bool>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path` (or the default location), then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::get_config_path()?,
        };
        let mut config = Self::load_from(&path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load a specific file. A missing file gives the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    /// SMTP values from the environment win over the file, the same way API
    /// keys do.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let fields: [(&str, &mut Option<String>); 6] = [
            ("SMTP_HOST", &mut self.smtp_host),
            ("SMTP_PORT", &mut self.smtp_port),
            ("SMTP_USERNAME", &mut self.smtp_username),
            ("SMTP_PASSWORD", &mut self.smtp_password),
            ("SMTP_SENDER", &mut self.smtp_sender),
            ("RECIPIENT_EMAIL", &mut self.recipient_email),
        ];
        for (key, field) in fields {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *field = Some(value);
            }
        }
    }

    pub fn flow(&self) -> Flow {
        self.flow.unwrap_or_default()
    }

    pub fn images_dir(&self) -> PathBuf {
        self.images_dir.clone().unwrap_or_else(|| PathBuf::from("images"))
    }

    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// The swipe flow falls back to STARTTLS unless told otherwise.
    pub fn starttls_fallback(&self) -> bool {
        self.starttls_fallback.unwrap_or(self.flow() == Flow::Swipe)
    }

    /// Validate everything the mailer needs. The recipient is checked first so
    /// an unconfigured planner reports the most useful missing value.
    pub fn smtp_settings(&self) -> Result<SmtpSettings, MailError> {
        let recipient = required(&self.recipient_email, "RECIPIENT_EMAIL")?;
        let host = required(&self.smtp_host, "SMTP_HOST")?;
        let username = required(&self.smtp_username, "SMTP_USERNAME")?;
        let password = required(&self.smtp_password, "SMTP_PASSWORD")?;

        let port = match self.smtp_port.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_SMTP_PORT,
            Some(raw) => match raw.parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => return Err(MailError::InvalidPort(raw.to_string())),
            },
        };

        let sender = self
            .smtp_sender
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| username.clone());

        Ok(SmtpSettings {
            host,
            port,
            username,
            password,
            sender,
            recipient,
        })
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("date-planner").join("config.json"))
    }
}

/// Accept `"smtp_port": 465` as well as `"smtp_port": "465"`.
fn port_from_number_or_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u64),
        Text(String),
    }

    Ok(Option::<Port>::deserialize(deserializer)?.map(|port| match port {
        Port::Number(n) => n.to_string(),
        Port::Text(s) => s,
    }))
}

fn required(value: &Option<String>, name: &'static str) -> Result<String, MailError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(MailError::MissingSetting(name))
}
