use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use folio_core::GatePolicy;

pub const DEFAULT_RELAY_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Server settings read from the environment (after `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub admin_token: Option<String>,
    pub contact_email: String,
    pub relay_url: String,
    pub policy: GatePolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = GatePolicy::default();

        let port = match var("FOLIO_PORT") {
            Some(v) => v.parse().context("FOLIO_PORT must be a port number")?,
            None => 3000,
        };
        let max_emails = match var("FOLIO_RATE_LIMIT_MAX") {
            Some(v) => v.parse().context("FOLIO_RATE_LIMIT_MAX must be an integer")?,
            None => defaults.max_emails,
        };
        let window = match var("FOLIO_RATE_LIMIT_WINDOW_MS") {
            Some(v) => Duration::from_millis(
                v.parse()
                    .context("FOLIO_RATE_LIMIT_WINDOW_MS must be milliseconds")?,
            ),
            None => defaults.window,
        };

        Ok(Self {
            host: var("FOLIO_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            db_path: var("FOLIO_DB_PATH")
                .unwrap_or_else(|| "folio.db".into())
                .into(),
            admin_token: var("FOLIO_ADMIN_TOKEN").filter(|t| !t.is_empty()),
            contact_email: var("FOLIO_CONTACT_EMAIL").unwrap_or_default(),
            relay_url: var("FOLIO_RELAY_URL").unwrap_or_else(|| DEFAULT_RELAY_URL.into()),
            policy: GatePolicy { max_emails, window },
        })
    }
}
