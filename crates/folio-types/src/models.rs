use std::fmt;

use serde::{Deserialize, Serialize};

/// Page-view and like totals for one client.
///
/// Field names on the wire match what the site has always written to local
/// storage, so existing stored counters keep parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementCounters {
    #[serde(rename = "page_views")]
    pub view_count: u64,
    #[serde(rename = "likes")]
    pub like_count: u64,
}

impl EngagementCounters {
    /// State written on the very first page load.
    pub fn first_view() -> Self {
        Self {
            view_count: 1,
            like_count: 0,
        }
    }
}

/// Identifiers for the transactional-email provider.
///
/// Missing fields in a stored document decode as empty strings so that an
/// incomplete record still loads and is then reported as not configured.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagingCredentials {
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub template_id: String,
}

impl MessagingCredentials {
    pub fn new(
        public_key: impl Into<String>,
        service_id: impl Into<String>,
        template_id: impl Into<String>,
    ) -> Self {
        Self {
            public_key: public_key.into(),
            service_id: service_id.into(),
            template_id: template_id.into(),
        }
    }

    /// Name of the first empty field, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("publicKey", &self.public_key),
            ("serviceId", &self.service_id),
            ("templateId", &self.template_id),
        ]
        .into_iter()
        .find(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
    }

    pub fn is_complete(&self) -> bool {
        self.missing_field().is_none()
    }
}

// Never print the raw identifiers, not even in debug logs.
impl fmt::Debug for MessagingCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessagingCredentials")
            .field("public_key", &mask(&self.public_key))
            .field("service_id", &mask(&self.service_id))
            .field("template_id", &mask(&self.template_id))
            .finish()
    }
}

/// Hide everything but the last four characters of a secret.
pub fn mask(value: &str) -> String {
    let total = value.chars().count();
    if total <= 4 {
        return "•".repeat(total);
    }
    let tail: String = value.chars().skip(total - 4).collect();
    format!("{}{}", "•".repeat(total - 4), tail)
}

/// Fixed window bounding outbound sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitWindow {
    pub count: u32,
    /// Unix milliseconds after which the window is spent.
    #[serde(rename = "resetTime")]
    pub reset_at: i64,
}

impl RateLimitWindow {
    pub fn fresh(now_ms: i64, window_ms: i64) -> Self {
        Self {
            count: 0,
            reset_at: now_ms.saturating_add(window_ms),
        }
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms > self.reset_at
    }
}

/// A contact-form submission as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(default)]
    pub from_name: String,
    #[serde(default)]
    pub from_email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactMessage {
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("from_name", &self.from_name),
            ("from_email", &self.from_email),
            ("subject", &self.subject),
            ("message", &self.message),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }

    /// Address the message to the site owner.
    pub fn into_payload(self, to_email: &str) -> EmailPayload {
        EmailPayload {
            from_name: self.from_name,
            from_email: self.from_email,
            subject: self.subject,
            message: self.message,
            to_email: to_email.to_string(),
        }
    }
}

/// Template parameters handed to the email transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailPayload {
    pub from_name: String,
    pub from_email: String,
    pub subject: String,
    pub message: String,
    pub to_email: String,
}
