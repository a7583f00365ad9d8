use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Serialize;

use folio_core::Transport;
use folio_types::models::{EmailPayload, MessagingCredentials};

/// Forwards the send contract as JSON to the email provider's endpoint.
pub struct RelayTransport {
    client: reqwest::Client,
    url: String,
}

#[derive(Serialize)]
struct RelayRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a EmailPayload,
}

impl RelayTransport {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Transport for RelayTransport {
    async fn send(&self, credentials: &MessagingCredentials, payload: &EmailPayload) -> Result<()> {
        let body = RelayRequest {
            service_id: &credentials.service_id,
            template_id: &credentials.template_id,
            user_id: &credentials.public_key,
            template_params: payload,
        };

        let resp = self.client.post(&self.url).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(anyhow!("relay returned {}: {}", status, text.trim()));
        }

        Ok(())
    }
}
