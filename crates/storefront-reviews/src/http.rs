use anyhow::Context;
use reqwest::blocking::Client;
use tracing::debug;

use storefront_core::config::ReviewSettings;
use storefront_core::traits::ReviewTransport;
use storefront_core::types::{ReviewPayload, SubmitAck};

/// Posts reviews as JSON to `base_url + endpoint`.
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    pub fn new(settings: &ReviewSettings) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .context("building HTTP client")?;
        Ok(Self { client, url: settings.url() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ReviewTransport for HttpTransport {
    fn submit(&self, payload: &ReviewPayload) -> anyhow::Result<SubmitAck> {
        debug!(url = %self.url, "posting review");
        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .with_context(|| format!("POST {}", self.url))?
            .error_for_status()?;
        let body = response.text()?;
        SubmitAck::parse(&body).with_context(|| format!("unexpected response from {}", self.url))
    }
}
