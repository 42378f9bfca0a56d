use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::FetchError,
    model::Address,
    provider::{ProviderId, lookup_url, truncate_body},
};

use super::AddressProvider;

pub const DEFAULT_BASE_URL: &str = "https://brasilapi.com.br/api/cep/v1";

#[derive(Debug, Clone)]
pub struct BrasilApiProvider {
    base_url: String,
    http: Client,
}

impl BrasilApiProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }
}

impl Default for BrasilApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// BrasilAPI payload. Keys already match the canonical shape.
#[derive(Debug, Deserialize)]
struct BrasilApiAddress {
    #[serde(default)]
    street: String,
    #[serde(default)]
    neighborhood: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    state: String,
}

impl From<BrasilApiAddress> for Address {
    fn from(payload: BrasilApiAddress) -> Self {
        Address {
            street: payload.street,
            neighborhood: payload.neighborhood,
            city: payload.city,
            state: payload.state,
        }
    }
}

#[async_trait]
impl AddressProvider for BrasilApiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::BrasilApi
    }

    async fn fetch(&self, postal_code: &str) -> Result<Address, FetchError> {
        let url = lookup_url(&self.base_url, postal_code)?;

        debug!(provider = %self.id(), %url, "sending lookup request");

        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = res.status();
        let body = res.text().await.map_err(FetchError::BodyRead)?;

        if !status.is_success() {
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        let parsed: BrasilApiAddress = serde_json::from_str(&body)?;
        Ok(parsed.into())
    }
}
