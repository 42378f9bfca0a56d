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

pub const DEFAULT_BASE_URL: &str = "http://viacep.com.br/ws";

#[derive(Debug, Clone)]
pub struct ViaCepProvider {
    base_url: String,
    http: Client,
}

impl ViaCepProvider {
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

impl Default for ViaCepProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// ViaCEP payload. Portuguese keys, mapped onto the canonical shape.
/// An unknown CEP answers `{"erro": true}`, which decodes to an all-empty
/// address, matching the field-absent rule.
#[derive(Debug, Deserialize)]
struct ViaCepAddress {
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
}

impl From<ViaCepAddress> for Address {
    fn from(payload: ViaCepAddress) -> Self {
        Address {
            street: payload.logradouro,
            neighborhood: payload.bairro,
            city: payload.localidade,
            state: payload.uf,
        }
    }
}

#[async_trait]
impl AddressProvider for ViaCepProvider {
    fn id(&self) -> ProviderId {
        ProviderId::ViaCep
    }

    async fn fetch(&self, postal_code: &str) -> Result<Address, FetchError> {
        let url = lookup_url(&self.base_url, &format!("{postal_code}/json/"))?;

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

        let parsed: ViaCepAddress = serde_json::from_str(&body)?;
        Ok(parsed.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portuguese_keys_map_onto_canonical_fields() {
        let payload: ViaCepAddress = serde_json::from_str(
            r#"{"logradouro":"S","bairro":"N","localidade":"C","uf":"ST"}"#,
        )
        .expect("payload should decode");

        let address = Address::from(payload);
        assert_eq!(address.street, "S");
        assert_eq!(address.neighborhood, "N");
        assert_eq!(address.city, "C");
        assert_eq!(address.state, "ST");
    }

    #[test]
    fn unknown_cep_body_yields_empty_address() {
        let payload: ViaCepAddress =
            serde_json::from_str(r#"{"erro": true}"#).expect("payload should decode");

        assert_eq!(Address::from(payload), Address::default());
    }
}
