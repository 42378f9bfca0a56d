use crate::{
    Config,
    error::FetchError,
    model::Address,
    provider::{brasilapi::BrasilApiProvider, viacep::ViaCepProvider},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug, sync::Arc};

pub mod brasilapi;
pub mod viacep;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    BrasilApi,
    ViaCep,
}

impl ProviderId {
    /// Short name used for config keys and CLI arguments.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::BrasilApi => "brasilapi",
            ProviderId::ViaCep => "viacep",
        }
    }

    /// Human-facing name, as printed in lookup output.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::BrasilApi => "BrasilAPI",
            ProviderId::ViaCep => "ViaCEP",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::BrasilApi, ProviderId::ViaCep]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "brasilapi" => Ok(ProviderId::BrasilApi),
            "viacep" => Ok(ProviderId::ViaCep),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: brasilapi, viacep."
            )),
        }
    }
}

/// One address-lookup service.
///
/// `fetch` performs a single GET against the provider's endpoint and
/// normalizes the payload. It never retries; the caller bounds its runtime
/// with the race deadline.
#[async_trait]
pub trait AddressProvider: Send + Sync + Debug {
    fn id(&self) -> ProviderId;

    async fn fetch(&self, postal_code: &str) -> Result<Address, FetchError>;
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> anyhow::Result<Arc<dyn AddressProvider>> {
    let base_url = config.provider_base_url(id).ok_or_else(|| {
        anyhow::anyhow!(
            "No endpoint configured for provider '{}'.\n\
                 Hint: add a [providers.{}] section with a base_url to the config file.",
            id.as_str(),
            id.as_str(),
        )
    })?;

    let boxed: Arc<dyn AddressProvider> = match id {
        ProviderId::BrasilApi => Arc::new(BrasilApiProvider::with_base_url(base_url)),
        ProviderId::ViaCep => Arc::new(ViaCepProvider::with_base_url(base_url)),
    };

    Ok(boxed)
}

/// Construct every provider the config has an endpoint for, in a fixed order.
pub fn providers_from_config(config: &Config) -> Vec<Arc<dyn AddressProvider>> {
    ProviderId::all()
        .iter()
        .filter_map(|id| provider_from_config(*id, config).ok())
        .collect()
}

/// Join a base URL and a postal code path segment.
pub(crate) fn lookup_url(base_url: &str, path: &str) -> Result<url::Url, FetchError> {
    let joined = format!("{}/{}", base_url.trim_end_matches('/'), path);
    Ok(url::Url::parse(&joined)?)
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn provider_id_as_str_roundtrip() {
        for id in ProviderId::all() {
            let s = id.as_str();
            let parsed = ProviderId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn unknown_provider_error() {
        let err = ProviderId::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn display_uses_human_name() {
        assert_eq!(ProviderId::BrasilApi.to_string(), "BrasilAPI");
        assert_eq!(ProviderId::ViaCep.to_string(), "ViaCEP");
    }

    #[test]
    fn provider_from_config_errors_when_endpoint_missing() {
        let mut cfg = Config::default();
        cfg.providers.remove(ProviderId::BrasilApi.as_str());

        let err = provider_from_config(ProviderId::BrasilApi, &cfg).unwrap_err();
        assert!(err.to_string().contains("No endpoint configured for provider"));
    }

    #[test]
    fn default_config_yields_both_providers() {
        let cfg = Config::default();
        let providers = providers_from_config(&cfg);

        let ids: Vec<_> = providers.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![ProviderId::BrasilApi, ProviderId::ViaCep]);
    }

    #[test]
    fn lookup_url_joins_without_doubling_slashes() {
        let url = lookup_url("https://example.com/api/", "01153000").expect("valid url");
        assert_eq!(url.as_str(), "https://example.com/api/01153000");
    }

    #[test]
    fn lookup_url_rejects_garbage_base() {
        let err = lookup_url("not a url", "01153000").unwrap_err();
        assert!(matches!(err, FetchError::Url(_)));
    }
}
