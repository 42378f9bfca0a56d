use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::provider::ProviderId;

/// Canonical address shape shared by all providers.
///
/// Fields a provider leaves out of its payload stay empty strings; an
/// `Address` is never partially built from a payload that failed to decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  street:       {}", self.street)?;
        writeln!(f, "  neighborhood: {}", self.neighborhood)?;
        writeln!(f, "  city:         {}", self.city)?;
        write!(f, "  state:        {}", self.state)
    }
}

/// Result of a single fetch, tagged with the provider that produced it.
#[derive(Debug)]
pub struct Outcome {
    pub provider: ProviderId,
    pub result: Result<Address, FetchError>,
}

/// Winner of a provider race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub provider: ProviderId,
    pub address: Address,
}
