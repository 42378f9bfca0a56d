//! Core library for the `cep` CLI.
//!
//! This crate defines:
//! - Configuration handling (timeout, default postal code, provider endpoints)
//! - Abstraction over address providers
//! - The provider race: concurrent lookups where the first answer wins
//!
//! It is used by `cep-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod race;

pub use config::{Config, ProviderEndpoint};
pub use error::{FetchError, LookupError};
pub use model::{Address, Lookup, Outcome};
pub use provider::{AddressProvider, ProviderId};
pub use race::race;
