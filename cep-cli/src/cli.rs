use clap::{Parser, Subcommand};
use std::time::Duration;
use tracing::debug;

use cep_core::{Config, ProviderId, provider::providers_from_config, race};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cep", version, about = "Race address providers for a Brazilian postal code")]
pub struct Cli {
    /// Enable debug logging for the lookup race.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up a postal code, racing all configured providers.
    Lookup {
        /// Postal code (CEP); falls back to the configured default.
        postal_code: Option<String>,

        /// Override the race deadline, in milliseconds.
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// List configured providers and their endpoints.
    Providers,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Lookup { postal_code, timeout_ms } => {
                let postal_code = postal_code
                    .or_else(|| config.default_postal_code.clone())
                    .ok_or_else(|| {
                        anyhow::anyhow!(
                            "No postal code given and no default configured.\n\
                             Hint: pass one as an argument, e.g. `cep lookup 01153000`."
                        )
                    })?;

                let timeout = timeout_ms.map_or_else(|| config.timeout(), Duration::from_millis);
                let providers = providers_from_config(&config);

                debug!(%postal_code, ?timeout, providers = providers.len(), "starting lookup race");

                match race(&providers, &postal_code, timeout).await {
                    Ok(lookup) => {
                        println!("Response from {}:", lookup.provider);
                        println!("{}", lookup.address);
                    }
                    Err(err) => {
                        // One line either way; a failed lookup exits nonzero.
                        println!("Error: {err}");
                        std::process::exit(1);
                    }
                }
            }
            Command::Providers => {
                for id in ProviderId::all() {
                    match config.provider_base_url(*id) {
                        Some(base_url) => println!("{:<10} {base_url}", id.as_str()),
                        None => println!("{:<10} (not configured)", id.as_str()),
                    }
                }
            }
        }

        Ok(())
    }
}
