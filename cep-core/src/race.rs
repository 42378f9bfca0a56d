use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time;
use tracing::debug;

use crate::{
    error::{FetchError, LookupError},
    model::{Lookup, Outcome},
    provider::AddressProvider,
};

/// Slack added to each fetch bound past the race deadline, so deadline
/// expiry is always reported by the coordinator as `Timeout` rather than
/// racing a fetch-side `DeadlineExceeded` for the same instant.
const FETCH_GRACE: Duration = Duration::from_millis(50);

/// Run all providers concurrently and return the first outcome to arrive.
///
/// The first outcome decides the call, success or failure; later outcomes
/// are never consumed. `timeout` bounds the whole race and cuts off every
/// in-flight fetch shortly after it fires.
pub async fn race(
    providers: &[Arc<dyn AddressProvider>],
    postal_code: &str,
    timeout: Duration,
) -> Result<Lookup, LookupError> {
    if providers.is_empty() {
        return Err(LookupError::NoProviders);
    }

    // One slot per producer: a losing fetcher's send completes immediately
    // even when the coordinator has already stopped reading, so its task
    // always terminates.
    let (tx, mut rx) = mpsc::channel::<Outcome>(providers.len());

    for provider in providers {
        let provider = Arc::clone(provider);
        let tx = tx.clone();
        let postal_code = postal_code.to_owned();

        tokio::spawn(async move {
            let result = match time::timeout(timeout + FETCH_GRACE, provider.fetch(&postal_code))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(FetchError::DeadlineExceeded),
            };

            let outcome = Outcome { provider: provider.id(), result };
            if tx.send(outcome).await.is_err() {
                debug!(provider = %provider.id(), "race already resolved, outcome discarded");
            }
        });
    }
    drop(tx);

    tokio::select! {
        first = rx.recv() => match first {
            Some(Outcome { provider, result: Ok(address) }) => {
                debug!(%provider, "race won");
                Ok(Lookup { provider, address })
            }
            Some(Outcome { provider, result: Err(source) }) => {
                debug!(%provider, error = %source, "first outcome was a failure");
                Err(LookupError::Fetch { provider, source })
            }
            // Every producer sends exactly once before dropping its sender,
            // so the channel cannot close before delivering an outcome.
            None => Err(LookupError::Timeout),
        },
        () = time::sleep(timeout) => {
            debug!(?timeout, "deadline expired before any outcome");
            Err(LookupError::Timeout)
        }
    }
}
