use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::{DisposableDomains, RefreshError};

/// Community-maintained list of disposable domains (JSON array of strings).
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/disposable/disposable-email-domains/master/domains.json";

/// Background task that periodically extends a [`DisposableDomains`] store
/// from a remote JSON list. Fetches once immediately, then every `interval`.
#[derive(Debug)]
pub struct DisposableRefresher {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl DisposableRefresher {
    /// Spawn the refresher on the current tokio runtime.
    pub fn start(
        store: DisposableDomains,
        client: reqwest::Client,
        source_url: impl Into<String>,
        interval: Duration,
    ) -> Self {
        let token = CancellationToken::new();
        let url = source_url.into();
        let task_token = token.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = task_token.cancelled() => break,
                    _ = ticker.tick() => {}
                }
                let fetched = tokio::select! {
                    _ = task_token.cancelled() => break,
                    fetched = fetch_domains(&client, &url) => fetched,
                };
                match fetched {
                    Ok(domains) => {
                        tracing::debug!(count = domains.len(), url = %url, "disposable list refreshed");
                        store.add(domains);
                    }
                    Err(err) => tracing::warn!(error = %err, "disposable list refresh failed"),
                }
            }
        });
        Self { token, handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Cancel the task and wait for it to exit.
    pub async fn stop(self) {
        self.token.cancel();
        if let Err(err) = self.handle.await {
            tracing::warn!(error = %err, "disposable refresher task ended abnormally");
        }
    }
}

pub(crate) async fn fetch_domains(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<String>, RefreshError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| RefreshError::fetch(url, err))?;
    let status = response.status();
    if !status.is_success() {
        return Err(RefreshError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let body = response
        .bytes()
        .await
        .map_err(|err| RefreshError::fetch(url, err))?;
    serde_json::from_slice(&body).map_err(|err| RefreshError::decode(url, err))
}
