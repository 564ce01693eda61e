use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error};
use pandascore_api::client::PandaScoreApi;
use tokio::sync::mpsc;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct LoadingState {
    pub is_loading: bool,
    /// The last request failed.
    pub failed: bool,
}

/// Runs requests off the UI loop, one at a time, in arrival order.
pub struct NetworkWorker {
    client: PandaScoreApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
}

impl NetworkWorker {
    pub fn new(
        client: PandaScoreApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self { client, requests, responses }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.set_loading(LoadingState { is_loading: true, failed: false }).await;

            let response = match request {
                NetworkRequest::LoadMatches { query, generation } => {
                    debug!("loading matches {query:?}");
                    match self.client.fetch_matches(&query).await {
                        Ok(matches) => NetworkResponse::MatchesLoaded { generation, matches },
                        Err(e) => NetworkResponse::Error { generation, message: e.to_string() },
                    }
                }
            };

            debug!("network request complete");
            let failed = matches!(response, NetworkResponse::Error { .. });
            self.set_loading(LoadingState { is_loading: false, failed }).await;

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn set_loading(&self, loading_state: LoadingState) {
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;
    }
}
