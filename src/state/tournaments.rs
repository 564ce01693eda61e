use crate::state::load_state::LoadState;
use log::{debug, error};
use pandascore_api::client::PandaScoreApi;
use pandascore_api::{League, Tournament, TournamentBuckets, TournamentStatus};

/// Tournaments partitioned into ongoing / upcoming / completed buckets.
#[derive(Debug)]
pub struct TournamentStore {
    api: PandaScoreApi,
    pub state: LoadState<TournamentBuckets>,
}

impl TournamentStore {
    pub fn new(api: PandaScoreApi) -> Self {
        Self { api, state: LoadState::default() }
    }

    /// Fetch the three buckets in parallel and join them with `leagues`.
    ///
    /// Pass an empty slice to skip league enrichment. One failing bucket
    /// empties all three.
    pub async fn fetch_all_tournaments(&mut self, leagues: &[League]) {
        let ticket = self.state.begin();
        let result = self.api.fetch_all_tournaments(leagues).await;
        match &result {
            Ok(buckets) => debug!(
                "loaded tournaments: {} ongoing, {} upcoming, {} completed",
                buckets.ongoing.len(),
                buckets.upcoming.len(),
                buckets.completed.len()
            ),
            Err(e) => error!("Error fetching tournaments: {e}"),
        }
        self.state.finish(ticket, result);
    }

    pub fn tournaments_by_status(&self, status: TournamentStatus) -> &[Tournament] {
        self.state.data.by_status(status)
    }

    /// Ongoing, then upcoming, then completed.
    pub fn all_tournaments(&self) -> Vec<&Tournament> {
        self.state.data.iter().collect()
    }

    pub fn find_tournament_by_id(&self, id: Option<&str>) -> Option<&Tournament> {
        let id = id.filter(|id| !id.is_empty())?;
        self.state.data.find_by_id(id)
    }

    pub fn featured(&self) -> Vec<&Tournament> {
        self.state.data.iter().filter(|t| t.featured).collect()
    }

    pub fn len(&self) -> usize {
        self.state.data.len()
    }
}
