use crate::state::load_state::LoadState;
use log::{debug, error};
use pandascore_api::client::{ApiResult, PandaScoreApi};
use pandascore_api::{Match, MatchStatus, Team};

/// Team list, or a single team when loaded by id.
#[derive(Debug)]
pub struct TeamLoader {
    api: PandaScoreApi,
    pub state: LoadState<Vec<Team>>,
}

impl TeamLoader {
    pub fn new(api: PandaScoreApi) -> Self {
        Self { api, state: LoadState::default() }
    }

    /// With an id, the result holds that team alone, or nothing if upstream
    /// does not know it. Without one, the first page of all teams.
    pub async fn load(&mut self, team_id: Option<&str>) -> &LoadState<Vec<Team>> {
        let ticket = self.state.begin();
        let result = self.fetch(team_id).await;
        match &result {
            Ok(teams) => debug!("loaded {} teams", teams.len()),
            Err(e) => error!("Error fetching teams: {e}"),
        }
        self.state.finish(ticket, result);
        &self.state
    }

    async fn fetch(&self, team_id: Option<&str>) -> ApiResult<Vec<Team>> {
        match team_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => Ok(self.api.fetch_team(id).await?.into_iter().collect()),
            None => self.api.fetch_teams().await,
        }
    }

    pub fn teams(&self) -> &[Team] {
        &self.state.data
    }

    /// Top of the list, used for the home page summary.
    pub fn top(&self, n: usize) -> &[Team] {
        &self.teams()[..n.min(self.teams().len())]
    }
}

/// Win/loss summary derived from completed matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamRecord {
    pub wins: u32,
    pub losses: u32,
    pub completed: u32,
}

impl TeamRecord {
    pub fn from_matches<'a>(team_id: &str, matches: impl IntoIterator<Item = &'a Match>) -> Self {
        let mut record = TeamRecord::default();
        for m in matches {
            if m.status != MatchStatus::Completed || !m.involves(team_id) {
                continue;
            }
            record.completed += 1;
            match m.winner() {
                Some(winner) if winner.id == team_id => record.wins += 1,
                Some(_) => record.losses += 1,
                None => {}
            }
        }
        record
    }

    /// Rounded percentage of completed matches won.
    pub fn win_rate(&self) -> u32 {
        if self.completed == 0 {
            return 0;
        }
        ((self.wins as f64 / self.completed as f64) * 100.0).round() as u32
    }
}
