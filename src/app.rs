use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::load_state::Generation;
use crate::state::messages::NetworkRequest;
use crate::state::network::LoadingState;
use crate::state::teams::TeamRecord;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use pandascore_api::client::{MatchFilter, MatchQuery};
use pandascore_api::{Match, Team};
use std::io;

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let state = AppState::new(&settings);
        Self { settings, state }
    }

    /// Leagues first, then tournaments joined against them.
    ///
    /// A failed league fetch still lets tournaments load, just without
    /// league enrichment.
    pub async fn initialize(&mut self) {
        let AppState { leagues, tournaments, .. } = &mut self.state;
        leagues.fetch_all_leagues().await;
        if let Some(err) = &leagues.state.error {
            warn!("continuing without league data: {err}");
        }
        tournaments.fetch_all_tournaments(leagues.leagues()).await;
        debug!(
            "initialized with {} leagues and {} tournaments",
            leagues.leagues().len(),
            tournaments.len()
        );
    }

    /// Everything the home page shows: tournaments, the three match
    /// sections and teams.
    pub async fn load_home(&mut self) {
        self.initialize().await;
        self.state.sections.load().await;
        self.state.teams.load(None).await;
    }

    /// One status, or all three sections when none is given.
    pub async fn load_matches(&mut self, status: Option<MatchFilter>) {
        match status {
            Some(status) => {
                self.state.matches.load(MatchQuery::with_status(status)).await;
            }
            None => self.state.sections.load().await,
        }
    }

    pub async fn load_tournament(&mut self, tournament_id: &str) {
        self.initialize().await;
        self.state.matches.load(MatchQuery::for_tournament(tournament_id)).await;
    }

    /// Single matches are looked up in the recent match list; there is no
    /// per-match endpoint.
    pub async fn load_match(&mut self, match_id: &str) -> Option<&Match> {
        self.state.matches.load(MatchQuery::all()).await;
        self.state.matches.find_match_by_id(match_id)
    }

    pub async fn load_team(&mut self, team_id: &str) {
        self.state.teams.load(Some(team_id)).await;
        self.state.matches.load(MatchQuery::all()).await;
    }

    pub async fn load_teams(&mut self) {
        self.state.teams.load(None).await;
    }

    pub async fn load_search(&mut self) {
        self.initialize().await;
        self.state.teams.load(None).await;
        self.state.matches.load(MatchQuery::all()).await;
    }

    pub fn team(&self) -> Option<&Team> {
        self.state.teams.teams().first()
    }

    pub fn team_record(&self, team_id: &str) -> TeamRecord {
        TeamRecord::from_matches(team_id, self.state.matches.matches())
    }

    pub fn toggle_team_favorite(&mut self, team_id: &str) -> io::Result<bool> {
        self.state.favorites.toggle_team_favorite(team_id)
    }

    pub fn toggle_tournament_favorite(&mut self, tournament_id: &str) -> io::Result<bool> {
        self.state.favorites.toggle_tournament_favorite(tournament_id)
    }

    // -----------------------------------------------------------------------
    // Live mode
    // -----------------------------------------------------------------------

    /// Start a live refresh. Any refresh still in flight becomes stale.
    pub fn live_request(&mut self) -> NetworkRequest {
        let query = MatchQuery::with_status(MatchFilter::Running);
        let generation = self.state.sections.live.begin(query.clone());
        NetworkRequest::LoadMatches { query, generation }
    }

    pub fn on_loading_changed(&mut self, loading_state: LoadingState) {
        self.state.loading = loading_state;
    }

    /// Returns false when the result belonged to a superseded request.
    pub fn on_live_matches_loaded(
        &mut self,
        generation: Generation,
        matches: Vec<Match>,
        at: DateTime<Utc>,
    ) -> bool {
        let applied = self.state.sections.live.apply(generation, Ok(matches));
        if applied {
            self.state.live_updated_at = Some(at);
        }
        applied
    }

    pub fn on_live_error(&mut self, generation: Generation, message: String) -> bool {
        self.state.sections.live.state.finish::<String>(generation, Err(message))
    }
}
