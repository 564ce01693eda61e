use crate::state::app_settings::AppSettings;
use crate::state::favorites::FavoritesStore;
use crate::state::leagues::LeagueStore;
use crate::state::matches::{MatchLoader, MatchSections};
use crate::state::network::LoadingState;
use crate::state::teams::TeamLoader;
use crate::state::tournaments::TournamentStore;
use chrono::{DateTime, Utc};

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

/// Every loader owns its own state; nothing here is global.
#[derive(Debug)]
pub struct AppState {
    pub leagues: LeagueStore,
    pub tournaments: TournamentStore,
    /// Matches for one tournament, team or search.
    pub matches: MatchLoader,
    /// Live, upcoming and finished matches. The live section is also the
    /// feed the network worker refreshes in live mode.
    pub sections: MatchSections,
    pub teams: TeamLoader,
    pub favorites: FavoritesStore,
    pub loading: LoadingState,
    /// When live mode last applied fresh matches.
    pub live_updated_at: Option<DateTime<Utc>>,
}

impl AppState {
    pub fn new(settings: &AppSettings) -> Self {
        let api = settings.api();
        Self {
            leagues: LeagueStore::new(api.clone()),
            tournaments: TournamentStore::new(api.clone()),
            matches: MatchLoader::new(api.clone()),
            sections: MatchSections::new(api.clone()),
            teams: TeamLoader::new(api),
            favorites: FavoritesStore::open(&settings.favorites_path),
            loading: LoadingState::default(),
            live_updated_at: None,
        }
    }
}
