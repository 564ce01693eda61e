use crate::state::load_state::Generation;
use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use pandascore_api::Match;
use pandascore_api::client::MatchQuery;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadMatches { query: MatchQuery, generation: Generation },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    MatchesLoaded { generation: Generation, matches: Vec<Match> },
    Error { generation: Generation, message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    RefreshTick,
}
