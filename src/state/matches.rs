use crate::state::load_state::{Generation, LoadState};
use log::{debug, error};
use pandascore_api::Match;
use pandascore_api::client::{ApiResult, MatchFilter, MatchQuery, PandaScoreApi};
use std::cmp::Reverse;

/// One matches request and its result.
///
/// Changing the query and reloading supersedes any request still in flight.
#[derive(Debug)]
pub struct MatchLoader {
    api: PandaScoreApi,
    query: MatchQuery,
    pub state: LoadState<Vec<Match>>,
}

impl MatchLoader {
    pub fn new(api: PandaScoreApi) -> Self {
        Self { api, query: MatchQuery::all(), state: LoadState::default() }
    }

    pub async fn load(&mut self, query: MatchQuery) -> &LoadState<Vec<Match>> {
        let ticket = self.begin(query);
        let result = self.api.fetch_matches(&self.query).await;
        self.apply(ticket, result);
        &self.state
    }

    /// Record `query` as current and hand out a ticket for the request.
    /// Used when the fetch itself runs on the network worker.
    pub fn begin(&mut self, query: MatchQuery) -> Generation {
        debug!("loading matches for {query:?}");
        self.query = query;
        self.state.begin()
    }

    pub fn apply(&mut self, ticket: Generation, result: ApiResult<Vec<Match>>) -> bool {
        if let Err(e) = &result
            && self.state.is_current(ticket)
        {
            error!("Error fetching matches: {e}");
        }
        self.state.finish(ticket, result)
    }

    pub fn matches(&self) -> &[Match] {
        &self.state.data
    }

    pub fn live(&self) -> impl Iterator<Item = &Match> {
        self.matches().iter().filter(|m| m.is_live())
    }

    pub fn find_match_by_id(&self, id: &str) -> Option<&Match> {
        self.matches().iter().find(|m| m.id == id)
    }
}

/// One loader per match status, each with its own request. A single
/// unfiltered page is mostly future fixtures, so live and finished matches
/// need their own queries.
#[derive(Debug)]
pub struct MatchSections {
    pub live: MatchLoader,
    pub upcoming: MatchLoader,
    pub finished: MatchLoader,
}

impl MatchSections {
    pub fn new(api: PandaScoreApi) -> Self {
        Self {
            live: MatchLoader::new(api.clone()),
            upcoming: MatchLoader::new(api.clone()),
            finished: MatchLoader::new(api),
        }
    }

    /// Load all three sections concurrently. Each one fails on its own.
    pub async fn load(&mut self) {
        let Self { live, upcoming, finished } = self;
        tokio::join!(
            live.load(MatchQuery::with_status(MatchFilter::Running)),
            upcoming.load(MatchQuery::with_status(MatchFilter::NotStarted)),
            finished.load(MatchQuery::with_status(MatchFilter::Finished)),
        );
    }

    /// Scheduled matches, soonest first. Undated ones go last.
    pub fn up_next(&self) -> Vec<&Match> {
        let mut found: Vec<&Match> = self.upcoming.matches().iter().collect();
        found.sort_by_key(|m| (m.sort_date().is_none(), m.sort_date()));
        found
    }

    /// Finished matches, newest first.
    pub fn recent(&self) -> Vec<&Match> {
        let mut found: Vec<&Match> = self.finished.matches().iter().collect();
        found.sort_by_key(|m| (m.sort_date().is_none(), Reverse(m.sort_date())));
        found
    }
}

/// Matches a team played in, newest first. Undated matches go last.
pub fn matches_for_team<'a>(matches: &'a [Match], team_id: &str) -> Vec<&'a Match> {
    let mut found: Vec<&Match> = matches.iter().filter(|m| m.involves(team_id)).collect();
    found.sort_by_key(|m| (m.sort_date().is_none(), Reverse(m.sort_date())));
    found
}
