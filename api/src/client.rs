use crate::normalize::{map_league, map_match, map_team, map_tournament};
use crate::pandascore::{RawLeague, RawMatch, RawTeam, RawTournament};
use crate::{League, Match, Team, Tournament, TournamentBuckets, TournamentStatus};
use chrono::Utc;
use futures_util::future::try_join3;
use log::debug;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_BASE_URL: &str = "https://api.pandascore.co";
pub const MISSING_KEY_MESSAGE: &str =
    "API key not configured. Please set PANDASCORE_KEY in your .env file.";

// Single page only; PandaScore pagination is not followed.
const LEAGUES_PER_PAGE: u32 = 100;
const TEAMS_PER_PAGE: u32 = 100;
const MATCHES_PER_PAGE: u32 = 50;

/// PandaScore client scoped to Mobile Legends: Bang Bang.
#[derive(Debug, Clone)]
pub struct PandaScoreApi {
    client: Client,
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl Default for PandaScoreApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("land-of-dawn/0.1 (esports tracker)")
                .build()
                .unwrap_or_default(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            token: None,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    /// No token configured; raised before any request is made.
    MissingApiKey,
    /// Upstream answered with a non-2xx status.
    Status {
        what: &'static str,
        url: String,
        status: u16,
        reason: String,
    },
    Network(reqwest::Error, String),
    Parsing(reqwest::Error, String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingApiKey => f.write_str(MISSING_KEY_MESSAGE),
            ApiError::Status { what, status, reason, .. } => {
                write!(f, "Failed to fetch {what}: {status} {reason}")
            }
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Upstream `filter[status]` vocabulary for the matches endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchFilter {
    Running,
    NotStarted,
    Finished,
}

impl MatchFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchFilter::Running => "running",
            MatchFilter::NotStarted => "not_started",
            MatchFilter::Finished => "finished",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "running" | "live" => Some(MatchFilter::Running),
            "not_started" | "upcoming" => Some(MatchFilter::NotStarted),
            "finished" | "completed" => Some(MatchFilter::Finished),
            _ => None,
        }
    }
}

/// Parameters of one matches request. Always newest first, capped at 50.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchQuery {
    pub tournament_id: Option<String>,
    pub status: Option<MatchFilter>,
}

impl MatchQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_tournament(id: impl Into<String>) -> Self {
        Self { tournament_id: Some(id.into()), status: None }
    }

    pub fn with_status(status: MatchFilter) -> Self {
        Self { tournament_id: None, status: Some(status) }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(4);
        if let Some(id) = &self.tournament_id {
            params.push(("filter[tournament_id]", id.clone()));
        }
        if let Some(status) = self.status {
            params.push(("filter[status]", status.as_str().to_owned()));
        }
        params.push(("sort", "-begin_at".to_owned()));
        params.push(("per_page", MATCHES_PER_PAGE.to_string()));
        params
    }
}

impl PandaScoreApi {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
            ..Self::default()
        }
    }

    /// Point the client at a proxy or a test server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Fetch the league list (first page only).
    pub async fn fetch_leagues(&self) -> ApiResult<Vec<League>> {
        let raw: Vec<RawLeague> = self
            .get(
                "leagues",
                "/mlbb/leagues",
                &[("per_page", LEAGUES_PER_PAGE.to_string())],
            )
            .await?;
        Ok(raw.into_iter().map(map_league).collect())
    }

    /// Fetch one tournament bucket and join each record with `leagues`.
    pub async fn fetch_tournaments(
        &self,
        status: TournamentStatus,
        leagues: &[League],
    ) -> ApiResult<Vec<Tournament>> {
        let path = format!("/mlbb/tournaments/{}", status.bucket());
        let raw: Vec<RawTournament> = self.get("tournaments", &path, &[]).await?;
        let now = Utc::now();
        Ok(raw
            .into_iter()
            .map(|t| map_tournament(t, status, leagues, now))
            .collect())
    }

    /// Fetch all three buckets concurrently. Any failure fails the whole batch.
    pub async fn fetch_all_tournaments(&self, leagues: &[League]) -> ApiResult<TournamentBuckets> {
        let (ongoing, upcoming, completed) = try_join3(
            self.fetch_tournaments(TournamentStatus::Ongoing, leagues),
            self.fetch_tournaments(TournamentStatus::Upcoming, leagues),
            self.fetch_tournaments(TournamentStatus::Completed, leagues),
        )
        .await?;
        Ok(TournamentBuckets { ongoing, upcoming, completed })
    }

    pub async fn fetch_matches(&self, query: &MatchQuery) -> ApiResult<Vec<Match>> {
        let raw: Vec<RawMatch> = self.get("matches", "/mlbb/matches", &query.params()).await?;
        Ok(raw
            .into_iter()
            .map(|m| map_match(m, query.tournament_id.as_deref()))
            .collect())
    }

    /// Fetch the team list (first page only).
    pub async fn fetch_teams(&self) -> ApiResult<Vec<Team>> {
        let raw: Vec<RawTeam> = self
            .get(
                "teams",
                "/mlbb/teams",
                &[("per_page", TEAMS_PER_PAGE.to_string())],
            )
            .await?;
        Ok(raw.into_iter().map(map_team).collect())
    }

    /// Fetch a single team by id or slug. A 404 is reported as `Ok(None)`,
    /// and so is an id that could not name a team.
    pub async fn fetch_team(&self, team_id: &str) -> ApiResult<Option<Team>> {
        if !self.has_token() {
            return Err(ApiError::MissingApiKey);
        }
        let team_id = team_id.trim();
        if !is_plain_id(team_id) {
            debug!("not a team id or slug: {team_id:?}");
            return Ok(None);
        }
        let path = format!("/teams/{team_id}");
        match self.get::<RawTeam>("teams", &path, &[]).await {
            Ok(raw) => Ok(Some(map_team(raw))),
            Err(e) if e.status() == Some(404) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        what: &'static str,
        path: &str,
        params: &[(&str, String)],
    ) -> ApiResult<T> {
        let token = self.token.as_deref().ok_or(ApiError::MissingApiKey)?;
        // Never let the token end up in logs or error messages.
        let url = format!("{}{path}", self.base_url);
        debug!("GET {url} {params:?}");

        let response = self
            .client
            .get(&url)
            .query(&[("token", token)])
            .query(params)
            .header(ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.without_url(), url.clone()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                what,
                url,
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_owned(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e.without_url(), url))
    }
}

/// Ids and slugs go into the request path as-is, so only allow characters
/// that cannot change the path or start a query.
fn is_plain_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
