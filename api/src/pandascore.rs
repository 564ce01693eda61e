//! PandaScore raw wire types: serde shapes for deserializing API responses.
//! These map to the clean domain types via the functions in normalize.rs.
use serde::{Deserialize, Deserializer};
use std::fmt;

// ---------------------------------------------------------------------------
// Shared scalars
// ---------------------------------------------------------------------------

/// PandaScore ids are numbers, but proxies and fixtures sometimes send strings.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum RawId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Number(n) => write!(f, "{n}"),
            RawId::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Lists may be missing or an explicit `null`; both read as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Prize pools arrive as integers, floats, or free text ("250000 United States Dollar").
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawAmount {
    Integer(u64),
    Float(f64),
    Text(String),
}

// ---------------------------------------------------------------------------
// Leagues  (/mlbb/leagues)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawLeague {
    pub id: Option<RawId>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub image_url: Option<String>,
    pub url: Option<String>,
    pub location: Option<String>,
}

// ---------------------------------------------------------------------------
// Tournaments  (/mlbb/tournaments/{running,upcoming,past})
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawTournament {
    pub id: Option<RawId>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub begin_at: Option<String>, // ISO 8601
    pub end_at: Option<String>,
    pub prizepool: Option<RawAmount>,
    pub currency: Option<String>,
    pub country: Option<String>, // ISO country code, often null
    pub league_id: Option<RawId>,
    pub league: Option<RawLeague>,
    pub serie: Option<RawSerie>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawSerie {
    pub id: Option<RawId>,
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub prizepool: Option<RawAmount>,
}

// ---------------------------------------------------------------------------
// Matches  (/mlbb/matches)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawMatch {
    pub id: Option<RawId>,
    pub name: Option<String>,
    pub status: Option<String>, // "not_started" | "running" | "finished" | "canceled" | "postponed"
    pub begin_at: Option<String>,
    pub end_at: Option<String>,
    pub scheduled_at: Option<String>,
    pub number_of_games: Option<u32>,
    pub tournament: Option<RawMatchTournament>,
    pub league: Option<RawLeague>,
    pub serie: Option<RawSerie>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub opponents: Vec<RawOpponentSlot>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<RawResult>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawMatchTournament {
    pub id: Option<RawId>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawOpponentSlot {
    #[serde(rename = "type")]
    pub kind: Option<String>, // "Team" for MLBB
    pub opponent: Option<RawOpponent>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawOpponent {
    pub id: Option<RawId>,
    pub name: Option<String>,
    pub acronym: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawResult {
    pub score: Option<u32>,
    pub team_id: Option<RawId>,
}

// ---------------------------------------------------------------------------
// Teams  (/mlbb/teams, /teams/{id})
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawTeam {
    pub id: Option<RawId>,
    pub name: Option<String>,
    pub acronym: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub players: Vec<RawPlayer>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawPlayer {
    pub id: Option<RawId>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
