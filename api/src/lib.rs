pub mod client;
pub mod normalize;
pub mod pandascore;

use chrono::{DateTime, Utc};
use pandascore::{RawLeague, RawMatch, RawTeam, RawTournament};

// ---------------------------------------------------------------------------
// Domain types, independent of the PandaScore wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct League {
    pub id: String,
    pub name: String,
    pub slug: Option<String>,
    pub image_url: Option<String>,
    pub url: Option<String>,
    pub location: Option<String>,
    /// Upstream record, kept so lookups can fall back to the raw id/name.
    pub raw: RawLeague,
}

impl League {
    pub fn matches_id(&self, id: &str) -> bool {
        self.id == id || self.raw.id.as_ref().is_some_and(|raw| raw.to_string() == id)
    }

    /// Case-insensitive substring match on the normalized or raw name.
    pub fn matches_name(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self
                .raw
                .name
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&needle))
    }
}

/// Which upstream bucket a tournament was fetched from. Never derived from dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TournamentStatus {
    #[default]
    Ongoing,
    Upcoming,
    Completed,
}

impl TournamentStatus {
    pub const ALL: [TournamentStatus; 3] = [
        TournamentStatus::Ongoing,
        TournamentStatus::Upcoming,
        TournamentStatus::Completed,
    ];

    /// Path segment of the upstream tournaments endpoint.
    pub fn bucket(&self) -> &'static str {
        match self {
            TournamentStatus::Ongoing => "running",
            TournamentStatus::Upcoming => "upcoming",
            TournamentStatus::Completed => "past",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TournamentStatus::Ongoing => "ongoing",
            TournamentStatus::Upcoming => "upcoming",
            TournamentStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ongoing" | "running" => Some(TournamentStatus::Ongoing),
            "upcoming" => Some(TournamentStatus::Upcoming),
            "completed" | "past" => Some(TournamentStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Tournament {
    pub id: String,
    pub name: String, // "<League> - <Tournament>", rebranded
    pub status: TournamentStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub prize_pool: String, // display string: "$250,000", "TBA"
    pub featured: bool,
    pub description: String,
    pub logo: Option<String>,
    pub league_id: Option<String>,
    pub league: Option<League>,
    pub raw: RawTournament,
}

impl Tournament {
    pub fn matches_id(&self, id: &str) -> bool {
        self.id == id || self.raw.id.as_ref().is_some_and(|raw| raw.to_string() == id)
    }
}

/// Tournaments partitioned by the bucket they were fetched from.
#[derive(Debug, Clone, Default)]
pub struct TournamentBuckets {
    pub ongoing: Vec<Tournament>,
    pub upcoming: Vec<Tournament>,
    pub completed: Vec<Tournament>,
}

impl TournamentBuckets {
    pub fn by_status(&self, status: TournamentStatus) -> &[Tournament] {
        match status {
            TournamentStatus::Ongoing => &self.ongoing,
            TournamentStatus::Upcoming => &self.upcoming,
            TournamentStatus::Completed => &self.completed,
        }
    }

    /// Ongoing, then upcoming, then completed.
    pub fn iter(&self) -> impl Iterator<Item = &Tournament> {
        self.ongoing
            .iter()
            .chain(self.upcoming.iter())
            .chain(self.completed.iter())
    }

    /// First tournament whose normalized or raw id matches.
    pub fn find_by_id(&self, id: &str) -> Option<&Tournament> {
        self.iter().find(|t| t.matches_id(id))
    }

    pub fn len(&self) -> usize {
        self.ongoing.len() + self.upcoming.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MatchStatus {
    #[default]
    Upcoming,
    Live,
    Completed,
}

impl MatchStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MatchStatus::Upcoming => "upcoming",
            MatchStatus::Live => "live",
            MatchStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Match {
    pub id: String,
    pub tournament_id: Option<String>,
    pub round: String,
    pub best_of: u32,
    pub status: MatchStatus,
    pub date: Option<DateTime<Utc>>, // begin_at, else scheduled_at
    pub begin_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub team1: MatchTeam,
    pub team2: MatchTeam,
    pub raw: RawMatch,
}

impl Match {
    pub fn is_live(&self) -> bool {
        self.status == MatchStatus::Live
    }

    pub fn involves(&self, team_id: &str) -> bool {
        self.team1.id == team_id || self.team2.id == team_id
    }

    /// The winning side of a completed match; `None` for draws and unfinished games.
    pub fn winner(&self) -> Option<&MatchTeam> {
        if self.status != MatchStatus::Completed {
            return None;
        }
        match self.team1.score.cmp(&self.team2.score) {
            std::cmp::Ordering::Greater => Some(&self.team1),
            std::cmp::Ordering::Less => Some(&self.team2),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Best date for ordering: begin time, then schedule, then end time.
    pub fn sort_date(&self) -> Option<DateTime<Utc>> {
        self.begin_at.or(self.date).or(self.end_at)
    }
}

/// A team as embedded in a match. Placeholder sides use "team-1"/"team-2" and "TBD".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchTeam {
    pub id: String,
    pub name: String,
    pub score: u32,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub region: String,
    pub logo: Option<String>,
    pub players: Vec<Player>,
    pub raw: RawTeam,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub role: String,
}
