//! Mapping from PandaScore wire types to clean domain types.
//!
//! Everything here is pure. Missing upstream fields are replaced with the
//! canonical defaults below and never reported as errors.

use crate::pandascore::{RawAmount, RawLeague, RawMatch, RawPlayer, RawTeam, RawTournament};
use crate::{League, Match, MatchStatus, MatchTeam, Player, Team, Tournament, TournamentStatus};
use chrono::{DateTime, Utc};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub const UNNAMED_LEAGUE: &str = "Unnamed League";
pub const UNNAMED_TOURNAMENT: &str = "Unnamed Tournament";
pub const UNNAMED_TEAM: &str = "Unnamed Team";
pub const UNKNOWN_REGION: &str = "Unknown";
pub const DEFAULT_DESCRIPTION: &str = "Mobile Legends tournament";
pub const DEFAULT_ROUND: &str = "Match";
pub const DEFAULT_ROLE: &str = "Player";
pub const PLACEHOLDER_TEAM_NAME: &str = "TBD";
pub const TBA: &str = "TBA";

/// Replacement artwork for tournaments carrying the world championship brand.
pub const M7_LOGO_URL: &str = "https://liquipedia.net/commons/images/d/dd/M7_World_allmode.png";

/// Region keyword table for location inference. Order matters: first match wins.
const LOCATION_TABLE: &[(&[&str], &str)] = &[
    (&["ph", "philippines"], "Manila, Philippines"),
    (&["id", "indonesia"], "Jakarta, Indonesia"),
    (&["my", "malaysia"], "Kuala Lumpur, Malaysia"),
    (&["sg", "singapore"], "Singapore"),
    (&["kh", "cambodia"], "Phnom Penh, Cambodia"),
    (&["mm", "myanmar"], "Yangon, Myanmar"),
    (&["tr", "turkey"], "Istanbul, Turkey"),
    (&["na", "north america"], "Las Vegas, USA"),
    (&["latam"], "Sao Paulo, Brazil"),
    (&["mena"], "Riyadh, Saudi Arabia"),
    (&["m5", "world"], "International"),
    (&["msc"], "International"),
];

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// Upstream uses null, "" and occasionally the literal "null" for missing text.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty() && *v != "null")
}

pub fn parse_date(value: Option<&str>) -> Option<DateTime<Utc>> {
    present(value)
        .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Deterministic id for records that arrive without one.
///
/// The same identifying fields always hash to the same id, so lookups and
/// favorites keep working across refetches.
pub fn placeholder_id(kind: &str, parts: &[Option<&str>]) -> String {
    let mut hasher = DefaultHasher::new();
    kind.hash(&mut hasher);
    for part in parts {
        part.unwrap_or_default().hash(&mut hasher);
    }
    format!("{kind}-{:016x}", hasher.finish())
}

/// Rewrite every case-insensitive "m5" to "M7".
pub fn rebrand(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut rest = name;
    while let Some(pos) = rest
        .as_bytes()
        .windows(2)
        .position(|w| w[0].eq_ignore_ascii_case(&b'm') && w[1] == b'5')
    {
        out.push_str(&rest[..pos]);
        out.push_str("M7");
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}

/// Guess a venue from a league name using the region keyword table.
pub fn infer_location(league_name: Option<&str>) -> &'static str {
    let Some(name) = present(league_name) else {
        return TBA;
    };
    let lower = name.to_lowercase();
    LOCATION_TABLE
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, location)| *location)
        .unwrap_or(TBA)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn format_amount(value: f64) -> String {
    let whole = value.trunc() as u64;
    let cents = ((value - value.trunc()) * 100.0).round() as u64;
    match cents {
        0 => group_thousands(whole),
        100 => group_thousands(whole + 1),
        c if c % 10 == 0 => format!("{}.{}", group_thousands(whole), c / 10),
        c => format!("{}.{c:02}", group_thousands(whole)),
    }
}

fn is_usd(currency: Option<&str>) -> bool {
    match present(currency) {
        None => true,
        Some(c) => c.eq_ignore_ascii_case("usd") || c.eq_ignore_ascii_case("united states dollar"),
    }
}

/// Render a prize pool for display: "$250,000", "1,000,000 PHP", or "TBA".
pub fn format_prize_pool(amount: Option<&RawAmount>, currency: Option<&str>) -> String {
    let number = match amount {
        None => return TBA.to_owned(),
        Some(RawAmount::Integer(0)) => return TBA.to_owned(),
        Some(RawAmount::Integer(n)) => group_thousands(*n),
        Some(RawAmount::Float(f)) if *f <= 0.0 || !f.is_finite() => return TBA.to_owned(),
        Some(RawAmount::Float(f)) => format_amount(*f),
        Some(RawAmount::Text(text)) => match present(Some(text.as_str())) {
            None => return TBA.to_owned(),
            Some(t) => match t.replace(',', "").parse::<f64>() {
                Ok(f) if f > 0.0 && f.is_finite() => format_amount(f),
                _ => return t.to_owned(),
            },
        },
    };

    if is_usd(currency) {
        format!("${number}")
    } else {
        format!("{number} {}", present(currency).unwrap_or_default())
    }
}

/// "<League> - <Tournament>", falling back to whichever part exists, then rebranded.
pub fn tournament_display_name(league_name: Option<&str>, name: Option<&str>) -> String {
    let joined = match (present(league_name), present(name)) {
        (Some(league), Some(name)) => format!("{league} - {name}"),
        (None, Some(name)) => name.to_owned(),
        (Some(league), None) => league.to_owned(),
        (None, None) => UNNAMED_TOURNAMENT.to_owned(),
    };
    rebrand(&joined)
}

pub fn resolve_logo(display_name: &str, league_image: Option<&str>) -> Option<String> {
    let lower = display_name.to_lowercase();
    if lower.contains("m5") || lower.contains("m7") {
        Some(M7_LOGO_URL.to_owned())
    } else {
        present(league_image).map(str::to_owned)
    }
}

// ---------------------------------------------------------------------------
// Leagues
// ---------------------------------------------------------------------------

pub fn map_league(raw: RawLeague) -> League {
    let id = raw.id.as_ref().map(ToString::to_string).unwrap_or_else(|| {
        placeholder_id(
            "league",
            &[raw.name.as_deref(), raw.slug.as_deref(), raw.url.as_deref()],
        )
    });

    League {
        id,
        name: present(raw.name.as_deref()).unwrap_or(UNNAMED_LEAGUE).to_owned(),
        slug: present(raw.slug.as_deref()).map(str::to_owned),
        image_url: present(raw.image_url.as_deref()).map(str::to_owned),
        url: present(raw.url.as_deref()).map(str::to_owned),
        location: present(raw.location.as_deref()).map(str::to_owned),
        raw,
    }
}

// ---------------------------------------------------------------------------
// Tournaments
// ---------------------------------------------------------------------------

/// Normalize a tournament and join it with its league, if the league is known.
///
/// `now` stands in for missing start dates.
pub fn map_tournament(
    raw: RawTournament,
    status: TournamentStatus,
    leagues: &[League],
    now: DateTime<Utc>,
) -> Tournament {
    let embedded = raw.league.as_ref();

    let league_id = embedded
        .and_then(|l| l.id.as_ref())
        .or(raw.league_id.as_ref())
        .map(ToString::to_string);
    let league = league_id
        .as_deref()
        .and_then(|id| leagues.iter().find(|l| l.matches_id(id)))
        .cloned();

    // The league store wins over the snippet embedded in the tournament.
    let league_name = league
        .as_ref()
        .map(|l| l.name.as_str())
        .or_else(|| present(embedded.and_then(|l| l.name.as_deref())));
    let league_image = league
        .as_ref()
        .and_then(|l| l.image_url.as_deref())
        .or_else(|| embedded.and_then(|l| l.image_url.as_deref()));

    let location = [
        league.as_ref().and_then(|l| l.location.as_deref()),
        embedded.and_then(|l| l.location.as_deref()),
        raw.country.as_deref(),
    ]
    .into_iter()
    .find_map(present)
    .unwrap_or_else(|| infer_location(league_name))
    .to_owned();

    let name = tournament_display_name(league_name, raw.name.as_deref());
    let logo = resolve_logo(&name, league_image);

    let prize_amount = raw
        .prizepool
        .as_ref()
        .or_else(|| raw.serie.as_ref().and_then(|s| s.prizepool.as_ref()));
    let prize_pool = format_prize_pool(prize_amount, raw.currency.as_deref());

    let start_date = parse_date(raw.begin_at.as_deref()).unwrap_or(now);
    let end_date = parse_date(raw.end_at.as_deref()).unwrap_or(start_date);

    let description = league_name
        .or_else(|| present(raw.name.as_deref()))
        .unwrap_or(DEFAULT_DESCRIPTION)
        .to_owned();

    let id = raw.id.as_ref().map(ToString::to_string).unwrap_or_else(|| {
        placeholder_id(
            "tournament",
            &[
                raw.name.as_deref(),
                raw.slug.as_deref(),
                raw.begin_at.as_deref(),
                league_id.as_deref(),
            ],
        )
    });

    Tournament {
        id,
        name,
        status,
        start_date,
        end_date,
        location,
        prize_pool,
        featured: false,
        description,
        logo,
        league_id,
        league,
        raw,
    }
}

// ---------------------------------------------------------------------------
// Matches
// ---------------------------------------------------------------------------

/// `running` is Live, `finished` is Completed, anything else is Upcoming.
pub fn map_match_status(status: Option<&str>) -> MatchStatus {
    match status {
        Some("running") => MatchStatus::Live,
        Some("finished") => MatchStatus::Completed,
        _ => MatchStatus::Upcoming,
    }
}

fn match_team(raw: &RawMatch, index: usize) -> MatchTeam {
    let opponent = raw.opponents.get(index).and_then(|slot| slot.opponent.as_ref());
    let score = raw.results.get(index).and_then(|r| r.score).unwrap_or(0);

    MatchTeam {
        id: opponent
            .and_then(|o| o.id.as_ref())
            .map(ToString::to_string)
            .unwrap_or_else(|| format!("team-{}", index + 1)),
        name: present(opponent.and_then(|o| o.name.as_deref()))
            .unwrap_or(PLACEHOLDER_TEAM_NAME)
            .to_owned(),
        score,
        logo: present(opponent.and_then(|o| o.image_url.as_deref())).map(str::to_owned),
    }
}

/// Normalize a match. `requested_tournament_id` fills in the tournament when
/// the payload omits it (the request was already filtered by it).
pub fn map_match(raw: RawMatch, requested_tournament_id: Option<&str>) -> Match {
    let round = [
        raw.tournament.as_ref().and_then(|t| t.name.as_deref()),
        raw.league.as_ref().and_then(|l| l.name.as_deref()),
        raw.serie.as_ref().and_then(|s| s.name.as_deref()),
    ]
    .into_iter()
    .find_map(present)
    .map(rebrand)
    .unwrap_or_else(|| DEFAULT_ROUND.to_owned());

    let tournament_id = raw
        .tournament
        .as_ref()
        .and_then(|t| t.id.as_ref())
        .map(ToString::to_string)
        .or_else(|| requested_tournament_id.map(str::to_owned));

    let begin_at = parse_date(raw.begin_at.as_deref());
    let scheduled_at = parse_date(raw.scheduled_at.as_deref());
    let end_at = parse_date(raw.end_at.as_deref());

    let team1 = match_team(&raw, 0);
    let team2 = match_team(&raw, 1);

    let id = raw.id.as_ref().map(ToString::to_string).unwrap_or_else(|| {
        placeholder_id(
            "match",
            &[
                raw.name.as_deref(),
                raw.begin_at.as_deref().or(raw.scheduled_at.as_deref()),
                tournament_id.as_deref(),
                Some(team1.name.as_str()),
                Some(team2.name.as_str()),
            ],
        )
    });

    Match {
        id,
        tournament_id,
        round,
        best_of: raw.number_of_games.filter(|n| *n > 0).unwrap_or(1),
        status: map_match_status(raw.status.as_deref()),
        date: begin_at.or(scheduled_at),
        begin_at,
        end_at,
        scheduled_at,
        team1,
        team2,
        raw,
    }
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

pub fn map_player(raw: &RawPlayer, index: usize) -> Player {
    Player {
        id: raw
            .id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| format!("p{index}")),
        name: present(raw.name.as_deref())
            .map(str::to_owned)
            .unwrap_or_else(|| format!("Player {}", index + 1)),
        role: present(raw.role.as_deref()).unwrap_or(DEFAULT_ROLE).to_owned(),
    }
}

pub fn map_team(raw: RawTeam) -> Team {
    let id = raw.id.as_ref().map(ToString::to_string).unwrap_or_else(|| {
        placeholder_id("team", &[raw.name.as_deref(), raw.acronym.as_deref()])
    });
    let players = raw
        .players
        .iter()
        .enumerate()
        .map(|(i, p)| map_player(p, i))
        .collect();

    Team {
        id,
        name: present(raw.name.as_deref()).unwrap_or(UNNAMED_TEAM).to_owned(),
        region: present(raw.location.as_deref()).unwrap_or(UNKNOWN_REGION).to_owned(),
        logo: present(raw.image_url.as_deref()).map(str::to_owned),
        players,
        raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pandascore::{
        RawId, RawMatchTournament, RawOpponent, RawOpponentSlot, RawResult, RawSerie,
    };
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn league(id: u64, name: &str, location: Option<&str>) -> League {
        map_league(RawLeague {
            id: Some(RawId::Number(id)),
            name: Some(name.into()),
            location: location.map(Into::into),
            image_url: Some(format!("https://cdn.example/{id}.png")),
            ..Default::default()
        })
    }

    #[test]
    fn rebrand_replaces_every_case_variant() {
        assert_eq!(rebrand("M5 World Championship"), "M7 World Championship");
        assert_eq!(rebrand("m5 qualifiers / M5 finals"), "M7 qualifiers / M7 finals");
        assert_eq!(rebrand("road to m5"), "road to M7");
        assert_eq!(rebrand("MPL ID Season 15"), "MPL ID Season 15");
        assert_eq!(rebrand("Ñ m5 ü"), "Ñ M7 ü");
    }

    #[test]
    fn infer_location_uses_table_order() {
        assert_eq!(infer_location(Some("MPL Philippines")), "Manila, Philippines");
        assert_eq!(infer_location(Some("MPL Indonesia")), "Jakarta, Indonesia");
        assert_eq!(infer_location(Some("MSC")), "International");
        assert_eq!(infer_location(Some("LATAM Cup")), "Sao Paulo, Brazil");
        assert_eq!(infer_location(Some("Qwerty")), TBA);
        assert_eq!(infer_location(None), TBA);
        assert_eq!(infer_location(Some("  ")), TBA);
        // Short keywords match anywhere, so "mena" hits the "na" row first.
        assert_eq!(infer_location(Some("MPL MENA")), "Las Vegas, USA");
    }

    #[test]
    fn prize_pool_formatting() {
        assert_eq!(format_prize_pool(Some(&RawAmount::Integer(250000)), None), "$250,000");
        assert_eq!(format_prize_pool(Some(&RawAmount::Integer(999)), Some("USD")), "$999");
        assert_eq!(
            format_prize_pool(Some(&RawAmount::Integer(1_000_000)), Some("PHP")),
            "1,000,000 PHP"
        );
        assert_eq!(format_prize_pool(Some(&RawAmount::Float(1500.5)), None), "$1,500.5");
        assert_eq!(format_prize_pool(Some(&RawAmount::Text("300000".into())), None), "$300,000");
        assert_eq!(
            format_prize_pool(Some(&RawAmount::Text("300000 United States Dollar".into())), None),
            "300000 United States Dollar"
        );
        assert_eq!(format_prize_pool(None, Some("USD")), TBA);
        assert_eq!(format_prize_pool(Some(&RawAmount::Integer(0)), None), TBA);
    }

    #[test]
    fn display_name_joins_and_rebrands() {
        assert_eq!(
            tournament_display_name(Some("MPL PH"), Some("Playoffs")),
            "MPL PH - Playoffs"
        );
        assert_eq!(tournament_display_name(None, Some("m5 Playoffs")), "M7 Playoffs");
        assert_eq!(tournament_display_name(Some("M5 World"), None), "M7 World");
        assert_eq!(tournament_display_name(None, Some("")), UNNAMED_TOURNAMENT);
    }

    #[test]
    fn placeholder_ids_are_stable() {
        let a = placeholder_id("team", &[Some("Onic"), None]);
        let b = placeholder_id("team", &[Some("Onic"), None]);
        let c = placeholder_id("team", &[Some("RRQ"), None]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with("team-"));
        assert_eq!(a.len(), "team-".len() + 16);
    }

    #[test]
    fn unnamed_league_gets_default_name() {
        let l = map_league(RawLeague { id: Some(RawId::Number(7)), ..Default::default() });
        assert_eq!(l.id, "7");
        assert_eq!(l.name, UNNAMED_LEAGUE);
        assert!(l.slug.is_none());
    }

    #[test]
    fn tournament_prefers_league_store_over_embedded_snippet() {
        let leagues = vec![league(10, "MPL Indonesia", Some("Jakarta Convention Center"))];
        let raw = RawTournament {
            id: Some(RawId::Number(99)),
            name: Some("Regular Season".into()),
            league: Some(RawLeague {
                id: Some(RawId::Number(10)),
                name: Some("MPL ID".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let t = map_tournament(raw, TournamentStatus::Ongoing, &leagues, now());
        assert_eq!(t.id, "99");
        assert_eq!(t.name, "MPL Indonesia - Regular Season");
        assert_eq!(t.location, "Jakarta Convention Center");
        assert_eq!(t.league_id.as_deref(), Some("10"));
        assert_eq!(t.league.as_ref().map(|l| l.id.as_str()), Some("10"));
        assert_eq!(t.logo.as_deref(), Some("https://cdn.example/10.png"));
        assert_eq!(t.description, "MPL Indonesia");
        assert_eq!(t.status, TournamentStatus::Ongoing);
    }

    #[test]
    fn tournament_without_league_store_uses_embedded_and_infers_location() {
        let raw = RawTournament {
            id: Some(RawId::Number(1)),
            name: Some("Playoffs".into()),
            prizepool: Some(RawAmount::Integer(250000)),
            currency: None,
            league: Some(RawLeague {
                id: Some(RawId::Number(5)),
                name: Some("MPL Philippines".into()),
                location: Some("null".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let t = map_tournament(raw, TournamentStatus::Upcoming, &[], now());
        assert!(t.league.is_none());
        assert_eq!(t.location, "Manila, Philippines");
        assert_eq!(t.prize_pool, "$250,000");
        assert_eq!(t.start_date, now());
        assert_eq!(t.end_date, now());
    }

    #[test]
    fn tournament_location_falls_back_to_country_code() {
        let raw = RawTournament {
            id: Some(RawId::Number(1)),
            country: Some("KH".into()),
            ..Default::default()
        };
        let t = map_tournament(raw, TournamentStatus::Completed, &[], now());
        assert_eq!(t.location, "KH");
        assert_eq!(t.name, UNNAMED_TOURNAMENT);
        assert_eq!(t.description, DEFAULT_DESCRIPTION);
        assert_eq!(t.prize_pool, TBA);
        assert!(t.logo.is_none());
    }

    #[test]
    fn tournament_prize_pool_falls_back_to_serie() {
        let raw = RawTournament {
            id: Some(RawId::Number(1)),
            serie: Some(RawSerie {
                prizepool: Some(RawAmount::Integer(75000)),
                ..Default::default()
            }),
            ..Default::default()
        };
        let t = map_tournament(raw, TournamentStatus::Upcoming, &[], now());
        assert_eq!(t.prize_pool, "$75,000");
    }

    #[test]
    fn world_championship_is_rebranded_with_replacement_logo() {
        let leagues = vec![league(3, "M5 World Championship", None)];
        let raw = RawTournament {
            id: Some(RawId::Number(2)),
            name: Some("Knockout Stage".into()),
            league_id: Some(RawId::Number(3)),
            begin_at: Some("2026-12-01T08:00:00Z".into()),
            ..Default::default()
        };
        let t = map_tournament(raw, TournamentStatus::Upcoming, &leagues, now());
        assert_eq!(t.name, "M7 World Championship - Knockout Stage");
        assert_eq!(t.logo.as_deref(), Some(M7_LOGO_URL));
        assert_eq!(t.start_date, Utc.with_ymd_and_hms(2026, 12, 1, 8, 0, 0).unwrap());
        assert_eq!(t.end_date, t.start_date);
    }

    #[test]
    fn tournament_without_id_gets_same_placeholder_every_time() {
        let raw = RawTournament {
            name: Some("Open Qualifier".into()),
            begin_at: Some("2026-01-01T00:00:00Z".into()),
            ..Default::default()
        };
        let a = map_tournament(raw.clone(), TournamentStatus::Upcoming, &[], now());
        let b = map_tournament(raw, TournamentStatus::Upcoming, &[], now());
        assert!(a.id.starts_with("tournament-"));
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn match_status_mapping() {
        assert_eq!(map_match_status(Some("running")), MatchStatus::Live);
        assert_eq!(map_match_status(Some("finished")), MatchStatus::Completed);
        assert_eq!(map_match_status(Some("not_started")), MatchStatus::Upcoming);
        assert_eq!(map_match_status(Some("canceled")), MatchStatus::Upcoming);
        assert_eq!(map_match_status(None), MatchStatus::Upcoming);
    }

    #[test]
    fn match_without_opponents_gets_placeholder_teams() {
        let m = map_match(RawMatch { id: Some(RawId::Number(5)), ..Default::default() }, None);
        assert_eq!(m.team1, MatchTeam { id: "team-1".into(), name: "TBD".into(), score: 0, logo: None });
        assert_eq!(m.team2, MatchTeam { id: "team-2".into(), name: "TBD".into(), score: 0, logo: None });
        assert_eq!(m.round, DEFAULT_ROUND);
        assert_eq!(m.best_of, 1);
        assert!(m.tournament_id.is_none());
    }

    #[test]
    fn match_maps_opponents_positionally() {
        let opponent = |id: u64, name: &str| RawOpponentSlot {
            kind: Some("Team".into()),
            opponent: Some(RawOpponent {
                id: Some(RawId::Number(id)),
                name: Some(name.into()),
                acronym: None,
                image_url: Some(format!("https://cdn.example/t{id}.png")),
            }),
        };
        let raw = RawMatch {
            id: Some(RawId::Number(77)),
            status: Some("finished".into()),
            number_of_games: Some(5),
            begin_at: None,
            scheduled_at: Some("2026-02-10T10:00:00Z".into()),
            tournament: Some(RawMatchTournament {
                id: Some(RawId::Number(12)),
                name: Some("m5 Playoffs".into()),
            }),
            opponents: vec![opponent(1, "Onic PH"), opponent(2, "Falcons AP Bren")],
            results: vec![
                RawResult { score: Some(3), team_id: Some(RawId::Number(1)) },
                RawResult { score: Some(2), team_id: Some(RawId::Number(2)) },
            ],
            ..Default::default()
        };
        let m = map_match(raw, Some("ignored"));
        assert_eq!(m.id, "77");
        assert_eq!(m.tournament_id.as_deref(), Some("12"));
        assert_eq!(m.round, "M7 Playoffs");
        assert_eq!(m.best_of, 5);
        assert_eq!(m.status, MatchStatus::Completed);
        assert_eq!(m.team1.name, "Onic PH");
        assert_eq!(m.team1.score, 3);
        assert_eq!(m.team2.id, "2");
        assert_eq!(m.team2.logo.as_deref(), Some("https://cdn.example/t2.png"));
        assert!(m.begin_at.is_none());
        assert_eq!(m.date, m.scheduled_at);
    }

    #[test]
    fn match_round_falls_back_through_league_and_serie() {
        let raw = RawMatch {
            id: Some(RawId::Number(1)),
            serie: Some(RawSerie { name: Some("Season 14".into()), ..Default::default() }),
            ..Default::default()
        };
        assert_eq!(map_match(raw, Some("42")).round, "Season 14");

        let raw = RawMatch {
            id: Some(RawId::Number(1)),
            league: Some(RawLeague { name: Some("MPL MY".into()), ..Default::default() }),
            serie: Some(RawSerie { name: Some("Season 14".into()), ..Default::default() }),
            ..Default::default()
        };
        let m = map_match(raw, Some("42"));
        assert_eq!(m.round, "MPL MY");
        assert_eq!(m.tournament_id.as_deref(), Some("42"));
    }

    #[test]
    fn team_roster_uses_positional_defaults() {
        let raw = RawTeam {
            id: Some(RawId::Number(3)),
            name: None,
            players: vec![
                RawPlayer {
                    id: Some(RawId::Number(100)),
                    name: Some("KarlTzy".into()),
                    role: Some("jungle".into()),
                    ..Default::default()
                },
                RawPlayer::default(),
            ],
            ..Default::default()
        };
        let team = map_team(raw);
        assert_eq!(team.id, "3");
        assert_eq!(team.name, UNNAMED_TEAM);
        assert_eq!(team.region, UNKNOWN_REGION);
        assert_eq!(team.players[0].name, "KarlTzy");
        assert_eq!(team.players[0].role, "jungle");
        assert_eq!(
            team.players[1],
            Player { id: "p1".into(), name: "Player 2".into(), role: "Player".into() }
        );
    }
}
