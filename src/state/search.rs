use pandascore_api::{Match, Team, Tournament};

#[derive(Debug, Default)]
pub struct SearchResults<'a> {
    pub tournaments: Vec<&'a Tournament>,
    pub teams: Vec<&'a Team>,
    pub matches: Vec<&'a Match>,
}

impl SearchResults<'_> {
    pub fn is_empty(&self) -> bool {
        self.tournaments.is_empty() && self.teams.is_empty() && self.matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tournaments.len() + self.teams.len() + self.matches.len()
    }
}

/// Case-insensitive substring search over already loaded data.
///
/// Tournaments match on name or description, teams on name or region,
/// matches on either team name or the round. A blank query finds nothing.
pub fn search<'a>(
    query: &str,
    tournaments: impl IntoIterator<Item = &'a Tournament>,
    teams: &'a [Team],
    matches: &'a [Match],
) -> SearchResults<'a> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return SearchResults::default();
    }
    let hit = |text: &str| text.to_lowercase().contains(&needle);

    SearchResults {
        tournaments: tournaments
            .into_iter()
            .filter(|t| hit(&t.name) || hit(&t.description))
            .collect(),
        teams: teams.iter().filter(|t| hit(&t.name) || hit(&t.region)).collect(),
        matches: matches
            .iter()
            .filter(|m| hit(&m.team1.name) || hit(&m.team2.name) || hit(&m.round))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pandascore_api::MatchTeam;

    fn tournament(name: &str, description: &str) -> Tournament {
        Tournament { name: name.into(), description: description.into(), ..Default::default() }
    }

    fn team(name: &str, region: &str) -> Team {
        Team { name: name.into(), region: region.into(), ..Default::default() }
    }

    fn fixture(a: &str, b: &str, round: &str) -> Match {
        let side = |name: &str| MatchTeam { name: name.into(), ..Default::default() };
        Match { round: round.into(), team1: side(a), team2: side(b), ..Default::default() }
    }

    #[test]
    fn matches_every_kind_case_insensitively() {
        let tournaments = vec![
            tournament("MPL Indonesia - Regular Season", "MPL Indonesia"),
            tournament("M7 World Championship - Knockouts", "M5 World Championship"),
        ];
        let teams = vec![team("ONIC", "Indonesia"), team("Blacklist International", "PH")];
        let matches = vec![
            fixture("ONIC", "RRQ Hoshi", "MPL Indonesia - Playoffs"),
            fixture("Falcons AP Bren", "Blacklist International", "MPL PH - Playoffs"),
        ];

        let results = search("indonesia", &tournaments, &teams, &matches);
        assert_eq!(results.tournaments.len(), 1);
        assert_eq!(results.teams[0].name, "ONIC");
        assert_eq!(results.matches.len(), 1);
        assert_eq!(results.len(), 3);

        let results = search("  BLACKLIST ", &tournaments, &teams, &matches);
        assert!(results.tournaments.is_empty());
        assert_eq!(results.teams.len(), 1);
        assert_eq!(results.matches[0].team1.name, "Falcons AP Bren");

        // Descriptions keep the upstream league name.
        let results = search("m5", &tournaments, &teams, &matches);
        assert_eq!(results.tournaments.len(), 1);
    }

    #[test]
    fn blank_query_finds_nothing() {
        let tournaments = vec![tournament("Anything", "")];
        let teams = vec![team("Anyone", "")];
        let results = search("   ", &tournaments, &teams, &[]);
        assert!(results.is_empty());
        assert_eq!(results.len(), 0);
    }
}
