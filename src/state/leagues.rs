use crate::state::load_state::LoadState;
use log::{debug, error};
use pandascore_api::League;
use pandascore_api::client::PandaScoreApi;

/// League list, fetched once at startup and used to enrich tournaments.
#[derive(Debug)]
pub struct LeagueStore {
    api: PandaScoreApi,
    pub state: LoadState<Vec<League>>,
}

impl LeagueStore {
    pub fn new(api: PandaScoreApi) -> Self {
        Self { api, state: LoadState::default() }
    }

    pub async fn fetch_all_leagues(&mut self) {
        let ticket = self.state.begin();
        let result = self.api.fetch_leagues().await;
        match &result {
            Ok(leagues) => debug!("loaded {} leagues", leagues.len()),
            Err(e) => error!("Error fetching leagues: {e}"),
        }
        self.state.finish(ticket, result);
    }

    pub fn leagues(&self) -> &[League] {
        &self.state.data
    }

    /// First league whose normalized or raw id equals `id`.
    pub fn find_league_by_id(&self, id: Option<&str>) -> Option<&League> {
        let id = id.filter(|id| !id.is_empty())?;
        self.leagues().iter().find(|l| l.matches_id(id))
    }

    /// First league whose name contains `name`, ignoring case. No ranking.
    pub fn find_league_by_name(&self, name: Option<&str>) -> Option<&League> {
        let name = name.filter(|n| !n.is_empty())?;
        self.leagues().iter().find(|l| l.matches_name(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use pandascore_api::client::MISSING_KEY_MESSAGE;

    #[tokio::test]
    async fn missing_key_sets_fixed_error() {
        let mut store = LeagueStore::new(PandaScoreApi::new(None));
        store.fetch_all_leagues().await;
        assert!(!store.state.loading);
        assert!(store.leagues().is_empty());
        assert_eq!(store.state.error.as_deref(), Some(MISSING_KEY_MESSAGE));
    }

    #[tokio::test]
    async fn lookups_by_id_and_name() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/mlbb/leagues")
            .match_query(Matcher::Any)
            .with_body(
                r#"[
                    {"id": 1, "name": "MPL Philippines"},
                    {"id": 2, "name": "MPL Indonesia"},
                    {"id": 3, "name": "MPL Indonesia Qualifiers"}
                ]"#,
            )
            .create_async()
            .await;

        let api = PandaScoreApi::new(Some("k".into())).with_base_url(server.url());
        let mut store = LeagueStore::new(api);
        store.fetch_all_leagues().await;

        assert!(store.state.is_ready());
        assert_eq!(store.leagues().len(), 3);
        assert_eq!(store.find_league_by_id(Some("2")).map(|l| l.name.as_str()), Some("MPL Indonesia"));
        assert!(store.find_league_by_id(Some("42")).is_none());
        assert!(store.find_league_by_id(None).is_none());

        // First match wins.
        assert_eq!(store.find_league_by_name(Some("indonesia")).map(|l| l.id.as_str()), Some("2"));
        assert!(store.find_league_by_name(Some("malaysia")).is_none());
        assert!(store.find_league_by_name(None).is_none());
    }

    #[tokio::test]
    async fn failed_fetch_clears_previous_leagues() {
        let mut server = Server::new_async().await;
        let ok = server
            .mock("GET", "/mlbb/leagues")
            .match_query(Matcher::Any)
            .with_body(r#"[{"id": 1, "name": "MPL Philippines"}]"#)
            .expect(1)
            .create_async()
            .await;

        let api = PandaScoreApi::new(Some("k".into())).with_base_url(server.url());
        let mut store = LeagueStore::new(api);
        store.fetch_all_leagues().await;
        assert_eq!(store.leagues().len(), 1);
        ok.remove_async().await;

        server
            .mock("GET", "/mlbb/leagues")
            .match_query(Matcher::Any)
            .with_status(502)
            .create_async()
            .await;
        store.fetch_all_leagues().await;
        assert!(store.leagues().is_empty());
        assert_eq!(store.state.error.as_deref(), Some("Failed to fetch leagues: 502 Bad Gateway"));
    }
}
