use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Fixed storage namespace; also the file stem on disk.
pub const FAVORITES_KEY: &str = "land-of-dawn-favorites";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Favorites {
    pub favorite_teams: Vec<String>,
    pub favorite_tournaments: Vec<String>,
}

/// Favorite team and tournament ids, persisted as one JSON file.
#[derive(Debug)]
pub struct FavoritesStore {
    path: PathBuf,
    favorites: Favorites,
}

impl FavoritesStore {
    /// Load favorites from `path`. A missing file means no favorites yet; an
    /// unreadable one is logged and treated the same way.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let favorites = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str::<Favorites>(&content).unwrap_or_else(|e| {
                warn!("ignoring corrupt favorites file {}: {e}", path.display());
                Favorites::default()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Favorites::default(),
            Err(e) => {
                warn!("read favorites failed for {}: {e}", path.display());
                Favorites::default()
            }
        };
        Self { path, favorites }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    /// Returns whether the team is a favorite after the toggle.
    pub fn toggle_team_favorite(&mut self, team_id: &str) -> io::Result<bool> {
        self.toggle_and_save(|f| &mut f.favorite_teams, team_id)
    }

    pub fn toggle_tournament_favorite(&mut self, tournament_id: &str) -> io::Result<bool> {
        self.toggle_and_save(|f| &mut f.favorite_tournaments, tournament_id)
    }

    pub fn is_team_favorite(&self, team_id: &str) -> bool {
        self.favorites.favorite_teams.iter().any(|id| id == team_id)
    }

    pub fn is_tournament_favorite(&self, tournament_id: &str) -> bool {
        self.favorites.favorite_tournaments.iter().any(|id| id == tournament_id)
    }

    /// Memory only changes when the file was written.
    fn toggle_and_save(
        &mut self,
        list: fn(&mut Favorites) -> &mut Vec<String>,
        id: &str,
    ) -> io::Result<bool> {
        let previous = self.favorites.clone();
        let now_favorite = toggle(list(&mut self.favorites), id);
        if let Err(e) = self.save() {
            warn!("save favorites failed for {}: {e}", self.path.display());
            self.favorites = previous;
            return Err(e);
        }
        Ok(now_favorite)
    }

    fn save(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(&self.favorites)?;
        std::fs::write(&self.path, payload)?;
        debug!("saved favorites to {}", self.path.display());
        Ok(())
    }
}

/// Remove `id` if present, otherwise append it. Returns true when added.
fn toggle(ids: &mut Vec<String>, id: &str) -> bool {
    if let Some(pos) = ids.iter().position(|existing| existing == id) {
        ids.remove(pos);
        false
    } else {
        ids.push(id.to_owned());
        true
    }
}

pub fn default_favorites_path() -> PathBuf {
    let file = format!("{FAVORITES_KEY}.json");
    if let Ok(config_dir) = std::env::var("XDG_CONFIG_HOME")
        && !config_dir.trim().is_empty()
    {
        return PathBuf::from(config_dir).join("land-of-dawn").join(file);
    }
    if let Ok(home) = std::env::var("HOME")
        && !home.trim().is_empty()
    {
        return PathBuf::from(home).join(".config").join("land-of-dawn").join(file);
    }
    PathBuf::from(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn scratch_path() -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir()
            .join(format!("lod-favorites-{}-{n}", std::process::id()))
            .join(format!("{FAVORITES_KEY}.json"))
    }

    #[test]
    fn toggle_twice_restores_original() {
        let path = scratch_path();
        let mut store = FavoritesStore::open(&path);
        assert!(!store.is_team_favorite("42"));

        assert!(store.toggle_team_favorite("42").unwrap());
        assert!(store.is_team_favorite("42"));
        assert!(!store.is_tournament_favorite("42"));

        assert!(!store.toggle_team_favorite("42").unwrap());
        assert!(!store.is_team_favorite("42"));
        assert_eq!(store.favorites(), &Favorites::default());
    }

    #[test]
    fn favorites_survive_reopen_in_insertion_order() {
        let path = scratch_path();
        {
            let mut store = FavoritesStore::open(&path);
            store.toggle_team_favorite("3").unwrap();
            store.toggle_team_favorite("1").unwrap();
            store.toggle_tournament_favorite("900").unwrap();
        }
        let store = FavoritesStore::open(&path);
        assert_eq!(store.favorites().favorite_teams, ["3", "1"]);
        assert!(store.is_tournament_favorite("900"));

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"favoriteTeams\""));
        assert!(raw.contains("\"favoriteTournaments\""));
    }

    #[test]
    fn corrupt_or_partial_file_loads_as_empty() {
        let path = scratch_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();

        std::fs::write(&path, "{ definitely not json").unwrap();
        let store = FavoritesStore::open(&path);
        assert_eq!(store.favorites(), &Favorites::default());

        std::fs::write(&path, r#"{"favoriteTeams": ["7"]}"#).unwrap();
        let store = FavoritesStore::open(&path);
        assert!(store.is_team_favorite("7"));
        assert!(store.favorites().favorite_tournaments.is_empty());
    }

    #[test]
    fn failed_save_leaves_favorites_unchanged() {
        let path = scratch_path();
        let mut store = FavoritesStore::open(&path);
        for id in ["1", "2", "3"] {
            store.toggle_team_favorite(id).unwrap();
        }

        // A regular file where the directory should be makes every write fail.
        let blocker = path.with_file_name("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        store.path = blocker.join("favorites.json");

        assert!(store.toggle_team_favorite("1").is_err());
        assert!(store.toggle_tournament_favorite("900").is_err());
        assert_eq!(store.favorites().favorite_teams, ["1", "2", "3"]);
        assert!(!store.is_tournament_favorite("900"));
    }

    #[test]
    fn missing_file_is_empty() {
        let store = FavoritesStore::open(scratch_path());
        assert!(store.favorites().favorite_teams.is_empty());
        assert!(!store.path().exists());
    }
}
