use crate::state::favorites::default_favorites_path;
use log::warn;
use pandascore_api::client::{DEFAULT_BASE_URL, PandaScoreApi};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_REFRESH_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppSettings {
    /// `None` is not fatal: every loader reports the missing key on its own.
    pub api_key: Option<String>,
    pub base_url: String,
    pub favorites_path: PathBuf,
    pub refresh_interval: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            favorites_path: default_favorites_path(),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
        }
    }
}

impl AppSettings {
    /// Read settings from the process environment. Call after `.env` is loaded.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let refresh_interval = match var("LOD_REFRESH_SECS") {
            None => defaults.refresh_interval,
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!("ignoring invalid LOD_REFRESH_SECS={raw}");
                    defaults.refresh_interval
                }
            },
        };

        Self {
            api_key: var("PANDASCORE_KEY"),
            base_url: var("PANDASCORE_BASE_URL").unwrap_or(defaults.base_url),
            favorites_path: var("LOD_FAVORITES_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.favorites_path),
            refresh_interval,
        }
    }

    pub fn api(&self) -> PandaScoreApi {
        PandaScoreApi::new(self.api_key.clone()).with_base_url(&self.base_url)
    }
}
