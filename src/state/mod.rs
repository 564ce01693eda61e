pub mod app_settings;
pub mod app_state;
pub mod favorites;
pub mod leagues;
pub mod load_state;
pub mod matches;
pub mod messages;
pub mod network;
pub mod refresher;
pub mod search;
pub mod teams;
pub mod tournaments;
