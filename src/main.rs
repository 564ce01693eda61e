mod app;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::keys::{KeyAction, handle_key_bindings};
use crate::state::app_settings::AppSettings;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::NetworkWorker;
use crate::state::refresher::PeriodicRefresher;
use chrono::Utc;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::{LevelFilter, debug, error, info};
use pandascore_api::client::MatchFilter;
use std::io::Stdout;
use std::time::Duration;
use std::{io, panic};
use tokio::sync::mpsc;
use tui::{Terminal, backend::CrosstermBackend};

const INPUT_POLL: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Home,
    Matches(Option<MatchFilter>),
    Tournament(String),
    Bracket(String),
    League(String),
    Match(String),
    Team(String),
    Teams,
    Search(String),
    Favorites,
    FavoriteTeam(String),
    FavoriteTournament(String),
    Live,
    Help,
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    better_panic::install();

    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{message}\n\n{}", usage_text());
            std::process::exit(2);
        }
    };
    match command {
        Command::Help => {
            println!("{}", usage_text());
            return Ok(());
        }
        Command::Version => {
            println!("lod {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    dotenvy::dotenv().ok();
    if command == Command::Live {
        // The live screen owns the terminal, so records are kept in memory.
        let level = live_log_level();
        tui_logger::init_logger(level)?;
        tui_logger::set_default_level(level);
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));
    }

    let settings = AppSettings::load();
    debug!("settings: base_url={} favorites={}", settings.base_url, settings.favorites_path.display());
    let mut app = App::new(settings);

    let now = Utc::now();
    let output = match command {
        Command::Home => {
            app.load_home().await;
            draw::draw_home(&app, now)
        }
        Command::Matches(status) => {
            app.load_matches(status).await;
            draw::draw_matches(&app, status)
        }
        Command::Tournament(id) => {
            app.load_tournament(&id).await;
            draw::draw_tournament(&app, &id)
        }
        Command::Bracket(id) => {
            app.load_tournament(&id).await;
            draw::draw_bracket(&app, &id)
        }
        Command::League(id_or_name) => {
            app.initialize().await;
            draw::draw_league(&app, &id_or_name)
        }
        Command::Match(id) => {
            app.initialize().await;
            app.load_match(&id).await;
            draw::draw_match(&app, &id)
        }
        Command::Team(id) => {
            app.load_team(&id).await;
            draw::draw_team(&app, &id)
        }
        Command::Teams => {
            app.load_teams().await;
            draw::draw_teams(&app)
        }
        Command::Search(query) => {
            app.load_search().await;
            draw::draw_search(&app, &query)
        }
        Command::Favorites => {
            app.initialize().await;
            app.load_teams().await;
            draw::draw_favorites(&app)
        }
        Command::FavoriteTeam(id) => {
            let added = app.toggle_team_favorite(&id)?;
            format!("Team {id} {}", if added { "added to favorites" } else { "removed from favorites" })
        }
        Command::FavoriteTournament(id) => {
            let added = app.toggle_tournament_favorite(&id)?;
            format!(
                "Tournament {id} {}",
                if added { "added to favorites" } else { "removed from favorites" }
            )
        }
        Command::Live => return run_live(app).await,
        Command::Help | Command::Version => usage_text().to_string(),
    };

    println!("{output}");
    Ok(())
}

/// A plain level name from `RUST_LOG`. Anything else falls back to warn.
fn live_log_level() -> LevelFilter {
    std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(LevelFilter::Warn)
}

/// Follow running matches on the alternate screen until the user quits.
async fn run_live(mut app: App) -> anyhow::Result<()> {
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;
    let result = live_ui_loop(&mut terminal, &mut app).await;
    cleanup_terminal();
    result
}

async fn live_ui_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    let (ui_event_tx, mut ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, mut network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_tx = ui_event_tx.clone();
    let input_task = tokio::task::spawn_blocking(move || input_handler_task(input_tx));

    // Network thread
    let network_worker = NetworkWorker::new(app.settings.api(), network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Periodic live refresh thread
    let refresher = PeriodicRefresher::new(ui_event_tx.clone(), app.settings.refresh_interval);
    let refresh_task = tokio::spawn(refresher.run());

    let _ = ui_event_tx.send(UiEvent::AppStarted).await;
    info!("live mode, refreshing every {:?}", app.settings.refresh_interval);
    draw::draw(terminal, app)?;

    loop {
        tokio::select! {
            Some(ui_event) = ui_event_rx.recv() => {
                let refresh = match ui_event {
                    UiEvent::AppStarted | UiEvent::RefreshTick => true,
                    UiEvent::KeyPressed(key_event) => match handle_key_bindings(key_event) {
                        KeyAction::Quit => break,
                        KeyAction::Refresh => true,
                        KeyAction::Ignore => false,
                    },
                    UiEvent::Resize => false,
                };
                if refresh && network_req_tx.send(app.live_request()).await.is_err() {
                    error!("network worker stopped");
                    break;
                }
                draw::draw(terminal, app)?;
            }

            Some(response) = network_resp_rx.recv() => {
                let redraw = match response {
                    NetworkResponse::LoadingStateChanged { loading_state } => {
                        app.on_loading_changed(loading_state);
                        true
                    }
                    NetworkResponse::MatchesLoaded { generation, matches } => {
                        app.on_live_matches_loaded(generation, matches, Utc::now())
                    }
                    NetworkResponse::Error { generation, message } => {
                        error!("Network error: {message}");
                        app.on_live_error(generation, message)
                    }
                };
                if redraw {
                    draw::draw(terminal, app)?;
                }
            }

            _ = tokio::signal::ctrl_c() => break,
        }
    }

    // The input thread notices the closed channel on its next poll.
    drop(ui_event_rx);
    network_task.abort();
    refresh_task.abort();
    let _ = input_task.await;
    Ok(())
}

/// Forward terminal input to the UI loop until the loop goes away.
fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    while !ui_events.is_closed() {
        match crossterm_event::poll(INPUT_POLL) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                error!("terminal input failed: {e}");
                break;
            }
        }

        let ui_event = match crossterm_event::read() {
            Ok(Event::Key(key_event)) => UiEvent::KeyPressed(key_event),
            Ok(Event::Resize(_, _)) => UiEvent::Resize,
            Ok(_) => continue,
            Err(e) => {
                error!("terminal input failed: {e}");
                break;
            }
        };
        if ui_events.blocking_send(ui_event).is_err() {
            break;
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(
        stdout,
        cursor::Hide,
        terminal::EnterAlternateScreen,
        terminal::Clear(terminal::ClearType::All)
    )?;
    terminal::enable_raw_mode()
}

fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = terminal::disable_raw_mode();
    let _ = execute!(
        stdout,
        cursor::MoveTo(0, 0),
        terminal::Clear(terminal::ClearType::All),
        terminal::LeaveAlternateScreen,
        cursor::Show
    );
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command, String> {
    let mut args = args.into_iter();
    let Some(arg) = args.next() else {
        return Ok(Command::Home);
    };

    let command = match arg.as_str() {
        "-h" | "--help" | "help" => Command::Help,
        "-V" | "--version" => Command::Version,
        "home" => Command::Home,
        "matches" => match args.next() {
            None => Command::Matches(None),
            Some(status) => Command::Matches(Some(
                MatchFilter::parse(&status).ok_or_else(|| format!("Unknown match status: {status}"))?,
            )),
        },
        "tournament" => Command::Tournament(required(&mut args, &arg, "tournament id")?),
        "bracket" => Command::Bracket(required(&mut args, &arg, "tournament id")?),
        "league" => Command::League(required(&mut args, &arg, "league id or name")?),
        "match" => Command::Match(required(&mut args, &arg, "match id")?),
        "team" => Command::Team(required(&mut args, &arg, "team id")?),
        "teams" => Command::Teams,
        "search" => {
            let query: Vec<String> = args.by_ref().collect();
            if query.is_empty() {
                return Err("Missing search query".to_string());
            }
            Command::Search(query.join(" "))
        }
        "favorites" => Command::Favorites,
        "fav-team" => Command::FavoriteTeam(required(&mut args, &arg, "team id")?),
        "fav-tournament" => Command::FavoriteTournament(required(&mut args, &arg, "tournament id")?),
        "live" => Command::Live,
        _ => return Err(format!("Unknown argument: {arg}")),
    };
    Ok(command)
}

fn required(
    args: &mut impl Iterator<Item = String>,
    arg: &str,
    what: &str,
) -> Result<String, String> {
    args.next()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| format!("Missing {what} for `{arg}`"))
}

fn usage_text() -> &'static str {
    "lod - Mobile Legends: Bang Bang esports tracker

Usage:
  lod [home]                  Ongoing tournaments, live and recent matches, top teams
  lod matches [STATUS]        Recent matches (running | not_started | finished)
  lod tournament ID           Tournament detail with its matches
  lod bracket ID              Tournament matches with winners
  lod league ID|NAME          League detail with its tournaments
  lod match ID                Match detail
  lod team ID                 Team roster, record and recent matches
  lod teams                   All teams
  lod search QUERY            Search tournaments, teams and matches
  lod favorites               Favorite teams and tournaments
  lod fav-team ID             Toggle a favorite team
  lod fav-tournament ID       Toggle a favorite tournament
  lod live                    Follow running matches (r refresh, q quit)
  lod --help
  lod --version

Environment (a .env file is read if present):
  PANDASCORE_KEY        PandaScore API token (required for data)
  PANDASCORE_BASE_URL   API base URL (default https://api.pandascore.co)
  LOD_FAVORITES_PATH    Favorites file (default ~/.config/land-of-dawn/land-of-dawn-favorites.json)
  LOD_REFRESH_SECS      Live refresh interval in seconds (default 30)
  RUST_LOG              Log filter (default warn)"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, String> {
        parse_args(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn no_arguments_is_home() {
        assert_eq!(parse(&[]), Ok(Command::Home));
        assert_eq!(parse(&["home"]), Ok(Command::Home));
    }

    #[test]
    fn parses_commands_with_ids() {
        assert_eq!(parse(&["tournament", "123"]), Ok(Command::Tournament("123".into())));
        assert_eq!(parse(&["bracket", "123"]), Ok(Command::Bracket("123".into())));
        assert_eq!(parse(&["team", "7"]), Ok(Command::Team("7".into())));
        assert_eq!(parse(&["fav-team", "7"]), Ok(Command::FavoriteTeam("7".into())));
        assert_eq!(parse(&["league", "MPL"]), Ok(Command::League("MPL".into())));
        assert!(parse(&["team"]).unwrap_err().contains("Missing team id"));
        assert!(parse(&["match", " "]).is_err());
    }

    #[test]
    fn parses_match_status_and_search() {
        assert_eq!(parse(&["matches"]), Ok(Command::Matches(None)));
        assert_eq!(
            parse(&["matches", "upcoming"]),
            Ok(Command::Matches(Some(MatchFilter::NotStarted)))
        );
        assert!(parse(&["matches", "soon"]).is_err());
        assert_eq!(
            parse(&["search", "team", "liquid"]),
            Ok(Command::Search("team liquid".into()))
        );
        assert!(parse(&["search"]).is_err());
    }

    #[test]
    fn rejects_unknown_arguments() {
        assert_eq!(parse(&["--nope"]), Err("Unknown argument: --nope".to_string()));
        assert_eq!(parse(&["-V"]), Ok(Command::Version));
        assert_eq!(parse(&["--help"]), Ok(Command::Help));
    }
}
