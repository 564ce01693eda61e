use crate::app::App;
use crate::state::load_state::LoadState;
use crate::state::matches::matches_for_team;
use crate::state::network::LoadingState;
use crate::state::search::search;
use crate::ui::format::{format_date, format_date_time, format_relative, truncate_name};
use chrono::{DateTime, Utc};
use pandascore_api::client::MatchFilter;
use pandascore_api::{Match, MatchStatus, Team, Tournament, TournamentStatus};
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};
use tui::{Frame, Terminal};

const RETRY_HINT: &str = "Run the command again to retry.";
const HOME_TEAMS: usize = 4;
const HOME_RECENT: usize = 5;
const TEAM_RECENT: usize = 10;
const NAME_WIDTH: usize = 24;
const LIVE_HELP: &str = "r refresh  q quit ";

/// Shared handling for a loader section: error panel, loading line or empty
/// state. Returns `None` when there is data to render.
fn placeholder<T>(state: &LoadState<T>, is_empty: bool, empty: &str) -> Option<Vec<String>> {
    if let Some(err) = state.error.as_deref() {
        return Some(vec![format!("  ! {err}"), format!("    {RETRY_HINT}")]);
    }
    if state.loading {
        return Some(vec!["  Loading...".to_string()]);
    }
    if is_empty {
        return Some(vec![format!("  {empty}")]);
    }
    None
}

fn heading(lines: &mut Vec<String>, title: &str) {
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(title.to_string());
    lines.push("-".repeat(title.chars().count()));
}

fn status_badge(m: &Match) -> &'static str {
    match m.status {
        MatchStatus::Live => "LIVE",
        MatchStatus::Completed => "FINAL",
        MatchStatus::Upcoming => "UPCOMING",
    }
}

fn match_line(m: &Match) -> String {
    let score = match m.status {
        MatchStatus::Upcoming => "vs".to_string(),
        _ => format!("{} - {}", m.team1.score, m.team2.score),
    };
    format!(
        "  [{}] {} {:^7} {}  Bo{}  {}  {}  (#{})",
        status_badge(m),
        truncate_name(&m.team1.name, NAME_WIDTH),
        score,
        truncate_name(&m.team2.name, NAME_WIDTH),
        m.best_of,
        m.round,
        format_date(m.date),
        m.id
    )
}

fn tournament_line(t: &Tournament, favorite: bool) -> String {
    let star = if favorite { "*" } else { " " };
    format!(
        " {star}{}  {} - {}  {}  {}  (#{})",
        t.name,
        format_date(Some(t.start_date)),
        format_date(Some(t.end_date)),
        t.location,
        t.prize_pool,
        t.id
    )
}

fn team_line(t: &Team, favorite: bool) -> String {
    let star = if favorite { "*" } else { " " };
    format!(
        " {star}{}  {}  {} players  (#{})",
        truncate_name(&t.name, NAME_WIDTH),
        t.region,
        t.players.len(),
        t.id
    )
}

fn push_matches<'a>(
    lines: &mut Vec<String>,
    state: &LoadState<Vec<Match>>,
    matches: impl IntoIterator<Item = &'a Match>,
    empty: &str,
) {
    let rows: Vec<String> = matches.into_iter().map(match_line).collect();
    match placeholder(state, rows.is_empty(), empty) {
        Some(msg) => lines.extend(msg),
        None => lines.extend(rows),
    }
}

fn push_tournaments(lines: &mut Vec<String>, app: &App, tournaments: &[&Tournament], empty: &str) {
    let state = &app.state.tournaments.state;
    match placeholder(state, tournaments.is_empty(), empty) {
        Some(msg) => lines.extend(msg),
        None => lines.extend(tournaments.iter().map(|t| {
            tournament_line(t, app.state.favorites.is_tournament_favorite(&t.id))
        })),
    }
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

pub fn draw_home(app: &App, now: DateTime<Utc>) -> String {
    let mut lines = Vec::new();
    let sections = &app.state.sections;

    let featured = app.state.tournaments.featured();
    if !featured.is_empty() {
        heading(&mut lines, "Featured");
        push_tournaments(&mut lines, app, &featured, "");
    }

    heading(&mut lines, "Ongoing Tournaments");
    let ongoing: Vec<&Tournament> = app
        .state
        .tournaments
        .tournaments_by_status(TournamentStatus::Ongoing)
        .iter()
        .collect();
    push_tournaments(&mut lines, app, &ongoing, "No ongoing tournaments");

    heading(&mut lines, "Live Now");
    push_matches(
        &mut lines,
        &sections.live.state,
        sections.live.live(),
        "No live matches",
    );

    heading(&mut lines, "Up Next");
    let upcoming = sections.up_next();
    match placeholder(&sections.upcoming.state, upcoming.is_empty(), "No upcoming matches") {
        Some(msg) => lines.extend(msg),
        None => lines.extend(upcoming.iter().take(2).map(|m| {
            format!("{}  ({})", match_line(m), format_relative(m.date, now))
        })),
    }

    heading(&mut lines, "Recent Matches");
    push_matches(
        &mut lines,
        &sections.finished.state,
        sections.recent().into_iter().take(HOME_RECENT),
        "No completed matches",
    );

    heading(&mut lines, "Top Teams");
    let teams = app.state.teams.top(HOME_TEAMS);
    match placeholder(&app.state.teams.state, teams.is_empty(), "No teams found") {
        Some(msg) => lines.extend(msg),
        None => lines.extend(
            teams
                .iter()
                .map(|t| team_line(t, app.state.favorites.is_team_favorite(&t.id))),
        ),
    }

    lines.join("\n")
}

/// One status filter, or the live, upcoming and completed sections.
pub fn draw_matches(app: &App, status: Option<MatchFilter>) -> String {
    let mut lines = Vec::new();
    let Some(status) = status else {
        let sections = &app.state.sections;
        heading(&mut lines, "Live Matches");
        push_matches(&mut lines, &sections.live.state, sections.live.live(), "No live matches");
        heading(&mut lines, "Upcoming Matches");
        push_matches(
            &mut lines,
            &sections.upcoming.state,
            sections.up_next(),
            "No upcoming matches",
        );
        heading(&mut lines, "Completed Matches");
        push_matches(
            &mut lines,
            &sections.finished.state,
            sections.recent(),
            "No completed matches",
        );
        return lines.join("\n");
    };

    heading(&mut lines, &format!("Matches ({})", status.as_str()));
    push_matches(
        &mut lines,
        &app.state.matches.state,
        app.state.matches.matches(),
        "No matches found",
    );
    lines.join("\n")
}

pub fn draw_tournament(app: &App, tournament_id: &str) -> String {
    let mut lines = Vec::new();
    let store = &app.state.tournaments;

    let Some(t) = store.find_tournament_by_id(Some(tournament_id)) else {
        match placeholder(&store.state, true, "Tournament not found") {
            Some(msg) => lines.extend(msg),
            None => lines.push("  Tournament not found".to_string()),
        }
        return lines.join("\n");
    };

    let favorite = app.state.favorites.is_tournament_favorite(&t.id);
    heading(&mut lines, &t.name);
    lines.push(format!("Status:      {}", t.status.label()));
    lines.push(format!(
        "Dates:       {} - {}",
        format_date(Some(t.start_date)),
        format_date(Some(t.end_date))
    ));
    lines.push(format!("Location:    {}", t.location));
    lines.push(format!("Prize pool:  {}", t.prize_pool));
    lines.push(format!("League:      {}", t.description));
    if let Some(logo) = &t.logo {
        lines.push(format!("Logo:        {logo}"));
    }
    lines.push(format!("Favorite:    {}", if favorite { "yes" } else { "no" }));

    heading(&mut lines, "Matches");
    push_matches(
        &mut lines,
        &app.state.matches.state,
        app.state.matches.matches(),
        "No matches scheduled yet",
    );
    lines.join("\n")
}

/// A league looked up by id, or else by name, with its known tournaments.
pub fn draw_league(app: &App, id_or_name: &str) -> String {
    let mut lines = Vec::new();
    let store = &app.state.leagues;
    let league = store
        .find_league_by_id(Some(id_or_name))
        .or_else(|| store.find_league_by_name(Some(id_or_name)));

    let Some(league) = league else {
        match placeholder(&store.state, true, "League not found") {
            Some(msg) => lines.extend(msg),
            None => lines.push("  League not found".to_string()),
        }
        return lines.join("\n");
    };

    heading(&mut lines, &league.name);
    if let Some(slug) = &league.slug {
        lines.push(format!("Slug:      {slug}"));
    }
    if let Some(url) = &league.url {
        lines.push(format!("Website:   {url}"));
    }
    if let Some(image) = &league.image_url {
        lines.push(format!("Logo:      {image}"));
    }

    heading(&mut lines, "Tournaments");
    let tournaments: Vec<&Tournament> = app
        .state
        .tournaments
        .all_tournaments()
        .into_iter()
        .filter(|t| t.league_id.as_deref().is_some_and(|id| league.matches_id(id)))
        .collect();
    push_tournaments(&mut lines, app, &tournaments, "No tournaments for this league");
    lines.join("\n")
}

/// Flat bracket: every match of the tournament with its winner.
pub fn draw_bracket(app: &App, tournament_id: &str) -> String {
    let mut lines = Vec::new();
    let store = &app.state.tournaments;

    let Some(t) = store.find_tournament_by_id(Some(tournament_id)) else {
        match placeholder(&store.state, true, "Tournament not found") {
            Some(msg) => lines.extend(msg),
            None => lines.push("  Tournament not found".to_string()),
        }
        return lines.join("\n");
    };

    heading(&mut lines, &format!("{} - Bracket", t.name));
    let rows: Vec<String> = app
        .state
        .matches
        .matches()
        .iter()
        .map(|m| match m.winner() {
            Some(winner) => format!("{}  -> {}", match_line(m), winner.name),
            None => match_line(m),
        })
        .collect();
    match placeholder(
        &app.state.matches.state,
        rows.is_empty(),
        "No matches available for this tournament",
    ) {
        Some(msg) => lines.extend(msg),
        None => lines.extend(rows),
    }
    lines.join("\n")
}

pub fn draw_match(app: &App, match_id: &str) -> String {
    let mut lines = Vec::new();
    let state = &app.state.matches.state;

    let Some(m) = app.state.matches.find_match_by_id(match_id) else {
        match placeholder(state, true, "Match not found") {
            Some(msg) => lines.extend(msg),
            None => lines.push("  Match not found".to_string()),
        }
        return lines.join("\n");
    };

    heading(&mut lines, &format!("{} vs {}", m.team1.name, m.team2.name));
    lines.push(format!("Status:   {}", status_badge(m)));
    lines.push(format!("Round:    {}", m.round));
    lines.push(format!("Format:   Best of {}", m.best_of));
    lines.push(format!("Date:     {}", format_date_time(m.date)));
    if m.status != MatchStatus::Upcoming {
        lines.push(format!(
            "Score:    {} {} - {} {}",
            m.team1.name, m.team1.score, m.team2.score, m.team2.name
        ));
    }
    if let Some(winner) = m.winner() {
        lines.push(format!("Winner:   {}", winner.name));
    }
    if let Some(tournament) = m
        .tournament_id
        .as_deref()
        .and_then(|id| app.state.tournaments.find_tournament_by_id(Some(id)))
    {
        lines.push(format!("Event:    {} (#{})", tournament.name, tournament.id));
    }
    lines.join("\n")
}

pub fn draw_team(app: &App, team_id: &str) -> String {
    let mut lines = Vec::new();
    let state = &app.state.teams.state;

    let Some(team) = app.team() else {
        match placeholder(state, true, "Team not found") {
            Some(msg) => lines.extend(msg),
            None => lines.push("  Team not found".to_string()),
        }
        return lines.join("\n");
    };

    let favorite = app.state.favorites.is_team_favorite(&team.id);
    heading(&mut lines, &team.name);
    lines.push(format!("Region:    {}", team.region));
    if let Some(logo) = &team.logo {
        lines.push(format!("Logo:      {logo}"));
    }
    lines.push(format!("Favorite:  {}", if favorite { "yes" } else { "no" }));

    let record = app.team_record(team_id);
    lines.push(format!(
        "Record:    {}W - {}L  ({}% win rate over {} matches)",
        record.wins,
        record.losses,
        record.win_rate(),
        record.completed
    ));

    heading(&mut lines, "Roster");
    if team.players.is_empty() {
        lines.push("  No roster available".to_string());
    }
    for p in &team.players {
        lines.push(format!("  {}  {}", truncate_name(&p.name, NAME_WIDTH), p.role));
    }

    heading(&mut lines, "Recent Matches");
    let recent = matches_for_team(app.state.matches.matches(), team_id);
    push_matches(
        &mut lines,
        &app.state.matches.state,
        recent.into_iter().take(TEAM_RECENT),
        "No matches found for this team",
    );
    lines.join("\n")
}

pub fn draw_teams(app: &App) -> String {
    let mut lines = Vec::new();
    heading(&mut lines, "Teams");
    let teams = app.state.teams.teams();
    match placeholder(&app.state.teams.state, teams.is_empty(), "No teams found") {
        Some(msg) => lines.extend(msg),
        None => lines.extend(
            teams
                .iter()
                .map(|t| team_line(t, app.state.favorites.is_team_favorite(&t.id))),
        ),
    }
    lines.join("\n")
}

pub fn draw_search(app: &App, query: &str) -> String {
    let results = search(
        query,
        app.state.tournaments.all_tournaments(),
        app.state.teams.teams(),
        app.state.matches.matches(),
    );

    let mut lines = Vec::new();
    heading(&mut lines, &format!("Search results for \"{query}\""));
    lines.push(format!(
        "Found {} results: {} tournaments, {} teams, and {} matches",
        results.len(),
        results.tournaments.len(),
        results.teams.len(),
        results.matches.len()
    ));
    if results.is_empty() {
        lines.push("  Nothing matched. Try a team, region or event name.".to_string());
        return lines.join("\n");
    }

    if !results.tournaments.is_empty() {
        heading(&mut lines, "Tournaments");
        push_tournaments(&mut lines, app, &results.tournaments, "");
    }
    if !results.teams.is_empty() {
        heading(&mut lines, "Teams");
        lines.extend(
            results
                .teams
                .iter()
                .map(|t| team_line(t, app.state.favorites.is_team_favorite(&t.id))),
        );
    }
    if !results.matches.is_empty() {
        heading(&mut lines, "Matches");
        lines.extend(results.matches.iter().map(|m| match_line(m)));
    }
    lines.join("\n")
}

/// Favorites are stored as ids; names come from whatever is loaded.
pub fn draw_favorites(app: &App) -> String {
    let favorites = app.state.favorites.favorites();
    let mut lines = Vec::new();
    lines.push(format!("Saved in {}", app.state.favorites.path().display()));

    heading(&mut lines, "Favorite Tournaments");
    if favorites.favorite_tournaments.is_empty() {
        lines.push("  No favorite tournaments yet".to_string());
    }
    for id in &favorites.favorite_tournaments {
        match app.state.tournaments.find_tournament_by_id(Some(id)) {
            Some(t) => lines.push(tournament_line(t, true)),
            None => lines.push(format!(" *#{id}")),
        }
    }

    heading(&mut lines, "Favorite Teams");
    if favorites.favorite_teams.is_empty() {
        lines.push("  No favorite teams yet".to_string());
    }
    for id in &favorites.favorite_teams {
        match app.state.teams.teams().iter().find(|t| &t.id == id) {
            Some(t) => lines.push(team_line(t, true)),
            None => lines.push(format!(" *#{id}")),
        }
    }
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Live screen
// ---------------------------------------------------------------------------

/// Redraw the live screen: title, match table and status bar.
pub fn draw<B>(terminal: &mut Terminal<B>, app: &App) -> Result<(), B::Error>
where
    B: Backend,
{
    terminal.draw(|f| {
        let [title, body, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(f.area());

        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" Land of Dawn", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("  MLBB esports"),
            ])),
            title,
        );
        draw_live_matches(f, body, app);
        draw_status_bar(f, status, app);
    })?;
    Ok(())
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_live_matches(f: &mut Frame, area: Rect, app: &App) {
    let loader = &app.state.sections.live;
    let live: Vec<&Match> = loader.live().collect();
    let block = default_border(Color::White).title(format!(" Live Matches ({}) ", live.len()));

    if let Some(err) = loader.state.error.as_deref() {
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(
            Paragraph::new(vec![
                Line::from(format!("! {err}")),
                Line::from("Retrying on the next refresh. Press r to retry now."),
            ])
            .style(Style::default().fg(Color::Red)),
            inner,
        );
        return;
    }
    // Rows from the last refresh stay up while the next one is in flight.
    if live.is_empty() {
        let msg = if loader.state.loading { "Loading..." } else { "No live matches right now" };
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(Paragraph::new(msg).style(Style::default().fg(Color::DarkGray)), inner);
        return;
    }

    let header = Row::new(["", "Team 1", "Score", "Team 2", "Format", "Round"])
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);
    let rows = live.iter().map(|m| {
        Row::new(vec![
            Cell::from(status_badge(m)).style(Style::default().fg(Color::Red)),
            Cell::from(m.team1.name.clone()),
            Cell::from(format!("{} - {}", m.team1.score, m.team2.score)),
            Cell::from(m.team2.name.clone()),
            Cell::from(format!("Bo{}", m.best_of)),
            Cell::from(m.round.clone()),
        ])
    });
    let widths = [
        Constraint::Length(5),
        Constraint::Fill(2),
        Constraint::Length(7),
        Constraint::Fill(2),
        Constraint::Length(6),
        Constraint::Fill(3),
    ];
    f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}

fn draw_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let updated = match app.state.live_updated_at {
        Some(at) => format!(" Updated {}", at.format("%H:%M:%S UTC")),
        None => " Waiting for first update".to_string(),
    };
    let (note, style) = match app.state.loading {
        LoadingState { is_loading: true, .. } => ("  refreshing...", Style::default().fg(Color::White)),
        LoadingState { failed: true, .. } => ("  last refresh failed", Style::default().fg(Color::Red)),
        _ => ("", Style::default()),
    };

    let [left, right] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(LIVE_HELP.len() as u16),
    ])
    .areas(area);
    f.render_widget(
        Paragraph::new(Line::from(vec![Span::raw(updated), Span::styled(note, style)])),
        left,
    );
    f.render_widget(
        Paragraph::new(LIVE_HELP)
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        right,
    );
}
