//! Main application logic and TUI event loop.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tracing::{debug, info};

use crate::cli::AppConfig;
use crate::data::{DataStore, RaceSummary};
use crate::ui::{
    chart::ViewPanel,
    tabs::{tab_for_key, ViewTabs},
    widgets::{SelectorList, StatusBar},
    HelpOverlay, Theme,
};
use crate::views::{Selection, View, ViewData};

/// Input poll interval; the data never changes, so this only bounds latency
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Which panel is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPanel {
    Seasons,
    Races,
    Drivers,
    View,
}

impl FocusedPanel {
    fn next(self) -> Self {
        match self {
            FocusedPanel::Seasons => FocusedPanel::Races,
            FocusedPanel::Races => FocusedPanel::Drivers,
            FocusedPanel::Drivers => FocusedPanel::View,
            FocusedPanel::View => FocusedPanel::Seasons,
        }
    }

    fn prev(self) -> Self {
        match self {
            FocusedPanel::Seasons => FocusedPanel::View,
            FocusedPanel::Races => FocusedPanel::Seasons,
            FocusedPanel::Drivers => FocusedPanel::Races,
            FocusedPanel::View => FocusedPanel::Drivers,
        }
    }
}

/// Move a list cursor one step with wrap-around
fn step(selected: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (selected + 1) % len
    } else {
        selected.checked_sub(1).unwrap_or(len - 1)
    }
}

/// Application state
pub struct App {
    theme: Theme,

    // Data
    store: DataStore,
    years: Vec<i64>,
    year_labels: Vec<String>,
    races: Vec<RaceSummary>,
    race_labels: Vec<String>,
    driver_ids: Vec<i64>,
    driver_labels: Vec<String>,

    // Active view and its rows
    view: View,
    view_data: ViewData,

    // UI State
    focused: FocusedPanel,
    selected_year: usize,
    selected_race: usize,
    selected_driver: usize,
    show_help: bool,

    // Exit flag
    should_quit: bool,

    // Error message to display (non-fatal)
    error_message: Option<String>,
}

impl App {
    /// Create a new App over a loaded data store
    pub fn new(config: &AppConfig, store: DataStore) -> Self {
        let years = store.years();
        let year_labels = years.iter().map(|y| y.to_string()).collect();

        // Latest season unless one was requested
        let selected_year = config
            .initial_year
            .and_then(|y| years.iter().position(|&year| year == y))
            .unwrap_or_else(|| years.len().saturating_sub(1));

        let mut app = App {
            theme: Theme::default(),
            store,
            years,
            year_labels,
            races: Vec::new(),
            race_labels: Vec::new(),
            driver_ids: Vec::new(),
            driver_labels: Vec::new(),
            view: View::DriverStandings,
            view_data: ViewData::DriverStandings(Vec::new()),
            focused: FocusedPanel::Seasons,
            selected_year,
            selected_race: 0,
            selected_driver: 0,
            show_help: false,
            should_quit: false,
            error_message: None,
        };

        if let Some(requested) = config.initial_year {
            if app.years.get(app.selected_year) != Some(&requested) {
                app.set_error(format!("No races found for season {requested}"));
            }
        }

        app.load_races();
        app
    }

    /// Current filter values
    pub fn selection(&self) -> Selection {
        Selection {
            year: self.years.get(self.selected_year).copied(),
            race_id: self.races.get(self.selected_race).map(|r| r.race_id),
            driver_id: self.driver_ids.get(self.selected_driver).copied(),
        }
    }

    /// Reload the race list for the selected season; the first race is selected
    fn load_races(&mut self) {
        self.races = self
            .selection()
            .year
            .map(|y| self.store.races_for_year(y))
            .unwrap_or_default();
        self.race_labels = self
            .races
            .iter()
            .map(|r| match r.date {
                Some(date) => format!("{} ({date})", r.label()),
                None => r.label(),
            })
            .collect();
        self.selected_race = 0;
        self.load_drivers();
    }

    /// Reload the driver list from the selected race's classification
    fn load_drivers(&mut self) {
        let mut results = self
            .selection()
            .race_id
            .map(|r| self.store.race_results(r))
            .unwrap_or_default();
        results.sort_by_key(|r| r.position_order.unwrap_or(i64::MAX));

        self.driver_ids = results.iter().map(|r| r.driver_id).collect();
        self.driver_labels = results.iter().map(|r| r.driver_option_label()).collect();
        self.selected_driver = 0;
        self.refresh_view();
    }

    /// Recompute the active view for the current selection
    fn refresh_view(&mut self) {
        let selection = self.selection();
        self.view_data = ViewData::compute(&self.store, self.view, &selection);
        debug!(view = ?self.view, ?selection, rows = self.view_data.len(), "View refreshed");
    }

    fn set_view(&mut self, view: View) {
        if view != self.view {
            self.view = view;
            self.refresh_view();
        }
    }

    /// Set an error message to display (non-fatal)
    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
    }

    /// Handle keyboard input
    fn handle_input(&mut self, key: KeyCode) {
        // Global shortcuts
        match key {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::F(1) => {
                self.show_help = !self.show_help;
                return;
            }
            KeyCode::Esc if self.show_help => {
                self.show_help = false;
                return;
            }
            KeyCode::Tab => {
                self.focused = self.focused.next();
                return;
            }
            KeyCode::BackTab => {
                self.focused = self.focused.prev();
                return;
            }
            _ => {}
        }

        // If help is shown, don't process other keys
        if self.show_help {
            return;
        }

        match key {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(view) = tab_for_key(c).and_then(|i| View::TABS.get(i)) {
                    self.set_view(*view);
                }
                return;
            }
            KeyCode::Char(']') => {
                self.set_view(self.view.next());
                return;
            }
            KeyCode::Char('[') => {
                self.set_view(self.view.prev());
                return;
            }
            _ => {}
        }

        // Any keypress clears a stale error
        self.error_message = None;

        match self.focused {
            FocusedPanel::Seasons => self.handle_season_navigation(key),
            FocusedPanel::Races => self.handle_race_navigation(key),
            FocusedPanel::Drivers => self.handle_driver_navigation(key),
            FocusedPanel::View => self.handle_view_navigation(key),
        }
    }

    fn handle_season_navigation(&mut self, key: KeyCode) {
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_year = step(self.selected_year, self.years.len(), true);
                self.load_races();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_year = step(self.selected_year, self.years.len(), false);
                self.load_races();
            }
            KeyCode::Enter | KeyCode::Char('l') => {
                self.focused = FocusedPanel::Races;
            }
            _ => {}
        }
    }

    fn handle_race_navigation(&mut self, key: KeyCode) {
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_race = step(self.selected_race, self.races.len(), true);
                self.load_drivers();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_race = step(self.selected_race, self.races.len(), false);
                self.load_drivers();
            }
            KeyCode::Enter | KeyCode::Char('l') => {
                self.focused = FocusedPanel::Drivers;
            }
            KeyCode::Esc => {
                self.focused = FocusedPanel::Seasons;
            }
            _ => {}
        }
    }

    fn handle_driver_navigation(&mut self, key: KeyCode) {
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_driver = step(self.selected_driver, self.driver_ids.len(), true);
                self.refresh_view();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_driver = step(self.selected_driver, self.driver_ids.len(), false);
                self.refresh_view();
            }
            KeyCode::Enter | KeyCode::Char('l') => {
                self.focused = FocusedPanel::View;
            }
            KeyCode::Esc => {
                self.focused = FocusedPanel::Races;
            }
            _ => {}
        }
    }

    fn handle_view_navigation(&mut self, key: KeyCode) {
        match key {
            KeyCode::Right | KeyCode::Char('l') => self.set_view(self.view.next()),
            KeyCode::Left => self.set_view(self.view.prev()),
            KeyCode::Esc => {
                self.focused = FocusedPanel::Drivers;
            }
            _ => {}
        }
    }

    /// Breadcrumb of the filters the active view depends on
    fn subtitle(&self) -> Option<String> {
        use crate::views::Scope;

        let year = self.year_labels.get(self.selected_year);
        let race = self.races.get(self.selected_race).and_then(|r| r.name.clone());
        let driver = self.driver_labels.get(self.selected_driver);

        match self.view.scope() {
            Scope::Season => year.cloned(),
            Scope::Race => race,
            Scope::RaceAndDriver => match (race, driver) {
                (Some(r), Some(d)) => Some(format!("{r} / {d}")),
                (r, _) => r,
            },
            Scope::All => None,
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let size = frame.area();

        // Main layout: body, footer
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Body
                Constraint::Length(2), // Status bar
            ])
            .split(size);

        // Body layout: sidebar (left) and content (right)
        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(34), // Sidebar
                Constraint::Min(40),    // Content
            ])
            .split(main_chunks[0]);

        // Sidebar layout: seasons, races, drivers
        let sidebar_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(25), // Seasons
                Constraint::Percentage(40), // Races
                Constraint::Percentage(35), // Drivers
            ])
            .split(body_chunks[0]);

        // Content layout: tab bar and view
        let content_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Tabs
                Constraint::Min(10),   // View
            ])
            .split(body_chunks[1]);

        SelectorList::new("Seasons", &self.year_labels, self.selected_year, &self.theme).render(
            frame,
            sidebar_chunks[0],
            self.focused == FocusedPanel::Seasons,
        );
        SelectorList::new("Races", &self.race_labels, self.selected_race, &self.theme).render(
            frame,
            sidebar_chunks[1],
            self.focused == FocusedPanel::Races,
        );
        SelectorList::new("Drivers", &self.driver_labels, self.selected_driver, &self.theme)
            .render(
                frame,
                sidebar_chunks[2],
                self.focused == FocusedPanel::Drivers,
            );

        ViewTabs::new(self.view, &self.theme).render(frame, content_chunks[0]);

        let subtitle = self.subtitle();
        ViewPanel::new(self.view, &self.view_data, subtitle.as_deref(), &self.theme).render(
            frame,
            content_chunks[1],
            self.focused == FocusedPanel::View,
        );

        // Render status bar
        let context = self.view.title();
        let status_bar = StatusBar::new(
            Some(context),
            self.error_message.as_deref(),
            &self.theme,
        );
        status_bar.render(frame, main_chunks[1]);

        // Render help overlay if active
        if self.show_help {
            let help = HelpOverlay::new(&self.theme);
            help.render(frame, size);
        }
    }
}

/// Restore terminal to normal state
fn restore_terminal() {
    // Best effort cleanup - ignore errors since we may be in a panic
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

/// Run the TUI application
pub fn run(config: AppConfig) -> Result<()> {
    // Load everything before touching the terminal so load errors print normally
    let store = DataStore::load(&config.data_dir).with_context(|| {
        format!(
            "Failed to load Ergast data from {}",
            config.data_dir.display()
        )
    })?;
    info!(seasons = store.years().len(), "Starting dashboard");

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        restore_terminal();
        return Err(e).context("Failed to setup terminal");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            restore_terminal();
            return Err(e).context("Failed to create terminal");
        }
    };

    let mut app = App::new(&config, store);

    let result = run_main_loop(&mut terminal, &mut app);

    // Always restore terminal, regardless of result
    restore_terminal();
    terminal.show_cursor().ok();

    result
}

/// Main application loop
fn run_main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Windows reports both press and release
                if key.kind == KeyEventKind::Press {
                    app.handle_input(key.code);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
