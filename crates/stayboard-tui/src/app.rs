//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.
//!
//! Every filter change goes through [`AppState::recompute`], which re-runs
//! the filter cascade and every chart aggregate over the new view.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent},
    theme::{Palette, Theme},
    widgets::{
        bar_list::BarList,
        box_plot::BoxPlot,
        command_bar::{CommandBar, CommandBarState},
        filter_list::{FilterList, FilterListState},
        heatmap::Heatmap,
        help::HelpPopup,
        histogram::Histogram,
        kpi_row::KpiRow,
        page_bar::PageBar,
        rating_slider::{RatingSlider, RatingSliderState, SliderChange},
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    Frame, Terminal,
};
use stayboard_core::{
    config::Config,
    filter::city_options,
    normalize::SourceField,
    stats::DashboardStats,
    FilterSet, ListingTable, RatingRange,
};
use std::{collections::BTreeSet, io, time::Duration};

// ---------------------------------------------------------------------------
// Focus + page types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Cities,
    Rating,
    Amenities,
    /// Vim-style `:` command line is active.
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Overview,
    DeepDive,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Overview, Page::DeepDive];

    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::DeepDive => "Deep Dive",
        }
    }

    fn next(self) -> Page {
        match self {
            Page::Overview => Page::DeepDive,
            Page::DeepDive => Page::Overview,
        }
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub table: ListingTable,
    pub filters: FilterSet,
    /// Aggregates over the current view.
    pub stats: DashboardStats,
    /// Rows in the current view.
    pub visible: usize,
    /// Slider limits: the rating span of the city-filtered rows.
    pub rating_bounds: Option<RatingRange>,
    /// The range actually applied, explicit or defaulted.
    pub rating_applied: Option<RatingRange>,
    pub cities: FilterListState,
    pub slider: RatingSliderState,
    pub amenities: FilterListState,
    pub page: Page,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,
}

impl AppState {
    pub fn new(table: ListingTable, config: Config, theme: Theme) -> Self {
        let cities = FilterListState::new(city_options(table.listings()));
        let stats = DashboardStats::compute(&[], &config.charts);
        let mut state = AppState {
            table,
            filters: FilterSet::default(),
            stats,
            visible: 0,
            rating_bounds: None,
            rating_applied: None,
            cities,
            slider: RatingSliderState::default(),
            amenities: FilterListState::default(),
            page: Page::Overview,
            focus: Focus::Cities,
            prev_focus: Focus::Cities,
            theme,
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            quit: false,
        };
        state.focus = state.focus_order().first().copied().unwrap_or(Focus::Cities);
        state.prev_focus = state.focus;
        state.recompute();
        state
    }

    /// Re-run the filter cascade and every aggregate over the new view.
    pub fn recompute(&mut self) {
        let cascade = self.table.cascade(&self.filters);
        self.stats = DashboardStats::compute(&cascade.rows, &self.config.charts);
        self.visible = cascade.rows.len();
        self.rating_bounds = cascade.rating_bounds;
        self.rating_applied = cascade.rating_applied;

        // Selected amenities stay listed so they can still be unticked.
        let offered: BTreeSet<String> = cascade
            .amenity_options
            .into_iter()
            .chain(self.filters.amenities.iter().cloned())
            .collect();
        self.amenities.set_items(offered.into_iter().collect());

        tracing::debug!(
            visible = self.visible,
            total = self.table.len(),
            "view recomputed"
        );
    }

    /// Sidebar widgets that exist for this dataset, in focus order.
    pub fn focus_order(&self) -> Vec<Focus> {
        let columns = self.table.columns();
        let mut order = Vec::with_capacity(3);
        if columns.contains(SourceField::Address) {
            order.push(Focus::Cities);
        }
        if columns.contains(SourceField::Rating) {
            order.push(Focus::Rating);
        }
        if columns.contains(SourceField::Amenities) {
            order.push(Focus::Amenities);
        }
        order
    }

    fn cycle_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        if order.is_empty() {
            return;
        }
        let idx = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (idx + 1) % order.len()
        } else {
            (idx + order.len() - 1) % order.len()
        };
        tracing::debug!(from = ?self.focus, to = ?order[next], "focus cycle");
        self.focus = order[next];
    }

    /// Handle one semantic event.
    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if self.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                }
                AppEvent::Quit => self.quit = true,
                AppEvent::Enter => {
                    let input = self.command_bar.input.clone();
                    match Command::parse(&input) {
                        Ok(cmd) => {
                            tracing::debug!(command = ?cmd, "executing command");
                            self.command_bar.clear();
                            self.focus = self.prev_focus;
                            execute_command(self, cmd);
                        }
                        Err(msg) if msg.is_empty() => {
                            self.command_bar.clear();
                            self.focus = self.prev_focus;
                        }
                        Err(msg) => {
                            // Show the error; bar stays open
                            self.command_bar.error = Some(msg);
                        }
                    }
                }
                other => self.command_bar.handle(&other),
            }
            return;
        }

        match event {
            AppEvent::Char('?') => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }
            AppEvent::Char(':') => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }
            AppEvent::FocusNext => self.cycle_focus(true),
            AppEvent::FocusPrev => self.cycle_focus(false),
            AppEvent::NextPage => self.page = self.page.next(),
            AppEvent::GotoPage(n) => {
                if let Some(page) = Page::ALL.get(usize::from(n).saturating_sub(1)) {
                    self.page = *page;
                }
            }
            AppEvent::ClearFilters => {
                tracing::debug!("filters cleared");
                self.filters.clear();
                self.recompute();
            }
            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}
            other => self.dispatch_to_focused(other),
        }
    }

    /// Route an event to the sidebar widget that owns the current focus.
    fn dispatch_to_focused(&mut self, event: AppEvent) {
        match self.focus {
            Focus::Cities => {
                if let Some(city) = self.cities.handle(&event) {
                    self.filters.toggle_city(&city);
                    self.recompute();
                }
            }
            Focus::Amenities => {
                if let Some(amenity) = self.amenities.handle(&event) {
                    self.filters.toggle_amenity(&amenity);
                    self.recompute();
                }
            }
            Focus::Rating => {
                match self.slider.handle(&event, self.rating_applied, self.rating_bounds) {
                    Some(SliderChange::Set(range)) => {
                        self.filters.rating = Some(range);
                        self.recompute();
                    }
                    Some(SliderChange::Reset) => {
                        self.filters.rating = None;
                        self.recompute();
                    }
                    None => {}
                }
            }
            Focus::Command => {} // handled before dispatch, should not reach here
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(table: ListingTable, config: Config, theme: Theme) -> Self {
        App {
            state: AppState::new(table, config, theme),
        }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(50))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        let app_event = if self.state.focus == Focus::Command {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.state.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.state.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let [bar, body] = Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
    let pct = state.config.ui.sidebar_width_pct.clamp(10, 60);
    let [sidebar, page] =
        Layout::horizontal([Constraint::Percentage(pct), Constraint::Fill(1)]).areas(body);

    frame.render_widget(
        PageBar::new(state.page, state.visible, state.table.len(), &state.theme),
        bar,
    );
    draw_sidebar(frame, state, sidebar);
    match state.page {
        Page::Overview => draw_overview(frame, state, page),
        Page::DeepDive => draw_deep_dive(frame, state, page),
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
    }
}

fn draw_sidebar(frame: &mut Frame, state: &AppState, area: Rect) {
    let order = state.focus_order();
    let has = |f: Focus| order.contains(&f);
    // `Command` keeps the highlight on whichever widget opened it.
    let focused = |f: Focus| {
        state.focus == f || (state.focus == Focus::Command && state.prev_focus == f)
    };

    let constraints: Vec<Constraint> = order
        .iter()
        .map(|f| match f {
            Focus::Rating => Constraint::Length(4),
            _ => Constraint::Fill(1),
        })
        .collect();
    let chunks = Layout::vertical(constraints).split(area);
    let mut slots = chunks.iter().copied();

    if has(Focus::Cities) {
        if let Some(slot) = slots.next() {
            frame.render_widget(
                FilterList::new(
                    "City",
                    &state.cities,
                    &state.filters.cities,
                    focused(Focus::Cities),
                    &state.theme,
                ),
                slot,
            );
        }
    }
    if has(Focus::Rating) {
        if let Some(slot) = slots.next() {
            frame.render_widget(
                RatingSlider::new(
                    &state.slider,
                    state.rating_applied,
                    state.rating_bounds,
                    focused(Focus::Rating),
                    &state.theme,
                ),
                slot,
            );
        }
    }
    if has(Focus::Amenities) {
        if let Some(slot) = slots.next() {
            frame.render_widget(
                FilterList::new(
                    "Amenities",
                    &state.amenities,
                    &state.filters.amenities,
                    focused(Focus::Amenities),
                    &state.theme,
                ),
                slot,
            );
        }
    }
}

fn draw_overview(frame: &mut Frame, state: &AppState, area: Rect) {
    let o = &state.stats.overview;
    let theme = &state.theme;

    let [kpis, middle, bottom] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [rating, prices] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(middle);
    let [discount, top] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(bottom);

    frame.render_widget(KpiRow::new(&o.kpis, theme), kpis);
    frame.render_widget(
        Histogram::new("Rating distribution", &o.rating_histogram, |v| format!("{v:.1}"), theme),
        rating,
    );
    frame.render_widget(
        BoxPlot::new(o.base_cost_box.as_ref(), o.final_cost_box.as_ref(), theme),
        prices,
    );
    frame.render_widget(
        Histogram::new("Discount %", &o.discount_histogram, |v| format!("{v:.0}%"), theme),
        discount,
    );
    frame.render_widget(
        BarList::new(
            "Top hotels by rating",
            &o.top_hotels,
            Palette::Viridis,
            |v| format!("{v:.2}"),
            theme,
        ),
        top,
    );
}

fn draw_deep_dive(frame: &mut Frame, state: &AppState, area: Rect) {
    let d = &state.stats.deep_dive;
    let theme = &state.theme;

    let [top, bottom] =
        Layout::vertical([Constraint::Fill(1), Constraint::Fill(1)]).areas(area);
    let [cities, categories] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(top);
    let [amenities, heat] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(bottom);

    let count = |v: f64| format!("{v:.0}");
    frame.render_widget(
        BarList::new("Top cities", &d.top_cities, Palette::Plasma, count, theme),
        cities,
    );
    frame.render_widget(
        BarList::new("Categories", &d.categories, Palette::Teal, count, theme),
        categories,
    );
    frame.render_widget(
        BarList::new("Top amenities", &d.amenities, Palette::Magma, count, theme),
        amenities,
    );
    frame.render_widget(Heatmap::new(&d.correlation, theme), heat);
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Direction;
    use ratatui::backend::TestBackend;
    use rstest::rstest;
    use stayboard_core::{normalize::normalize_records, table::ColumnSet, Listing};

    fn table() -> ListingTable {
        let records = serde_json::json!([
            {"NAME": "Blue Inn", "ADDRESS": "MG Road, Pune", "RATING": "4.5 stars",
             "BASE_COST": "₹2,000", "FINAL_COST": "₹1,500", "AMENITYS": "WiFi, AC"},
            {"NAME": "Sea View", "ADDRESS": "Baga, Goa", "RATING": "3.1",
             "BASE_COST": "1000", "FINAL_COST": "900", "AMENITYS": "WiFi|TV"},
            {"NAME": "Fort Stay", "ADDRESS": "Fort, Mumbai", "RATING": null,
             "BASE_COST": "1500", "FINAL_COST": "1500", "AMENITYS": "AC"},
        ]);
        let records = match records {
            serde_json::Value::Array(items) => items
                .into_iter()
                .filter_map(|v| match v {
                    serde_json::Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };
        normalize_records(records)
    }

    fn state() -> AppState {
        AppState::new(table(), Config::defaults(), Theme::load_default())
    }

    #[test]
    fn initial_view_drops_unrated_rows() {
        let s = state();
        assert_eq!(s.table.len(), 3);
        assert_eq!(s.visible, 2);
        assert_eq!(s.rating_applied, Some(RatingRange { lo: 3.1, hi: 4.5 }));
        assert_eq!(s.cities.items, vec!["Goa", "Mumbai", "Pune"]);
    }

    #[test]
    fn toggling_a_city_recomputes() {
        let mut s = state();
        s.handle(AppEvent::Nav(Direction::Down)); // Mumbai
        s.handle(AppEvent::Nav(Direction::Down)); // Pune
        s.handle(AppEvent::Toggle);
        assert!(s.filters.cities.contains("Pune"));
        assert_eq!(s.visible, 1);
        assert_eq!(s.stats.overview.kpis.hotels, 1);
        assert_eq!(s.amenities.items, vec!["AC", "WiFi"]);
    }

    #[test]
    fn selected_amenity_stays_listed_after_it_empties_the_view() {
        let mut s = state();
        s.filters.toggle_amenity("TV");
        s.filters.toggle_city("Pune");
        s.recompute();
        assert_eq!(s.visible, 0);
        assert!(s.amenities.items.contains(&"TV".to_string()));
    }

    #[test]
    fn focus_cycles_through_sidebar() {
        let mut s = state();
        assert_eq!(s.focus, Focus::Cities);
        s.handle(AppEvent::FocusNext);
        assert_eq!(s.focus, Focus::Rating);
        s.handle(AppEvent::FocusNext);
        assert_eq!(s.focus, Focus::Amenities);
        s.handle(AppEvent::FocusNext);
        assert_eq!(s.focus, Focus::Cities);
        s.handle(AppEvent::FocusPrev);
        assert_eq!(s.focus, Focus::Amenities);
    }

    #[test]
    fn focus_skips_missing_columns() {
        let rows = vec![Listing::default()];
        let table = ListingTable::new(rows, [SourceField::Name].into_iter().collect());
        let mut s = AppState::new(table, Config::defaults(), Theme::load_default());
        assert!(s.focus_order().is_empty());
        s.handle(AppEvent::FocusNext);
        assert_eq!(s.focus, Focus::Cities);
    }

    #[test]
    fn slider_narrows_and_resets() {
        let mut s = state();
        s.handle(AppEvent::FocusNext);
        s.handle(AppEvent::Nav(Direction::Right)); // lo 3.1 -> 3.2
        assert_eq!(s.filters.rating, Some(RatingRange { lo: 3.2, hi: 4.5 }));
        assert_eq!(s.visible, 1);
        s.handle(AppEvent::Enter);
        assert_eq!(s.filters.rating, None);
        assert_eq!(s.visible, 2);
    }

    #[test]
    fn command_line_sets_rating_and_page() {
        let mut s = state();
        s.handle(AppEvent::Char(':'));
        assert_eq!(s.focus, Focus::Command);
        for c in "rating 4 5".chars() {
            s.handle(AppEvent::Char(c));
        }
        s.handle(AppEvent::Enter);
        assert_eq!(s.focus, Focus::Cities);
        assert_eq!(s.visible, 1);

        s.handle(AppEvent::Char(':'));
        for c in "page deep".chars() {
            s.handle(AppEvent::Char(c));
        }
        s.handle(AppEvent::Enter);
        assert_eq!(s.page, Page::DeepDive);
    }

    #[test]
    fn bad_command_keeps_bar_open() {
        let mut s = state();
        s.handle(AppEvent::Char(':'));
        s.handle(AppEvent::Char('z'));
        s.handle(AppEvent::Enter);
        assert_eq!(s.focus, Focus::Command);
        assert!(s.command_bar.error.is_some());
        s.handle(AppEvent::Escape);
        assert_eq!(s.focus, Focus::Cities);
    }

    #[test]
    fn clear_filters_restores_default_view() {
        let mut s = state();
        s.filters.toggle_city("Goa");
        s.recompute();
        assert_eq!(s.visible, 1);
        s.handle(AppEvent::ClearFilters);
        assert!(s.filters.is_empty());
        assert_eq!(s.visible, 2);
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let mut s = state();
        s.handle(AppEvent::Char('?'));
        s.handle(AppEvent::ClearFilters);
        s.handle(AppEvent::NextPage);
        assert_eq!(s.page, Page::Overview);
        s.handle(AppEvent::Escape);
        assert!(!s.show_help);
        s.handle(AppEvent::GotoPage(2));
        assert_eq!(s.page, Page::DeepDive);
    }

    #[test]
    fn draws_both_pages() {
        let mut s = state();
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).expect("test terminal");
        terminal.draw(|f| draw(f, &s)).expect("draw overview");
        s.page = Page::DeepDive;
        s.show_help = true;
        terminal.draw(|f| draw(f, &s)).expect("draw deep dive");
    }

    fn draw_every_page(s: &mut AppState, width: u16, height: u16) {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
        for page in Page::ALL {
            s.page = page;
            terminal.draw(|f| draw(f, s)).expect("draw");
        }
        s.focus = Focus::Command;
        terminal.draw(|f| draw(f, s)).expect("draw with command bar");
    }

    #[rstest]
    #[case(60, 4)]
    #[case(60, 2)]
    #[case(20, 12)]
    #[case(8, 3)]
    #[case(140, 40)]
    fn empty_view_draws_at_any_size(#[case] width: u16, #[case] height: u16) {
        let mut s = state();
        s.filters.toggle_amenity("TV");
        s.filters.toggle_amenity("AC");
        s.recompute();
        assert_eq!(s.visible, 0);
        draw_every_page(&mut s, width, height);

        let empty = ListingTable::new(vec![], ColumnSet::default());
        let mut s = AppState::new(empty, Config::defaults(), Theme::load_default());
        draw_every_page(&mut s, width, height);
    }

    #[rstest]
    #[case(60, 4)]
    #[case(12, 6)]
    #[case(30, 10)]
    fn populated_view_draws_on_small_terminals(#[case] width: u16, #[case] height: u16) {
        let mut s = state();
        draw_every_page(&mut s, width, height);
    }
}
