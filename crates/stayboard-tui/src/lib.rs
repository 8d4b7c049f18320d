//! stayboard TUI: ratatui dashboard over a loaded listing table.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use stayboard_core::{config::Config, ListingTable};

/// Start the dashboard on an already-loaded table.
pub fn run(table: ListingTable, config: Config) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(&config.ui.theme);
    tracing::info!(
        rows = table.len(),
        theme = %config.ui.theme,
        "starting dashboard"
    );
    App::new(table, config, theme).run()
}
