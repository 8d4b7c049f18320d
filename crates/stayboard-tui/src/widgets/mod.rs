//! Ratatui widgets for the stayboard TUI.

pub mod bar_list;
pub mod box_plot;
pub mod command_bar;
pub mod filter_list;
pub mod heatmap;
pub mod help;
pub mod histogram;
pub mod kpi_row;
pub mod page_bar;
pub mod rating_slider;
