//! Filter list widget: a multi-select list in the sidebar (cities, amenities).
//!
//! # Navigation
//! - `↑`/`k` and `↓`/`j` move the cursor.
//! - `Space` or `Enter` toggles the item under the cursor.
//!
//! The list does not own the selection: the app's [`FilterSet`] does, and is
//! passed in at render time so the checkmarks always match what is applied.
//!
//! [`FilterSet`]: stayboard_core::FilterSet

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct FilterListState {
    /// Options currently offered, in display order.
    pub items: Vec<String>,
    /// Index into `items` of the highlighted row.
    pub cursor: usize,
}

impl FilterListState {
    pub fn new(items: Vec<String>) -> Self {
        Self { items, cursor: 0 }
    }

    /// Replace the options, keeping the cursor on the same item if it survives.
    pub fn set_items(&mut self, items: Vec<String>) {
        let current = self.items.get(self.cursor).cloned();
        self.items = items;
        self.cursor = current
            .and_then(|c| self.items.iter().position(|i| *i == c))
            .unwrap_or(0)
            .min(self.items.len().saturating_sub(1));
    }

    /// Handle a navigation event. Returns the item to toggle, if any.
    pub fn handle(&mut self, event: &AppEvent) -> Option<String> {
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                tracing::debug!(cursor = self.cursor, "list: cursor up");
                None
            }
            AppEvent::Nav(Direction::Down) => {
                if self.cursor + 1 < self.items.len() {
                    self.cursor += 1;
                }
                tracing::debug!(cursor = self.cursor, "list: cursor down");
                None
            }
            AppEvent::Toggle | AppEvent::Enter => {
                let item = self.items.get(self.cursor).cloned();
                tracing::debug!(item = ?item, "list: toggle");
                item
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct FilterList<'a> {
    title: &'a str,
    state: &'a FilterListState,
    selected: &'a BTreeSet<String>,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> FilterList<'a> {
    pub fn new(
        title: &'a str,
        state: &'a FilterListState,
        selected: &'a BTreeSet<String>,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { title, state, selected, focused, theme }
    }
}

impl Widget for FilterList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.selected.is_empty() {
            format!(" {} ", self.title)
        } else {
            format!(" {} ({}) ", self.title, self.selected.len())
        };
        let block = Block::bordered()
            .title(title)
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.state.items.is_empty() {
            Line::from(Span::styled("no options", Style::default().add_modifier(Modifier::DIM)))
                .render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .items
            .iter()
            .map(|item| {
                let (mark, style) = if self.selected.contains(item) {
                    ("✓ ", self.theme.checked)
                } else {
                    ("○ ", Style::default())
                };
                ListItem::new(Line::from(vec![
                    Span::styled(mark, style),
                    Span::styled(item.clone(), style),
                ]))
            })
            .collect();

        let highlight = if self.focused { self.theme.cursor } else { Style::default() };
        let list = List::new(items).highlight_style(highlight);
        let mut list_state = ListState::default().with_selected(Some(self.state.cursor));
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
