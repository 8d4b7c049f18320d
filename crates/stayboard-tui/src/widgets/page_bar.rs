//! Page bar widget: the strip at the top of the screen.

use crate::app::Page;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Tabs, Widget},
};

/// Renders the 1-line page strip: `Overview | Deep Dive`, the size of the
/// current view (`N of M hotels`) and right-aligned key hints.
pub struct PageBar<'a> {
    active: Page,
    visible: usize,
    total: usize,
    theme: &'a Theme,
}

impl<'a> PageBar<'a> {
    pub fn new(active: Page, visible: usize, total: usize, theme: &'a Theme) -> Self {
        Self { active, visible, total, theme }
    }
}

impl Widget for PageBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let labels: Vec<Line> = Page::ALL
            .iter()
            .enumerate()
            .map(|(i, page)| Line::from(format!(" {}:{} ", i + 1, page.title())))
            .collect();
        let selected = Page::ALL.iter().position(|p| *p == self.active).unwrap_or(0);

        Tabs::new(labels)
            .select(selected)
            .highlight_style(self.theme.cursor.add_modifier(Modifier::BOLD))
            .divider("")
            .render(area, buf);

        let count = format!(" {} of {} hotels ", self.visible, self.total);
        let hint = " x:clear  p:page  ?:help  q:quit ";

        let hint_x = area.right().saturating_sub(hint.len() as u16).max(area.x);
        buf.set_string(hint_x, area.y, hint, Style::default().add_modifier(Modifier::DIM));

        let count_x = hint_x.saturating_sub(count.chars().count() as u16);
        if count_x > area.x {
            buf.set_string(count_x, area.y, &count, self.theme.kpi_value);
        }
    }
}
