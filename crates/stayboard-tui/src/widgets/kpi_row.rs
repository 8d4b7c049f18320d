//! KPI row: four headline numbers across the top of the overview page.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph, Widget},
};
use stayboard_core::stats::Kpis;

pub struct KpiRow<'a> {
    kpis: &'a Kpis,
    theme: &'a Theme,
}

impl<'a> KpiRow<'a> {
    pub fn new(kpis: &'a Kpis, theme: &'a Theme) -> Self {
        Self { kpis, theme }
    }
}

impl Widget for KpiRow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cards = [
            ("Hotels", self.kpis.hotels.to_string()),
            ("Avg rating", fmt_opt(self.kpis.avg_rating, |v| format!("{v:.2}"))),
            ("Avg final price", fmt_opt(self.kpis.avg_final_cost, |v| format!("₹{v:.0}"))),
            ("Median discount", fmt_opt(self.kpis.median_discount_pct, |v| format!("{v:.1}%"))),
        ];

        let cells = Layout::horizontal([Constraint::Fill(1); 4]).split(area);
        for ((label, value), cell) in cards.into_iter().zip(cells.iter()) {
            let block = Block::bordered()
                .title(Line::styled(format!(" {label} "), self.theme.title))
                .border_style(self.theme.border_unfocused);
            let style = if value == "–" {
                Style::default().add_modifier(Modifier::DIM)
            } else {
                self.theme.kpi_value
            };
            Paragraph::new(Line::styled(value, style))
                .alignment(Alignment::Center)
                .block(block)
                .render(*cell, buf);
        }
    }
}

fn fmt_opt(v: Option<f64>, f: impl Fn(f64) -> String) -> String {
    v.map(f).unwrap_or_else(|| "–".to_string())
}
