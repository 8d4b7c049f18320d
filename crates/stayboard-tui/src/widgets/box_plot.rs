//! Box plot widget: base vs final price on a shared horizontal scale.
//!
//! ```text
//! base   ├────▒▒▒▒┃▒▒▒▒▒────────┤   · 3 outliers
//! final  ├──▒▒┃▒▒▒▒──────┤
//!        450                  6200
//! ```

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Widget},
};
use stayboard_core::stats::BoxSummary;

const LABEL_W: u16 = 7;

pub struct BoxPlot<'a> {
    base: Option<&'a BoxSummary>,
    fin: Option<&'a BoxSummary>,
    theme: &'a Theme,
}

impl<'a> BoxPlot<'a> {
    pub fn new(
        base: Option<&'a BoxSummary>,
        fin: Option<&'a BoxSummary>,
        theme: &'a Theme,
    ) -> Self {
        Self { base, fin, theme }
    }
}

impl Widget for BoxPlot<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(Line::styled(" Base vs final price ", self.theme.title))
            .border_style(self.theme.border_unfocused);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return;
        }

        let boxes: Vec<&BoxSummary> = self.base.iter().chain(self.fin.iter()).copied().collect();
        if boxes.is_empty() {
            buf.set_string(
                inner.x,
                inner.y,
                "no data",
                Style::default().add_modifier(Modifier::DIM),
            );
            return;
        }
        if inner.width <= LABEL_W + 2 || inner.height < 3 {
            return;
        }

        let lo = boxes.iter().map(|b| b.lower_whisker).fold(f64::INFINITY, f64::min);
        let hi = boxes.iter().map(|b| b.upper_whisker).fold(f64::NEG_INFINITY, f64::max);
        let track_w = (inner.width - LABEL_W) as usize;
        let scale = Scale { lo, hi, width: track_w };

        let rows = [
            ("base", self.base, self.theme.box_base),
            ("final", self.fin, self.theme.box_final),
        ];
        for (i, (label, summary, style)) in rows.into_iter().enumerate() {
            let y = inner.y + i as u16;
            buf.set_string(inner.x, y, label, self.theme.axis);
            let Some(summary) = summary else { continue };
            let track = render_box(summary, &scale);
            buf.set_string(inner.x + LABEL_W, y, &track, style);
            if summary.outliers > 0 {
                let note = format!(" +{} outliers", summary.outliers);
                let x = inner.x + LABEL_W + track.chars().count() as u16;
                if x + (note.len() as u16) <= inner.right() {
                    buf.set_string(x, y, &note, Style::default().add_modifier(Modifier::DIM));
                }
            }
        }

        let axis_y = inner.y + 2;
        let lo_label = format!("{lo:.0}");
        let hi_label = format!("{hi:.0}");
        buf.set_string(inner.x + LABEL_W, axis_y, &lo_label, self.theme.axis);
        let hi_x = inner.right().saturating_sub(hi_label.len() as u16);
        if hi_x > inner.x + LABEL_W + lo_label.len() as u16 {
            buf.set_string(hi_x, axis_y, &hi_label, self.theme.axis);
        }
    }
}

struct Scale {
    lo: f64,
    hi: f64,
    width: usize,
}

impl Scale {
    fn pos(&self, v: f64) -> usize {
        let span = self.hi - self.lo;
        if span <= 0.0 || self.width == 0 {
            return 0;
        }
        let t = ((v - self.lo) / span).clamp(0.0, 1.0);
        (t * (self.width - 1) as f64).round() as usize
    }
}

/// One box as a string of glyphs, trimmed after the upper whisker.
fn render_box(b: &BoxSummary, scale: &Scale) -> String {
    let (lw, q1, med, q3, uw) = (
        scale.pos(b.lower_whisker),
        scale.pos(b.q1),
        scale.pos(b.median),
        scale.pos(b.q3),
        scale.pos(b.upper_whisker),
    );
    (0..=uw)
        .map(|i| {
            if i == med {
                '┃'
            } else if i == lw {
                '├'
            } else if i == uw {
                '┤'
            } else if i >= q1 && i <= q3 {
                '▒'
            } else if i > lw {
                '─'
            } else {
                ' '
            }
        })
        .collect()
}
