//! Histogram widget: vertical bars drawn with eighth-block glyphs.
//!
//! Bins are stretched (or sampled) to the available width; the bottom row
//! carries the range of the first and last bin as axis labels.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Widget},
};
use stayboard_core::stats::Bin;

const EIGHTHS: [&str; 9] = [" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

pub struct Histogram<'a> {
    title: &'a str,
    bins: &'a [Bin],
    /// Formats the axis labels (`4.5`, `20%`, …).
    label: fn(f64) -> String,
    theme: &'a Theme,
}

impl<'a> Histogram<'a> {
    pub fn new(
        title: &'a str,
        bins: &'a [Bin],
        label: fn(f64) -> String,
        theme: &'a Theme,
    ) -> Self {
        Self { title, bins, label, theme }
    }
}

impl Widget for Histogram<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(Line::styled(format!(" {} ", self.title), self.theme.title))
            .border_style(self.theme.border_unfocused);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return;
        }

        let (Some(first), Some(last)) = (self.bins.first(), self.bins.last()) else {
            buf.set_string(
                inner.x,
                inner.y,
                "no data",
                Style::default().add_modifier(Modifier::DIM),
            );
            return;
        };
        if inner.width == 0 || inner.height < 2 {
            return;
        }

        let plot_h = inner.height - 1;
        let columns = column_counts(self.bins, inner.width as usize);
        let max = columns.iter().copied().max().unwrap_or(0);

        for (x, count) in columns.iter().enumerate() {
            let eighths = bar_eighths(*count, max, plot_h as usize);
            let full = eighths / 8;
            let rem = eighths % 8;
            for row in 0..plot_h as usize {
                let glyph = if row < full {
                    EIGHTHS[8]
                } else if row == full {
                    EIGHTHS[rem]
                } else {
                    continue;
                };
                let y = inner.y + plot_h - 1 - row as u16;
                buf.set_string(inner.x + x as u16, y, glyph, self.theme.histogram);
            }
        }

        let axis_y = inner.bottom() - 1;
        let lo = (self.label)(first.lo);
        let hi = (self.label)(last.hi);
        buf.set_string(inner.x, axis_y, &lo, self.theme.axis);
        let hi_x = inner.right().saturating_sub(hi.chars().count() as u16);
        if hi_x > inner.x + lo.chars().count() as u16 {
            buf.set_string(hi_x, axis_y, &hi, self.theme.axis);
        }
        let peak = format!("max {max}");
        buf.set_string(inner.x, inner.y, &peak, self.theme.axis);
    }
}

/// Count per terminal column: each column shows the bin it falls into.
fn column_counts(bins: &[Bin], width: usize) -> Vec<usize> {
    if bins.is_empty() || width == 0 {
        return Vec::new();
    }
    (0..width)
        .map(|x| bins[x * bins.len() / width].count)
        .collect()
}

/// Bar height in eighths of a cell.
fn bar_eighths(count: usize, max: usize, rows: usize) -> usize {
    if max == 0 {
        return 0;
    }
    let eighths = (count as f64 / max as f64 * (rows * 8) as f64).round() as usize;
    // A non-empty bin always shows at least a sliver.
    if count > 0 { eighths.max(1) } else { 0 }
}
