//! Ranked horizontal bar chart (top hotels, cities, categories, amenities).
//!
//! Each bar is coloured by its value along a [`Palette`], so the longest bar
//! also carries the far end of the scale.

use crate::theme::{Palette, Theme};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Widget},
};
use stayboard_core::stats::RankedBar;

pub struct BarList<'a> {
    title: &'a str,
    bars: &'a [RankedBar],
    palette: Palette,
    /// Formats the value printed after each bar.
    value: fn(f64) -> String,
    theme: &'a Theme,
}

impl<'a> BarList<'a> {
    pub fn new(
        title: &'a str,
        bars: &'a [RankedBar],
        palette: Palette,
        value: fn(f64) -> String,
        theme: &'a Theme,
    ) -> Self {
        Self { title, bars, palette, value, theme }
    }
}

impl Widget for BarList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(Line::styled(format!(" {} ", self.title), self.theme.title))
            .border_style(self.theme.border_unfocused);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return;
        }

        if self.bars.is_empty() {
            buf.set_string(
                inner.x,
                inner.y,
                "no data",
                Style::default().add_modifier(Modifier::DIM),
            );
            return;
        }

        let label_w = self
            .bars
            .iter()
            .map(|b| b.label.chars().count())
            .max()
            .unwrap_or(0)
            .min(inner.width as usize / 3) as u16;
        let values: Vec<String> = self.bars.iter().map(|b| (self.value)(b.value)).collect();
        let value_w = values.iter().map(|v| v.chars().count()).max().unwrap_or(0) as u16;
        let bar_w = inner.width.saturating_sub(label_w + value_w + 2) as usize;

        let max = self.bars.iter().map(|b| b.value).fold(f64::NEG_INFINITY, f64::max);
        let min = self.bars.iter().map(|b| b.value).fold(f64::INFINITY, f64::min);

        for (i, (bar, value)) in self.bars.iter().zip(&values).enumerate() {
            if i as u16 >= inner.height {
                break;
            }
            let y = inner.y + i as u16;
            buf.set_string(inner.x, y, truncate(&bar.label, label_w as usize), Style::default());

            let len = bar_len(bar.value, max, bar_w);
            let t = if max > min { (bar.value - min) / (max - min) } else { 1.0 };
            let x = inner.x + label_w + 1;
            let value_x = x + len as u16 + 1;
            if value_x >= inner.right() {
                continue;
            }
            buf.set_string(x, y, "█".repeat(len), self.theme.scale_style(self.palette, t));
            let room = (inner.right() - value_x) as usize;
            buf.set_stringn(value_x, y, value, room, self.theme.axis);
        }
    }
}

fn bar_len(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || !value.is_finite() {
        return 0;
    }
    ((value / max).clamp(0.0, 1.0) * width as f64).round() as usize
}

/// Cut `s` to `width` characters, marking the cut with `…`.
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(width - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(10.0, 10.0, 20, 20)]
    #[case(5.0, 10.0, 20, 10)]
    #[case(0.0, 10.0, 20, 0)]
    #[case(3.0, 0.0, 20, 0)]
    fn bar_lengths(#[case] v: f64, #[case] max: f64, #[case] width: usize, #[case] want: usize) {
        assert_eq!(bar_len(v, max, width), want);
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("Bangalore", 5), "Bang…");
        assert_eq!(truncate("Goa", 5), "Goa");
        assert_eq!(truncate("Goa", 0), "");
    }

    fn count(v: f64) -> String {
        format!("{v:.0}")
    }

    #[rstest]
    #[case(4, 6)]
    #[case(7, 4)]
    #[case(30, 2)]
    #[case(30, 0)]
    fn cramped_area_stays_inside(#[case] width: u16, #[case] height: u16) {
        let theme = Theme::load_default();
        let bars = vec![
            RankedBar { label: "Pune".to_string(), value: 1234.0 },
            RankedBar { label: "Goa".to_string(), value: 10.0 },
        ];
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        BarList::new("Cities", &bars, Palette::Plasma, count, &theme).render(area, &mut buf);
    }

    #[test]
    fn empty_list_shows_placeholder() {
        let theme = Theme::load_default();
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        BarList::new("Cities", &[], Palette::Plasma, count, &theme).render(area, &mut buf);
        let row: String = (1..8).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert_eq!(row, "no data");
    }
}
