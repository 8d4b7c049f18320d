//! Correlation heatmap: a labelled grid of coefficients on a diverging scale.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Widget},
};
use stayboard_core::stats::CorrelationMatrix;

const CELL_W: u16 = 7;
const LABEL_W: u16 = 7;

pub struct Heatmap<'a> {
    matrix: &'a CorrelationMatrix,
    theme: &'a Theme,
}

impl<'a> Heatmap<'a> {
    pub fn new(matrix: &'a CorrelationMatrix, theme: &'a Theme) -> Self {
        Self { matrix, theme }
    }
}

impl Widget for Heatmap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(Line::styled(" Correlation ", self.theme.title))
            .border_style(self.theme.border_unfocused);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return;
        }

        if self.matrix.columns.is_empty() {
            buf.set_string(
                inner.x,
                inner.y,
                "no data",
                Style::default().add_modifier(Modifier::DIM),
            );
            return;
        }

        for (j, col) in self.matrix.columns.iter().enumerate() {
            let x = inner.x + LABEL_W + j as u16 * CELL_W;
            if x + CELL_W > inner.right() {
                break;
            }
            let label = format!("{:^w$}", col.short_label(), w = CELL_W as usize);
            buf.set_string(x, inner.y, label, self.theme.axis);
        }

        for (i, (col, row)) in self.matrix.columns.iter().zip(&self.matrix.values).enumerate() {
            let y = inner.y + 1 + i as u16;
            if y >= inner.bottom() {
                break;
            }
            buf.set_string(inner.x, y, col.short_label(), self.theme.axis);
            for (j, r) in row.iter().enumerate() {
                let x = inner.x + LABEL_W + j as u16 * CELL_W;
                if x + CELL_W > inner.right() {
                    break;
                }
                buf.set_string(x, y, cell_text(*r), self.theme.heat_style(*r));
            }
        }
    }
}

fn cell_text(r: Option<f64>) -> String {
    let text = match r {
        Some(r) => format!("{r:+.2}"),
        None => "·".to_string(),
    };
    format!("{:^w$}", text, w = CELL_W as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stayboard_core::NumericColumn;

    #[test]
    fn cell_text_is_fixed_width() {
        assert_eq!(cell_text(Some(1.0)), " +1.00 ");
        assert_eq!(cell_text(Some(-0.456)), " -0.46 ");
        assert_eq!(cell_text(None).chars().count(), CELL_W as usize);
    }

    #[test]
    fn renders_labels() {
        let theme = Theme::load_default();
        let matrix = CorrelationMatrix {
            columns: vec![NumericColumn::Rating, NumericColumn::FinalCost],
            values: vec![vec![Some(1.0), Some(-0.5)], vec![Some(-0.5), Some(1.0)]],
        };
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        Heatmap::new(&matrix, &theme).render(area, &mut buf);
        let row: String = (0..area.width).map(|x| buf[(x, 2)].symbol().to_string()).collect();
        assert!(row.contains("rate"), "row was {row:?}");
        assert!(row.contains("+1.00"), "row was {row:?}");
    }
}
