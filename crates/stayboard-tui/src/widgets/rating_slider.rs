//! Rating slider widget: the inclusive rating range in the sidebar.
//!
//! # Editing
//!
//! - `↑` / `↓` pick which end of the range moves (low or high).
//! - `←` / `→` move that end by [`STEP`], clamped to the view's bounds.
//! - `Enter` resets to the full span.
//!
//! An unset range means "the whole span of the city-filtered rows", which is
//! what the slider shows until the user first moves a handle.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};
use stayboard_core::RatingRange;

/// Rating increment per key press.
pub const STEP: f64 = 0.1;

/// Used when the view has no ratings at all.
const FALLBACK_BOUNDS: RatingRange = RatingRange { lo: 0.0, hi: 5.0 };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Handle {
    #[default]
    Low,
    High,
}

/// What the app should do with the filter after a slider event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliderChange {
    Set(RatingRange),
    Reset,
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RatingSliderState {
    pub active: Handle,
}

impl RatingSliderState {
    /// Handle a key event given the current explicit range and the bounds.
    pub fn handle(
        &mut self,
        event: &AppEvent,
        current: Option<RatingRange>,
        bounds: Option<RatingRange>,
    ) -> Option<SliderChange> {
        let bounds = bounds.unwrap_or(FALLBACK_BOUNDS);
        match event {
            AppEvent::Nav(Direction::Up) | AppEvent::Nav(Direction::Down) => {
                self.active = match self.active {
                    Handle::Low => Handle::High,
                    Handle::High => Handle::Low,
                };
                tracing::debug!(active = ?self.active, "slider: switch handle");
                None
            }
            AppEvent::Nav(Direction::Left) => {
                Some(SliderChange::Set(self.nudge(current, bounds, -STEP)))
            }
            AppEvent::Nav(Direction::Right) => {
                Some(SliderChange::Set(self.nudge(current, bounds, STEP)))
            }
            AppEvent::Enter => {
                tracing::debug!("slider: reset");
                Some(SliderChange::Reset)
            }
            _ => None,
        }
    }

    fn nudge(&self, current: Option<RatingRange>, bounds: RatingRange, delta: f64) -> RatingRange {
        let mut range = current.unwrap_or(bounds);
        match self.active {
            Handle::Low => range.lo = round1(range.lo + delta).clamp(bounds.lo, range.hi),
            Handle::High => range.hi = round1(range.hi + delta).clamp(range.lo, bounds.hi),
        }
        tracing::debug!(lo = range.lo, hi = range.hi, "slider: moved");
        range
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct RatingSlider<'a> {
    state: &'a RatingSliderState,
    applied: Option<RatingRange>,
    bounds: Option<RatingRange>,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> RatingSlider<'a> {
    pub fn new(
        state: &'a RatingSliderState,
        applied: Option<RatingRange>,
        bounds: Option<RatingRange>,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, applied, bounds, focused, theme }
    }
}

impl Widget for RatingSlider<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Rating range ")
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let (Some(applied), Some(bounds)) = (self.applied, self.bounds) else {
            Paragraph::new(Line::from(Span::styled(
                "no ratings in view",
                Style::default().add_modifier(Modifier::DIM),
            )))
            .render(inner, buf);
            return;
        };

        let handle_style = |h: Handle| {
            if self.focused && self.state.active == h {
                self.theme.cursor
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            }
        };
        let values = Line::from(vec![
            Span::styled(format!("{:.1}", applied.lo), handle_style(Handle::Low)),
            Span::raw(" – "),
            Span::styled(format!("{:.1}", applied.hi), handle_style(Handle::High)),
            Span::styled(
                format!("   of {:.1}–{:.1}", bounds.lo, bounds.hi),
                self.theme.axis,
            ),
        ]);

        let width = inner.width as usize;
        let track = track(width, applied, bounds);
        Paragraph::new(vec![values, Line::styled(track, self.theme.histogram)]).render(inner, buf);
    }
}

/// `───███████───` with the filled part covering the applied range.
fn track(width: usize, applied: RatingRange, bounds: RatingRange) -> String {
    if width == 0 {
        return String::new();
    }
    let span = bounds.hi - bounds.lo;
    let pos = |v: f64| -> usize {
        if span <= 0.0 {
            return 0;
        }
        (((v - bounds.lo) / span) * (width - 1) as f64).round() as usize
    };
    let (a, b) = (pos(applied.lo), if span <= 0.0 { width - 1 } else { pos(applied.hi) });
    (0..width)
        .map(|i| if i >= a && i <= b { '█' } else { '─' })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
