//! Colour theme for the stayboard TUI.
//!
//! Themes are defined as TOML files embedded in the binary via
//! [`include_str!`] so the dashboard works without any files on disk.
//!
//! # Continuous colour scales
//!
//! Ranked bar charts colour each bar by its value, the way a continuous
//! colour scale would: the value's position between the chart's min and max
//! picks a stop from one of the theme's [`Palette`]s.

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types: mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    unfocused: RawStyle,
    command_bar: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawSelection {
    cursor: RawStyle,
    checked: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawCharts {
    title: RawStyle,
    axis: RawStyle,
    kpi_value: RawStyle,
    histogram: RawStyle,
    box_base: RawStyle,
    box_final: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawPalettes {
    viridis: Vec<String>,
    plasma: Vec<String>,
    teal: Vec<String>,
    magma: Vec<String>,
    diverging: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    borders: RawBorders,
    selection: RawSelection,
    charts: RawCharts,
    palettes: RawPalettes,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Named colour scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Viridis,
    Plasma,
    Teal,
    Magma,
    /// Negative → blue, positive → red; used by the correlation heatmap.
    Diverging,
}

/// Application colour theme. All styles are pre-resolved at load time.
#[derive(Debug, Clone)]
pub struct Theme {
    pub border_focused: Style,
    pub border_unfocused: Style,
    pub border_command_bar: Style,

    /// Highlight for the list row under the cursor.
    pub cursor: Style,
    /// Marker style for selected list items.
    pub checked: Style,

    pub title: Style,
    pub axis: Style,
    pub kpi_value: Style,
    pub histogram: Style,
    pub box_base: Style,
    pub box_final: Style,

    viridis: Vec<Color>,
    plasma: Vec<Color>,
    teal: Vec<Color>,
    magma: Vec<Color>,
    diverging: Vec<Color>,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Load and parse the embedded Gruvbox Dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Resolve a theme by name; unknown names fall back to the default.
    pub fn by_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Self::load_gruvbox_dark(),
            _ => Self::load_default(),
        }
    }

    /// Parse a theme from a TOML string.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        let colors = |names: Vec<String>| -> Vec<Color> {
            names.iter().filter_map(|s| parse_color(s)).collect()
        };

        Ok(Self {
            border_focused: raw.borders.focused.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            border_command_bar: raw.borders.command_bar.into_style(),
            cursor: raw.selection.cursor.into_style(),
            checked: raw.selection.checked.into_style(),
            title: raw.charts.title.into_style(),
            axis: raw.charts.axis.into_style(),
            kpi_value: raw.charts.kpi_value.into_style(),
            histogram: raw.charts.histogram.into_style(),
            box_base: raw.charts.box_base.into_style(),
            box_final: raw.charts.box_final.into_style(),
            viridis: colors(raw.palettes.viridis),
            plasma: colors(raw.palettes.plasma),
            teal: colors(raw.palettes.teal),
            magma: colors(raw.palettes.magma),
            diverging: colors(raw.palettes.diverging),
        })
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border_unfocused
        }
    }

    fn palette(&self, palette: Palette) -> &[Color] {
        match palette {
            Palette::Viridis => &self.viridis,
            Palette::Plasma => &self.plasma,
            Palette::Teal => &self.teal,
            Palette::Magma => &self.magma,
            Palette::Diverging => &self.diverging,
        }
    }

    /// Foreground style for position `t` (clamped to `0..=1`) along `palette`.
    pub fn scale_style(&self, palette: Palette, t: f64) -> Style {
        match scale_color(self.palette(palette), t) {
            Some(c) => Style::default().fg(c),
            None => Style::default(),
        }
    }

    /// Cell style for a correlation coefficient; `None` renders dimmed.
    pub fn heat_style(&self, r: Option<f64>) -> Style {
        let Some(r) = r else {
            return Style::default().add_modifier(Modifier::DIM);
        };
        // Palette runs red → blue, so +1 sits at the start.
        match scale_color(&self.diverging, (1.0 - r) / 2.0) {
            Some(bg) => Style::default().bg(bg).fg(contrast(bg)),
            None => Style::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn scale_color(stops: &[Color], t: f64) -> Option<Color> {
    let last = stops.len().checked_sub(1)?;
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let idx = (t * last as f64).round() as usize;
    stops.get(idx).copied()
}

/// Black or white text, whichever reads better on `bg`.
fn contrast(bg: Color) -> Color {
    match bg {
        Color::Rgb(r, g, b) => {
            let luma = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
            if luma > 140.0 {
                Color::Black
            } else {
                Color::White
            }
        }
        _ => Color::White,
    }
}

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts:
/// - Named terminal colours (case-insensitive): `red`, `dark_gray`, etc.
/// - Hex RGB: `#rrggbb`
/// - 256-colour indexed: `indexed:N`
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s["indexed:".len()..].parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
