//! Parrot/neon theme tokens plus the continuous colour scales used by charts.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, highlights)
//! - **Positive**: Neon green (selected entities, success)
//! - **Negative**: Hot pink (errors)
//! - **Warning**: Neon orange (warnings, empty selections)
//! - **Neutral**: Cool purple (reference lines, secondary info)
//! - **Muted**: Steel blue (labels, hints)

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub const fn parrot_neon() -> Self {
        Self {
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
        }
    }
}

const PALETTE: Theme = Theme::parrot_neon();

pub const NEUTRAL: Color = PALETTE.neutral;

// ── Styles ───────────────────────────────────────────────────────────

pub fn accent() -> Style {
    Style::default().fg(PALETTE.accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(PALETTE.positive)
}

pub fn negative() -> Style {
    Style::default().fg(PALETTE.negative)
}

pub fn warning() -> Style {
    Style::default().fg(PALETTE.warning)
}

pub fn neutral() -> Style {
    Style::default().fg(PALETTE.neutral)
}

pub fn muted() -> Style {
    Style::default().fg(PALETTE.muted)
}

pub fn value() -> Style {
    Style::default()
        .fg(PALETTE.text_primary)
        .add_modifier(Modifier::BOLD)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

// ── Series & scales ──────────────────────────────────────────────────

const SERIES: [Color; 8] = [
    Color::Rgb(0, 255, 255),
    Color::Rgb(255, 20, 147),
    Color::Rgb(0, 255, 128),
    Color::Rgb(255, 140, 0),
    Color::Rgb(147, 112, 219),
    Color::Rgb(255, 255, 102),
    Color::Rgb(100, 149, 237),
    Color::Rgb(255, 99, 71),
];

/// Categorical colour for the i-th line series.
pub fn series_color(i: usize) -> Color {
    SERIES[i % SERIES.len()]
}

const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

const GREENS: [(u8, u8, u8); 3] = [(199, 233, 192), (65, 171, 93), (0, 109, 44)];

/// Viridis at `t` in [0, 1].
pub fn viridis(t: f64) -> Color {
    interpolate(&VIRIDIS, t)
}

/// Light-to-dark green at `t` in [0, 1].
pub fn greens(t: f64) -> Color {
    interpolate(&GREENS, t)
}

fn interpolate(stops: &[(u8, u8, u8)], t: f64) -> Color {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (stops.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(stops.len() - 2);
    let frac = scaled - i as f64;
    let (a, b) = (stops[i], stops[i + 1]);
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
    Color::Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}
