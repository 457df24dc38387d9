//! Centralized theme and color scheme for the form.

use crate::predict::RatingBand;
use ratatui::prelude::*;
use std::sync::{PoisonError, RwLock};

/// Semantic colors for the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    // Selection state
    pub checked: Color,
    pub disabled: Color,
    pub brand: Color,

    // Rating bands
    pub excellent: Color,
    pub very_good: Color,
    pub good: Color,
    pub average: Color,
    pub below_average: Color,

    // UI elements
    pub primary: Color,
    pub accent: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub background_alt: Color,
    pub text: Color,
    pub text_muted: Color,
    pub selection: Color,

    // Status
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl ColorScheme {
    /// Dark theme (default)
    pub const fn dark() -> Self {
        Self {
            checked: Color::Green,
            disabled: Color::DarkGray,
            brand: Color::Magenta,

            excellent: Color::Green,
            very_good: Color::Cyan,
            good: Color::Blue,
            average: Color::Yellow,
            below_average: Color::Red,

            primary: Color::Cyan,
            accent: Color::Yellow,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            background_alt: Color::Rgb(30, 30, 40),
            text: Color::White,
            text_muted: Color::Gray,
            selection: Color::Rgb(60, 60, 80),

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }

    /// Light theme
    pub const fn light() -> Self {
        Self {
            checked: Color::Rgb(0, 128, 0),
            disabled: Color::Rgb(170, 170, 170),
            brand: Color::Rgb(128, 0, 128),

            excellent: Color::Rgb(0, 128, 0),
            very_good: Color::Rgb(0, 128, 128),
            good: Color::Rgb(0, 0, 200),
            average: Color::Rgb(180, 140, 0),
            below_average: Color::Rgb(200, 0, 0),

            primary: Color::Rgb(0, 100, 180),
            accent: Color::Rgb(180, 100, 0),
            muted: Color::Rgb(120, 120, 120),
            border: Color::Rgb(180, 180, 180),
            border_focused: Color::Rgb(0, 100, 180),
            background_alt: Color::Rgb(235, 235, 240),
            text: Color::Rgb(20, 20, 20),
            text_muted: Color::Rgb(100, 100, 100),
            selection: Color::Rgb(200, 215, 235),

            success: Color::Rgb(0, 128, 0),
            warning: Color::Rgb(180, 140, 0),
            error: Color::Rgb(200, 0, 0),
        }
    }

    /// High contrast theme (accessibility)
    pub const fn high_contrast() -> Self {
        Self {
            checked: Color::LightGreen,
            disabled: Color::Gray,
            brand: Color::LightMagenta,

            excellent: Color::LightGreen,
            very_good: Color::LightCyan,
            good: Color::LightBlue,
            average: Color::LightYellow,
            below_average: Color::LightRed,

            primary: Color::White,
            accent: Color::LightYellow,
            muted: Color::Gray,
            border: Color::White,
            border_focused: Color::LightYellow,
            background_alt: Color::Black,
            text: Color::White,
            text_muted: Color::White,
            selection: Color::Blue,

            success: Color::LightGreen,
            warning: Color::LightYellow,
            error: Color::LightRed,
        }
    }

    /// Color for a rating band
    #[must_use]
    pub const fn band_color(&self, band: RatingBand) -> Color {
        match band {
            RatingBand::Excellent => self.excellent,
            RatingBand::VeryGood => self.very_good,
            RatingBand::Good => self.good,
            RatingBand::Average => self.average,
            RatingBand::BelowAverage => self.below_average,
        }
    }
}

/// Global theme instance (runtime switchable)
static THEME: RwLock<Theme> = RwLock::new(Theme::dark());

/// Theme configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub colors: ColorScheme,
    pub name: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub const fn dark() -> Self {
        Self {
            colors: ColorScheme::dark(),
            name: "dark",
        }
    }

    pub const fn light() -> Self {
        Self {
            colors: ColorScheme::light(),
            name: "light",
        }
    }

    pub const fn high_contrast() -> Self {
        Self {
            colors: ColorScheme::high_contrast(),
            name: "high-contrast",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "high-contrast" | "highcontrast" | "hc" => Self::high_contrast(),
            _ => Self::dark(),
        }
    }

    /// Next theme in the rotation
    #[must_use]
    pub fn next(&self) -> Self {
        match self.name {
            "dark" => Self::light(),
            "light" => Self::high_contrast(),
            _ => Self::dark(),
        }
    }
}

/// Current theme name
pub fn current_theme_name() -> &'static str {
    THEME.read().unwrap_or_else(PoisonError::into_inner).name
}

/// Set the current theme
pub fn set_theme(theme: Theme) {
    *THEME.write().unwrap_or_else(PoisonError::into_inner) = theme;
}

/// Toggle to the next theme (dark -> light -> high-contrast -> dark)
pub fn toggle_theme() -> &'static str {
    let mut theme = THEME.write().unwrap_or_else(PoisonError::into_inner);
    *theme = theme.next();
    theme.name
}

/// Current colors
pub fn colors() -> ColorScheme {
    THEME.read().unwrap_or_else(PoisonError::into_inner).colors
}

// ============================================================================
// Style Helpers
// ============================================================================

/// Common style presets
pub struct Styles;

impl Styles {
    pub fn header_title() -> Style {
        Style::default().fg(colors().primary).bold()
    }

    pub fn text() -> Style {
        Style::default().fg(colors().text)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(colors().text_muted)
    }

    pub fn label() -> Style {
        Style::default().fg(colors().muted)
    }

    pub fn value() -> Style {
        Style::default().fg(colors().text).bold()
    }

    /// Cursor row in a list
    pub fn selected() -> Style {
        Style::default()
            .bg(colors().selection)
            .fg(colors().text)
            .bold()
    }

    /// Ticked ingredient
    pub fn checked() -> Style {
        Style::default().fg(colors().checked).bold()
    }

    /// Ingredient that cannot be added because its group is full
    pub fn disabled() -> Style {
        Style::default().fg(colors().disabled).dim()
    }

    pub fn brand() -> Style {
        Style::default().fg(colors().brand).bold()
    }

    pub fn border() -> Style {
        Style::default().fg(colors().border)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(colors().border_focused)
    }

    pub fn status_bar() -> Style {
        Style::default().bg(colors().background_alt)
    }

    pub fn shortcut_key() -> Style {
        Style::default().fg(colors().accent)
    }

    pub fn shortcut_desc() -> Style {
        Style::default().fg(colors().text_muted)
    }

    pub fn success() -> Style {
        Style::default().fg(colors().success)
    }

    pub fn warning() -> Style {
        Style::default().fg(colors().warning)
    }

    pub fn error() -> Style {
        Style::default().fg(colors().error)
    }
}

/// Badge showing a rating band
pub fn band_badge(band: RatingBand) -> Span<'static> {
    let scheme = colors();
    Span::styled(
        format!(" {} ", band.label().to_uppercase()),
        Style::default()
            .fg(Color::Black)
            .bg(scheme.band_color(band))
            .bold(),
    )
}

/// `selected/cap` counter, highlighted when the group is full
pub fn count_badge(count: usize, cap: crate::catalog::Cap, full: bool) -> Span<'static> {
    let style = if full {
        Styles::warning().bold()
    } else if count > 0 {
        Styles::checked()
    } else {
        Styles::text_muted()
    };
    Span::styled(format!("{count}/{cap}"), style)
}

// ============================================================================
// Footer Hints
// ============================================================================

/// Panel-specific footer hints
pub struct FooterHints;

impl FooterHints {
    /// Hints for the focused panel, followed by the global ones
    #[must_use]
    pub fn for_panel(panel: &str) -> Vec<(&'static str, &'static str)> {
        let mut hints = match panel {
            "groups" => vec![("Enter/→", "open group")],
            "ingredients" => vec![("Space", "toggle")],
            "brands" => vec![("Space", "pick brand")],
            _ => Vec::new(),
        };
        hints.extend(Self::global());
        hints
    }

    /// Global hints (always shown)
    #[must_use]
    pub fn global() -> Vec<(&'static str, &'static str)> {
        vec![
            ("Tab", "panel"),
            ("↑↓/jk", "navigate"),
            ("s", "submit"),
            ("r", "reset"),
            ("T", "theme"),
            ("?", "help"),
            ("q", "quit"),
        ]
    }
}

/// Render footer hints as spans
pub fn render_footer_hints(hints: &[(&str, &str)]) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!("[{key}]"), Styles::shortcut_key()));
        spans.push(Span::styled((*desc).to_string(), Styles::shortcut_desc()));
    }
    spans
}
