//! Terminal styling and color utilities.
//!
//! ANSI escape codes for each point category plus color detection, so text
//! output can tint the category column the way a map renderer tints points.

use raas_planner_lib::{Category, Tier};

/// ANSI escape codes for text styling and colors.
///
/// 256-color codes approximate the renderer's rgb palette.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";

    /// Bright bold white for main bases.
    pub const MAIN_BASE: &str = "\x1b[1;97m";
    /// Bold green for confirmed points.
    pub const CONFIRMED: &str = "\x1b[1;38;5;46m";
    /// Gray for impossible points.
    pub const IMPOSSIBLE: &str = "\x1b[90m";
    /// Pale green for points that can be confirmed next.
    pub const ACTIVE: &str = "\x1b[38;5;157m";
    /// Purple for the mid point.
    pub const MID_POINT: &str = "\x1b[38;5;129m";
    /// Blue for the defensive point.
    pub const DEF_POINT: &str = "\x1b[38;5;27m";
    /// Red for the offensive point.
    pub const OFF_POINT: &str = "\x1b[38;5;196m";

    /// Defensive OTHER tiers, nearest first.
    pub const DEF_OTHER: [&str; 3] = ["\x1b[38;5;39m", "\x1b[38;5;122m", "\x1b[38;5;158m"];
    /// Offensive OTHER tiers, nearest first.
    pub const OFF_OTHER: [&str; 3] = ["\x1b[38;5;215m", "\x1b[38;5;221m", "\x1b[38;5;230m"];

    /// Gray for secondary elements (headers, separators).
    pub const GRAY: &str = "\x1b[90m";
}

/// A collection of resolved color codes, either actual ANSI sequences
/// or empty strings when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    enabled: bool,
    pub reset: &'static str,
    pub gray: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            enabled: true,
            reset: colors::RESET,
            gray: colors::GRAY,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            enabled: false,
            reset: "",
            gray: "",
        }
    }

    /// Create a palette based on terminal capabilities.
    ///
    /// Returns `colored()` if the terminal supports ANSI colors,
    /// otherwise returns `plain()`.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Escape code for a point category; empty when color is disabled.
    #[must_use]
    pub fn category(&self, category: Category) -> &'static str {
        if !self.enabled {
            return "";
        }
        match category {
            Category::MainBase => colors::MAIN_BASE,
            Category::Confirmed => colors::CONFIRMED,
            Category::Impossible => colors::IMPOSSIBLE,
            Category::Active => colors::ACTIVE,
            Category::MidPoint => colors::MID_POINT,
            Category::DefPoint => colors::DEF_POINT,
            Category::OffPoint => colors::OFF_POINT,
            Category::DefOther(tier) => colors::DEF_OTHER[tier_slot(tier)],
            Category::OffOther(tier) => colors::OFF_OTHER[tier_slot(tier)],
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

fn tier_slot(tier: Tier) -> usize {
    usize::from(tier.number() - 1)
}

/// Check if the terminal supports ANSI color codes.
///
/// This function respects:
/// - The `NO_COLOR` environment variable (https://no-color.org/)
/// - The `TERM=dumb` convention for non-capable terminals
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}
