//! Theme and styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

use crate::models::Bucket;

/// Color palette for a theme.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Brand Colors
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,

    // Semantic Colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // Background Colors
    pub bg_dark: Color,
    pub bg_card: Color,

    // Text Colors
    pub text: Color,
    pub text_muted: Color,
    pub text_dim: Color,

    // Bucket Colors
    pub bucket_learning: Color,
    pub bucket_reviewing: Color,
    pub bucket_mastered: Color,

    // Judgment Colors
    pub judge_not_yet: Color,
    pub judge_got_it: Color,
}

/// Available theme names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeName {
    Sakura,
    KanagawaWave,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Sakura => "sakura",
            ThemeName::KanagawaWave => "kanagawa-wave",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ThemeName::Sakura => "Sakura",
            ThemeName::KanagawaWave => "Kanagawa Wave",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "kanagawa-wave" | "kanagawa_wave" | "kanagawa" => ThemeName::KanagawaWave,
            _ => ThemeName::Sakura,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ThemeName::Sakura => ThemeName::KanagawaWave,
            ThemeName::KanagawaWave => ThemeName::Sakura,
        }
    }
}

/// Theme struct that holds colors and provides style methods.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: ThemeName,
    pub colors: ThemeColors,
}

impl Theme {
    pub fn new(name: ThemeName) -> Self {
        let colors = match name {
            ThemeName::Sakura => Self::sakura_colors(),
            ThemeName::KanagawaWave => Self::kanagawa_wave_colors(),
        };
        Self { name, colors }
    }

    pub fn from_name(name: &str) -> Self {
        Self::new(ThemeName::parse(name))
    }

    /// Pastel palette: sakura pinks, amber and mint on a plum background.
    fn sakura_colors() -> ThemeColors {
        ThemeColors {
            primary: Color::Rgb(244, 114, 182),     // Sakura 400
            secondary: Color::Rgb(196, 181, 253),   // Lavender 300
            accent: Color::Rgb(251, 207, 232),      // Sakura 200

            success: Color::Rgb(110, 231, 183),     // Mint 300
            warning: Color::Rgb(252, 211, 77),      // Amber 300
            error: Color::Rgb(248, 113, 113),       // Red 400

            bg_dark: Color::Rgb(40, 24, 44),        // Plum night
            bg_card: Color::Rgb(58, 36, 64),

            text: Color::Rgb(255, 241, 248),
            text_muted: Color::Rgb(216, 180, 204),
            text_dim: Color::Rgb(140, 108, 138),

            bucket_learning: Color::Rgb(236, 72, 153),   // Sakura 500
            bucket_reviewing: Color::Rgb(245, 158, 11),  // Amber 500
            bucket_mastered: Color::Rgb(16, 185, 129),   // Mint 500

            judge_not_yet: Color::Rgb(245, 158, 11),
            judge_got_it: Color::Rgb(16, 185, 129),
        }
    }

    /// Kanagawa Wave theme - inspired by the famous painting and kanagawa.nvim
    fn kanagawa_wave_colors() -> ThemeColors {
        ThemeColors {
            primary: Color::Rgb(0x7E, 0x9C, 0xD8),      // crystalBlue
            secondary: Color::Rgb(0x95, 0x7F, 0xB8),    // oniViolet
            accent: Color::Rgb(0xD2, 0x7E, 0x99),       // sakuraPink

            success: Color::Rgb(0x98, 0xBB, 0x6C),      // springGreen
            warning: Color::Rgb(0xFF, 0x9E, 0x3B),      // roninYellow
            error: Color::Rgb(0xE8, 0x24, 0x24),        // samuraiRed

            bg_dark: Color::Rgb(0x16, 0x16, 0x1D),      // sumiInk0
            bg_card: Color::Rgb(0x1F, 0x1F, 0x28),      // sumiInk1

            text: Color::Rgb(0xDC, 0xD7, 0xBA),         // fujiWhite
            text_muted: Color::Rgb(0xC8, 0xC0, 0x93),   // oldWhite
            text_dim: Color::Rgb(0x54, 0x54, 0x6D),     // sumiInk4

            bucket_learning: Color::Rgb(0xD2, 0x7E, 0x99),  // sakuraPink
            bucket_reviewing: Color::Rgb(0xE6, 0xC3, 0x84), // carpYellow
            bucket_mastered: Color::Rgb(0x98, 0xBB, 0x6C),  // springGreen

            judge_not_yet: Color::Rgb(0xFF, 0x9E, 0x3B),
            judge_got_it: Color::Rgb(0x98, 0xBB, 0x6C),
        }
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.colors.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn card_front(&self) -> Style {
        Style::default()
            .fg(self.colors.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn card_back(&self) -> Style {
        Style::default()
            .fg(self.colors.success)
            .add_modifier(Modifier::BOLD)
    }

    pub fn bucket(&self, bucket: Bucket) -> Style {
        Style::default()
            .fg(bucket.color_for_theme(self))
            .add_modifier(Modifier::BOLD)
    }

    /// Badge style for a session streak: amber from 4, rainbow-ish from 7.
    pub fn streak(&self, streak: u32) -> Style {
        let color = if streak >= 7 {
            self.colors.primary
        } else {
            self.colors.warning
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn status(&self, is_error: bool) -> Style {
        Style::default().fg(if is_error {
            self.colors.error
        } else {
            self.colors.success
        })
    }

    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.colors.text_dim)
    }

    pub fn key_highlight(&self) -> Style {
        Style::default()
            .fg(self.colors.accent)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeName::Sakura)
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Icons
// ══════════════════════════════════════════════════════════════════════════

pub mod icons {
    pub const BOLT: &str = "⚡";
    pub const FIRE: &str = "🔥";
    pub const SPARKLE: &str = "✨";
    pub const ARROW_RIGHT: &str = "→";
    pub const ARROW_LEFT: &str = "←";
    pub const CAT: &str = "🐱";
    pub const RAINBOW: &str = "🌈";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_names_round_trip_through_config_strings() {
        for name in [ThemeName::Sakura, ThemeName::KanagawaWave] {
            assert_eq!(ThemeName::parse(name.as_str()), name);
        }
        assert_eq!(ThemeName::parse("unknown"), ThemeName::Sakura);
        assert_eq!(ThemeName::Sakura.next().next(), ThemeName::Sakura);
    }
}
