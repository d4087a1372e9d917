//! Theme configuration for the IR portal
//!
//! Provides the branded light theme and a dark variant with consistent
//! color roles for cards, tables, chart series and the assistant chat.

use gpui::*;

/// Theme colors for the application
#[derive(Clone)]
pub struct Theme {
    // Backgrounds
    pub background: Hsla,
    pub card_bg: Hsla,
    pub card_bg_elevated: Hsla,
    pub hover_bg: Hsla,

    // Brand header
    pub header_bg: Hsla,
    pub header_text: Hsla,
    pub header_text_muted: Hsla,
    pub header_tab_active: Hsla,
    pub header_tab_hover: Hsla,

    // Text
    pub text: Hsla,
    pub text_secondary: Hsla,
    pub text_muted: Hsla,
    pub text_dimmed: Hsla,

    // Borders
    pub border: Hsla,
    pub border_subtle: Hsla,

    // Accent
    pub accent: Hsla,
    pub accent_subtle: Hsla,
    pub link: Hsla,

    // Semantic
    pub positive: Hsla,
    pub negative: Hsla,
    pub negative_subtle: Hsla,

    // Chart series
    pub series_assets: Hsla,
    pub series_equity: Hsla,

    // Chat bubbles
    pub user_bubble: Hsla,
    pub user_bubble_text: Hsla,
    pub bot_bubble: Hsla,
}

impl Theme {
    /// Resolve a configured theme name, falling back to light
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    /// Light theme with the brand header
    pub fn light() -> Self {
        Self {
            background: hsla(220.0 / 360.0, 0.14, 0.97, 1.0),
            card_bg: hsla(0.0, 0.0, 1.0, 1.0),
            card_bg_elevated: hsla(220.0 / 360.0, 0.14, 0.96, 1.0),
            hover_bg: hsla(220.0 / 360.0, 0.14, 0.94, 1.0),

            // Brand red #881506
            header_bg: hsla(7.0 / 360.0, 0.92, 0.28, 1.0),
            header_text: hsla(0.0, 0.0, 1.0, 1.0),
            header_text_muted: hsla(0.0, 0.0, 1.0, 0.70),
            header_tab_active: hsla(0.0, 0.0, 1.0, 0.15),
            header_tab_hover: hsla(0.0, 0.0, 1.0, 0.10),

            text: hsla(217.0 / 360.0, 0.33, 0.17, 1.0),
            text_secondary: hsla(215.0 / 360.0, 0.19, 0.35, 1.0),
            text_muted: hsla(220.0 / 360.0, 0.09, 0.46, 1.0),
            text_dimmed: hsla(218.0 / 360.0, 0.11, 0.65, 1.0),

            border: hsla(220.0 / 360.0, 0.13, 0.91, 1.0),
            border_subtle: hsla(220.0 / 360.0, 0.14, 0.96, 1.0),

            accent: hsla(221.0 / 360.0, 0.83, 0.53, 1.0),
            accent_subtle: hsla(214.0 / 360.0, 0.95, 0.93, 1.0),
            link: hsla(221.0 / 360.0, 0.83, 0.53, 1.0),

            positive: hsla(142.0 / 360.0, 0.76, 0.36, 1.0),
            negative: hsla(0.0, 0.84, 0.60, 1.0),
            negative_subtle: hsla(0.0, 0.86, 0.97, 1.0),

            series_assets: hsla(221.0 / 360.0, 0.83, 0.53, 1.0),
            series_equity: hsla(142.0 / 360.0, 0.76, 0.36, 1.0),

            user_bubble: hsla(221.0 / 360.0, 0.83, 0.53, 1.0),
            user_bubble_text: hsla(0.0, 0.0, 1.0, 1.0),
            bot_bubble: hsla(0.0, 0.0, 1.0, 1.0),
        }
    }

    /// Dark variant for low-light use
    pub fn dark() -> Self {
        Self {
            background: hsla(222.0 / 360.0, 0.15, 0.08, 1.0),
            card_bg: hsla(222.0 / 360.0, 0.14, 0.12, 1.0),
            card_bg_elevated: hsla(222.0 / 360.0, 0.14, 0.14, 1.0),
            hover_bg: hsla(222.0 / 360.0, 0.16, 0.16, 1.0),

            header_bg: hsla(7.0 / 360.0, 0.80, 0.22, 1.0),
            header_text: hsla(0.0, 0.0, 0.97, 1.0),
            header_text_muted: hsla(0.0, 0.0, 0.97, 0.65),
            header_tab_active: hsla(0.0, 0.0, 1.0, 0.15),
            header_tab_hover: hsla(0.0, 0.0, 1.0, 0.08),

            text: hsla(0.0, 0.0, 0.97, 1.0),
            text_secondary: hsla(220.0 / 360.0, 0.08, 0.82, 1.0),
            text_muted: hsla(220.0 / 360.0, 0.12, 0.60, 1.0),
            text_dimmed: hsla(220.0 / 360.0, 0.10, 0.45, 1.0),

            border: hsla(222.0 / 360.0, 0.14, 0.20, 1.0),
            border_subtle: hsla(222.0 / 360.0, 0.12, 0.15, 1.0),

            accent: hsla(210.0 / 360.0, 0.92, 0.58, 1.0),
            accent_subtle: hsla(210.0 / 360.0, 0.80, 0.55, 0.18),
            link: hsla(210.0 / 360.0, 0.92, 0.65, 1.0),

            positive: hsla(152.0 / 360.0, 0.72, 0.48, 1.0),
            negative: hsla(4.0 / 360.0, 0.75, 0.55, 1.0),
            negative_subtle: hsla(4.0 / 360.0, 0.70, 0.50, 0.18),

            series_assets: hsla(210.0 / 360.0, 0.92, 0.58, 1.0),
            series_equity: hsla(152.0 / 360.0, 0.72, 0.48, 1.0),

            user_bubble: hsla(210.0 / 360.0, 0.80, 0.45, 1.0),
            user_bubble_text: hsla(0.0, 0.0, 1.0, 1.0),
            bot_bubble: hsla(222.0 / 360.0, 0.14, 0.14, 1.0),
        }
    }
}
