//! Neon marquee theme for CineSearch
//!
//! Color palette and style helpers for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Neon marquee color palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #0b0a12 (theater black)
    pub const BACKGROUND: Color = Color::Rgb(0x0b, 0x0a, 0x12);

    /// Primary: #00e5ff (cyan neon)
    pub const PRIMARY: Color = Color::Rgb(0x00, 0xe5, 0xff);

    /// Secondary: #ff4fd8 (marquee pink)
    pub const SECONDARY: Color = Color::Rgb(0xff, 0x4f, 0xd8);

    /// Accent: #ffd23f (bulb gold)
    pub const ACCENT: Color = Color::Rgb(0xff, 0xd2, 0x3f);

    /// Text: #e6e4ee (screen white)
    pub const TEXT: Color = Color::Rgb(0xe6, 0xe4, 0xee);

    /// Dim: #6b6880 (muted, still readable on the background)
    pub const DIM: Color = Color::Rgb(0x6b, 0x68, 0x80);

    /// Good ratings: #3dff8b
    pub const SUCCESS: Color = Color::Rgb(0x3d, 0xff, 0x8b);

    /// Middling ratings: #ffaa00
    pub const WARNING: Color = Color::Rgb(0xff, 0xaa, 0x00);

    /// Poor ratings and errors: #ff3b5c
    pub const ERROR: Color = Color::Rgb(0xff, 0x3b, 0x5c);

    /// Panels and input fields
    pub const BACKGROUND_LIGHT: Color = Color::Rgb(0x17, 0x15, 0x24);

    /// Border color (dim cyan)
    pub const BORDER: Color = Color::Rgb(0x00, 0x73, 0x80);

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn secondary() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    pub fn accent() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Focused border (glowing effect)
    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn loading() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // COMPONENT STYLES
    // ═══════════════════════════════════════════════════════════════════════

    /// Selected list row (inverted)
    pub fn list_item_selected() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    pub fn keybind() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    pub fn keybind_desc() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    /// Filter chip with a value set
    pub fn filter_active() -> Style {
        Style::default()
            .fg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Filter chip left at "any"
    pub fn filter_inactive() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn tab_active() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_inactive() -> Style {
        Style::default().fg(Self::TEXT)
    }

    pub fn year() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    /// Rating color: green from 7.5, orange from 6, dim from 4, red below;
    /// unrated titles stay dim
    pub fn rating(vote_average: f32) -> Style {
        if vote_average <= 0.0 {
            Self::dimmed()
        } else if vote_average >= 7.5 {
            Style::default().fg(Self::SUCCESS)
        } else if vote_average >= 6.0 {
            Style::default().fg(Self::WARNING)
        } else if vote_average >= 4.0 {
            Self::dimmed()
        } else {
            Style::default().fg(Self::ERROR)
        }
    }
}

/// Contrast ratio between two RGB colors, 1 (same) to 21 (black/white).
/// https://www.w3.org/TR/WCAG20/#contrast-ratiodef
pub fn contrast_ratio(fg: Color, bg: Color) -> Option<f64> {
    fn luminance(color: Color) -> Option<f64> {
        let Color::Rgb(r, g, b) = color else {
            return None;
        };
        let channel = |c: u8| {
            let c = c as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        Some(0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b))
    }

    let (l1, l2) = (luminance(fg)?, luminance(bg)?);
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    Some((lighter + 0.05) / (darker + 0.05))
}
