//! Color palettes for the TUI, with dark/light selection

use ratatui::prelude::*;
use tracing::debug;

/// Terminal backgrounds brighter than this luma get the light palette
const LIGHT_LUMA_THRESHOLD: f32 = 0.6;

/// Requested theme, from the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Theme {
    #[default]
    Auto,
    Dark,
    Light,
}

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Accent colors per tool
    pub disc_accent: Color,
    pub income_accent: Color,

    // Score bar colors
    pub bar_filled: Color,
    pub bar_empty: Color,
    pub gauge_filled: Color,

    // Table and list colors
    pub index_color: Color,
    pub answered_color: Color,
    pub option_active: Style,
    pub option_inactive: Style,

    // Styles
    pub title_style: Style,
    pub header_style: Style,
    pub row_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub estimate_color: Color,
    pub warning_color: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            disc_accent: Color::Rgb(129, 140, 248),
            income_accent: Color::Rgb(52, 211, 153),
            bar_filled: Color::Rgb(99, 102, 241),
            bar_empty: Color::DarkGray,
            gauge_filled: Color::Rgb(16, 185, 129),
            index_color: Color::DarkGray,
            answered_color: Color::Green,
            option_active: Style::new().fg(Color::Black).bg(Color::Rgb(52, 211, 153)).bold(),
            option_inactive: Style::new().fg(Color::Gray),
            title_style: Style::new().bold(),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            estimate_color: Color::Rgb(52, 211, 153),
            warning_color: Color::Yellow,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_bg: Color::Indexed(234),
        }
    }

    pub fn light() -> Self {
        Self {
            disc_accent: Color::Rgb(79, 70, 229),
            income_accent: Color::Rgb(5, 150, 105),
            bar_filled: Color::Rgb(79, 70, 229),
            bar_empty: Color::Indexed(252),
            gauge_filled: Color::Rgb(5, 150, 105),
            index_color: Color::Indexed(244),
            answered_color: Color::Rgb(5, 150, 105),
            option_active: Style::new().fg(Color::White).bg(Color::Rgb(5, 150, 105)).bold(),
            option_inactive: Style::new().fg(Color::Indexed(240)),
            title_style: Style::new().bold(),
            header_style: Style::new().bold(),
            row_selected: Style::new().bg(Color::Indexed(254)).bold(),
            muted: Color::Indexed(242),
            title_color: Color::Blue,
            estimate_color: Color::Rgb(4, 120, 87),
            warning_color: Color::Rgb(180, 83, 9),
            status_bar_bg: Color::Indexed(254),
            status_key_color: Color::Blue,
            flash_success: Color::Rgb(5, 150, 105),
            flash_error: Color::Red,
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
            popup_bg: Color::Indexed(255),
        }
    }
}

/// Pick a palette. `Auto` asks the terminal for its background luma and
/// falls back to dark when the terminal doesn't answer.
pub fn resolve_theme(theme: Theme) -> ThemeColors {
    match theme {
        Theme::Dark => ThemeColors::dark(),
        Theme::Light => ThemeColors::light(),
        Theme::Auto => match terminal_light::luma() {
            Ok(luma) if luma > LIGHT_LUMA_THRESHOLD => ThemeColors::light(),
            Ok(_) => ThemeColors::dark(),
            Err(e) => {
                debug!(error = %e, "could not detect terminal background");
                ThemeColors::dark()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_theme_skips_detection() {
        assert_eq!(resolve_theme(Theme::Dark).popup_border, Color::Cyan);
        assert_eq!(resolve_theme(Theme::Light).popup_border, Color::Blue);
    }
}
