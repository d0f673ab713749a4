//! Color scheme and styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

use smart_ats_core::dashboard::TagKind;

/// The color palette for the analyzer's TUI.
///
/// Uses RGB colors for a subdued look, with green/amber/red reserved for
/// scores and section checks.
pub struct Theme;

impl Theme {
    // ── Base colors ─────────────────────────────────────────
    pub fn bg() -> Color {
        Color::Reset
    }

    pub fn fg() -> Color {
        Color::Rgb(200, 200, 200)
    }

    pub fn fg_dim() -> Color {
        Color::Rgb(100, 100, 100)
    }

    pub fn fg_muted() -> Color {
        Color::Rgb(140, 140, 140)
    }

    // ── Accent colors ───────────────────────────────────────
    pub fn accent() -> Color {
        Color::Rgb(110, 170, 255)
    }

    pub fn accent_secondary() -> Color {
        Color::Rgb(180, 130, 240)
    }

    pub fn success() -> Color {
        Color::Rgb(80, 200, 120)
    }

    pub fn warning() -> Color {
        Color::Rgb(230, 180, 80)
    }

    pub fn error() -> Color {
        Color::Rgb(240, 80, 80)
    }

    // ── Structural colors ───────────────────────────────────
    pub fn border_color() -> Color {
        Color::Rgb(60, 60, 60)
    }

    pub fn drop_zone_bg() -> Color {
        Color::Rgb(30, 40, 60)
    }

    // ── Composite styles ────────────────────────────────────

    pub fn title() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::default().fg(Self::fg()).add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(Self::fg())
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::fg_dim())
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::fg_muted())
    }

    pub fn border() -> Style {
        Style::default().fg(Self::border_color())
    }

    pub fn focused_border() -> Style {
        Style::default().fg(Self::accent())
    }

    pub fn key_hint() -> Style {
        Style::default().fg(Self::accent())
    }

    pub fn disabled() -> Style {
        Style::default()
            .fg(Self::fg_dim())
            .add_modifier(Modifier::CROSSED_OUT)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::fg_muted())
    }

    pub fn tab_active() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn tab_inactive() -> Style {
        Style::default().fg(Self::fg_dim())
    }

    pub fn drop_zone(drag_over: bool) -> Style {
        if drag_over {
            Style::default()
                .fg(Self::accent())
                .bg(Self::drop_zone_bg())
                .add_modifier(Modifier::BOLD)
        } else {
            Self::border()
        }
    }

    /// Chip style for one tag on the dashboard.
    pub fn tag(kind: TagKind) -> Style {
        match kind {
            TagKind::Skill => Style::default().fg(Self::bg()).bg(Self::accent()),
            TagKind::SoftSkill => Style::default()
                .fg(Self::bg())
                .bg(Self::accent_secondary()),
            TagKind::Keyword => Style::default().fg(Self::fg()).bg(Self::border_color()),
            TagKind::SectionFound => Style::default()
                .fg(Self::success())
                .add_modifier(Modifier::BOLD),
            TagKind::SectionMissing => Style::default()
                .fg(Self::error())
                .add_modifier(Modifier::BOLD),
            TagKind::Placeholder => Self::dim().add_modifier(Modifier::ITALIC),
        }
    }

    pub fn score_color(percent: f64) -> Color {
        if percent >= 80.0 {
            Self::success()
        } else if percent >= 50.0 {
            Self::warning()
        } else {
            Self::error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_color_bands() {
        assert_eq!(Theme::score_color(92.0), Theme::success());
        assert_eq!(Theme::score_color(50.0), Theme::warning());
        assert_eq!(Theme::score_color(12.5), Theme::error());
    }

    #[test]
    fn section_tags_are_distinct() {
        assert_ne!(
            Theme::tag(TagKind::SectionFound),
            Theme::tag(TagKind::SectionMissing)
        );
    }
}
