//! Status bar at the bottom of the TUI.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use smart_ats_core::view::ViewState;
use smart_ats_core::AnalysisMode;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

pub struct StatusBarComponent {
    pub message: String,
    pub mode: AnalysisMode,
    pub view: ViewState,
}

impl StatusBarComponent {
    pub fn new(mode: AnalysisMode) -> Self {
        Self {
            message: "Attach a resume to get started.".to_string(),
            mode,
            view: ViewState::Upload,
        }
    }

    /// `ATS · Upload`
    fn badge(&self) -> String {
        let view = match self.view {
            ViewState::Upload => "Upload",
            ViewState::Dashboard => "Dashboard",
        };
        format!("{} · {}", self.mode.short_name(), view)
    }
}

impl Component for StatusBarComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::SetStatus(msg) => {
                self.message = msg.clone();
                None
            }
            Action::ClearStatus => {
                self.message.clear();
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let width = area.width as usize;

        let hints = "q·?·1-2·L";
        let hints_len = hints.chars().count() + 1;

        let badge = self.badge();
        let badge_len = badge.chars().count() + 2;

        let msg_budget = width
            .saturating_sub(badge_len)
            .saturating_sub(hints_len)
            .saturating_sub(4);

        let msg_len = self.message.chars().count();
        let msg = if msg_len > msg_budget {
            if msg_budget > 3 {
                let kept: String = self.message.chars().take(msg_budget - 3).collect();
                format!("{kept}...")
            } else {
                String::new()
            }
        } else {
            self.message.clone()
        };

        let used = badge_len + 2 + msg.chars().count();
        let pad = width.saturating_sub(used + hints_len);

        let line = Line::from(vec![
            Span::styled(format!(" {badge} "), Theme::muted()),
            Span::styled("  ", Theme::dim()),
            Span::styled(msg, Theme::status_bar()),
            Span::raw(" ".repeat(pad)),
            Span::styled(hints, Theme::key_hint()),
            Span::raw(" "),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_names_mode_and_view() {
        let mut bar = StatusBarComponent::new(AnalysisMode::Ats);
        bar.view = ViewState::Dashboard;
        assert_eq!(bar.badge(), format!("{} · Dashboard", AnalysisMode::Ats.short_name()));
    }

    #[test]
    fn status_messages_replace_and_clear() {
        let mut bar = StatusBarComponent::new(AnalysisMode::Basic);
        bar.handle_action(&Action::SetStatus("Attached: cv.pdf".to_string()));
        assert_eq!(bar.message, "Attached: cv.pdf");
        bar.handle_action(&Action::ClearStatus);
        assert!(bar.message.is_empty());
    }
}
