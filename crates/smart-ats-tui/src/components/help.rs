//! Help overlay: keybinding reference.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::action::Action;
use crate::components::{centered_rect, Component};
use crate::theme::Theme;

pub struct HelpComponent {
    pub visible: bool,
}

impl HelpComponent {
    pub fn new() -> Self {
        Self { visible: false }
    }
}

impl Default for HelpComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for HelpComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::ToggleHelp => {
                self.visible = !self.visible;
                None
            }
            // Any key closes help.
            _ if self.visible && action.is_key_input() => {
                self.visible = false;
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let dialog = centered_rect(area, 60, 24);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(" Help: Keybindings ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::accent()));

        let help_text = vec![
            Line::from(""),
            key_line("q / Ctrl+C", "Quit"),
            key_line("?", "Toggle this help"),
            key_line("1 / 2", "Resume parser / ATS scanner"),
            key_line("Left / Right, Tab", "Previous / next mode"),
            key_line("Up / Down / j / k", "Scroll"),
            key_line("Esc", "Leave text fields / close / back"),
            key_line("L", "Log out"),
            Line::from(""),
            Line::from(Span::styled("── Upload ──", Theme::header())),
            Line::from(""),
            key_line("type + Enter", "Attach the resume at that path"),
            key_line("drag & drop", "Drop a file onto the window"),
            key_line("Tab", "Complete path / next field"),
            key_line("Ctrl+S / s", "Analyze"),
            Line::from(""),
            Line::from(Span::styled("── Dashboard ──", Theme::header())),
            Line::from(""),
            key_line("b", "Back to upload (clears the form)"),
            key_line("i", "Rewrite a sentence with AI (ATS)"),
            key_line("e", "Export the ATS report as PDF"),
        ];

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, dialog);
    }
}

fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<22}", key), Theme::selected()),
        Span::styled(desc, Theme::normal()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_do_not_close_help() {
        let mut help = HelpComponent::new();
        help.handle_action(&Action::ToggleHelp);
        help.handle_action(&Action::Tick);
        assert!(help.visible);
        help.handle_action(&Action::Confirm);
        assert!(!help.visible);
    }
}
