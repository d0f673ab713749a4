//! Modal notifications that must be acknowledged, shown one at a time.

use std::collections::VecDeque;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::action::Action;
use crate::components::{centered_rect, Component};
use crate::theme::Theme;

pub struct NotificationComponent {
    queue: VecDeque<String>,
}

impl NotificationComponent {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.queue.is_empty()
    }

    /// The message currently on screen.
    pub fn current(&self) -> Option<&str> {
        self.queue.front().map(String::as_str)
    }
}

impl Default for NotificationComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for NotificationComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::Notify(message) => {
                self.queue.push_back(message.clone());
                None
            }
            // Any key acknowledges the current message.
            _ if action.is_key_input() && self.is_visible() => {
                self.queue.pop_front();
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(message) = self.current() else {
            return;
        };

        let dialog = centered_rect(area, 56, 8);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(" Notice ")
            .title_style(Style::default().fg(Theme::warning()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::warning()));
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        let text = Paragraph::new(Span::styled(message, Theme::normal())).wrap(Wrap { trim: true });
        frame.render_widget(text, chunks[0]);

        let remaining = self.queue.len() - 1;
        let mut hint = vec![
            Span::styled("[Enter]", Theme::selected()),
            Span::styled(" OK", Theme::dim()),
        ];
        if remaining > 0 {
            hint.push(Span::styled(format!("  ({remaining} more)"), Theme::dim()));
        }
        frame.render_widget(Paragraph::new(Line::from(hint)), chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_queue_and_dismiss_in_order() {
        let mut notes = NotificationComponent::new();
        assert!(!notes.is_visible());

        notes.handle_action(&Action::Notify("first".to_string()));
        notes.handle_action(&Action::Notify("second".to_string()));
        assert_eq!(notes.current(), Some("first"));

        notes.handle_action(&Action::Tick);
        assert_eq!(notes.current(), Some("first"));

        notes.handle_action(&Action::Confirm);
        assert_eq!(notes.current(), Some("second"));
        notes.handle_action(&Action::DismissNotification);
        assert!(!notes.is_visible());
    }
}
