//! Sentence improver: overlay that sends one resume sentence for an AI
//! rewrite and shows the result.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::action::Action;
use crate::components::{centered_rect, Component};
use crate::feedback::{IMPROVE_BUSY_LABEL, IMPROVE_LABEL};
use crate::theme::Theme;

pub struct SentenceImproverComponent {
    pub visible: bool,
    pub input: String,
    /// A rewrite request is pending; the trigger is disabled.
    pub busy: bool,
    /// The last rewrite, hidden while a new one is requested.
    pub result: Option<String>,
}

impl SentenceImproverComponent {
    pub fn new() -> Self {
        Self {
            visible: false,
            input: String::new(),
            busy: false,
            result: None,
        }
    }

    pub fn trigger_label(&self) -> &'static str {
        if self.busy {
            IMPROVE_BUSY_LABEL
        } else {
            IMPROVE_LABEL
        }
    }

    /// Request a rewrite of the trimmed input. Blank input sends nothing and
    /// leaves the trigger enabled.
    fn trigger(&mut self) -> Option<Action> {
        if self.busy {
            return None;
        }
        let sentence = self.input.trim();
        if sentence.is_empty() {
            return None;
        }
        let sentence = sentence.to_string();
        self.busy = true;
        self.result = None;
        Some(Action::ImproveSentence(sentence))
    }

    fn finish(&mut self, action: &Action) {
        match action {
            Action::SentenceImproved(text) => {
                self.busy = false;
                self.result = Some(text.clone());
            }
            Action::SentenceImproveFailed(_) => {
                self.busy = false;
            }
            _ => {}
        }
    }
}

impl Default for SentenceImproverComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SentenceImproverComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        if matches!(
            action,
            Action::SentenceImproved(_) | Action::SentenceImproveFailed(_)
        ) {
            self.finish(action);
            return None;
        }

        if !self.visible {
            if matches!(action, Action::OpenImprover) {
                self.visible = true;
            }
            return None;
        }

        match action {
            Action::Cancel => {
                self.visible = false;
                None
            }
            Action::CharInput(c) => {
                self.input.push(*c);
                None
            }
            Action::BackspaceInput => {
                self.input.pop();
                None
            }
            Action::DeleteWord => {
                let trimmed = self.input.trim_end_matches(' ');
                let start = trimmed.rfind(' ').map(|i| i + 1).unwrap_or(0);
                self.input.truncate(start);
                None
            }
            Action::PasteBulk(text) => {
                let joined = text.lines().collect::<Vec<_>>().join(" ");
                self.input.push_str(&joined);
                None
            }
            Action::NewlineInput | Action::SubmitForm | Action::Confirm => self.trigger(),
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let dialog_area = centered_rect(area, 70, 16);
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(" Rewrite a sentence ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::accent()));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::vertical([
            Constraint::Length(5), // Input
            Constraint::Length(1), // Trigger
            Constraint::Min(3),    // Result
            Constraint::Length(1), // Instructions
        ])
        .split(inner);

        let input = Paragraph::new(Line::from(vec![
            Span::styled(self.input.as_str(), Theme::normal()),
            Span::styled(" ", Style::default().bg(Theme::accent())),
        ]))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Sentence ")
                .borders(Borders::ALL)
                .border_style(Theme::focused_border()),
        );
        frame.render_widget(input, chunks[0]);

        let trigger = if self.busy {
            Line::from(Span::styled(self.trigger_label(), Theme::disabled()))
        } else {
            Line::from(vec![
                Span::styled("[Enter] ", Theme::selected()),
                Span::styled(self.trigger_label(), Theme::header()),
            ])
        };
        frame.render_widget(Paragraph::new(trigger), chunks[1]);

        if let Some(result) = &self.result {
            let improved = Paragraph::new(Span::styled(
                result.as_str(),
                Style::default().fg(Theme::success()),
            ))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(" Improved ")
                    .borders(Borders::ALL)
                    .border_style(Theme::border()),
            );
            frame.render_widget(improved, chunks[2]);
        }

        let instructions = Paragraph::new(Line::from(vec![
            Span::styled("[Esc]", Theme::selected()),
            Span::styled(" close", Theme::dim()),
        ]));
        frame.render_widget(instructions, chunks[3]);
    }
}
