//! Upload view: resume picker, drop zone and, in ATS mode, the job
//! description.
//!
//! - Resume field: type a path (with filesystem completion) and press Enter
//!   to attach it, or drop a file onto the terminal window
//! - Job description: multi-line text area, never required
//! - Ctrl+S submits once a file is attached

use std::path::{Path, PathBuf};

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use smart_ats_core::intake::{expand_home, UploadForm};
use smart_ats_core::AnalysisMode;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

/// Maximum number of path suggestions to display.
const MAX_SUGGESTIONS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputField {
    Resume,
    JobDescription,
}

#[derive(Debug, Clone)]
struct PathSuggestion {
    full_path: String,
    name: String,
    is_dir: bool,
}

pub struct UploadViewComponent {
    mode: AnalysisMode,
    pub form: UploadForm,
    /// What the user typed into the resume field.
    pub path_input: String,
    focused: InputField,
    /// Cursor position (byte offset) within the focused field.
    pub cursor: usize,
    /// A request for this form is pending; the form is dimmed and locked.
    pub loading: bool,
    /// Whether the text fields capture keys (Esc leaves, Enter re-enters).
    editing: bool,
    /// Whether the view finished its transition in.
    pub active: bool,

    suggestions: Vec<PathSuggestion>,
    suggestion_index: Option<usize>,
    suggestions_for: String,
}

impl UploadViewComponent {
    pub fn new(mode: AnalysisMode) -> Self {
        Self {
            mode,
            form: UploadForm::new(),
            path_input: String::new(),
            focused: InputField::Resume,
            cursor: 0,
            loading: false,
            editing: true,
            active: true,
            suggestions: Vec::new(),
            suggestion_index: None,
            suggestions_for: String::new(),
        }
    }

    /// Whether this component wants to capture raw key input.
    pub fn wants_input(&self) -> bool {
        self.editing && !self.loading
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.form.is_valid() && !self.loading
    }

    /// Pre-fill the job description (ATS only).
    pub fn set_job_description(&mut self, text: String) {
        if self.mode.accepts_job_description() {
            self.form.job_description = text;
            if self.focused == InputField::JobDescription {
                self.cursor = self.form.job_description.len();
            }
        }
    }

    /// Attach `path` as if picked. Refuses anything that is not an existing file.
    pub fn attach(&mut self, path: PathBuf) -> Action {
        if !path.is_file() {
            return Action::SetStatus(format!("Not a file: {}", path.display()));
        }
        self.path_input = path.to_string_lossy().to_string();
        self.cursor = self.path_input.len();
        self.form.select_files(vec![path]);
        self.dismiss_suggestions();
        Action::SetStatus(self.form.attachment_label().unwrap_or_default())
    }

    /// Back to an empty form.
    pub fn reset(&mut self) {
        self.form.reset();
        self.path_input.clear();
        self.cursor = 0;
        self.focused = InputField::Resume;
        self.editing = true;
        self.dismiss_suggestions();
        self.suggestions_for.clear();
    }

    fn focused_input_mut(&mut self) -> &mut String {
        match self.focused {
            InputField::Resume => &mut self.path_input,
            InputField::JobDescription => &mut self.form.job_description,
        }
    }

    fn focused_len(&self) -> usize {
        match self.focused {
            InputField::Resume => self.path_input.len(),
            InputField::JobDescription => self.form.job_description.len(),
        }
    }

    fn clamp_cursor(&mut self) {
        self.cursor = match self.focused {
            InputField::Resume => floor_char_boundary(&self.path_input, self.cursor),
            InputField::JobDescription => {
                floor_char_boundary(&self.form.job_description, self.cursor)
            }
        };
    }

    fn insert_str(&mut self, s: &str) {
        self.clamp_cursor();
        let cursor = self.cursor;
        self.focused_input_mut().insert_str(cursor, s);
        self.cursor += s.len();
    }

    /// Delete the character before the cursor.
    fn delete_char(&mut self) {
        self.clamp_cursor();
        if self.cursor > 0 {
            let cursor = self.cursor;
            let input = self.focused_input_mut();
            let prev = input[..cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev);
            self.cursor = prev;
        }
    }

    /// Delete the word before the cursor (Ctrl+W).
    fn delete_word(&mut self) {
        self.clamp_cursor();
        if self.cursor > 0 {
            let cursor = self.cursor;
            let input = self.focused_input_mut();
            let mut end = cursor;
            while end > 0 && input.as_bytes().get(end - 1) == Some(&b' ') {
                end -= 1;
            }
            let mut start = end;
            while start > 0 && input.as_bytes().get(start - 1) != Some(&b' ') {
                start -= 1;
            }
            input.drain(start..cursor);
            self.cursor = start;
        }
    }

    fn switch_field(&mut self) {
        if !self.mode.accepts_job_description() {
            return;
        }
        self.dismiss_suggestions();
        self.focused = match self.focused {
            InputField::Resume => InputField::JobDescription,
            InputField::JobDescription => InputField::Resume,
        };
        self.cursor = self.focused_len();
    }

    /// Enter in the resume field: attach what was typed.
    fn attach_typed_path(&mut self) -> Option<Action> {
        let typed = self.path_input.trim();
        if typed.is_empty() {
            return Some(Action::SetStatus(
                "Type the path to your resume first".to_string(),
            ));
        }
        let path = expand_home(typed);
        let status = self.attach(path);
        if self.form.is_valid() && self.mode.accepts_job_description() {
            self.focused = InputField::JobDescription;
            self.cursor = self.form.job_description.len();
        }
        Some(status)
    }

    // ── Path completion ─────────────────────────────────────

    fn has_suggestions(&self) -> bool {
        self.focused == InputField::Resume && !self.suggestions.is_empty()
    }

    fn dismiss_suggestions(&mut self) {
        self.suggestions.clear();
        self.suggestion_index = None;
    }

    /// Refresh completion candidates for the typed path.
    fn refresh_suggestions(&mut self) {
        if self.path_input == self.suggestions_for {
            return;
        }
        self.suggestions_for = self.path_input.clone();
        self.dismiss_suggestions();

        if self.path_input.is_empty() {
            return;
        }

        let expanded = expand_home(&self.path_input);
        let typed_dir = self.path_input.ends_with('/')
            || self.path_input.ends_with(std::path::MAIN_SEPARATOR);
        let (search_dir, prefix): (PathBuf, String) = if typed_dir {
            (expanded, String::new())
        } else {
            let parent = expanded.parent().unwrap_or(Path::new("/")).to_path_buf();
            let prefix = expanded
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_default();
            (parent, prefix)
        };

        let Ok(entries) = std::fs::read_dir(&search_dir) else {
            return;
        };
        let prefix_lower = prefix.to_lowercase();

        let mut results: Vec<PathSuggestion> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                if name.starts_with('.') && !prefix.starts_with('.') {
                    return None;
                }
                if !name.to_lowercase().starts_with(&prefix_lower) {
                    return None;
                }
                let full_path = entry.path();
                Some(PathSuggestion {
                    is_dir: full_path.is_dir(),
                    full_path: full_path.to_string_lossy().to_string(),
                    name,
                })
            })
            .collect();

        // Directories first, then alphabetically.
        results.sort_by(|a, b| {
            b.is_dir
                .cmp(&a.is_dir)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        results.truncate(MAX_SUGGESTIONS);
        self.suggestions = results;
    }

    fn accept_suggestion(&mut self) {
        let idx = self.suggestion_index.unwrap_or(0);
        if let Some(suggestion) = self.suggestions.get(idx) {
            let mut new_path = suggestion.full_path.clone();
            if suggestion.is_dir && !new_path.ends_with('/') {
                new_path.push('/');
            }
            self.path_input = new_path;
            self.cursor = self.path_input.len();
            self.refresh_suggestions();
        }
    }

    // ── Rendering helpers ───────────────────────────────────

    /// Styles fade while a request is pending.
    fn style(&self, style: Style) -> Style {
        if self.loading {
            Theme::dim()
        } else {
            style
        }
    }

    fn render_resume_field(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focused == InputField::Resume && self.wants_input();
        let block = Block::default()
            .title(" Resume ")
            .title_style(self.style(if focused { Theme::key_hint() } else { Theme::muted() }))
            .borders(Borders::ALL)
            .border_style(self.style(if focused {
                Theme::focused_border()
            } else {
                Theme::border()
            }));

        let text = &self.path_input;
        let line = if text.is_empty() && !focused {
            Line::from(Span::styled("~/path/to/resume.pdf", Theme::dim()))
        } else if focused {
            cursor_line(text, self.cursor)
        } else {
            Line::from(Span::styled(text.as_str(), self.style(Theme::normal())))
        };
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_suggestions(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .suggestions
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let style = if self.suggestion_index == Some(i) {
                    Style::default()
                        .fg(Theme::bg())
                        .bg(Theme::accent())
                        .add_modifier(Modifier::BOLD)
                } else if s.is_dir {
                    Style::default().fg(Theme::accent())
                } else {
                    Theme::normal()
                };
                let icon = if s.is_dir { "/" } else { " " };
                ListItem::new(Line::from(Span::styled(format!(" {}{} ", s.name, icon), style)))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
                .border_style(Theme::border()),
        );
        frame.render_widget(list, area);
    }

    fn render_drop_zone(&self, frame: &mut Frame, area: Rect) {
        let drag_over = self.form.is_drag_over();
        let block = Block::default()
            .title(" Drop zone ")
            .title_style(self.style(Theme::muted()))
            .borders(Borders::ALL)
            .border_style(self.style(Theme::drop_zone(drag_over)));

        let prompt = if drag_over {
            Span::styled("Release to attach", Theme::selected())
        } else {
            Span::styled(
                "Drag a resume file onto this window, or type its path above",
                self.style(Theme::muted()),
            )
        };
        let attached = match self.form.attachment_label() {
            Some(label) => Span::styled(
                label,
                self.style(Style::default().fg(Theme::success())),
            ),
            None => Span::styled("No file attached", Theme::dim()),
        };

        let mut paragraph = Paragraph::new(vec![Line::from(prompt), Line::from(attached)])
            .block(block)
            .wrap(Wrap { trim: true });
        if drag_over {
            paragraph = paragraph.style(Theme::drop_zone(true));
        }
        frame.render_widget(paragraph, area);
    }

    fn render_job_description(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focused == InputField::JobDescription && self.wants_input();
        let text = &self.form.job_description;
        let title = if text.is_empty() {
            " Job description (optional) ".to_string()
        } else {
            format!(" Job description ({} chars) ", text.chars().count())
        };
        let block = Block::default()
            .title(title)
            .title_style(self.style(if focused { Theme::key_hint() } else { Theme::muted() }))
            .borders(Borders::ALL)
            .border_style(self.style(if focused {
                Theme::focused_border()
            } else {
                Theme::border()
            }));

        if text.is_empty() && !focused {
            let placeholder = Paragraph::new(Span::styled(
                "Paste the job posting to score keyword coverage",
                Theme::dim(),
            ))
            .block(block);
            frame.render_widget(placeholder, area);
            return;
        }

        // The cursor only belongs to this field while it has focus.
        let cursor = if focused {
            floor_char_boundary(text, self.cursor)
        } else {
            0
        };
        let lines: Vec<Line> = if focused {
            let mut offset = 0;
            text.split('\n')
                .map(|segment| {
                    let start = offset;
                    offset += segment.len() + 1;
                    if (start..=start + segment.len()).contains(&cursor) {
                        cursor_line(segment, cursor - start)
                    } else {
                        Line::from(Span::styled(segment.to_string(), Theme::normal()))
                    }
                })
                .collect()
        } else {
            text.split('\n')
                .map(|segment| Line::from(Span::styled(segment.to_string(), self.style(Theme::normal()))))
                .collect()
        };

        let cursor_row = text[..cursor].matches('\n').count() as u16;
        let visible = area.height.saturating_sub(2);
        let scroll = cursor_row.saturating_sub(visible.saturating_sub(1));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn render_submit(&self, frame: &mut Frame, area: Rect) {
        let (key_style, label_style) = if self.can_submit() {
            (Theme::key_hint(), Theme::header())
        } else {
            (Theme::disabled(), Theme::disabled())
        };
        let line = Line::from(vec![
            Span::styled("  [ctrl+s]", key_style),
            Span::styled(" Analyze resume", label_style),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let line = if self.loading {
            Line::from(Span::styled(
                "  Analyzing resume...",
                Style::default().fg(Theme::warning()),
            ))
        } else if self.has_suggestions() {
            Line::from(vec![
                Span::styled("  tab", Theme::key_hint()),
                Span::styled(" complete  ", Theme::dim()),
                Span::styled("↑↓", Theme::key_hint()),
                Span::styled(" navigate  ", Theme::dim()),
                Span::styled("enter", Theme::key_hint()),
                Span::styled(" attach", Theme::dim()),
            ])
        } else if self.wants_input() {
            Line::from(vec![
                Span::styled("  enter", Theme::key_hint()),
                Span::styled(" attach  ", Theme::dim()),
                Span::styled("tab", Theme::key_hint()),
                Span::styled(" switch  ", Theme::dim()),
                Span::styled("esc", Theme::key_hint()),
                Span::styled(" shortcuts", Theme::dim()),
            ])
        } else {
            Line::from(vec![
                Span::styled("  enter", Theme::key_hint()),
                Span::styled(" edit  ", Theme::dim()),
                Span::styled("s", Theme::key_hint()),
                Span::styled(" analyze  ", Theme::dim()),
                Span::styled("tab", Theme::key_hint()),
                Span::styled(" switch mode", Theme::dim()),
            ])
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

impl Component for UploadViewComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            // Drops work even while a request is pending.
            Action::FilesDropped(paths) => {
                self.form.drop_files(paths.clone());
                if let Some(attachment) = self.form.attachment() {
                    self.path_input = attachment.path.to_string_lossy().to_string();
                    if self.focused == InputField::Resume {
                        self.cursor = self.path_input.len();
                    }
                }
                self.dismiss_suggestions();
                self.form.attachment_label().map(Action::SetStatus)
            }
            Action::DragOver => {
                self.form.drag_enter();
                None
            }
            Action::DragLeave => {
                self.form.drag_leave();
                None
            }
            _ if self.loading => None,

            // ── Text input ──────────────────────────────────────
            Action::CharInput(c) => {
                self.insert_str(c.encode_utf8(&mut [0u8; 4]));
                if self.focused == InputField::Resume {
                    self.refresh_suggestions();
                }
                None
            }
            Action::BackspaceInput => {
                self.delete_char();
                if self.focused == InputField::Resume {
                    self.refresh_suggestions();
                }
                None
            }
            Action::DeleteWord => {
                self.delete_word();
                if self.focused == InputField::Resume {
                    self.refresh_suggestions();
                }
                None
            }
            Action::PasteBulk(text) => {
                if !text.is_empty() {
                    let to_paste = if self.focused == InputField::Resume {
                        text.lines().next().unwrap_or("").to_string()
                    } else {
                        text.clone()
                    };
                    self.insert_str(&to_paste);
                    if self.focused == InputField::Resume {
                        self.refresh_suggestions();
                    }
                }
                None
            }

            // ── Tab: accept suggestion OR switch field ──────────
            Action::SwitchInputField => {
                if self.has_suggestions() {
                    self.accept_suggestion();
                } else {
                    self.switch_field();
                }
                None
            }
            Action::ScrollDown => {
                if self.has_suggestions() {
                    let max = self.suggestions.len();
                    self.suggestion_index = Some(match self.suggestion_index {
                        None => 0,
                        Some(i) => (i + 1).min(max - 1),
                    });
                }
                None
            }
            Action::ScrollUp => {
                if self.has_suggestions() {
                    self.suggestion_index = match self.suggestion_index {
                        None | Some(0) => None,
                        Some(i) => Some(i - 1),
                    };
                }
                None
            }

            // ── Enter: attach in the resume field, newline in the JD ─
            Action::NewlineInput => match self.focused {
                InputField::Resume => {
                    if self.has_suggestions() && self.suggestion_index.is_some() {
                        self.accept_suggestion();
                        if !Path::new(&self.path_input).is_file() {
                            return None;
                        }
                    }
                    self.attach_typed_path()
                }
                InputField::JobDescription => {
                    self.insert_str("\n");
                    None
                }
            },

            Action::Cancel => {
                self.editing = false;
                self.dismiss_suggestions();
                None
            }
            Action::Confirm => {
                self.editing = true;
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" {} ", upload_title(self.mode)))
            .title_style(self.style(Theme::title()))
            .borders(Borders::ALL)
            .border_style(if self.active { Theme::border() } else { Theme::dim() });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let suggestion_height = if self.has_suggestions() {
            self.suggestions.len() as u16 + 1
        } else {
            0
        };
        let description_height = if self.mode.accepts_job_description() {
            Constraint::Min(5)
        } else {
            Constraint::Min(0)
        };

        let chunks = Layout::vertical([
            Constraint::Length(3),                 // Resume path
            Constraint::Length(suggestion_height), // Completion dropdown
            Constraint::Length(4),                 // Drop zone
            description_height,                    // Job description
            Constraint::Length(1),                 // Submit control
            Constraint::Length(1),                 // Hints / loading
        ])
        .split(inner);

        self.render_resume_field(frame, chunks[0]);
        if self.has_suggestions() {
            self.render_suggestions(frame, chunks[1]);
        }
        self.render_drop_zone(frame, chunks[2]);
        if self.mode.accepts_job_description() {
            self.render_job_description(frame, chunks[3]);
        }
        self.render_submit(frame, chunks[4]);
        self.render_footer(frame, chunks[5]);
    }
}

fn upload_title(mode: AnalysisMode) -> &'static str {
    match mode {
        AnalysisMode::Basic => "Upload your resume",
        AnalysisMode::Ats => "Scan your resume against a job",
    }
}

/// Largest char boundary in `text` at or before `index`.
fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// One line of text with a block cursor at byte offset `cursor`.
fn cursor_line(text: &str, cursor: usize) -> Line<'static> {
    let pos = floor_char_boundary(text, cursor);
    let (before, after) = text.split_at(pos);
    let mut rest = after.chars();
    let cursor_char = rest.next().map(String::from).unwrap_or_else(|| " ".to_string());
    Line::from(vec![
        Span::styled(before.to_string(), Theme::normal()),
        Span::styled(
            cursor_char,
            Style::default().fg(Theme::bg()).bg(Theme::accent()),
        ),
        Span::styled(rest.as_str().to_string(), Theme::normal()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::io::Write;

    fn type_text(view: &mut UploadViewComponent, text: &str) {
        for c in text.chars() {
            view.handle_action(&Action::CharInput(c));
        }
    }

    fn resume() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        writeln!(file, "resume").unwrap();
        file
    }

    #[test]
    fn enter_attaches_typed_path_and_moves_to_job_description() {
        let file = resume();
        let mut view = UploadViewComponent::new(AnalysisMode::Ats);
        type_text(&mut view, &file.path().to_string_lossy());
        view.dismiss_suggestions();

        let status = view.handle_action(&Action::NewlineInput);
        let name = file.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(matches!(status, Some(Action::SetStatus(ref s)) if *s == format!("Attached: {name}")));
        assert!(view.can_submit());
        assert_eq!(view.focused, InputField::JobDescription);

        type_text(&mut view, "Rust");
        view.handle_action(&Action::NewlineInput);
        type_text(&mut view, "Tokio");
        assert_eq!(view.form.job_description, "Rust\nTokio");
    }

    #[test]
    fn missing_path_is_not_attached() {
        let mut view = UploadViewComponent::new(AnalysisMode::Basic);
        type_text(&mut view, "/definitely/not/here.pdf");
        let status = view.handle_action(&Action::NewlineInput);
        assert!(matches!(status, Some(Action::SetStatus(ref s)) if s.starts_with("Not a file")));
        assert!(!view.can_submit());
    }

    #[test]
    fn basic_mode_has_no_job_description_field() {
        let mut view = UploadViewComponent::new(AnalysisMode::Basic);
        view.handle_action(&Action::SwitchInputField);
        assert_eq!(view.focused, InputField::Resume);

        view.set_job_description("ignored".to_string());
        assert!(view.form.job_description.is_empty());
    }

    #[test]
    fn drop_attaches_first_file() {
        let first = resume();
        let second = resume();
        let mut view = UploadViewComponent::new(AnalysisMode::Ats);

        view.handle_action(&Action::DragOver);
        assert!(view.form.is_drag_over());
        view.handle_action(&Action::FilesDropped(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]));

        assert!(!view.form.is_drag_over());
        assert_eq!(view.form.attachment().unwrap().path, first.path());
        assert_eq!(view.path_input, first.path().to_string_lossy());
    }

    #[test]
    fn loading_locks_text_but_not_drops() {
        let file = resume();
        let mut view = UploadViewComponent::new(AnalysisMode::Ats);
        view.loading = true;
        assert!(!view.wants_input());

        view.handle_action(&Action::CharInput('x'));
        assert!(view.path_input.is_empty());
        assert!(!view.can_submit());

        view.handle_action(&Action::FilesDropped(vec![file.path().to_path_buf()]));
        assert!(view.form.is_valid());
        assert!(!view.can_submit());
    }

    #[test]
    fn reset_clears_everything() {
        let file = resume();
        let mut view = UploadViewComponent::new(AnalysisMode::Ats);
        view.attach(file.path().to_path_buf());
        view.set_job_description("Data engineer".to_string());
        view.handle_action(&Action::Cancel);

        view.reset();
        assert!(view.path_input.is_empty());
        assert!(!view.form.is_valid());
        assert_eq!(view.form.attachment_label(), None);
        assert!(view.form.job_description.is_empty());
        assert!(view.wants_input());
    }

    fn draw(view: &UploadViewComponent) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| view.render(frame, frame.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn non_ascii_job_description_renders_while_resume_focused() {
        let mut view = UploadViewComponent::new(AnalysisMode::Ats);
        type_text(&mut view, "abcd");
        view.set_job_description("café • naïve’s".to_string());

        let screen = draw(&view);
        assert!(screen.contains("caf"));
        assert!(screen.contains("14 chars"));
    }

    #[test]
    fn stale_cursor_snaps_to_char_boundary_when_switching_fields() {
        let mut view = UploadViewComponent::new(AnalysisMode::Ats);
        view.set_job_description("é".to_string());
        type_text(&mut view, "x");
        view.cursor = 1;
        view.focused = InputField::JobDescription;

        draw(&view);
        view.handle_action(&Action::CharInput('!'));
        assert_eq!(view.form.job_description, "!é");
    }

    #[test]
    fn esc_leaves_and_enter_resumes_editing() {
        let mut view = UploadViewComponent::new(AnalysisMode::Basic);
        view.handle_action(&Action::Cancel);
        assert!(!view.wants_input());
        view.handle_action(&Action::Confirm);
        assert!(view.wants_input());
    }
}
