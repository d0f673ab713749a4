//! Terminal event handling: captures keyboard, mouse, paste and resize
//! events from crossterm and dispatches them as Actions.
//!
//! The handler operates in two modes:
//! - Normal: keys are mapped to global shortcuts (quit, switch mode, export).
//! - Editing: keys are forwarded as raw CharInput/BackspaceInput so text
//!   fields can receive typed characters.
//!
//! A file dragged onto the terminal window arrives as a bracketed paste of
//! its path. Such pastes become [`Action::FilesDropped`] instead of text.
//!
//! The current InputMode is shared between the App and EventHandler via
//! an Arc<AtomicU8>.

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use smart_ats_core::intake::dropped_paths;
use smart_ats_core::AnalysisMode;

use crate::action::{Action, InputMode};

/// Encode InputMode as u8 for atomic sharing.
const MODE_NORMAL: u8 = 0;
const MODE_EDITING: u8 = 1;

/// Shared flag the App sets so the EventHandler knows which keymap to use.
pub type InputModeFlag = Arc<AtomicU8>;

pub fn new_input_mode_flag() -> InputModeFlag {
    Arc::new(AtomicU8::new(MODE_NORMAL))
}

pub fn set_input_mode(flag: &InputModeFlag, mode: InputMode) {
    let val = match mode {
        InputMode::Normal => MODE_NORMAL,
        InputMode::Editing => MODE_EDITING,
    };
    flag.store(val, Ordering::Relaxed);
}

fn get_input_mode(flag: &InputModeFlag) -> InputMode {
    match flag.load(Ordering::Relaxed) {
        MODE_EDITING => InputMode::Editing,
        _ => InputMode::Normal,
    }
}

/// Event loop that reads terminal events and sends Actions.
pub struct EventHandler {
    tx: mpsc::UnboundedSender<Action>,
    tick_rate: Duration,
    mode_flag: InputModeFlag,
}

impl EventHandler {
    pub fn new(
        tx: mpsc::UnboundedSender<Action>,
        tick_rate: Duration,
        mode_flag: InputModeFlag,
    ) -> Self {
        Self {
            tx,
            tick_rate,
            mode_flag,
        }
    }

    /// Run the event loop. This blocks and should be spawned in a task.
    pub async fn run(&self) {
        let mut interval = tokio::time::interval(self.tick_rate);

        loop {
            let action = tokio::select! {
                _ = interval.tick() => {
                    Some(Action::Tick)
                }
                result = tokio::task::spawn_blocking({
                    || {
                        if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                            event::read().ok()
                        } else {
                            None
                        }
                    }
                }) => {
                    match result {
                        Ok(Some(event)) => self.map_event(event),
                        _ => None,
                    }
                }
            };

            if let Some(action) = action {
                if self.tx.send(action).is_err() {
                    break;
                }
            }
        }
    }

    fn map_event(&self, event: Event) -> Option<Action> {
        match event {
            Event::Key(key) => self.map_key(key),
            Event::Paste(text) => Some(map_paste(text)),
            Event::Mouse(mouse) => map_mouse(mouse),
            Event::Resize(_, _) => Some(Action::Tick),
            _ => None,
        }
    }

    fn map_key(&self, key: KeyEvent) -> Option<Action> {
        map_key(get_input_mode(&self.mode_flag), key)
    }
}

/// A paste made only of existing file paths is a drop; anything else is text.
fn map_paste(text: String) -> Action {
    match dropped_paths(&text) {
        Some(paths) => Action::FilesDropped(paths),
        None => Action::PasteBulk(text),
    }
}

/// Dragging with the left button held highlights the drop zone until the
/// button is released.
fn map_mouse(mouse: MouseEvent) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Drag(MouseButton::Left) => Some(Action::DragOver),
        MouseEventKind::Up(MouseButton::Left) => Some(Action::DragLeave),
        _ => None,
    }
}

fn map_key(mode: InputMode, key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits regardless of mode.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match mode {
        InputMode::Editing => map_key_editing(key),
        InputMode::Normal => map_key_normal(key),
    }
}

/// Key mapping when a text field is focused. Most keys become character
/// input; only a few are reserved.
fn map_key_editing(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('w') => Some(Action::DeleteWord),
            KeyCode::Char('s') => Some(Action::SubmitForm),
            KeyCode::Enter => Some(Action::SubmitForm),
            _ => None,
        };
    }

    // Alt+Enter also submits (some terminals send this instead of Ctrl+Enter).
    if key.modifiers.contains(KeyModifiers::ALT) && key.code == KeyCode::Enter {
        return Some(Action::SubmitForm);
    }

    match key.code {
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Tab | KeyCode::BackTab => Some(Action::SwitchInputField),
        // The component decides between newline, attach and submit.
        KeyCode::Enter => Some(Action::NewlineInput),
        KeyCode::Up => Some(Action::ScrollUp),
        KeyCode::Down => Some(Action::ScrollDown),
        KeyCode::Backspace => Some(Action::BackspaceInput),
        KeyCode::Char(c) => Some(Action::CharInput(c)),
        _ => None,
    }
}

/// Key mapping in normal mode: global shortcuts.
fn map_key_normal(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Right | KeyCode::Tab => Some(Action::NextMode),
        KeyCode::Left | KeyCode::BackTab => Some(Action::PrevMode),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Char('s') => Some(Action::SubmitForm),
        KeyCode::Char('b') => Some(Action::BackToUpload),
        KeyCode::Char('i') => Some(Action::OpenImprover),
        KeyCode::Char('e') => Some(Action::ExportReport),
        KeyCode::Char('L') => Some(Action::Logout),

        KeyCode::Char('1') => Some(Action::SwitchMode(AnalysisMode::Basic)),
        KeyCode::Char('2') => Some(Action::SwitchMode(AnalysisMode::Ats)),

        _ => None,
    }
}
