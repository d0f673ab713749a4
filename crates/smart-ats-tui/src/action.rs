//! Action enum: the central message bus for the TUI.
//! All user interactions and async results flow through here.

use std::path::PathBuf;

use smart_ats_core::view::ViewState;
use smart_ats_core::{AnalysisMode, AnalysisPayload};

/// Every possible action that can occur in the application.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Navigation ──────────────────────────────────────────
    /// Switch to a specific mode tab.
    SwitchMode(AnalysisMode),
    NextMode,
    PrevMode,

    // ── Global ──────────────────────────────────────────────
    Quit,
    ToggleHelp,
    /// Display a status message in the status bar.
    SetStatus(String),
    ClearStatus,
    /// A tick event for redraws.
    Tick,
    /// Show a modal notification the user has to acknowledge.
    Notify(String),
    DismissNotification,

    // ── Upload form ─────────────────────────────────────────
    /// Submit the upload form for analysis.
    SubmitForm,
    /// Files were dropped onto the terminal (pasted as paths).
    FilesDropped(Vec<PathBuf>),
    /// A drag is in progress over the drop zone.
    DragOver,
    /// The drag ended without a drop.
    DragLeave,

    // ── Analysis ────────────────────────────────────────────
    AnalysisSucceeded {
        mode: AnalysisMode,
        payload: Box<AnalysisPayload>,
        /// The body exactly as received, kept for export.
        raw: Box<serde_json::Value>,
    },
    AnalysisFailed {
        mode: AnalysisMode,
        message: String,
    },

    // ── Views ───────────────────────────────────────────────
    /// Second phase of a view transition.
    ActivateView {
        mode: AnalysisMode,
        view: ViewState,
    },
    /// Leave the dashboard and start over.
    BackToUpload,

    // ── Sentence improver ───────────────────────────────────
    OpenImprover,
    ImproveSentence(String),
    SentenceImproved(String),
    SentenceImproveFailed(String),

    // ── Report export & session ─────────────────────────────
    ExportReport,
    ReportExported(PathBuf),
    ReportExportFailed(String),
    Logout,
    LoggedOut,

    // ── Text Input ──────────────────────────────────────────
    /// A character was typed (only sent when in input mode).
    CharInput(char),
    BackspaceInput,
    /// Delete word (Ctrl+W).
    DeleteWord,
    /// Enter inside a text field.
    NewlineInput,
    /// Switch focus between input fields (Tab in input mode).
    SwitchInputField,
    /// Bulk paste from bracketed paste mode (terminal sends entire text at once).
    PasteBulk(String),

    // ── Scrolling / Selection ───────────────────────────────
    ScrollUp,
    ScrollDown,
    Confirm,
    /// Esc: close the focused overlay or step back.
    Cancel,
}

impl Action {
    /// Whether this action comes straight from the keyboard, as opposed to
    /// ticks and async results. Modal overlays swallow these.
    pub fn is_key_input(&self) -> bool {
        matches!(
            self,
            Action::SwitchMode(_)
                | Action::NextMode
                | Action::PrevMode
                | Action::ToggleHelp
                | Action::DismissNotification
                | Action::SubmitForm
                | Action::BackToUpload
                | Action::OpenImprover
                | Action::ExportReport
                | Action::Logout
                | Action::CharInput(_)
                | Action::BackspaceInput
                | Action::DeleteWord
                | Action::NewlineInput
                | Action::SwitchInputField
                | Action::PasteBulk(_)
                | Action::FilesDropped(_)
                | Action::ScrollUp
                | Action::ScrollDown
                | Action::Confirm
                | Action::Cancel
        )
    }
}

/// Whether the app is in a text-input mode where raw keys should
/// be forwarded to the active component instead of interpreted as
/// global shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal mode: keys are global shortcuts.
    Normal,
    /// Text input mode: keys go to the focused text field.
    Editing,
}
