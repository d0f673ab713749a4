//! Upload ⇄ Dashboard view router.
//!
//! A transition runs in two phases so the UI can animate it:
//! 1. [`ViewRouter::begin`] hides the current view and reveals the target,
//!    which is visible but not yet active.
//! 2. After the configured delay, [`ViewRouter::activate`] marks the target
//!    active. Activation is ignored if another transition has revealed a
//!    different view in the meantime, so at most one view is ever active.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewState {
    Upload,
    Dashboard,
}

/// Visibility flags of one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewFlags {
    pub hidden: bool,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRouter {
    upload: ViewFlags,
    dashboard: ViewFlags,
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRouter {
    /// Start on the upload view, fully active.
    pub fn new() -> Self {
        Self {
            upload: ViewFlags {
                hidden: false,
                active: true,
            },
            dashboard: ViewFlags {
                hidden: true,
                active: false,
            },
        }
    }

    /// The view currently shown (active or still activating).
    pub fn visible(&self) -> ViewState {
        if self.upload.hidden {
            ViewState::Dashboard
        } else {
            ViewState::Upload
        }
    }

    /// The active view, if the last transition has completed.
    pub fn active(&self) -> Option<ViewState> {
        if self.upload.active {
            Some(ViewState::Upload)
        } else if self.dashboard.active {
            Some(ViewState::Dashboard)
        } else {
            None
        }
    }

    pub fn flags(&self, view: ViewState) -> ViewFlags {
        match view {
            ViewState::Upload => self.upload,
            ViewState::Dashboard => self.dashboard,
        }
    }

    /// Phase one: hide the other view and reveal `target` without activating it.
    pub fn begin(&mut self, target: ViewState) {
        let (shown, hidden) = match target {
            ViewState::Upload => (&mut self.upload, &mut self.dashboard),
            ViewState::Dashboard => (&mut self.dashboard, &mut self.upload),
        };
        hidden.active = false;
        hidden.hidden = true;
        shown.hidden = false;
        shown.active = false;
    }

    /// Phase two: mark `target` active if it is still the visible view.
    /// Returns whether the activation took effect.
    pub fn activate(&mut self, target: ViewState) -> bool {
        if self.visible() != target {
            return false;
        }
        match target {
            ViewState::Upload => self.upload.active = true,
            ViewState::Dashboard => self.dashboard.active = true,
        }
        true
    }
}
