//! Per-mode controller: one upload form, one dashboard, the router between
//! them and the in-flight guard for analysis requests.

use ratatui::layout::Rect;
use ratatui::Frame;

use smart_ats_client::protocol::AnalysisRequest;
use smart_ats_core::view::{ViewRouter, ViewState};
use smart_ats_core::{AnalysisMode, AnalysisPayload};

use crate::action::Action;
use crate::components::dashboard_view::DashboardViewComponent;
use crate::components::upload_view::UploadViewComponent;
use crate::components::Component;

pub struct ModeController {
    pub mode: AnalysisMode,
    pub router: ViewRouter,
    pub upload: UploadViewComponent,
    pub dashboard: DashboardViewComponent,
    in_flight: bool,
}

impl ModeController {
    pub fn new(mode: AnalysisMode) -> Self {
        let mut controller = Self {
            mode,
            router: ViewRouter::new(),
            upload: UploadViewComponent::new(mode),
            dashboard: DashboardViewComponent::new(mode),
            in_flight: false,
        };
        controller.sync_view_flags();
        controller
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn visible_view(&self) -> ViewState {
        self.router.visible()
    }

    /// Start a submission if the form is valid, the upload view is showing
    /// and nothing is pending. Locks the form until [`Self::finish_submit`].
    pub fn begin_submit(&mut self) -> Option<AnalysisRequest> {
        if self.in_flight || self.router.visible() != ViewState::Upload {
            return None;
        }
        let attachment = self.upload.form.attachment()?;
        let request = AnalysisRequest::new(
            attachment.path.clone(),
            self.upload.form.trimmed_job_description(),
        );
        self.in_flight = true;
        self.upload.loading = true;
        Some(request)
    }

    /// Unlock the form, whatever the outcome.
    pub fn finish_submit(&mut self) {
        self.in_flight = false;
        self.upload.loading = false;
    }

    /// Render `payload` and start the transition to the dashboard.
    pub fn show_results(&mut self, payload: &AnalysisPayload) {
        self.dashboard.show(payload);
        self.router.begin(ViewState::Dashboard);
        self.sync_view_flags();
    }

    /// Start the transition back to an empty upload form.
    pub fn back_to_upload(&mut self) -> bool {
        if self.router.visible() != ViewState::Upload {
            self.router.begin(ViewState::Upload);
            self.upload.reset();
            self.sync_view_flags();
            true
        } else {
            false
        }
    }

    /// Second phase of a transition.
    pub fn activate(&mut self, view: ViewState) -> bool {
        let activated = self.router.activate(view);
        self.sync_view_flags();
        activated
    }

    fn sync_view_flags(&mut self) {
        self.upload.active = self.router.flags(ViewState::Upload).active;
        self.dashboard.active = self.router.flags(ViewState::Dashboard).active;
    }

    /// Whether the visible view wants raw key input.
    pub fn wants_input(&self) -> bool {
        self.router.visible() == ViewState::Upload && self.upload.wants_input()
    }

    /// Forward an action to the visible view.
    pub fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match self.router.visible() {
            ViewState::Upload => self.upload.handle_action(action),
            ViewState::Dashboard => self.dashboard.handle_action(action),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self.router.visible() {
            ViewState::Upload => self.upload.render(frame, area),
            ViewState::Dashboard => self.dashboard.render(frame, area),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn attached(mode: AnalysisMode) -> (ModeController, tempfile::NamedTempFile) {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        writeln!(file, "resume").unwrap();
        let mut controller = ModeController::new(mode);
        controller.upload.attach(file.path().to_path_buf());
        (controller, file)
    }

    #[test]
    fn no_request_without_attachment() {
        let mut controller = ModeController::new(AnalysisMode::Ats);
        assert!(controller.begin_submit().is_none());
        assert!(!controller.is_in_flight());
    }

    #[test]
    fn in_flight_guard_blocks_second_submit() {
        let (mut controller, _file) = attached(AnalysisMode::Ats);
        controller.upload.set_job_description("  Rust engineer \n".to_string());

        let request = controller.begin_submit().unwrap();
        assert_eq!(request.job_description, "Rust engineer");
        assert!(controller.upload.loading);
        assert!(!controller.upload.can_submit());
        assert!(controller.begin_submit().is_none());

        controller.finish_submit();
        assert!(!controller.upload.loading);
        assert!(controller.upload.can_submit());
        assert!(controller.begin_submit().is_some());
    }

    #[test]
    fn results_then_back_round_trip() {
        let (mut controller, _file) = attached(AnalysisMode::Basic);
        let payload = AnalysisMode::Basic.decode(json!({"ats_score": 55})).unwrap();

        controller.begin_submit().unwrap();
        controller.finish_submit();
        controller.show_results(&payload);
        assert_eq!(controller.visible_view(), ViewState::Dashboard);
        assert!(!controller.dashboard.active);
        assert!(!controller.upload.active);
        assert!(controller.begin_submit().is_none());

        assert!(controller.activate(ViewState::Dashboard));
        assert!(controller.dashboard.active);

        assert!(controller.back_to_upload());
        assert_eq!(controller.visible_view(), ViewState::Upload);
        assert!(!controller.upload.form.is_valid());
        assert!(!controller.dashboard.active);
        assert!(controller.activate(ViewState::Upload));
        assert!(controller.upload.active);

        assert!(!controller.back_to_upload());
    }
}
