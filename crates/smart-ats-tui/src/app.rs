//! Main application state and render loop.

use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Tabs;
use ratatui::Terminal;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use smart_ats_client::protocol::AnalysisRequest;
use smart_ats_client::AnalysisBackend;
use smart_ats_core::session::{ReportCache, REPORT_FILENAME};
use smart_ats_core::view::ViewState;
use smart_ats_core::{AnalysisMode, AnalysisPayload, SmartAtsConfig};

use crate::action::{Action, InputMode};
use crate::components::help::HelpComponent;
use crate::components::notification::NotificationComponent;
use crate::components::sentence_improver::SentenceImproverComponent;
use crate::components::status_bar::StatusBarComponent;
use crate::components::Component;
use crate::controller::ModeController;
use crate::event::{self, EventHandler, InputModeFlag};
use crate::feedback::{
    analysis_failure_message, ANALYSIS_ERROR, EXPORT_FAILED, IMPROVE_FAILED, NETWORK_ERROR,
};
use crate::theme::Theme;

/// Why the UI loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitReason {
    Quit,
    /// The session was ended on the server; sign in again at `login_url`.
    SignedOut { login_url: String },
}

/// Main application state.
pub struct App {
    config: SmartAtsConfig,
    backend: Arc<dyn AnalysisBackend>,
    current_mode: AnalysisMode,
    should_quit: bool,
    exit_reason: ExitReason,
    /// Shared flag to tell the EventHandler which key-mapping to use.
    input_mode_flag: InputModeFlag,

    /// Latest ATS payload, for export.
    report_cache: ReportCache,
    exporting: bool,

    // Components
    basic: ModeController,
    ats: ModeController,
    improver: SentenceImproverComponent,
    notification: NotificationComponent,
    status_bar: StatusBarComponent,
    help: HelpComponent,
}

impl App {
    pub fn new(config: SmartAtsConfig, backend: Arc<dyn AnalysisBackend>) -> Self {
        let current_mode = config.ui.default_mode;
        Self {
            config,
            backend,
            current_mode,
            should_quit: false,
            exit_reason: ExitReason::Quit,
            input_mode_flag: event::new_input_mode_flag(),
            report_cache: ReportCache::new(),
            exporting: false,
            basic: ModeController::new(AnalysisMode::Basic),
            ats: ModeController::new(AnalysisMode::Ats),
            improver: SentenceImproverComponent::new(),
            notification: NotificationComponent::new(),
            status_bar: StatusBarComponent::new(current_mode),
            help: HelpComponent::new(),
        }
    }

    /// Pre-attach a resume in both modes (from CLI args).
    pub fn set_initial_resume(&mut self, path: PathBuf) {
        for controller in [&mut self.basic, &mut self.ats] {
            let status = controller.upload.attach(path.clone());
            self.status_bar.handle_action(&status);
        }
    }

    /// Pre-fill the ATS job description (from CLI args).
    pub fn set_initial_job_description(&mut self, description: String) {
        self.ats.upload.set_job_description(description);
    }

    pub fn current_mode(&self) -> AnalysisMode {
        self.current_mode
    }

    pub fn controller(&self, mode: AnalysisMode) -> &ModeController {
        match mode {
            AnalysisMode::Basic => &self.basic,
            AnalysisMode::Ats => &self.ats,
        }
    }

    pub fn controller_mut(&mut self, mode: AnalysisMode) -> &mut ModeController {
        match mode {
            AnalysisMode::Basic => &mut self.basic,
            AnalysisMode::Ats => &mut self.ats,
        }
    }

    pub fn report_cache(&self) -> &ReportCache {
        &self.report_cache
    }

    pub fn exit_reason(&self) -> &ExitReason {
        &self.exit_reason
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the TUI application.
    pub async fn run(&mut self) -> anyhow::Result<ExitReason> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

        let event_tx = tx.clone();
        let mode_flag = self.input_mode_flag.clone();
        let tick_rate = Duration::from_millis(self.config.ui.tick_rate_ms);
        let event_handler = EventHandler::new(event_tx, tick_rate, mode_flag);
        tokio::spawn(async move {
            event_handler.run().await;
        });

        self.sync_input_mode();

        loop {
            terminal.draw(|frame| {
                self.render(frame);
            })?;

            if let Some(action) = rx.recv().await {
                self.handle_action(&action, &tx);

                if self.should_quit {
                    break;
                }
            }
        }

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;

        Ok(self.exit_reason.clone())
    }

    fn sync_input_mode(&self) {
        event::set_input_mode(&self.input_mode_flag, self.current_input_mode());
    }

    /// What input mode should be active right now?
    fn current_input_mode(&self) -> InputMode {
        if self.help.visible || self.notification.is_visible() {
            return InputMode::Normal;
        }
        if self.improver.visible || self.controller(self.current_mode).wants_input() {
            InputMode::Editing
        } else {
            InputMode::Normal
        }
    }

    fn switch_mode(&mut self, mode: AnalysisMode) {
        if self.improver.visible {
            return;
        }
        self.current_mode = mode;
        self.status_bar.mode = mode;
    }

    /// Dispatch an action to all relevant components.
    pub fn handle_action(&mut self, action: &Action, tx: &mpsc::UnboundedSender<Action>) {
        // Modal overlays swallow keys until dismissed.
        if action.is_key_input() && (self.notification.is_visible() || self.help.visible) {
            if self.notification.is_visible() {
                self.notification.handle_action(action);
            } else {
                self.help.handle_action(action);
            }
            self.sync_input_mode();
            return;
        }

        let mut follow_up = None;

        match action {
            Action::Quit => {
                self.should_quit = true;
                return;
            }
            Action::SwitchMode(mode) => self.switch_mode(*mode),
            Action::NextMode => {
                if let Some(next) = self.current_mode.next() {
                    self.switch_mode(next);
                }
            }
            Action::PrevMode => {
                if let Some(prev) = self.current_mode.prev() {
                    self.switch_mode(prev);
                }
            }
            Action::SubmitForm if !self.improver.visible => self.submit(tx),
            Action::AnalysisSucceeded { mode, payload, raw } => {
                self.on_analysis_succeeded(*mode, payload, raw, tx);
            }
            Action::AnalysisFailed { mode, message } => {
                self.controller_mut(*mode).finish_submit();
                follow_up = Some(Action::Notify(message.clone()));
            }
            Action::ActivateView { mode, view } => {
                if !self.controller_mut(*mode).activate(*view) {
                    debug!(?view, "Skipped stale view activation");
                }
            }
            Action::BackToUpload if !self.improver.visible => {
                let mode = self.current_mode;
                if self.controller_mut(mode).back_to_upload() {
                    self.schedule_activation(mode, ViewState::Upload, tx);
                }
            }
            Action::ImproveSentence(sentence) => self.spawn_improve(sentence.clone(), tx.clone()),
            Action::SentenceImproveFailed(message) => {
                follow_up = Some(Action::Notify(message.clone()));
            }
            Action::ExportReport if !self.improver.visible => self.export_report(tx),
            Action::ReportExported(path) => {
                self.set_exporting(false);
                follow_up = Some(Action::SetStatus(format!("Report saved to {}", path.display())));
            }
            Action::ReportExportFailed(message) => {
                self.set_exporting(false);
                follow_up = Some(Action::Notify(message.clone()));
            }
            Action::Logout if !self.improver.visible => self.spawn_logout(tx.clone()),
            Action::LoggedOut => {
                self.exit_reason = ExitReason::SignedOut {
                    login_url: self.backend.login_url(),
                };
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        // The improver owns the keyboard while open; otherwise the visible view does.
        let opening_improver = matches!(action, Action::OpenImprover)
            && self.current_mode == AnalysisMode::Ats
            && !self.improver.visible;
        let result = if self.improver.visible || opening_improver {
            self.improver.handle_action(action)
        } else {
            let improver_result = self.improver.handle_action(action);
            let mode = self.current_mode;
            let view_result = self.controller_mut(mode).handle_action(action);
            improver_result.or(view_result)
        };

        self.notification.handle_action(action);
        self.help.handle_action(action);
        self.status_bar.handle_action(action);
        self.status_bar.view = self.controller(self.current_mode).visible_view();

        self.sync_input_mode();

        if let Some(next) = follow_up {
            self.handle_action(&next, tx);
        }
        if let Some(chained) = result {
            self.handle_action(&chained, tx);
        }
    }

    // ── Request orchestration ───────────────────────────────────

    fn submit(&mut self, tx: &mpsc::UnboundedSender<Action>) {
        let mode = self.current_mode;
        let Some(request) = self.controller_mut(mode).begin_submit() else {
            return;
        };
        info!(%mode, resume = %request.resume.display(), "Submitting resume");
        let _ = tx.send(Action::SetStatus("Analyzing resume...".to_string()));
        self.spawn_analysis(mode, request, tx.clone());
    }

    fn spawn_analysis(
        &self,
        mode: AnalysisMode,
        request: AnalysisRequest,
        tx: mpsc::UnboundedSender<Action>,
    ) {
        let backend = self.backend.clone();
        tokio::spawn(async move {
            let action = match backend.analyze(mode, request).await {
                Ok(raw) => match mode.decode(raw.clone()) {
                    Ok(payload) => {
                        info!(%mode, score = payload.score(), "Analysis complete");
                        Action::AnalysisSucceeded {
                            mode,
                            payload: Box::new(payload),
                            raw: Box::new(raw),
                        }
                    }
                    Err(e) => {
                        error!(%mode, "Analysis payload could not be read: {}", e);
                        Action::AnalysisFailed {
                            mode,
                            message: ANALYSIS_ERROR.to_string(),
                        }
                    }
                },
                Err(e) => {
                    error!(%mode, "Analysis failed: {}", e);
                    Action::AnalysisFailed {
                        mode,
                        message: analysis_failure_message(&e),
                    }
                }
            };
            let _ = tx.send(action);
        });
    }

    fn on_analysis_succeeded(
        &mut self,
        mode: AnalysisMode,
        payload: &AnalysisPayload,
        raw: &serde_json::Value,
        tx: &mpsc::UnboundedSender<Action>,
    ) {
        let controller = self.controller_mut(mode);
        controller.finish_submit();
        controller.show_results(payload);
        if mode.caches_report() {
            self.report_cache.store(raw.clone());
            let label = self.report_cache.get().map(|report| report.label());
            self.controller_mut(mode).dashboard.report_label = label;
        }
        self.schedule_activation(mode, ViewState::Dashboard, tx);
        let _ = tx.send(Action::SetStatus(format!("{} analysis complete", mode.short_name())));
    }

    /// Phase two of a view transition, after the configured delay.
    fn schedule_activation(
        &self,
        mode: AnalysisMode,
        view: ViewState,
        tx: &mpsc::UnboundedSender<Action>,
    ) {
        let delay = Duration::from_millis(self.config.ui.transition_delay_ms);
        let tx = tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Action::ActivateView { mode, view });
        });
    }

    // ── Auxiliary handlers ──────────────────────────────────────

    fn spawn_improve(&self, sentence: String, tx: mpsc::UnboundedSender<Action>) {
        let backend = self.backend.clone();
        tokio::spawn(async move {
            let action = match backend.improve_sentence(sentence).await {
                Ok(resp) => match resp.improved_text() {
                    Some(text) => Action::SentenceImproved(text),
                    None => {
                        warn!("Sentence rewrite returned nothing usable");
                        Action::SentenceImproveFailed(IMPROVE_FAILED.to_string())
                    }
                },
                Err(e) => {
                    error!("Sentence rewrite failed: {}", e);
                    Action::SentenceImproveFailed(NETWORK_ERROR.to_string())
                }
            };
            let _ = tx.send(action);
        });
    }

    fn set_exporting(&mut self, exporting: bool) {
        self.exporting = exporting;
        self.basic.dashboard.exporting = exporting;
        self.ats.dashboard.exporting = exporting;
    }

    fn export_report(&mut self, tx: &mpsc::UnboundedSender<Action>) {
        if self.exporting {
            return;
        }
        let Some(report) = self.report_cache.get() else {
            debug!("Export requested with no cached report");
            return;
        };
        let payload = report.payload.clone();
        let dir = self.config.export.resolved_download_dir();
        self.set_exporting(true);

        let backend = self.backend.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let action = match backend.download_report(payload).await {
                Ok(bytes) => match save_report(&dir, &bytes).await {
                    Ok(path) => {
                        info!(path = %path.display(), "Report saved");
                        Action::ReportExported(path)
                    }
                    Err(e) => {
                        error!(dir = %dir.display(), "Could not save report: {}", e);
                        Action::ReportExportFailed(EXPORT_FAILED.to_string())
                    }
                },
                Err(e) => {
                    error!("Report export failed: {}", e);
                    Action::ReportExportFailed(EXPORT_FAILED.to_string())
                }
            };
            let _ = tx.send(action);
        });
    }

    fn spawn_logout(&self, tx: mpsc::UnboundedSender<Action>) {
        let backend = self.backend.clone();
        tokio::spawn(async move {
            match backend.logout().await {
                Ok(()) => {
                    info!("Signed out");
                    let _ = tx.send(Action::LoggedOut);
                }
                Err(e) => warn!("Logout failed, staying signed in: {}", e),
            }
        });
    }

    // ── Rendering ───────────────────────────────────────────────

    /// Render the full UI.
    fn render(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(2), // Tab bar
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        self.render_tabs(frame, chunks[0]);
        self.controller(self.current_mode).render(frame, chunks[1]);
        self.status_bar.render(frame, chunks[2]);

        // Overlays (rendered on top)
        self.improver.render(frame, area);
        self.help.render(frame, area);
        self.notification.render(frame, area);
    }

    /// Render the mode tab bar.
    fn render_tabs(&self, frame: &mut ratatui::Frame, area: Rect) {
        let titles: Vec<Line> = AnalysisMode::all()
            .iter()
            .map(|mode| {
                let style = if *mode == self.current_mode {
                    Theme::tab_active()
                } else {
                    Theme::tab_inactive()
                };
                let busy = if self.controller(*mode).is_in_flight() {
                    " …"
                } else {
                    ""
                };
                Line::from(Span::styled(format!("{}{}", mode.label(), busy), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .select(self.current_mode.index())
            .divider(Span::styled(" | ", Theme::dim()))
            .highlight_style(Theme::tab_active());

        frame.render_widget(tabs, area);
    }
}

/// Write the exported report into `dir` under the fixed report name.
async fn save_report(dir: &Path, bytes: &[u8]) -> io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(REPORT_FILENAME);
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use smart_ats_client::protocol::ImproveSentenceResponse;
    use smart_ats_client::ClientError;
    use std::io::Write;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    type Scripted<T> = Mutex<Option<Box<dyn Fn() -> Result<T, ClientError> + Send>>>;

    /// Backend answering from scripted closures and counting calls.
    #[derive(Default)]
    struct FakeBackend {
        analyze_calls: AtomicUsize,
        improve_calls: AtomicUsize,
        download_calls: AtomicUsize,
        logout_calls: AtomicUsize,
        logout_fails: AtomicBool,
        last_request: Mutex<Option<AnalysisRequest>>,
        last_sentence: Mutex<Option<String>>,
        analyze: Scripted<Value>,
        improve: Scripted<ImproveSentenceResponse>,
        download: Scripted<Vec<u8>>,
    }

    impl FakeBackend {
        fn analyzing(f: impl Fn() -> Result<Value, ClientError> + Send + 'static) -> Self {
            let backend = Self::default();
            *backend.analyze.lock().unwrap() = Some(Box::new(f));
            backend
        }
    }

    #[async_trait]
    impl AnalysisBackend for FakeBackend {
        async fn analyze(
            &self,
            _mode: AnalysisMode,
            request: AnalysisRequest,
        ) -> Result<Value, ClientError> {
            self.analyze_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request);
            match self.analyze.lock().unwrap().as_ref() {
                Some(f) => f(),
                None => Ok(json!({})),
            }
        }

        async fn improve_sentence(
            &self,
            sentence: String,
        ) -> Result<ImproveSentenceResponse, ClientError> {
            self.improve_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_sentence.lock().unwrap() = Some(sentence);
            match self.improve.lock().unwrap().as_ref() {
                Some(f) => f(),
                None => Ok(ImproveSentenceResponse::default()),
            }
        }

        async fn download_report(&self, _report: Value) -> Result<Vec<u8>, ClientError> {
            self.download_calls.fetch_add(1, Ordering::SeqCst);
            match self.download.lock().unwrap().as_ref() {
                Some(f) => f(),
                None => Ok(b"%PDF".to_vec()),
            }
        }

        async fn logout(&self) -> Result<(), ClientError> {
            self.logout_calls.fetch_add(1, Ordering::SeqCst);
            if self.logout_fails.load(Ordering::SeqCst) {
                return Err(ClientError::Application {
                    status: 500,
                    message: None,
                });
            }
            Ok(())
        }

        fn login_url(&self) -> String {
            "http://backend.test/login".to_string()
        }
    }

    struct Harness {
        app: App,
        backend: Arc<FakeBackend>,
        tx: mpsc::UnboundedSender<Action>,
        rx: mpsc::UnboundedReceiver<Action>,
        resume: tempfile::NamedTempFile,
        download_dir: tempfile::TempDir,
    }

    impl Harness {
        fn new(backend: FakeBackend) -> Self {
            let mut resume = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
            writeln!(resume, "resume").unwrap();
            let download_dir = tempfile::tempdir().unwrap();

            let mut config = SmartAtsConfig::default();
            config.ui.transition_delay_ms = 1;
            config.export.download_dir = Some(download_dir.path().to_path_buf());

            let backend = Arc::new(backend);
            let app = App::new(config, backend.clone());
            let (tx, rx) = mpsc::unbounded_channel();
            Self {
                app,
                backend,
                tx,
                rx,
                resume,
                download_dir,
            }
        }

        fn attach(&mut self) {
            self.app.set_initial_resume(self.resume.path().to_path_buf());
        }

        fn send(&mut self, action: Action) {
            self.app.handle_action(&action, &self.tx);
        }

        /// Feed back actions from spawned tasks until `done` matches one.
        async fn pump_until(&mut self, done: impl Fn(&Action) -> bool) {
            loop {
                let action = tokio::time::timeout(Duration::from_secs(5), self.rx.recv())
                    .await
                    .expect("timed out waiting for action")
                    .expect("channel closed");
                let finished = done(&action);
                self.app.handle_action(&action, &self.tx);
                if finished {
                    return;
                }
            }
        }
    }

    fn ats_success() -> Value {
        json!({
            "score": {"total_score": 72, "breakdown": {"keyword_score": 30, "format_score": 10}},
            "keywords": {"matched": ["python"], "missing": ["docker"], "extra": []},
            "custom_field": "kept"
        })
    }

    #[tokio::test]
    async fn submit_without_file_sends_nothing() {
        let mut h = Harness::new(FakeBackend::default());
        h.send(Action::SubmitForm);
        tokio::task::yield_now().await;
        assert_eq!(h.backend.analyze_calls.load(Ordering::SeqCst), 0);
        assert!(!h.app.controller(AnalysisMode::Ats).is_in_flight());
    }

    #[tokio::test]
    async fn ats_success_renders_caches_and_transitions() {
        let mut h = Harness::new(FakeBackend::analyzing(|| Ok(ats_success())));
        h.attach();
        h.app.set_initial_job_description("  Rust role ".to_string());

        h.send(Action::SubmitForm);
        assert!(h.app.controller(AnalysisMode::Ats).upload.loading);

        h.pump_until(|a| matches!(a, Action::ActivateView { .. })).await;

        let ats = h.app.controller(AnalysisMode::Ats);
        assert!(!ats.is_in_flight());
        assert!(!ats.upload.loading);
        assert_eq!(ats.router.active(), Some(ViewState::Dashboard));
        assert_eq!(ats.dashboard.dashboard.gauge.label, "72%");
        assert!(ats.dashboard.dashboard.extra_keywords.is_placeholder());

        let cached = h.app.report_cache().get().unwrap();
        assert_eq!(cached.payload["custom_field"], "kept");
        assert_eq!(ats.dashboard.report_label, Some(cached.label()));

        let request = h.backend.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.job_description, "Rust role");
    }

    #[tokio::test]
    async fn second_submit_while_pending_is_ignored() {
        let mut h = Harness::new(FakeBackend::analyzing(|| Ok(ats_success())));
        h.attach();

        h.send(Action::SubmitForm);
        h.send(Action::SubmitForm);
        h.pump_until(|a| matches!(a, Action::AnalysisSucceeded { .. })).await;

        assert_eq!(h.backend.analyze_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn application_error_shows_server_message_without_transition() {
        let mut h = Harness::new(FakeBackend::analyzing(|| {
            Err(ClientError::Application {
                status: 200,
                message: Some("unsupported file type".to_string()),
            })
        }));
        h.attach();

        h.send(Action::SubmitForm);
        h.pump_until(|a| matches!(a, Action::AnalysisFailed { .. })).await;

        assert_eq!(h.app.notification.current(), Some("unsupported file type"));
        let ats = h.app.controller(AnalysisMode::Ats);
        assert_eq!(ats.visible_view(), ViewState::Upload);
        assert!(!ats.is_in_flight());
        assert!(ats.upload.can_submit());
        assert!(h.app.report_cache().is_empty());
    }

    #[tokio::test]
    async fn unreadable_success_body_is_a_generic_error() {
        let mut h = Harness::new(FakeBackend::analyzing(|| Ok(json!({"unexpected": true}))));
        h.attach();

        h.send(Action::SubmitForm);
        h.pump_until(|a| matches!(a, Action::AnalysisFailed { .. })).await;

        assert_eq!(h.app.notification.current(), Some(ANALYSIS_ERROR));
        assert_eq!(
            h.app.controller(AnalysisMode::Ats).visible_view(),
            ViewState::Upload
        );
    }

    #[tokio::test]
    async fn basic_success_does_not_cache_report() {
        let mut h = Harness::new(FakeBackend::analyzing(|| {
            Ok(json!({"ats_score": 55, "missing_skills": []}))
        }));
        h.attach();
        h.send(Action::SwitchMode(AnalysisMode::Basic));

        h.send(Action::SubmitForm);
        h.pump_until(|a| matches!(a, Action::ActivateView { .. })).await;

        let basic = h.app.controller(AnalysisMode::Basic);
        assert_eq!(basic.router.active(), Some(ViewState::Dashboard));
        assert!(basic.dashboard.dashboard.gaps.affirmation.is_some());
        assert!(h.app.report_cache().is_empty());
        assert_eq!(
            h.app.controller(AnalysisMode::Ats).visible_view(),
            ViewState::Upload
        );
    }

    #[tokio::test]
    async fn back_resets_form_and_returns_to_upload() {
        let mut h = Harness::new(FakeBackend::analyzing(|| Ok(ats_success())));
        h.attach();
        h.send(Action::SubmitForm);
        h.pump_until(|a| matches!(a, Action::ActivateView { .. })).await;

        h.send(Action::BackToUpload);
        h.pump_until(|a| matches!(a, Action::ActivateView { .. })).await;

        let ats = h.app.controller(AnalysisMode::Ats);
        assert_eq!(ats.router.active(), Some(ViewState::Upload));
        assert!(!ats.upload.form.is_valid());
        assert_eq!(ats.upload.form.attachment_label(), None);
    }

    #[tokio::test]
    async fn blank_sentence_sends_no_request() {
        let mut h = Harness::new(FakeBackend::default());
        h.send(Action::OpenImprover);
        assert!(h.app.improver.visible);
        h.send(Action::CharInput(' '));
        h.send(Action::NewlineInput);
        tokio::task::yield_now().await;

        assert_eq!(h.backend.improve_calls.load(Ordering::SeqCst), 0);
        assert!(!h.app.improver.busy);
    }

    #[tokio::test]
    async fn sentence_rewrite_round_trip() {
        let backend = FakeBackend::default();
        *backend.improve.lock().unwrap() = Some(Box::new(|| {
            Ok(serde_json::from_value(json!({"original": "did x", "improved": "Delivered X"}))
                .unwrap())
        }));
        let mut h = Harness::new(backend);

        h.send(Action::OpenImprover);
        for c in " did x ".chars() {
            h.send(Action::CharInput(c));
        }
        h.send(Action::NewlineInput);
        assert!(h.app.improver.busy);

        h.pump_until(|a| matches!(a, Action::SentenceImproved(_))).await;
        assert!(!h.app.improver.busy);
        assert_eq!(h.app.improver.result.as_deref(), Some("Delivered X"));
        assert_eq!(
            h.backend.last_sentence.lock().unwrap().as_deref(),
            Some("did x")
        );
    }

    #[tokio::test]
    async fn sentence_rewrite_failures_notify() {
        let backend = FakeBackend::default();
        *backend.improve.lock().unwrap() = Some(Box::new(|| {
            Err(ClientError::InvalidUrl("offline".to_string()))
        }));
        let mut h = Harness::new(backend);

        h.send(Action::OpenImprover);
        h.send(Action::CharInput('x'));
        h.send(Action::NewlineInput);
        h.pump_until(|a| matches!(a, Action::SentenceImproveFailed(_))).await;

        assert!(!h.app.improver.busy);
        assert_eq!(h.app.notification.current(), Some(NETWORK_ERROR));
    }

    #[tokio::test]
    async fn export_without_cached_report_is_a_no_op() {
        let mut h = Harness::new(FakeBackend::default());
        h.send(Action::ExportReport);
        tokio::task::yield_now().await;
        assert_eq!(h.backend.download_calls.load(Ordering::SeqCst), 0);
        assert!(!h.app.exporting);
    }

    #[tokio::test]
    async fn export_saves_fixed_filename() {
        let mut h = Harness::new(FakeBackend::analyzing(|| Ok(ats_success())));
        h.attach();
        h.send(Action::SubmitForm);
        h.pump_until(|a| matches!(a, Action::ActivateView { .. })).await;

        h.send(Action::ExportReport);
        assert!(h.app.ats.dashboard.exporting);
        h.pump_until(|a| matches!(a, Action::ReportExported(_))).await;

        assert!(!h.app.exporting);
        let saved = h.download_dir.path().join(REPORT_FILENAME);
        assert_eq!(std::fs::read(saved).unwrap(), b"%PDF");
    }

    #[tokio::test]
    async fn export_failure_notifies_and_restores_control() {
        let mut h = Harness::new(FakeBackend::analyzing(|| Ok(ats_success())));
        *h.backend.download.lock().unwrap() = Some(Box::new(|| {
            Err(ClientError::Application {
                status: 500,
                message: None,
            })
        }));
        h.attach();
        h.send(Action::SubmitForm);
        h.pump_until(|a| matches!(a, Action::ActivateView { .. })).await;

        h.send(Action::ExportReport);
        h.pump_until(|a| matches!(a, Action::ReportExportFailed(_))).await;

        assert!(!h.app.exporting);
        assert!(!h.app.ats.dashboard.exporting);
        assert_eq!(h.app.notification.current(), Some(EXPORT_FAILED));
    }

    #[tokio::test]
    async fn failed_logout_keeps_running() {
        let backend = FakeBackend::default();
        backend.logout_fails.store(true, Ordering::SeqCst);
        let mut h = Harness::new(backend);

        h.send(Action::Logout);
        while h.backend.logout_calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(h.rx.try_recv().is_err());
        assert!(!h.app.should_quit());
        assert_eq!(h.app.exit_reason(), &ExitReason::Quit);
        assert!(!h.app.notification.is_visible());
    }

    #[tokio::test]
    async fn rewrite_without_improved_text_reports_failure() {
        let backend = FakeBackend::default();
        *backend.improve.lock().unwrap() = Some(Box::new(|| {
            Ok(serde_json::from_value(json!({"original": "did x", "improved": ""})).unwrap())
        }));
        let mut h = Harness::new(backend);

        h.send(Action::OpenImprover);
        h.send(Action::CharInput('x'));
        h.send(Action::NewlineInput);
        h.pump_until(|a| matches!(a, Action::SentenceImproveFailed(_))).await;

        assert!(!h.app.improver.busy);
        assert_eq!(h.app.improver.result, None);
        assert_eq!(h.app.notification.current(), Some(IMPROVE_FAILED));
    }

    #[tokio::test]
    async fn logout_exits_with_login_url() {
        let mut h = Harness::new(FakeBackend::default());
        h.send(Action::Logout);
        h.pump_until(|a| matches!(a, Action::LoggedOut)).await;

        assert!(h.app.should_quit());
        assert_eq!(
            h.app.exit_reason(),
            &ExitReason::SignedOut {
                login_url: "http://backend.test/login".to_string()
            }
        );
    }

    #[tokio::test]
    async fn notification_swallows_keys_until_dismissed() {
        let mut h = Harness::new(FakeBackend::default());
        h.send(Action::Notify("Failed to analyze resume.".to_string()));
        h.send(Action::SwitchMode(AnalysisMode::Basic));
        assert_eq!(h.app.current_mode(), AnalysisMode::Ats);
        assert!(!h.app.notification.is_visible());

        h.send(Action::SwitchMode(AnalysisMode::Basic));
        assert_eq!(h.app.current_mode(), AnalysisMode::Basic);
    }
}
