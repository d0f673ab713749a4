//! Dashboard view: draws the rendered analysis of either mode.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};
use ratatui::Frame;

use smart_ats_core::dashboard::{BreakdownBar, Dashboard, TagList};
use smart_ats_core::{AnalysisMode, AnalysisPayload};

use crate::action::Action;
use crate::components::Component;
use crate::feedback::{EXPORT_BUSY_LABEL, EXPORT_LABEL};
use crate::theme::Theme;

const BAR_LABEL_WIDTH: usize = 14;

pub struct DashboardViewComponent {
    mode: AnalysisMode,
    pub dashboard: Dashboard,
    scroll: u16,
    /// An export request is pending.
    pub exporting: bool,
    /// When the exportable report was received, e.g. `Report from 14:05`.
    pub report_label: Option<String>,
    /// Whether the view finished its transition in.
    pub active: bool,
}

impl DashboardViewComponent {
    pub fn new(mode: AnalysisMode) -> Self {
        Self {
            mode,
            dashboard: Dashboard::new(),
            scroll: 0,
            exporting: false,
            report_label: None,
            active: false,
        }
    }

    /// Render a fresh payload, replacing whatever was shown.
    pub fn show(&mut self, payload: &AnalysisPayload) {
        self.dashboard.render(payload);
        self.scroll = 0;
    }

    fn header_line(&self) -> Line<'_> {
        match &self.dashboard.identity {
            Some(identity) => {
                let mut spans = vec![
                    Span::styled(identity.name.as_str(), Theme::header()),
                    Span::styled(" • ", Theme::dim()),
                    Span::styled(identity.email.as_str(), Theme::normal()),
                ];
                if let Some(phone) = &identity.phone {
                    spans.push(Span::styled(" • ", Theme::dim()));
                    spans.push(Span::styled(phone.as_str(), Theme::normal()));
                }
                Line::from(spans)
            }
            None => Line::from(Span::styled("Resume overview", Theme::header())),
        }
    }

    fn render_gauge(&self, frame: &mut Frame, area: Rect) {
        let gauge = &self.dashboard.gauge;
        let color = Theme::score_color(gauge.value as f64);
        let widget = Gauge::default()
            .block(
                Block::default()
                    .title(" ATS Score ")
                    .borders(Borders::ALL)
                    .border_style(Theme::border()),
            )
            .gauge_style(Style::default().fg(color).bg(Theme::border_color()))
            .ratio(gauge.fill_ratio())
            .label(Span::styled(
                gauge.label.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        frame.render_widget(widget, area);
    }

    fn render_breakdown(&self, frame: &mut Frame, area: Rect) {
        let width = (area.width as usize).saturating_sub(BAR_LABEL_WIDTH + 10);
        let lines: Vec<Line> = self
            .dashboard
            .breakdown
            .iter()
            .map(|bar| breakdown_line(bar, width))
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    /// Everything below the gauge, as one scrollable text.
    fn detail_lines(&self) -> Vec<Line<'_>> {
        let d = &self.dashboard;
        let mut lines = Vec::new();

        match self.mode {
            AnalysisMode::Ats => {
                section(&mut lines, "Sections");
                lines.push(tag_line(&d.sections));

                section(&mut lines, "Matched keywords");
                lines.push(tag_line(&d.matched_keywords));
                section(&mut lines, "Missing keywords");
                lines.push(tag_line(&d.missing_keywords));
                section(&mut lines, "Extra keywords");
                lines.push(tag_line(&d.extra_keywords));
                if let Some(rate) = &d.match_rate {
                    lines.push(Line::from(vec![
                        Span::styled("Match rate: ", Theme::muted()),
                        Span::styled(rate.as_str(), Theme::selected()),
                    ]));
                }
            }
            AnalysisMode::Basic => {
                section(&mut lines, "Technical skills");
                lines.push(tag_line(&d.technical_skills));
                section(&mut lines, "Soft skills");
                lines.push(tag_line(&d.soft_skills));

                section(&mut lines, "Suggested roles");
                for role in &d.roles {
                    lines.push(Line::from(Span::styled(role.title.as_str(), Theme::header())));
                    lines.push(Line::from(Span::styled(
                        format!("  {}", role.description),
                        Theme::muted(),
                    )));
                }

                section(&mut lines, "Skill gaps");
                if let Some(affirmation) = d.gaps.affirmation {
                    lines.push(Line::from(Span::styled(
                        affirmation,
                        Style::default().fg(Theme::success()),
                    )));
                }
                for gap in &d.gaps.entries {
                    lines.push(Line::from(Span::styled(
                        gap.skill.as_str(),
                        Style::default()
                            .fg(Theme::warning())
                            .add_modifier(Modifier::BOLD),
                    )));
                    lines.push(Line::from(Span::styled(
                        format!("  Tip: {}", gap.recommendation),
                        Theme::muted(),
                    )));
                }
            }
        }

        section(&mut lines, "Tips");
        if let Some(notice) = &d.tips.notice {
            lines.push(Line::from(Span::styled(
                notice.as_str(),
                Style::default().fg(Theme::error()),
            )));
        }
        for tip in &d.tips.tips {
            lines.push(Line::from(vec![
                Span::styled("• ", Theme::key_hint()),
                Span::styled(tip.as_str(), Theme::normal()),
            ]));
        }
        lines
    }

    fn hints_line(&self) -> Line<'_> {
        let mut spans = vec![
            Span::styled("  [b]", Theme::selected()),
            Span::styled(" back  ", Theme::dim()),
            Span::styled("[j/k]", Theme::selected()),
            Span::styled(" scroll  ", Theme::dim()),
        ];
        if self.mode == AnalysisMode::Ats {
            spans.push(Span::styled("[i]", Theme::selected()));
            spans.push(Span::styled(" rewrite a sentence  ", Theme::dim()));
            if self.exporting {
                spans.push(Span::styled("[e]", Theme::disabled()));
                spans.push(Span::styled(format!(" {EXPORT_BUSY_LABEL}"), Theme::disabled()));
            } else {
                spans.push(Span::styled("[e]", Theme::selected()));
                spans.push(Span::styled(format!(" {EXPORT_LABEL}"), Theme::dim()));
            }
            if let Some(label) = &self.report_label {
                spans.push(Span::styled(format!("  ({label})"), Theme::muted()));
            }
        }
        Line::from(spans)
    }
}

impl Component for DashboardViewComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            Action::ScrollDown => {
                self.scroll = self.scroll.saturating_add(1);
                None
            }
            Action::Cancel => Some(Action::BackToUpload),
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = match self.mode {
            AnalysisMode::Basic => " Resume analysis ",
            AnalysisMode::Ats => " ATS report ",
        };
        let block = Block::default()
            .title(title)
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(if self.active { Theme::border() } else { Theme::dim() });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let breakdown_height = self.dashboard.breakdown.len() as u16;
        let chunks = Layout::vertical([
            Constraint::Length(1),                // Identity
            Constraint::Length(3),                // Score gauge
            Constraint::Length(breakdown_height), // Breakdown bars
            Constraint::Min(4),                   // Details
            Constraint::Length(1),                // Hints
        ])
        .split(inner);

        frame.render_widget(Paragraph::new(self.header_line()), chunks[0]);
        self.render_gauge(frame, chunks[1]);
        if breakdown_height > 0 {
            self.render_breakdown(frame, chunks[2]);
        }

        let details = Paragraph::new(self.detail_lines())
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        frame.render_widget(details, chunks[3]);

        frame.render_widget(Paragraph::new(self.hints_line()), chunks[4]);
    }
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &'a str) {
    if !lines.is_empty() {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(title, Theme::header())));
}

fn tag_line(tags: &TagList) -> Line<'_> {
    let mut spans = Vec::with_capacity(tags.tags.len() * 2);
    for tag in &tags.tags {
        spans.push(Span::styled(format!(" {} ", tag.text), Theme::tag(tag.kind)));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// `Keyword Match  ████████░░░░ 75%`
fn breakdown_line(bar: &BreakdownBar, width: usize) -> Line<'static> {
    let filled = ((width as f64) * bar.percent / 100.0).round() as usize;
    let filled = filled.min(width);
    let color = Theme::score_color(bar.percent);
    Line::from(vec![
        Span::styled(format!("{:<width$}", bar.label, width = BAR_LABEL_WIDTH), Theme::muted()),
        Span::styled("\u{2588}".repeat(filled), Style::default().fg(color)),
        Span::styled(
            "\u{2591}".repeat(width - filled),
            Style::default().fg(Theme::border_color()),
        ),
        Span::styled(format!(" {}", bar.text), Theme::normal()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use serde_json::json;

    fn draw(view: &DashboardViewComponent) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 40)).unwrap();
        terminal
            .draw(|frame| view.render(frame, frame.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn draws_ats_report() {
        let payload = AnalysisMode::Ats
            .decode(json!({
                "info": {"name": "Ada Lovelace", "email": "ada@example.com"},
                "score": {"total_score": 72, "breakdown": {"keyword_score": 30, "format_score": 10}},
                "sections": {"Experience": "Found", "Projects": "Missing"},
                "keywords": {"matched": ["python"], "missing": ["docker"], "extra": []},
                "ai_analysis": {"ats_tips": ["Quantify impact"]}
            }))
            .unwrap();
        let mut view = DashboardViewComponent::new(AnalysisMode::Ats);
        view.show(&payload);

        let screen = draw(&view);
        assert!(screen.contains("Ada Lovelace • ada@example.com"));
        assert!(screen.contains("72%"));
        assert!(screen.contains("75%"));
        assert!(screen.contains("66.7%"));
        assert!(screen.contains("✓ Experience"));
        assert!(screen.contains("✕ Projects"));
        assert!(screen.contains(" None "));
        assert!(screen.contains("Quantify impact"));
        assert!(screen.contains(EXPORT_LABEL));
    }

    #[test]
    fn draws_basic_report_with_affirmation() {
        let payload = AnalysisMode::Basic
            .decode(json!({"ats_score": 55, "missing_skills": []}))
            .unwrap();
        let mut view = DashboardViewComponent::new(AnalysisMode::Basic);
        view.show(&payload);

        let screen = draw(&view);
        assert!(screen.contains("55%"));
        assert!(screen.contains("Great job! No critical skill gaps identified."));
        assert!(!screen.contains(EXPORT_LABEL));
    }

    #[test]
    fn export_hint_shows_report_time() {
        let mut view = DashboardViewComponent::new(AnalysisMode::Ats);
        view.report_label = Some("Report from 09:41".to_string());
        assert!(draw(&view).contains("(Report from 09:41)"));
    }

    #[test]
    fn busy_export_label() {
        let mut view = DashboardViewComponent::new(AnalysisMode::Ats);
        view.exporting = true;
        assert!(draw(&view).contains(EXPORT_BUSY_LABEL));
    }

    #[test]
    fn esc_steps_back() {
        let mut view = DashboardViewComponent::new(AnalysisMode::Basic);
        assert!(matches!(
            view.handle_action(&Action::Cancel),
            Some(Action::BackToUpload)
        ));
    }

    #[test]
    fn bar_fill_matches_percent() {
        let bar = BreakdownBar {
            label: "Keyword Match",
            percent: 75.0,
            text: "75%".to_string(),
        };
        let line = breakdown_line(&bar, 20);
        assert_eq!(line.spans[1].content.chars().count(), 15);
        assert_eq!(line.spans[2].content.chars().count(), 5);
    }
}
