//! Dashboard widget model: the result view as plain data.
//!
//! [`Dashboard::render`] maps an [`AnalysisPayload`] onto a fixed set of named
//! widgets. Every sub-renderer clears its widget before filling it, so
//! rendering is idempotent and a new payload never leaves stale entries from
//! the previous one. The terminal components only draw what is here.

use std::fmt;

use crate::analysis::{
    AtsAnalysis, BasicAnalysis, CONTACT_SCORE_MAX, FORMAT_SCORE_MAX, KEYWORD_SCORE_MAX,
    SECTION_SCORE_MAX,
};
use crate::mode::{AnalysisMode, AnalysisPayload};

/// Shown in place of an empty keyword list.
pub const NONE_PLACEHOLDER: &str = "None";

/// Shown instead of the gap list when the backend found no gaps.
pub const NO_GAPS_MESSAGE: &str = "Great job! No critical skill gaps identified.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Skill,
    SoftSkill,
    Keyword,
    SectionFound,
    SectionMissing,
    Placeholder,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub text: String,
    pub kind: TagKind,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TagList {
    pub tags: Vec<Tag>,
}

impl TagList {
    pub fn clear(&mut self) {
        self.tags.clear();
    }

    fn push(&mut self, text: impl Into<String>, kind: TagKind) {
        self.tags.push(Tag {
            text: text.into(),
            kind,
        });
    }

    pub fn texts(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Whether the list shows only the "None" marker.
    pub fn is_placeholder(&self) -> bool {
        matches!(self.tags.as_slice(), [tag] if tag.kind == TagKind::Placeholder)
    }
}

/// Circular score gauge: the score and its percentage label.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreGauge {
    pub value: i64,
    pub label: String,
}

impl ScoreGauge {
    /// Fraction of the dial to fill. The value itself is shown unclamped in
    /// the label; only the drawn fill is bounded to a full dial.
    pub fn fill_ratio(&self) -> f64 {
        (self.value as f64 / 100.0).clamp(0.0, 1.0)
    }
}

/// One sub-score normalized against its own maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownBar {
    pub label: &'static str,
    /// Width of the bar in percent, within 0..=100.
    pub percent: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IdentityLine {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl fmt::Display for IdentityLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} • {}", self.name, self.email)?;
        if let Some(ref phone) = self.phone {
            write!(f, " • {phone}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleCard {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GapEntry {
    pub skill: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GapList {
    pub entries: Vec<GapEntry>,
    /// Set when the list was rendered and turned out empty.
    pub affirmation: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TipList {
    pub tips: Vec<String>,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dashboard {
    /// Mode of the payload last rendered; `None` before the first render.
    pub mode: Option<AnalysisMode>,
    pub identity: Option<IdentityLine>,
    pub gauge: ScoreGauge,
    pub breakdown: Vec<BreakdownBar>,
    pub sections: TagList,
    pub matched_keywords: TagList,
    pub missing_keywords: TagList,
    pub extra_keywords: TagList,
    pub match_rate: Option<String>,
    pub technical_skills: TagList,
    pub soft_skills: TagList,
    pub roles: Vec<RoleCard>,
    pub tips: TipList,
    pub gaps: GapList,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_payload(payload: &AnalysisPayload) -> Self {
        let mut dashboard = Self::new();
        dashboard.render(payload);
        dashboard
    }

    /// Replace every widget's content with what `payload` describes.
    pub fn render(&mut self, payload: &AnalysisPayload) {
        self.mode = Some(payload.mode());
        match payload {
            AnalysisPayload::Basic(basic) => self.render_basic(basic),
            AnalysisPayload::Ats(ats) => self.render_ats(ats),
        }
    }

    fn render_basic(&mut self, payload: &BasicAnalysis) {
        self.identity = None;
        self.breakdown.clear();
        self.sections.clear();
        self.matched_keywords.clear();
        self.missing_keywords.clear();
        self.extra_keywords.clear();
        self.match_rate = None;

        render_gauge(&mut self.gauge, payload.score());
        render_technical_skills(&mut self.technical_skills, payload);
        render_soft_skills(&mut self.soft_skills, payload);
        render_roles(&mut self.roles, payload);
        render_tips(&mut self.tips, payload.tips(), None);
        render_gaps(&mut self.gaps, payload);
    }

    fn render_ats(&mut self, payload: &AtsAnalysis) {
        self.technical_skills.clear();
        self.soft_skills.clear();
        self.roles.clear();
        self.gaps = GapList::default();

        render_identity(&mut self.identity, payload);
        render_gauge(&mut self.gauge, payload.total_score());
        render_breakdown(&mut self.breakdown, payload);
        render_sections(&mut self.sections, payload);
        render_keywords(&mut self.matched_keywords, payload.matched_keywords());
        render_keywords(&mut self.missing_keywords, payload.missing_keywords());
        render_keywords(&mut self.extra_keywords, payload.extra_keywords());
        self.match_rate = payload.match_rate().map(|rate| format_percent(rate * 100.0));
        render_tips(
            &mut self.tips,
            payload.tips(),
            payload
                .ai_error()
                .map(|e| format!("AI analysis unavailable: {e}")),
        );
    }
}

// ── Sub-renderers ───────────────────────────────────────────────

fn render_identity(widget: &mut Option<IdentityLine>, payload: &AtsAnalysis) {
    *widget = Some(IdentityLine {
        name: payload.candidate_name().to_string(),
        email: payload.candidate_email().to_string(),
        phone: payload.candidate_phone().map(str::to_string),
    });
}

fn render_gauge(widget: &mut ScoreGauge, score: f64) {
    let value = if score.is_finite() {
        score.round() as i64
    } else {
        0
    };
    widget.value = value;
    widget.label = format!("{value}%");
}

fn render_breakdown(widget: &mut Vec<BreakdownBar>, payload: &AtsAnalysis) {
    widget.clear();
    let breakdown = payload.breakdown();

    widget.push(bar("Keyword Match", breakdown.keyword_score, KEYWORD_SCORE_MAX));
    widget.push(bar("Formatting", breakdown.format_score, FORMAT_SCORE_MAX));
    if breakdown.section_score.is_some() {
        widget.push(bar("Sections", breakdown.section_score, SECTION_SCORE_MAX));
    }
    if breakdown.contact_score.is_some() {
        widget.push(bar("Contact Info", breakdown.contact_score, CONTACT_SCORE_MAX));
    }
}

fn bar(label: &'static str, score: Option<f64>, max: f64) -> BreakdownBar {
    let percent = normalize(score.unwrap_or(0.0), max);
    BreakdownBar {
        label,
        percent,
        text: format_percent(percent),
    }
}

fn render_sections(widget: &mut TagList, payload: &AtsAnalysis) {
    widget.clear();
    for (name, found) in payload.sections() {
        if found {
            widget.push(format!("✓ {name}"), TagKind::SectionFound);
        } else {
            widget.push(format!("✕ {name}"), TagKind::SectionMissing);
        }
    }
}

fn render_keywords(widget: &mut TagList, keywords: &[String]) {
    widget.clear();
    if keywords.is_empty() {
        widget.push(NONE_PLACEHOLDER, TagKind::Placeholder);
        return;
    }
    for keyword in keywords {
        widget.push(keyword.clone(), TagKind::Keyword);
    }
}

fn render_technical_skills(widget: &mut TagList, payload: &BasicAnalysis) {
    widget.clear();
    for skill in payload.technical_skills() {
        widget.push(skill, TagKind::Skill);
    }
}

fn render_soft_skills(widget: &mut TagList, payload: &BasicAnalysis) {
    widget.clear();
    for skill in payload.soft_skills() {
        widget.push(skill.clone(), TagKind::SoftSkill);
    }
}

fn render_roles(widget: &mut Vec<RoleCard>, payload: &BasicAnalysis) {
    widget.clear();
    widget.extend(payload.job_roles().iter().map(|role| RoleCard {
        title: role.title().to_string(),
        description: role.description().to_string(),
    }));
}

fn render_tips(widget: &mut TipList, tips: &[String], notice: Option<String>) {
    widget.tips.clear();
    widget.tips.extend(tips.iter().cloned());
    widget.notice = notice;
}

fn render_gaps(widget: &mut GapList, payload: &BasicAnalysis) {
    widget.entries.clear();
    let missing = payload.missing_skills();
    if missing.is_empty() {
        widget.affirmation = Some(NO_GAPS_MESSAGE);
        return;
    }
    widget.affirmation = None;
    widget.entries.extend(missing.iter().map(|gap| GapEntry {
        skill: gap.skill().to_string(),
        recommendation: gap.recommendation().to_string(),
    }));
}

/// `score` as a percentage of `max`, bounded to 0..=100.
pub fn normalize(score: f64, max: f64) -> f64 {
    let percent = score / max * 100.0;
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

/// Percentage label with at most one decimal: `75%`, `66.7%`.
pub fn format_percent(percent: f64) -> String {
    let rounded = (percent * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}%", rounded as i64)
    } else {
        format!("{rounded:.1}%")
    }
}
