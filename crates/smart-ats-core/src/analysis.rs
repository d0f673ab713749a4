//! Typed analysis payloads returned by the backend, one schema per mode.
//!
//! The backend is loose about which fields it sends: anything the dashboard
//! treats as optional is an `Option` here, and the accessor methods resolve the
//! documented fallbacks (zero score, empty list, placeholder name) in one place
//! so renderers never deal with absence themselves.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// Section status string the backend uses for a detected section.
pub const SECTION_FOUND: &str = "Found";

/// Maximum of the keyword sub-score.
pub const KEYWORD_SCORE_MAX: f64 = 40.0;
/// Maximum of the formatting sub-score.
pub const FORMAT_SCORE_MAX: f64 = 15.0;
/// Maximum of the section-completeness sub-score.
pub const SECTION_SCORE_MAX: f64 = 30.0;
/// Maximum of the contact-info sub-score.
pub const CONTACT_SCORE_MAX: f64 = 15.0;

pub const FALLBACK_NAME: &str = "Candidate";
pub const FALLBACK_EMAIL: &str = "No email detected";

/// A JSON object decoded with its key order intact.
///
/// Section checklists and skill categories are shown in the order the
/// backend wrote them, which a `HashMap` would lose.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderedMap<V>(pub Vec<(String, V)>);

impl<V> OrderedMap<V> {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// A nullable list whose `null` entries are skipped.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let list = Option::<Vec<Option<T>>>::deserialize(deserializer)?;
    Ok(list.map(|items| items.into_iter().flatten().collect()))
}

// ── Basic mode ──────────────────────────────────────────────────

/// Payload of `POST /analyze`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicAnalysis {
    #[serde(default)]
    pub ats_score: Option<f64>,

    /// Category name → skills in that category.
    #[serde(default)]
    pub technical_skills: Option<OrderedMap<Option<Vec<Option<String>>>>>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub soft_skills: Option<Vec<String>>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub job_roles: Option<Vec<JobRole>>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub ats_tips: Option<Vec<String>>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub missing_skills: Option<Vec<SkillGap>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRole {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl JobRole {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    #[serde(default)]
    pub skill: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
}

impl SkillGap {
    pub fn skill(&self) -> &str {
        self.skill.as_deref().unwrap_or_default()
    }

    pub fn recommendation(&self) -> &str {
        self.recommendation.as_deref().unwrap_or_default()
    }
}

impl BasicAnalysis {
    pub fn score(&self) -> f64 {
        self.ats_score.unwrap_or(0.0)
    }

    /// Technical skills of every category, in category order.
    pub fn technical_skills(&self) -> Vec<&str> {
        self.technical_skills
            .iter()
            .flat_map(|categories| categories.iter())
            .flat_map(|(_, skills)| skills.iter().flatten().flatten())
            .map(String::as_str)
            .collect()
    }

    pub fn soft_skills(&self) -> &[String] {
        self.soft_skills.as_deref().unwrap_or_default()
    }

    pub fn job_roles(&self) -> &[JobRole] {
        self.job_roles.as_deref().unwrap_or_default()
    }

    pub fn tips(&self) -> &[String] {
        self.ats_tips.as_deref().unwrap_or_default()
    }

    pub fn missing_skills(&self) -> &[SkillGap] {
        self.missing_skills.as_deref().unwrap_or_default()
    }
}

// ── ATS mode ────────────────────────────────────────────────────

/// Payload of `POST /analyze_ats`.
///
/// `score` and `keywords` are part of every well-formed report, so they are
/// required; a body without them does not decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsAnalysis {
    #[serde(default)]
    pub info: Option<CandidateInfo>,

    pub score: AtsScore,

    /// Section name → status (`"Found"` or anything else).
    #[serde(default)]
    pub sections: Option<OrderedMap<serde_json::Value>>,

    pub keywords: KeywordReport,

    #[serde(default)]
    pub ai_analysis: Option<AiAnalysis>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtsScore {
    #[serde(default)]
    pub total_score: Option<f64>,
    #[serde(default)]
    pub breakdown: Option<ScoreBreakdown>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(default)]
    pub keyword_score: Option<f64>,
    #[serde(default)]
    pub format_score: Option<f64>,
    #[serde(default)]
    pub section_score: Option<f64>,
    #[serde(default)]
    pub contact_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordReport {
    #[serde(default, deserialize_with = "lenient_list")]
    pub matched: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub missing: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub extra: Option<Vec<String>>,
    #[serde(default)]
    pub jd_provided: Option<bool>,
    /// Fraction of job-description keywords found in the resume (0.0–1.0).
    #[serde(default)]
    pub match_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiAnalysis {
    #[serde(default, deserialize_with = "lenient_list")]
    pub ats_tips: Option<Vec<String>>,
    /// Set by the backend when the AI step failed but the scan succeeded.
    #[serde(default)]
    pub error: Option<String>,
}

impl AtsAnalysis {
    pub fn total_score(&self) -> f64 {
        self.score.total_score.unwrap_or(0.0)
    }

    pub fn breakdown(&self) -> ScoreBreakdown {
        self.score.breakdown.clone().unwrap_or_default()
    }

    pub fn candidate_name(&self) -> &str {
        self.info
            .as_ref()
            .and_then(|i| i.name.as_deref())
            .filter(|n| !n.is_empty())
            .unwrap_or(FALLBACK_NAME)
    }

    pub fn candidate_email(&self) -> &str {
        self.info
            .as_ref()
            .and_then(|i| i.email.as_deref())
            .filter(|e| !e.is_empty())
            .unwrap_or(FALLBACK_EMAIL)
    }

    pub fn candidate_phone(&self) -> Option<&str> {
        self.info
            .as_ref()
            .and_then(|i| i.phone.as_deref())
            .filter(|p| !p.is_empty())
    }

    /// Sections in backend order, paired with whether each was found.
    pub fn sections(&self) -> Vec<(&str, bool)> {
        self.sections
            .iter()
            .flat_map(|s| s.iter())
            .map(|(name, status)| (name, status.as_str() == Some(SECTION_FOUND)))
            .collect()
    }

    pub fn matched_keywords(&self) -> &[String] {
        self.keywords.matched.as_deref().unwrap_or_default()
    }

    pub fn missing_keywords(&self) -> &[String] {
        self.keywords.missing.as_deref().unwrap_or_default()
    }

    pub fn extra_keywords(&self) -> &[String] {
        self.keywords.extra.as_deref().unwrap_or_default()
    }

    /// Keyword match rate, only meaningful when a job description was sent.
    pub fn match_rate(&self) -> Option<f64> {
        match self.keywords.jd_provided {
            Some(false) => None,
            _ => self.keywords.match_rate,
        }
    }

    pub fn tips(&self) -> &[String] {
        self.ai_analysis
            .as_ref()
            .and_then(|ai| ai.ats_tips.as_deref())
            .unwrap_or_default()
    }

    pub fn ai_error(&self) -> Option<&str> {
        self.ai_analysis
            .as_ref()
            .and_then(|ai| ai.error.as_deref())
            .filter(|e| !e.is_empty())
    }
}
