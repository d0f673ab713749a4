//! The two analysis modes and the descriptor each controller is built from.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::analysis::{AtsAnalysis, BasicAnalysis};
use crate::error::SmartAtsError;

/// Which analysis a controller drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Skill/role parser.
    Basic,
    /// ATS scorer with keyword matching against a job description.
    Ats,
}

impl AnalysisMode {
    /// All modes in tab order.
    pub fn all() -> &'static [AnalysisMode] {
        &[AnalysisMode::Basic, AnalysisMode::Ats]
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisMode::Basic => "1.Resume Parser",
            AnalysisMode::Ats => "2.ATS Scanner",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            AnalysisMode::Basic => "Parser",
            AnalysisMode::Ats => "ATS",
        }
    }

    pub fn next(&self) -> Option<AnalysisMode> {
        match self {
            AnalysisMode::Basic => Some(AnalysisMode::Ats),
            AnalysisMode::Ats => None,
        }
    }

    pub fn prev(&self) -> Option<AnalysisMode> {
        match self {
            AnalysisMode::Basic => None,
            AnalysisMode::Ats => Some(AnalysisMode::Basic),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            AnalysisMode::Basic => 0,
            AnalysisMode::Ats => 1,
        }
    }

    /// Backend path the upload is posted to.
    pub fn endpoint(&self) -> &'static str {
        match self {
            AnalysisMode::Basic => "/analyze",
            AnalysisMode::Ats => "/analyze_ats",
        }
    }

    /// Whether the upload form offers (and the request carries) a job description.
    pub fn accepts_job_description(&self) -> bool {
        matches!(self, AnalysisMode::Ats)
    }

    /// Whether a successful payload is kept for report export.
    pub fn caches_report(&self) -> bool {
        matches!(self, AnalysisMode::Ats)
    }

    /// Decode a success body into this mode's schema.
    pub fn decode(&self, body: serde_json::Value) -> crate::error::Result<AnalysisPayload> {
        if !body.is_object() {
            return Err(SmartAtsError::Payload(format!(
                "{} response is not a JSON object",
                self.endpoint()
            )));
        }
        let payload = match self {
            AnalysisMode::Basic => AnalysisPayload::Basic(serde_json::from_value(body)?),
            AnalysisMode::Ats => AnalysisPayload::Ats(serde_json::from_value(body)?),
        };
        Ok(payload)
    }
}

impl FromStr for AnalysisMode {
    type Err = SmartAtsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" | "parser" => Ok(AnalysisMode::Basic),
            "ats" => Ok(AnalysisMode::Ats),
            other => Err(SmartAtsError::Config(format!(
                "Unknown analysis mode '{other}' (expected 'basic' or 'ats')"
            ))),
        }
    }
}

impl std::fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisMode::Basic => write!(f, "basic"),
            AnalysisMode::Ats => write!(f, "ats"),
        }
    }
}

/// A decoded analysis result of either mode.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisPayload {
    Basic(BasicAnalysis),
    Ats(AtsAnalysis),
}

impl AnalysisPayload {
    pub fn mode(&self) -> AnalysisMode {
        match self {
            AnalysisPayload::Basic(_) => AnalysisMode::Basic,
            AnalysisPayload::Ats(_) => AnalysisMode::Ats,
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            AnalysisPayload::Basic(basic) => basic.score(),
            AnalysisPayload::Ats(ats) => ats.total_score(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn descriptors_differ_only_where_modes_differ() {
        assert_eq!(AnalysisMode::Basic.endpoint(), "/analyze");
        assert_eq!(AnalysisMode::Ats.endpoint(), "/analyze_ats");
        assert!(!AnalysisMode::Basic.accepts_job_description());
        assert!(AnalysisMode::Ats.accepts_job_description());
        assert!(!AnalysisMode::Basic.caches_report());
        assert!(AnalysisMode::Ats.caches_report());
    }

    #[test]
    fn decode_dispatches_on_mode() {
        let basic = AnalysisMode::Basic.decode(json!({"ats_score": 55})).unwrap();
        assert_eq!(basic.mode(), AnalysisMode::Basic);
        assert_eq!(basic.score(), 55.0);

        let ats = AnalysisMode::Ats
            .decode(json!({"score": {"total_score": 72}, "keywords": {}}))
            .unwrap();
        assert_eq!(ats.mode(), AnalysisMode::Ats);
        assert_eq!(ats.score(), 72.0);
    }

    #[test]
    fn decode_rejects_ats_body_without_score() {
        let err = AnalysisMode::Ats.decode(json!({"keywords": {}})).unwrap_err();
        assert!(matches!(err, SmartAtsError::Serialization(_)));
    }

    #[test]
    fn decode_rejects_non_object_body() {
        let err = AnalysisMode::Basic.decode(json!([55])).unwrap_err();
        assert!(matches!(err, SmartAtsError::Payload(_)));
    }

    #[test]
    fn parses_from_cli_strings() {
        assert_eq!("ATS".parse::<AnalysisMode>().unwrap(), AnalysisMode::Ats);
        assert_eq!("basic".parse::<AnalysisMode>().unwrap(), AnalysisMode::Basic);
        assert!("premium".parse::<AnalysisMode>().is_err());
    }

    #[test]
    fn tab_navigation_is_bounded() {
        assert_eq!(AnalysisMode::Basic.next(), Some(AnalysisMode::Ats));
        assert_eq!(AnalysisMode::Ats.next(), None);
        assert_eq!(AnalysisMode::Basic.prev(), None);
        assert_eq!(AnalysisMode::all().len(), 2);
    }
}
