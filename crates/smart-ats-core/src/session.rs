//! Single-slot cache of the latest ATS report, kept for export.

use chrono::{DateTime, Local, Utc};

/// File name exported reports are saved under.
pub const REPORT_FILENAME: &str = "Smart_ATS_Report.pdf";

#[derive(Debug, Clone, PartialEq)]
pub struct CachedReport {
    /// The payload exactly as the backend sent it.
    pub payload: serde_json::Value,
    pub cached_at: DateTime<Utc>,
}

impl CachedReport {
    /// `Report from 14:05`, in local time.
    pub fn label(&self) -> String {
        format!(
            "Report from {}",
            self.cached_at.with_timezone(&Local).format("%H:%M")
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReportCache {
    slot: Option<CachedReport>,
}

impl ReportCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached report.
    pub fn store(&mut self, payload: serde_json::Value) {
        self.slot = Some(CachedReport {
            payload,
            cached_at: Utc::now(),
        });
    }

    pub fn get(&self) -> Option<&CachedReport> {
        self.slot.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn starts_empty() {
        let cache = ReportCache::new();
        assert!(cache.is_empty());
        assert!(cache.get().is_none());
    }

    #[test]
    fn store_overwrites_previous_report() {
        let mut cache = ReportCache::new();
        cache.store(json!({"score": {"total_score": 40}}));
        let first_at = cache.get().unwrap().cached_at;
        cache.store(json!({"score": {"total_score": 90}, "custom": true}));

        let report = cache.get().unwrap();
        assert_eq!(report.payload["score"]["total_score"], 90);
        assert_eq!(report.payload["custom"], true);
        assert!(report.cached_at >= first_at);
    }

    #[test]
    fn label_shows_local_clock_time() {
        let mut cache = ReportCache::new();
        cache.store(json!({}));
        let report = cache.get().unwrap();

        let expected = report.cached_at.with_timezone(&Local).format("%H:%M").to_string();
        assert_eq!(report.label(), format!("Report from {expected}"));
        assert_eq!(expected.len(), 5);
    }
}
