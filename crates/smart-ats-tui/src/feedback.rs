//! User-facing messages for failed requests.

use smart_ats_client::ClientError;

pub const ANALYSIS_REJECTED: &str = "Failed to analyze resume.";
pub const ANALYSIS_ERROR: &str = "An error occurred during analysis.";
pub const IMPROVE_FAILED: &str = "Failed to improve sentence.";
pub const NETWORK_ERROR: &str = "Network error.";
pub const EXPORT_FAILED: &str = "Failed to generate report.";

pub const IMPROVE_LABEL: &str = "Rewrite with AI";
pub const IMPROVE_BUSY_LABEL: &str = "Rewriting...";
pub const EXPORT_LABEL: &str = "Export report";
pub const EXPORT_BUSY_LABEL: &str = "Downloading...";

/// Notification text for a failed analysis: the server's own message when
/// it sent one, a fixed message otherwise.
pub fn analysis_failure_message(err: &ClientError) -> String {
    if !err.is_application() {
        return ANALYSIS_ERROR.to_string();
    }
    err.server_message().unwrap_or(ANALYSIS_REJECTED).to_string()
}
