use async_trait::async_trait;
use serde_json::Value;

use smart_ats_core::AnalysisMode;

use crate::client::SmartAtsClient;
use crate::error::ClientError;
use crate::protocol::{AnalysisRequest, ImproveSentenceResponse};

/// Everything the UI asks of the backend.
///
/// Carried by the application as `Arc<dyn AnalysisBackend>` so the UI can
/// be driven against a scripted backend.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(
        &self,
        mode: AnalysisMode,
        request: AnalysisRequest,
    ) -> Result<Value, ClientError>;

    async fn improve_sentence(
        &self,
        sentence: String,
    ) -> Result<ImproveSentenceResponse, ClientError>;

    async fn download_report(&self, report: Value) -> Result<Vec<u8>, ClientError>;

    async fn logout(&self) -> Result<(), ClientError>;

    fn login_url(&self) -> String;
}

#[async_trait]
impl AnalysisBackend for SmartAtsClient {
    async fn analyze(
        &self,
        mode: AnalysisMode,
        request: AnalysisRequest,
    ) -> Result<Value, ClientError> {
        SmartAtsClient::analyze(self, mode, &request).await
    }

    async fn improve_sentence(
        &self,
        sentence: String,
    ) -> Result<ImproveSentenceResponse, ClientError> {
        SmartAtsClient::improve_sentence(self, &sentence).await
    }

    async fn download_report(&self, report: Value) -> Result<Vec<u8>, ClientError> {
        SmartAtsClient::download_report(self, &report).await
    }

    async fn logout(&self) -> Result<(), ClientError> {
        SmartAtsClient::logout(self).await
    }

    fn login_url(&self) -> String {
        SmartAtsClient::login_url(self)
    }
}
