//! HTTP client for the resume analysis backend.

use reqwest::cookie::Jar;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use smart_ats_core::config::ServerConfig;
use smart_ats_core::AnalysisMode;

use crate::error::ClientError;
use crate::protocol::*;

/// Client for the analysis backend. Cookies set by the server (the login
/// session) are kept for the lifetime of the client.
pub struct SmartAtsClient {
    client: Client,
    base_url: String,
}

impl SmartAtsClient {
    pub fn new(config: &ServerConfig) -> Result<Self, ClientError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let url =
            Url::parse(&base_url).map_err(|_| ClientError::InvalidUrl(config.base_url.clone()))?;

        let jar = Jar::default();
        if let Some(cookie) = config.session_cookie.as_deref() {
            jar.add_cookie_str(cookie, &url);
        }

        let mut builder = Client::builder().cookie_provider(Arc::new(jar));
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Where the user signs in again after logging out.
    pub fn login_url(&self) -> String {
        format!("{}/login", self.base_url)
    }

    /// Upload a resume for analysis and return the raw success body.
    ///
    /// A non-success status or a truthy `error` field is an
    /// [`ClientError::Application`]; a body that is not JSON is a
    /// [`ClientError::Decode`] whatever the status.
    #[instrument(skip(self, request), fields(resume = %request.resume.display()))]
    pub async fn analyze(
        &self,
        mode: AnalysisMode,
        request: &AnalysisRequest,
    ) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url, mode.endpoint());
        let bytes = tokio::fs::read(&request.resume)
            .await
            .map_err(|source| ClientError::Io {
                path: request.resume.clone(),
                source,
            })?;

        let file_name = request.file_name();
        let part = Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str(content_type_for(&file_name))?;
        let mut form = Form::new().part("resume", part);
        if mode.accepts_job_description() {
            form = form.text("job_description", request.job_description.trim().to_string());
        }

        let resp = self.client.post(&url).multipart(form).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        let data: Value = serde_json::from_slice(&body)?;

        let message = application_error(&data);
        if !status.is_success() || message.is_some() {
            warn!("Analysis rejected (HTTP {}): {:?}", status.as_u16(), message);
            return Err(ClientError::Application {
                status: status.as_u16(),
                message,
            });
        }

        debug!("Analysis succeeded ({} bytes)", body.len());
        Ok(data)
    }

    /// Ask the backend to rewrite one sentence. The body is read as JSON
    /// whatever the status; the caller decides from `improved`.
    #[instrument(skip(self, sentence))]
    pub async fn improve_sentence(
        &self,
        sentence: &str,
    ) -> Result<ImproveSentenceResponse, ClientError> {
        let url = format!("{}/improve_sentence", self.base_url);
        let req = ImproveSentenceRequest {
            sentence: sentence.to_string(),
        };
        let resp = self.client.post(&url).json(&req).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        let result: ImproveSentenceResponse = serde_json::from_slice(&body)?;
        debug!("Sentence rewrite answered with HTTP {}", status.as_u16());
        Ok(result)
    }

    /// Render a cached ATS report into a document and return its bytes.
    #[instrument(skip(self, report))]
    pub async fn download_report(&self, report: &Value) -> Result<Vec<u8>, ClientError> {
        let url = format!("{}/download_report", self.base_url);
        let resp = self.client.post(&url).json(report).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Application {
                status: status.as_u16(),
                message: None,
            });
        }
        let bytes = resp.bytes().await?;
        debug!("Downloaded report ({} bytes)", bytes.len());
        Ok(bytes.to_vec())
    }

    /// End the server-side session.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ClientError> {
        let url = format!("{}/logout", self.base_url);
        let resp = self.client.post(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Application {
                status: status.as_u16(),
                message: None,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(base_url: &str) -> ServerConfig {
        ServerConfig {
            base_url: base_url.to_string(),
            timeout_seconds: None,
            session_cookie: Some("session=abc123".to_string()),
        }
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let client = SmartAtsClient::new(&server("http://localhost:5000/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.login_url(), "http://localhost:5000/login");
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = SmartAtsClient::new(&server("not a url")).err().unwrap();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }
}
