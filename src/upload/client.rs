use crate::upload::types::{StatusResponse, UploadError, UploadOutcome, UploadResponse};
use reqwest::multipart;
use std::path::Path;
use tracing::debug;

/// HTTP client for the analysis backend. Cheap to clone; the inner
/// reqwest client shares its connection pool.
#[derive(Clone)]
pub struct AnalysisClient {
    base_url: String,
    http: reqwest::Client,
}

impl AnalysisClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the selected file as multipart field `file` and classify the
    /// server's answer.
    pub async fn submit_file(&self, path: &Path) -> Result<UploadOutcome, UploadError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "recording".to_string());

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| UploadError::File {
                path: path.display().to_string(),
                source,
            })?;

        let part = multipart::Part::bytes(bytes).file_name(file_name.clone());
        let form = multipart::Form::new().part("file", part);

        let url = format!("{}/uploadfile/", self.base_url);
        debug!(url = %url, file = %file_name, "submitting upload");

        let response = self.http.post(&url).multipart(form).send().await?;
        let status = response.status();

        // Failure bodies are JSON too; tolerate any shape.
        let body: UploadResponse = response.json().await.unwrap_or_default();

        if !status.is_success() {
            return Err(UploadError::Rejected(body.failure_message()));
        }

        if let Some(redirect) = body.redirect {
            let message = body
                .message
                .unwrap_or_else(|| "Upload successful".to_string());
            return Ok(UploadOutcome::Completed { redirect, message });
        }

        if let Some(filename) = body.filename {
            return Ok(UploadOutcome::Accepted { filename });
        }

        // 2xx with neither a redirect nor a filename to poll.
        Err(UploadError::Rejected(body.failure_message()))
    }

    /// One status probe for an accepted job; true once the analysis is
    /// finished.
    pub async fn check_status(&self, filename: &str) -> Result<bool, UploadError> {
        let url = format!("{}/check_status", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("filename", filename)])
            .send()
            .await?
            .error_for_status()?;
        let body: StatusResponse = response.json().await?;
        Ok(body.is_complete())
    }

    /// Result page for a polled job; same view the server redirects
    /// synchronous jobs to.
    pub fn result_url(&self, filename: &str) -> String {
        format!("{}/result.html?filename={}", self.base_url, filename)
    }

    /// Server redirects are root-relative; the browser needs them
    /// absolute.
    pub fn absolute_url(&self, target: &str) -> String {
        if target.starts_with("http://") || target.starts_with("https://") {
            target.to_string()
        } else {
            format!("{}/{}", self.base_url, target.trim_start_matches('/'))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let client = AnalysisClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn result_url_carries_the_filename() {
        let client = AnalysisClient::new("http://localhost:8000");
        assert_eq!(
            client.result_url("abc.wav"),
            "http://localhost:8000/result.html?filename=abc.wav"
        );
    }

    #[test]
    fn relative_redirects_are_joined_onto_the_base() {
        let client = AnalysisClient::new("http://localhost:8000");
        assert_eq!(
            client.absolute_url("/result.html?filename=abc.wav"),
            "http://localhost:8000/result.html?filename=abc.wav"
        );
        assert_eq!(
            client.absolute_url("https://other.example/done"),
            "https://other.example/done"
        );
    }
}
