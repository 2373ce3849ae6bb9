use serde::Deserialize;
use thiserror::Error;

/// Shown when the server rejects an upload without saying why.
pub const ANALYSIS_FAILED: &str = "Analysis failed. Please try again.";

/// Shown when the request itself never completed.
pub const SERVER_UNREACHABLE: &str = "Could not reach the analysis server. Please try again.";

/// Body of `POST /uploadfile/`. The server answers with one of three
/// shapes (completed, accepted, rejected); every field is optional so a
/// partial or unexpected body still deserializes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadResponse {
    pub redirect: Option<String>,
    pub message: Option<String>,
    pub filename: Option<String>,
    pub error: Option<String>,
    pub detail: Option<String>,
}

impl UploadResponse {
    /// Most specific failure text the server offered: `error`, then
    /// `detail`, then a fixed fallback.
    pub fn failure_message(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.detail.clone())
            .unwrap_or_else(|| ANALYSIS_FAILED.to_string())
    }
}

/// Body of `GET /check_status`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusResponse {
    pub status: Option<String>,
}

impl StatusResponse {
    pub fn is_complete(&self) -> bool {
        self.status.as_deref() == Some("complete")
    }
}

/// How a successful upload resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The server analyzed synchronously and told us where to go.
    Completed { redirect: String, message: String },
    /// The job was accepted; completion must be polled for.
    Accepted { filename: String },
}

/// Progress reports from the worker thread back to the UI.
#[derive(Debug, Clone)]
pub enum JobEvent {
    Finished { redirect: String, message: String },
    Accepted { filename: String },
    AnalysisComplete { filename: String },
    Failed { message: String },
}

#[derive(Debug, Error)]
pub enum UploadError {
    /// The API answered and reported a failure.
    #[error("{0}")]
    Rejected(String),
    /// The request could not be sent or received.
    #[error("failed to reach the analysis server")]
    Transport(#[from] reqwest::Error),
    #[error("failed to read {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl UploadError {
    /// Text for the error dialog. Transport details are logged, not
    /// surfaced.
    pub fn user_message(&self) -> String {
        match self {
            UploadError::Rejected(message) => message.clone(),
            UploadError::Transport(_) => SERVER_UNREACHABLE.to_string(),
            UploadError::File { .. } => self.to_string(),
        }
    }
}
