mod client;
mod poller;
mod types;

pub use client::AnalysisClient;
pub use poller::{PollCancellation, StatusPoller, POLL_INTERVAL};
pub use types::{
    JobEvent, StatusResponse, UploadError, UploadOutcome, UploadResponse, ANALYSIS_FAILED,
    SERVER_UNREACHABLE,
};
