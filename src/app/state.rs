use crate::upload::{JobEvent, PollCancellation};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

/// Lifecycle of the single job a window holds. `Complete` and `Failed`
/// are terminal; only a reset returns the form to `Idle`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum JobPhase {
    #[default]
    Idle,
    Uploading,
    Processing {
        filename: String,
    },
    Complete {
        result_url: String,
    },
    Failed {
        message: String,
    },
}

/// Modal feedback, one at a time. While a dialog is up the rest of the
/// window is disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Warning { text: String },
    Success { message: String, redirect: String },
    Error { text: String },
}

#[derive(Default)]
pub struct JobState {
    pub phase: JobPhase,
    pub dialog: Option<Dialog>,
    pub selected_file: Option<PathBuf>,
    pub selected_size: u64,
    pub event_receiver: Option<Receiver<JobEvent>>,
    pub poll_cancellation: Option<PollCancellation>,
}

impl JobState {
    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            JobPhase::Uploading | JobPhase::Processing { .. }
        )
    }

    /// Back to a blank form. Any live poll loop is torn down first.
    pub fn clear(&mut self) {
        if let Some(cancellation) = &self.poll_cancellation {
            cancellation.cancel();
        }
        *self = JobState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uploading_and_processing_count_as_busy() {
        let mut state = JobState::default();
        assert!(!state.is_busy());

        state.phase = JobPhase::Uploading;
        assert!(state.is_busy());

        state.phase = JobPhase::Processing {
            filename: "abc.wav".to_string(),
        };
        assert!(state.is_busy());

        state.phase = JobPhase::Failed {
            message: "bad format".to_string(),
        };
        assert!(!state.is_busy());
    }

    #[test]
    fn clear_cancels_a_live_poll() {
        let mut state = JobState::default();
        let cancellation = PollCancellation::default();
        state.poll_cancellation = Some(cancellation.clone());
        state.phase = JobPhase::Processing {
            filename: "abc.wav".to_string(),
        };

        state.clear();

        assert!(cancellation.is_cancelled());
        assert_eq!(state.phase, JobPhase::Idle);
        assert!(state.poll_cancellation.is_none());
    }
}
