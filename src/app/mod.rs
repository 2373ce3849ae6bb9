mod state;
mod ui;

use crate::upload::{
    AnalysisClient, JobEvent, PollCancellation, StatusPoller, UploadError, UploadOutcome,
};
use eframe::{egui, App};
pub use state::{Dialog, JobPhase, JobState};
use std::path::PathBuf;
use std::sync::mpsc as std_mpsc;
use std::time::Duration;
use tracing::{error, info, warn};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";
pub const NO_FILE_WARNING: &str = "Please select an audio file first";

type BrowserOpener = Box<dyn Fn(&str) -> std::io::Result<()> + Send>;

/// The upload controller: owns the one job a window can hold and drives
/// it from submission to a result page in the browser.
pub struct PitchUploader {
    pub(crate) server_url: String,
    pub(crate) state: JobState,
    /// Where the job last navigated to, dev-tools style.
    pub(crate) last_navigation: Option<String>,
    opener: BrowserOpener,
}

impl Default for PitchUploader {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            state: JobState::default(),
            last_navigation: None,
            opener: Box::new(|url| open::that(url)),
        }
    }
}

impl PitchUploader {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        info!("initializing pitch analyzer uploader");
        Self::default()
    }

    pub fn select_file(&mut self, path: PathBuf) {
        self.state.selected_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        info!(file = %path.display(), size = self.state.selected_size, "file selected");
        self.state.selected_file = Some(path);
    }

    /// Kick off one upload. With no file selected, or a job already in
    /// flight, no network request is made.
    pub fn submit(&mut self) {
        if self.state.is_busy() {
            return;
        }
        let Some(path) = self.state.selected_file.clone() else {
            self.state.dialog = Some(Dialog::Warning {
                text: NO_FILE_WARNING.to_string(),
            });
            return;
        };

        info!(file = %path.display(), server = %self.server_url, "starting upload");
        self.state.phase = JobPhase::Uploading;
        self.state.dialog = None;

        let client = AnalysisClient::new(&self.server_url);
        let (sender, receiver) = std_mpsc::channel();
        self.state.event_receiver = Some(receiver);

        let cancellation = PollCancellation::default();
        self.state.poll_cancellation = Some(cancellation.clone());

        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async move {
                match client.submit_file(&path).await {
                    Ok(UploadOutcome::Completed { redirect, message }) => {
                        let _ = sender.send(JobEvent::Finished { redirect, message });
                    }
                    Ok(UploadOutcome::Accepted { filename }) => {
                        let _ = sender.send(JobEvent::Accepted {
                            filename: filename.clone(),
                        });
                        let poller = StatusPoller::new(client, filename.clone())
                            .with_cancellation(cancellation);
                        if poller.poll_until_complete().await {
                            let _ = sender.send(JobEvent::AnalysisComplete { filename });
                        }
                    }
                    Err(e) => {
                        if let UploadError::Transport(source) = &e {
                            error!(error = %source, "upload request failed");
                        }
                        let _ = sender.send(JobEvent::Failed {
                            message: e.user_message(),
                        });
                    }
                }
            });
        });
    }

    /// Drain worker events into UI state.
    pub fn pump_events(&mut self, ctx: &egui::Context) {
        let mut events = Vec::new();
        if let Some(receiver) = &self.state.event_receiver {
            while let Ok(event) = receiver.try_recv() {
                events.push(event);
            }
        }

        for event in events {
            match event {
                JobEvent::Finished { redirect, message } => {
                    // navigation waits for the dialog to be dismissed
                    self.state.dialog = Some(Dialog::Success { message, redirect });
                    self.state.event_receiver = None;
                    self.state.poll_cancellation = None;
                }
                JobEvent::Accepted { filename } => {
                    self.state.phase = JobPhase::Processing { filename };
                }
                JobEvent::AnalysisComplete { filename } => {
                    let url = AnalysisClient::new(&self.server_url).result_url(&filename);
                    self.state.event_receiver = None;
                    self.state.poll_cancellation = None;
                    self.navigate(&url);
                    self.state.phase = JobPhase::Complete { result_url: url };
                }
                JobEvent::Failed { message } => {
                    self.state.dialog = Some(Dialog::Error {
                        text: message.clone(),
                    });
                    self.state.phase = JobPhase::Failed { message };
                    self.state.event_receiver = None;
                    self.state.poll_cancellation = None;
                }
            }
        }

        if self.state.is_busy() {
            // worker events arrive without user input; keep repainting
            ctx.request_repaint_after(Duration::from_millis(200));
        }
    }

    /// Close the current dialog. Dismissing the success dialog is what
    /// triggers navigation, never the response itself.
    pub fn dismiss_dialog(&mut self) {
        match self.state.dialog.take() {
            Some(Dialog::Success { redirect, .. }) => {
                let url = AnalysisClient::new(&self.server_url).absolute_url(&redirect);
                self.navigate(&url);
                self.state.phase = JobPhase::Complete { result_url: url };
            }
            Some(Dialog::Warning { .. }) | Some(Dialog::Error { .. }) | None => {}
        }
    }

    pub fn reset(&mut self) {
        info!("resetting form");
        self.state.clear();
    }

    /// Desktop rendition of `window.location = url`: everything that
    /// leaves the window goes through here.
    pub(crate) fn navigate(&mut self, url: &str) {
        info!(url = %url, "opening result in browser");
        self.last_navigation = Some(url.to_string());
        if let Err(e) = (self.opener)(url) {
            warn!(error = %e, url = %url, "failed to open browser");
        }
    }
}

impl App for PitchUploader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.pump_events(ctx);
        self.render(ctx);
    }
}

impl Drop for PitchUploader {
    fn drop(&mut self) {
        if let Some(cancellation) = &self.state.poll_cancellation {
            cancellation.cancel();
        }
    }
}
