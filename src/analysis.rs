use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use serde_json::Value as JsonValue;

use crate::client::PredictionService;
use crate::dropzone::Dropzone;
use crate::error::{AnalysisError, ClientError};
use crate::inference::labels::LabelRegistry;
use crate::inference::model::{Prediction, Zone};
use crate::inference::normalize::normalize_response;
use crate::view::{PredictionView, ResultView};

pub const ANALYZE_LABEL: &str = "Analyze";
pub const BUSY_LABEL: &str = "Analyzing…";
pub const PROGRESS_SUBMITTED: f32 = 0.2;
pub const PROGRESS_RESET_DELAY: Duration = Duration::from_millis(500);

/// Result of one upload, as delivered by the worker thread.
pub type Outcome = Result<JsonValue, ClientError>;

// ---------------------------------------------------------------------------
// ZoneAnalysis – request/response cycle for one zone
// ---------------------------------------------------------------------------

/// Per-zone analysis state: trigger control, progress bar and result area.
///
/// Idle → Submitting (busy) → Rendering → Idle. While busy the trigger is
/// disabled and further activations are ignored.
#[derive(Debug)]
pub struct ZoneAnalysis {
    pub zone: Zone,
    button_label: String,
    idle_label: String,
    busy: bool,
    progress: f32,
    progress_reset_at: Option<Instant>,
    result: ResultView,
    last_prediction: Option<Prediction>,
    pending: Option<Receiver<Outcome>>,
}

impl ZoneAnalysis {
    pub fn new(zone: Zone) -> Self {
        Self {
            zone,
            button_label: ANALYZE_LABEL.to_string(),
            idle_label: ANALYZE_LABEL.to_string(),
            busy: false,
            progress: 0.0,
            progress_reset_at: None,
            result: ResultView::Empty,
            last_prediction: None,
            pending: None,
        }
    }

    pub fn button_label(&self) -> &str {
        &self.button_label
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn result(&self) -> &ResultView {
        &self.result
    }

    pub fn last_prediction(&self) -> Option<&Prediction> {
        self.last_prediction.as_ref()
    }

    /// Whether the UI must keep ticking (request in flight or bar to reset).
    pub fn needs_tick(&self) -> bool {
        self.pending.is_some() || self.progress_reset_at.is_some()
    }

    /// Validate the selection and start one upload on a worker thread.
    ///
    /// With no file selected the dropzone shows a prompt and nothing else
    /// changes.
    pub fn trigger(
        &mut self,
        dropzone: &mut Dropzone,
        service: Arc<dyn PredictionService>,
    ) -> Result<(), AnalysisError> {
        if self.busy {
            log::debug!("{}: analysis already running, ignoring trigger", self.zone);
            return Ok(());
        }

        let Some(file) = dropzone.file().cloned() else {
            let err = AnalysisError::NoFileSelected;
            dropzone.prompt(&err.to_string());
            return Err(err);
        };

        self.begin();
        log::info!("{}: uploading {} ({} bytes)", self.zone, file.name, file.size);

        let (tx, rx) = mpsc::channel();
        let zone = self.zone;
        let spawned = thread::Builder::new()
            .name(format!("predict-{zone}"))
            .spawn(move || {
                let outcome = service.predict(zone, &file);
                // The receiver is gone only if the app shut down.
                let _ = tx.send(outcome);
            });

        match spawned {
            Ok(_) => self.pending = Some(rx),
            Err(e) => {
                let err = ClientError::Io(e);
                log::error!("{}: could not start request: {err}", self.zone);
                self.result = ResultView::error(&err);
                self.finish(Instant::now());
            }
        }
        Ok(())
    }

    /// Enter the submitting state.
    pub fn begin(&mut self) {
        self.busy = true;
        self.button_label = BUSY_LABEL.to_string();
        self.progress = PROGRESS_SUBMITTED;
        self.progress_reset_at = None;
        self.result = ResultView::Running;
    }

    /// Collect a finished upload and apply any due progress reset.
    ///
    /// Returns whether anything visible changed.
    pub fn poll(&mut self, registry: &LabelRegistry, now: Instant) -> bool {
        let mut changed = false;

        if let Some(rx) = &self.pending {
            let outcome = match rx.try_recv() {
                Ok(outcome) => Some(outcome),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => Some(Err(ClientError::Network(
                    "request worker stopped unexpectedly".to_string(),
                ))),
            };
            if let Some(outcome) = outcome {
                self.pending = None;
                self.complete(outcome, registry, now);
                changed = true;
            }
        }

        if self.progress_reset_at.is_some_and(|at| now >= at) {
            self.progress = 0.0;
            self.progress_reset_at = None;
            changed = true;
        }

        changed
    }

    /// Render an outcome, then restore the trigger and finish the bar.
    pub fn complete(&mut self, outcome: Outcome, registry: &LabelRegistry, now: Instant) {
        match outcome {
            Ok(payload) => {
                let prediction = normalize_response(registry, self.zone, &payload);
                log::info!(
                    "{}: prediction {:?} (confidence {:?})",
                    self.zone,
                    prediction.label,
                    prediction.confidence
                );
                self.result = ResultView::Prediction(PredictionView::build(self.zone, &prediction));
                self.last_prediction = Some(prediction);
            }
            Err(e) => {
                log::error!("{}: analysis failed: {e}", self.zone);
                self.result = ResultView::error(&e);
            }
        }

        self.finish(now);
    }

    /// Fill the bar, schedule its reset, and re-enable the trigger.
    fn finish(&mut self, now: Instant) {
        self.progress = 1.0;
        self.progress_reset_at = Some(now + PROGRESS_RESET_DELAY);
        self.busy = false;
        self.button_label = self.idle_label.clone();
    }
}
