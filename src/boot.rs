use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use chrono::Datelike;

use crate::client::{HealthReport, HealthService};
use crate::error::ClientError;
use crate::format::PLACEHOLDER;
use crate::inference::labels::LabelRegistry;
use crate::inference::model::Zone;

/// Current calendar year for the footer.
pub fn copyright_year() -> i32 {
    chrono::Local::now().year()
}

/// Overwrite label sets from a health report and build the status line.
pub fn apply_health(report: &HealthReport, registry: &mut LabelRegistry) -> String {
    for zone in Zone::ALL {
        let labels = report
            .zone(zone)
            .and_then(|z| z.labels.clone())
            .unwrap_or_default();
        let count = labels.len();
        if registry.replace(zone, labels) {
            log::info!("{zone}: using {count} server-provided labels");
        }
    }

    let model = |zone: Zone| {
        report
            .zone(zone)
            .and_then(|z| z.model.as_deref())
            .filter(|m| !m.is_empty())
            .unwrap_or(PLACEHOLDER)
            .to_string()
    };
    format!("brain={}, lung={}", model(Zone::Brain), model(Zone::Lung))
}

// ---------------------------------------------------------------------------
// BootSequence – one background health fetch at startup
// ---------------------------------------------------------------------------

/// Fetches `/health` once without blocking the UI.
#[derive(Debug, Default)]
pub struct BootSequence {
    pending: Option<Receiver<Result<HealthReport, ClientError>>>,
}

impl BootSequence {
    /// Start the fetch on a worker thread.
    pub fn start(service: Arc<dyn HealthService>) -> Self {
        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name("health".to_string())
            .spawn(move || {
                let _ = tx.send(service.health());
            });

        match spawned {
            Ok(_) => Self { pending: Some(rx) },
            Err(e) => {
                log::debug!("health check not started: {e}");
                Self { pending: None }
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Apply the report once it arrives. Failures are swallowed.
    ///
    /// Returns the status line on success.
    pub fn poll(&mut self, registry: &mut LabelRegistry) -> Option<String> {
        let rx = self.pending.as_ref()?;
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                return None;
            }
        };
        self.pending = None;

        match result {
            Ok(report) => Some(apply_health(&report, registry)),
            Err(e) => {
                log::debug!("health check failed, keeping built-in labels: {e}");
                None
            }
        }
    }
}
