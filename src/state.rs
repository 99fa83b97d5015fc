use std::sync::Arc;
use std::time::Instant;

use crate::analysis::ZoneAnalysis;
use crate::boot::{BootSequence, copyright_year};
use crate::client::{HealthService, PredictionService};
use crate::dropzone::{Dropzone, SelectedFile, UNTARGETED_DROP_MESSAGE};
use crate::inference::labels::LabelRegistry;
use crate::inference::model::Zone;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Upload widget plus analysis state for one zone.
#[derive(Debug)]
pub struct ZonePanel {
    pub dropzone: Dropzone,
    pub analysis: ZoneAnalysis,
}

impl ZonePanel {
    pub fn new(zone: Zone) -> Self {
        Self {
            dropzone: Dropzone::new(zone),
            analysis: ZoneAnalysis::new(zone),
        }
    }

    pub fn zone(&self) -> Zone {
        self.dropzone.zone
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Class labels per zone; updated at most once by the boot sequence.
    pub registry: LabelRegistry,

    /// One panel per zone, in `Zone::ALL` order.
    pub panels: Vec<ZonePanel>,

    /// Model status line reported by the server (None until known).
    pub status_message: Option<String>,

    /// Year shown in the footer.
    pub year: i32,

    boot: BootSequence,
    predictor: Arc<dyn PredictionService>,
}

impl AppState {
    /// Kick off the health fetch and wire every zone panel.
    pub fn new(predictor: Arc<dyn PredictionService>, health: Arc<dyn HealthService>) -> Self {
        Self {
            registry: LabelRegistry::default(),
            panels: Zone::ALL.iter().map(|&z| ZonePanel::new(z)).collect(),
            status_message: None,
            year: copyright_year(),
            boot: BootSequence::start(health),
            predictor,
        }
    }

    pub fn panel(&self, zone: Zone) -> Option<&ZonePanel> {
        self.panels.iter().find(|p| p.zone() == zone)
    }

    pub fn panel_mut(&mut self, zone: Zone) -> Option<&mut ZonePanel> {
        self.panels.iter_mut().find(|p| p.zone() == zone)
    }

    /// Run the analysis for a zone (the analyze button's click handler).
    pub fn analyze(&mut self, zone: Zone) {
        let predictor = Arc::clone(&self.predictor);
        if let Some(panel) = self.panel_mut(zone) {
            if let Err(e) = panel.analysis.trigger(&mut panel.dropzone, predictor) {
                log::debug!("{zone}: analysis not started: {e}");
            }
        }
    }

    /// Hand the first dropped file to the zone it landed on. Without a
    /// target zone the file is not taken and every zone says where to drop.
    pub fn drop_file(&mut self, target: Option<Zone>, first: Option<anyhow::Result<SelectedFile>>) {
        match target {
            Some(zone) => {
                if let Some(panel) = self.panel_mut(zone) {
                    panel.dropzone.drop_file(first);
                }
            }
            None if first.is_some() => {
                log::debug!("file dropped outside any zone");
                for panel in &mut self.panels {
                    panel.dropzone.drag_leave();
                    panel.dropzone.prompt(UNTARGETED_DROP_MESSAGE);
                }
            }
            None => {}
        }
    }

    /// Advance background work. Returns whether anything visible changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if let Some(status) = self.boot.poll(&mut self.registry) {
            self.status_message = Some(status);
            changed = true;
        }
        for panel in &mut self.panels {
            changed |= panel.analysis.poll(&self.registry, now);
        }
        changed
    }

    /// Whether the UI must keep repainting to observe background work.
    pub fn needs_tick(&self) -> bool {
        self.boot.is_pending() || self.panels.iter().any(|p| p.analysis.needs_tick())
    }
}
