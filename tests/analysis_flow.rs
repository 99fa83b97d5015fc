//! End-to-end analysis flow: trigger → worker → poll → rendered result.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use serde_json::{Value as JsonValue, json};

use scan_assist::analysis::{ANALYZE_LABEL, BUSY_LABEL, ZoneAnalysis};
use scan_assist::client::{HealthReport, HealthService, PredictionService, ZoneHealth};
use scan_assist::dropzone::{Dropzone, NO_FILE_MESSAGE, SelectedFile, UNTARGETED_DROP_MESSAGE};
use scan_assist::error::ClientError;
use scan_assist::inference::labels::LabelRegistry;
use scan_assist::inference::model::Zone;
use scan_assist::state::AppState;
use scan_assist::view::ResultView;

/// Answers every prediction with a fixed outcome and counts calls.
struct Canned {
    outcome: fn() -> Result<JsonValue, ClientError>,
    calls: AtomicUsize,
    last_name: Mutex<Option<String>>,
}

impl Canned {
    fn new(outcome: fn() -> Result<JsonValue, ClientError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_name: Mutex::new(None),
        })
    }
}

impl PredictionService for Canned {
    fn predict(&self, _zone: Zone, file: &SelectedFile) -> Result<JsonValue, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_name.lock().unwrap() = Some(file.name.clone());
        (self.outcome)()
    }
}

/// Blocks each prediction until the test releases it.
struct Gated {
    release: Mutex<mpsc::Receiver<()>>,
    calls: AtomicUsize,
}

impl PredictionService for Gated {
    fn predict(&self, _zone: Zone, _file: &SelectedFile) -> Result<JsonValue, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.release.lock().unwrap().recv().ok();
        Ok(json!({"top": "Normal", "conf": 0.91}))
    }
}

struct NoHealth;

impl HealthService for NoHealth {
    fn health(&self) -> Result<HealthReport, ClientError> {
        Err(ClientError::Network("connection refused".into()))
    }
}

struct ServerLabels;

impl HealthService for ServerLabels {
    fn health(&self) -> Result<HealthReport, ClientError> {
        Ok(HealthReport {
            brain: Some(ZoneHealth {
                model: Some("best_xception.keras".into()),
                labels: Some(vec!["Glioma Tumor".into(), "No Tumor".into()]),
            }),
            ..Default::default()
        })
    }
}

fn selected(zone: Zone, name: &str) -> Dropzone {
    let mut dz = Dropzone::new(zone);
    dz.select(Some(SelectedFile::from_bytes(name, vec![0u8; 16])));
    dz
}

/// Poll until the analysis settles, failing after a few seconds.
fn settle(analysis: &mut ZoneAnalysis, registry: &LabelRegistry) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while analysis.is_busy() {
        assert!(Instant::now() < deadline, "analysis did not finish");
        analysis.poll(registry, Instant::now());
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn brain_top_idx_renders_glioma_with_education() {
    let service = Canned::new(|| Ok(json!({"top_idx": 0})));
    let registry = LabelRegistry::default();
    let mut dz = selected(Zone::Brain, "mri.png");
    let mut analysis = ZoneAnalysis::new(Zone::Brain);

    analysis.trigger(&mut dz, service.clone()).unwrap();
    assert!(analysis.is_busy());
    assert_eq!(analysis.button_label(), BUSY_LABEL);
    assert_eq!(analysis.result(), &ResultView::Running);

    settle(&mut analysis, &registry);

    let ResultView::Prediction(view) = analysis.result() else {
        panic!("expected a prediction, got {:?}", analysis.result());
    };
    assert_eq!(view.label, "glioma");
    assert_eq!(view.confidence, "—");
    assert!(view.what.starts_with("Gliomas are brain tumors"));
    assert_eq!(analysis.button_label(), ANALYZE_LABEL);
    assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    assert_eq!(service.last_name.lock().unwrap().as_deref(), Some("mri.png"));
}

#[test]
fn http_500_renders_error_and_reenables_trigger() {
    let service = Canned::new(|| Err(ClientError::Http(500)));
    let registry = LabelRegistry::default();
    let mut dz = selected(Zone::Lung, "xray.jpg");
    let mut analysis = ZoneAnalysis::new(Zone::Lung);

    analysis.trigger(&mut dz, service).unwrap();
    settle(&mut analysis, &registry);

    match analysis.result() {
        ResultView::Error(msg) => assert!(msg.contains("500"), "{msg}"),
        other => panic!("expected error, got {other:?}"),
    }
    assert!(!analysis.is_busy());
    assert_eq!(analysis.button_label(), ANALYZE_LABEL);
    assert_eq!(analysis.progress(), 1.0);
}

#[test]
fn trigger_is_ignored_while_request_outstanding() {
    let (release, gate) = mpsc::channel();
    let service = Arc::new(Gated {
        release: Mutex::new(gate),
        calls: AtomicUsize::new(0),
    });
    let registry = LabelRegistry::default();
    let mut dz = selected(Zone::Lung, "xray.png");
    let mut analysis = ZoneAnalysis::new(Zone::Lung);

    analysis.trigger(&mut dz, service.clone()).unwrap();
    analysis.trigger(&mut dz, service.clone()).unwrap();
    assert!(analysis.is_busy());

    release.send(()).unwrap();
    settle(&mut analysis, &registry);

    assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    let ResultView::Prediction(view) = analysis.result() else {
        panic!("expected a prediction");
    };
    assert_eq!(view.verdict(), "Prediction: Normal (91.0%)");
}

#[test]
fn zones_run_independently() {
    let service = Canned::new(|| Ok(json!({"probs": {"Normal": 0.9, "Tuberculosis": 0.1}})));
    let registry = LabelRegistry::default();
    let mut brain_dz = Dropzone::new(Zone::Brain);
    let mut lung_dz = selected(Zone::Lung, "xray.png");
    let mut brain = ZoneAnalysis::new(Zone::Brain);
    let mut lung = ZoneAnalysis::new(Zone::Lung);

    assert!(brain.trigger(&mut brain_dz, service.clone()).is_err());
    lung.trigger(&mut lung_dz, service).unwrap();
    settle(&mut lung, &registry);

    assert_eq!(brain.result(), &ResultView::Empty);
    assert_eq!(brain_dz.info(), "Please choose an image first.");
    let ResultView::Prediction(view) = lung.result() else {
        panic!("expected a prediction");
    };
    assert_eq!(view.label, "Normal");
    assert_eq!(view.confidence, "90.0%");
}

#[test]
fn app_state_uses_server_labels_after_boot() {
    let service = Canned::new(|| Ok(json!({"top_idx": 1})));
    let mut state = AppState::new(service, Arc::new(ServerLabels));

    let deadline = Instant::now() + Duration::from_secs(5);
    while state.status_message.is_none() {
        assert!(Instant::now() < deadline, "boot did not finish");
        state.poll(Instant::now());
        thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(state.status_message.as_deref(), Some("brain=best_xception.keras, lung=—"));

    state
        .panel_mut(Zone::Brain)
        .unwrap()
        .dropzone
        .select(Some(SelectedFile::from_bytes("mri.png", vec![1u8; 4])));
    state.analyze(Zone::Brain);

    let deadline = Instant::now() + Duration::from_secs(5);
    while state.panel(Zone::Brain).unwrap().analysis.is_busy() {
        assert!(Instant::now() < deadline, "analysis did not finish");
        state.poll(Instant::now());
        thread::sleep(Duration::from_millis(5));
    }

    let prediction = state
        .panel(Zone::Brain)
        .unwrap()
        .analysis
        .last_prediction()
        .cloned()
        .unwrap();
    assert_eq!(prediction.label.as_deref(), Some("No Tumor"));
    assert_eq!(prediction.edu_key.as_deref(), Some("no_tumor"));
}

#[test]
fn failed_boot_keeps_defaults_and_still_wires_zones() {
    let service = Canned::new(|| Ok(json!({})));
    let mut state = AppState::new(service, Arc::new(NoHealth));

    let deadline = Instant::now() + Duration::from_secs(5);
    while state.needs_tick() {
        assert!(Instant::now() < deadline, "boot did not finish");
        state.poll(Instant::now());
        thread::sleep(Duration::from_millis(5));
    }

    assert!(state.status_message.is_none());
    assert_eq!(state.registry, LabelRegistry::default());
    assert_eq!(state.panels.len(), 2);
}

#[test]
fn drop_without_target_zone_tells_every_zone() {
    let service = Canned::new(|| Ok(json!({})));
    let mut state = AppState::new(service, Arc::new(NoHealth));

    state.drop_file(None, Some(Ok(SelectedFile::from_bytes("scan.png", vec![1u8; 8]))));
    for panel in &state.panels {
        assert!(panel.dropzone.file().is_none());
        assert_eq!(panel.dropzone.info(), UNTARGETED_DROP_MESSAGE);
    }

    state.drop_file(
        Some(Zone::Lung),
        Some(Ok(SelectedFile::from_bytes("xray.png", vec![1u8; 8]))),
    );
    let lung = state.panel(Zone::Lung).unwrap();
    assert_eq!(lung.dropzone.file().map(|f| f.name.as_str()), Some("xray.png"));
    assert!(state.panel(Zone::Brain).unwrap().dropzone.file().is_none());
}

#[test]
fn empty_drop_without_target_changes_nothing() {
    let service = Canned::new(|| Ok(json!({})));
    let mut state = AppState::new(service, Arc::new(NoHealth));

    state.drop_file(None, None);
    for panel in &state.panels {
        assert_eq!(panel.dropzone.info(), NO_FILE_MESSAGE);
    }
}
