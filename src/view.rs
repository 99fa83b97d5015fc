use crate::format::{PLACEHOLDER, format_confidence};
use crate::inference::education::{self, DISCLAIMER, FALLBACK_NEXT, FALLBACK_WHAT, FALLBACK_WHY};
use crate::inference::model::{Prediction, Tag, Zone};

// ---------------------------------------------------------------------------
// Result area contents, independent of rendering
// ---------------------------------------------------------------------------

pub const RUNNING_MESSAGE: &str = "Running inference…";

/// What the result area of a zone shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultView {
    #[default]
    Empty,
    Running,
    Prediction(PredictionView),
    Error(String),
}

impl ResultView {
    /// Inline error text for a failed analysis.
    pub fn error(description: impl std::fmt::Display) -> Self {
        ResultView::Error(format!("Error: {description}"))
    }
}

/// Fully formatted prediction panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionView {
    pub label: String,
    pub confidence: String,
    pub tags: &'static [Tag],
    pub heading: String,
    pub what: &'static str,
    pub why: &'static str,
    pub next: &'static str,
    pub disclaimer: &'static str,
    /// Whether the education lines came from the table or are fallbacks.
    pub has_education: bool,
}

impl PredictionView {
    pub fn build(zone: Zone, prediction: &Prediction) -> Self {
        let label = prediction
            .label
            .clone()
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        let entry = prediction
            .edu_key
            .as_deref()
            .and_then(|key| education::lookup(zone, key));

        Self {
            heading: format!("{label}: what to know"),
            confidence: format_confidence(prediction.confidence),
            tags: zone.tags(),
            what: entry.map_or(FALLBACK_WHAT, |e| e.what),
            why: entry.map_or(FALLBACK_WHY, |e| e.why),
            next: entry.map_or(FALLBACK_NEXT, |e| e.next),
            disclaimer: DISCLAIMER,
            has_education: entry.is_some(),
            label,
        }
    }

    /// One-line verdict, e.g. `Prediction: glioma (87.3%)`.
    pub fn verdict(&self) -> String {
        format!("Prediction: {} ({})", self.label, self.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_panel_with_education() {
        let p = Prediction {
            label: Some("glioma".into()),
            edu_key: Some("glioma".into()),
            confidence: Some(0.873),
        };
        let view = PredictionView::build(Zone::Brain, &p);
        assert_eq!(view.verdict(), "Prediction: glioma (87.3%)");
        assert_eq!(view.heading, "glioma: what to know");
        assert!(view.what.starts_with("Gliomas are brain tumors"));
        assert_eq!(view.tags[0].text, "MRI");
        assert!(view.has_education);
    }

    #[test]
    fn empty_prediction_uses_placeholders_and_fallbacks() {
        let view = PredictionView::build(Zone::Lung, &Prediction::default());
        assert_eq!(view.label, "—");
        assert_eq!(view.confidence, "—");
        assert_eq!(view.what, "Information not available.");
        assert_eq!(view.why, "—");
        assert_eq!(view.next, "Consult a clinician.");
        assert_eq!(view.tags[0].text, "Chest X-ray");
        assert!(!view.has_education);
    }

    #[test]
    fn unmapped_key_degrades_to_fallback_text() {
        let p = Prediction {
            label: Some("unknown finding".into()),
            edu_key: Some("unknown finding".into()),
            confidence: None,
        };
        let view = PredictionView::build(Zone::Brain, &p);
        assert_eq!(view.label, "unknown finding");
        assert_eq!(view.what, FALLBACK_WHAT);
    }

    #[test]
    fn error_view_prefixes_description() {
        assert_eq!(
            ResultView::error("HTTP 500"),
            ResultView::Error("Error: HTTP 500".into())
        );
    }
}
