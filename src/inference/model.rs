use std::fmt;
use std::str::FromStr;

use crate::error::ZoneParseError;

// ---------------------------------------------------------------------------
// Zone – which model / label set / education table applies
// ---------------------------------------------------------------------------

/// One of the two supported image domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Zone {
    Brain,
    Lung,
}

/// A descriptive chip shown under a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub icon: &'static str,
    pub text: &'static str,
}

const BRAIN_TAGS: [Tag; 3] = [
    Tag { icon: "🧠", text: "MRI" },
    Tag { icon: "📐", text: "~299×299" },
    Tag { icon: "ℹ️", text: "Assist tool" },
];

const LUNG_TAGS: [Tag; 3] = [
    Tag { icon: "🫁", text: "Chest X-ray" },
    Tag { icon: "📐", text: "~224×224" },
    Tag { icon: "ℹ️", text: "Assist tool" },
];

const BRAIN_LABELS: [&str; 4] = ["glioma", "meningioma", "no_tumor", "pituitary"];

const LUNG_LABELS: [&str; 5] = [
    "Bacterial Pneumonia",
    "Corona Virus Disease",
    "Normal",
    "Tuberculosis",
    "Viral Pneumonia",
];

impl Zone {
    pub const ALL: [Zone; 2] = [Zone::Brain, Zone::Lung];

    /// Identifier used in URLs and status lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Zone::Brain => "brain",
            Zone::Lung => "lung",
        }
    }

    /// Path of the prediction endpoint, relative to the API base.
    pub fn predict_path(self) -> String {
        format!("/api/{}/predict", self.as_str())
    }

    pub fn title(self) -> &'static str {
        match self {
            Zone::Brain => "Brain MRI",
            Zone::Lung => "Chest X-ray",
        }
    }

    pub fn tags(self) -> &'static [Tag] {
        match self {
            Zone::Brain => &BRAIN_TAGS,
            Zone::Lung => &LUNG_TAGS,
        }
    }

    /// Built-in class labels, in model output order.
    pub fn default_labels(self) -> Vec<String> {
        let labels: &[&str] = match self {
            Zone::Brain => &BRAIN_LABELS,
            Zone::Lung => &LUNG_LABELS,
        };
        labels.iter().map(|s| s.to_string()).collect()
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Zone {
    type Err = ZoneParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brain" => Ok(Zone::Brain),
            "lung" => Ok(Zone::Lung),
            _ => Err(ZoneParseError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Prediction – the canonical result of one analysis
// ---------------------------------------------------------------------------

/// Normalized outcome of one prediction call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prediction {
    /// Human label after `class_<i>` resolution (None when the payload had none).
    pub label: Option<String>,
    /// Key into the zone's education table, if one could be derived.
    pub edu_key: Option<String>,
    /// Top-class probability in `0.0..=1.0`, when the server reported a number.
    pub confidence: Option<f64>,
}
