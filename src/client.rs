use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use serde_json::Value as JsonValue;

use crate::dropzone::SelectedFile;
use crate::error::ClientError;
use crate::inference::model::Zone;
use crate::inference::normalize::js_string;

const USER_AGENT: &str = concat!("scan-assist/", env!("CARGO_PKG_VERSION"));

/// Multipart field the prediction endpoints read the upload from.
pub const IMAGE_FIELD: &str = "image";

// ---------------------------------------------------------------------------
// Service seams
// ---------------------------------------------------------------------------

/// Uploads one image and returns the raw JSON answer.
pub trait PredictionService: Send + Sync {
    fn predict(&self, zone: Zone, file: &SelectedFile) -> Result<JsonValue, ClientError>;
}

/// Fetches server metadata (labels, model names).
pub trait HealthService: Send + Sync {
    fn health(&self) -> Result<HealthReport, ClientError>;
}

// ---------------------------------------------------------------------------
// /health payload
// ---------------------------------------------------------------------------

/// Every field is optional; unknown fields and fields of an unexpected
/// type are ignored one by one rather than failing the whole report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HealthReport {
    pub ok: Option<bool>,
    pub brain: Option<ZoneHealth>,
    pub lung: Option<ZoneHealth>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneHealth {
    /// Display text of a truthy `model` value.
    pub model: Option<String>,
    /// Present only for a non-empty `labels` array.
    pub labels: Option<Vec<String>>,
}

impl HealthReport {
    /// Build a report from any JSON body. A non-object body gives an empty
    /// report.
    pub fn from_value(value: &JsonValue) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        Self {
            ok: obj.get("ok").and_then(JsonValue::as_bool),
            brain: obj.get("brain").and_then(ZoneHealth::from_value),
            lung: obj.get("lung").and_then(ZoneHealth::from_value),
        }
    }

    pub fn zone(&self, zone: Zone) -> Option<&ZoneHealth> {
        match zone {
            Zone::Brain => self.brain.as_ref(),
            Zone::Lung => self.lung.as_ref(),
        }
    }
}

impl ZoneHealth {
    fn from_value(value: &JsonValue) -> Option<Self> {
        let obj = value.as_object()?;
        let model = obj.get("model").and_then(model_text);
        let labels = obj
            .get("labels")
            .and_then(JsonValue::as_array)
            .filter(|labels| !labels.is_empty())
            .map(|labels| {
                labels
                    .iter()
                    .enumerate()
                    .map(|(i, label)| js_string(label).unwrap_or_else(|| format!("class_{i}")))
                    .collect()
            });
        Some(Self { model, labels })
    }
}

/// Text for a truthy model value; falsy values (`""`, `0`, `false`, `null`)
/// yield nothing.
fn model_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null | JsonValue::Bool(false) => None,
        JsonValue::String(s) if s.is_empty() => None,
        JsonValue::Number(n) if n.as_f64().is_some_and(|v| v == 0.0) => None,
        other => js_string(other),
    }
}

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

/// Blocking HTTP client for the inference server. Run it off the UI thread.
pub struct ApiClient {
    base: String,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    /// `base` is prepended to every path; empty means paths are used as-is.
    pub fn new(base: &str) -> Result<Self, ClientError> {
        // No overall timeout: a hung request keeps its zone busy.
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

impl PredictionService for ApiClient {
    fn predict(&self, zone: Zone, file: &SelectedFile) -> Result<JsonValue, ClientError> {
        let url = self.url(&zone.predict_path());
        log::debug!("POST {url} ({} bytes)", file.size);

        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(mime_for(&file.name))
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("{zone}: prediction request failed with {status}");
            return Err(ClientError::Http(status.as_u16()));
        }

        response
            .json::<JsonValue>()
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}

impl HealthService for ApiClient {
    fn health(&self) -> Result<HealthReport, ClientError> {
        let url = self.url("/health");
        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        // The body is read whatever the status; a JSON error page simply
        // carries no labels.
        log::debug!("GET {url} -> {}", response.status());
        let body = response
            .json::<JsonValue>()
            .map_err(|e| ClientError::Parse(e.to_string()))?;
        Ok(HealthReport::from_value(&body))
    }
}

/// Content type for the upload part, from the file extension.
pub fn mime_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn urls_join_base_and_path() {
        let client = ApiClient::new("http://localhost:10000/").unwrap();
        assert_eq!(
            client.url(&Zone::Lung.predict_path()),
            "http://localhost:10000/api/lung/predict"
        );

        let same_origin = ApiClient::new("").unwrap();
        assert_eq!(same_origin.url("/health"), "/health");
    }

    #[test]
    fn mime_types_follow_extension() {
        assert_eq!(mime_for("scan.PNG"), "image/png");
        assert_eq!(mime_for("xray.jpeg"), "image/jpeg");
        assert_eq!(mime_for("dicom"), "application/octet-stream");
    }

    #[test]
    fn health_tolerates_missing_and_extra_fields() {
        let report = HealthReport::from_value(&json!({
            "ok": true,
            "brain": {"model": "best_xception.keras", "labels": ["a", "b"]},
            "extra": 1
        }));
        assert_eq!(report.ok, Some(true));
        assert_eq!(report.zone(Zone::Brain).and_then(|z| z.labels.as_ref()).map(Vec::len), Some(2));
        assert!(report.zone(Zone::Lung).is_none());

        assert_eq!(HealthReport::from_value(&json!({})), HealthReport::default());
    }

    #[test]
    fn health_fields_of_unexpected_type_are_skipped_individually() {
        let report = HealthReport::from_value(&json!({
            "ok": "yes",
            "brain": {"labels": ["a", null, 7], "model": 0},
            "lung": {"model": 3, "labels": "Normal"}
        }));
        assert_eq!(report.ok, None);

        let brain = report.zone(Zone::Brain).unwrap();
        assert_eq!(
            brain.labels.as_deref(),
            Some(["a".to_string(), "class_1".to_string(), "7".to_string()].as_slice())
        );
        assert_eq!(brain.model, None);

        let lung = report.zone(Zone::Lung).unwrap();
        assert_eq!(lung.model.as_deref(), Some("3"));
        assert_eq!(lung.labels, None);
    }

    #[test]
    fn non_object_health_bodies_give_an_empty_report() {
        for body in [json!(null), json!([1, 2]), json!("ok"), json!({"brain": "offline"})] {
            let report = HealthReport::from_value(&body);
            assert!(report.zone(Zone::Brain).is_none(), "{body}");
            assert!(report.zone(Zone::Lung).is_none(), "{body}");
        }
    }
}
