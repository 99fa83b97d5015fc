use std::cmp::Ordering;

use serde_json::{Map, Value as JsonValue};

use super::canonical::canonical;
use super::labels::{LabelRegistry, label_from};
use super::model::{Prediction, Zone};

// ---------------------------------------------------------------------------
// Extractor strategies
// ---------------------------------------------------------------------------

/// What one extractor pulled out of a payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Raw label token, before `class_<i>` resolution.
    pub label: Option<String>,
    /// Raw confidence value; only numbers survive normalization.
    pub confidence: Option<JsonValue>,
}

/// Read-only inputs shared by all extractors.
pub struct ExtractContext<'a> {
    pub zone: Zone,
    pub registry: &'a LabelRegistry,
}

/// One recognized response shape.
///
/// Returns `None` when the payload does not have this shape, so the next
/// extractor in precedence order is tried.
pub trait LabelExtractor: Send + Sync {
    fn name(&self) -> &'static str;

    fn extract(&self, ctx: &ExtractContext<'_>, payload: &Map<String, JsonValue>) -> Option<Extraction>;
}

/// A plain string field such as `top` or `label`.
///
/// Presence is what counts: a `null` value still wins and yields no label.
pub struct FieldExtractor(pub &'static str);

impl LabelExtractor for FieldExtractor {
    fn name(&self) -> &'static str {
        self.0
    }

    fn extract(&self, _ctx: &ExtractContext<'_>, payload: &Map<String, JsonValue>) -> Option<Extraction> {
        let value = payload.get(self.0)?;
        Some(Extraction {
            label: js_string(value),
            confidence: None,
        })
    }
}

/// `top_idx`, resolved through an inline `labels` array, then the registry.
pub struct IndexExtractor;

impl LabelExtractor for IndexExtractor {
    fn name(&self) -> &'static str {
        "top_idx"
    }

    fn extract(&self, ctx: &ExtractContext<'_>, payload: &Map<String, JsonValue>) -> Option<Extraction> {
        let raw = payload.get("top_idx")?;
        let idx = js_number(raw);
        let slot = as_index(idx);

        let inline = payload
            .get("labels")
            .and_then(JsonValue::as_array)
            .zip(slot)
            .and_then(|(list, i)| list.get(i))
            .and_then(js_string);

        let label = inline
            .or_else(|| slot.and_then(|i| ctx.registry.get(ctx.zone, i)).map(str::to_string))
            .unwrap_or_else(|| format!("class_{}", js_number_string(idx)));

        Some(Extraction {
            label: Some(label),
            confidence: None,
        })
    }
}

/// `probs`: label → probability; the highest entry supplies both fields.
///
/// An array is read as index → probability, so its winning label is the
/// index in string form.
pub struct ProbsExtractor;

impl LabelExtractor for ProbsExtractor {
    fn name(&self) -> &'static str {
        "probs"
    }

    fn extract(&self, _ctx: &ExtractContext<'_>, payload: &Map<String, JsonValue>) -> Option<Extraction> {
        let mut pairs = entries(payload.get("probs")?)?;

        // Stable sort, descending by numeric value; NaN sinks to the end.
        pairs.sort_by(|a, b| {
            let (a, b) = (js_number(a.1), js_number(b.1));
            match (a.is_nan(), b.is_nan()) {
                (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (true, true) => Ordering::Equal,
            }
        });

        let (label, prob) = pairs.into_iter().next()?;
        Some(Extraction {
            label: Some(label),
            confidence: Some(prob.clone()),
        })
    }
}

/// Key/value pairs of an object or array, in property enumeration order:
/// array-index keys ascending, then the rest in insertion order.
fn entries(value: &JsonValue) -> Option<Vec<(String, &JsonValue)>> {
    match value {
        JsonValue::Array(items) => Some(items.iter().enumerate().map(|(i, v)| (i.to_string(), v)).collect()),
        JsonValue::Object(map) => {
            let (mut indexed, named): (Vec<_>, Vec<_>) = map
                .iter()
                .map(|(k, v)| (array_index(k), k.clone(), v))
                .partition(|(idx, _, _)| idx.is_some());
            indexed.sort_by_key(|(idx, _, _)| *idx);
            Some(
                indexed
                    .into_iter()
                    .chain(named)
                    .map(|(_, k, v)| (k, v))
                    .collect(),
            )
        }
        _ => None,
    }
}

/// Canonical array index (`"0"`, `"12"`, not `"012"` or `"-1"`).
fn array_index(key: &str) -> Option<u32> {
    let idx: u32 = key.parse().ok()?;
    (idx != u32::MAX && idx.to_string() == key).then_some(idx)
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

const CONFIDENCE_FIELDS: [&str; 3] = ["conf", "confidence", "top_prob"];

/// Ordered list of extractors, tried until one recognizes the payload.
pub struct Normalizer {
    extractors: Vec<Box<dyn LabelExtractor>>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            extractors: vec![
                Box::new(FieldExtractor("top")),
                Box::new(FieldExtractor("label")),
                Box::new(FieldExtractor("prediction")),
                Box::new(FieldExtractor("top_label")),
                Box::new(IndexExtractor),
                Box::new(ProbsExtractor),
            ],
        }
    }
}

impl Normalizer {
    pub fn new(extractors: Vec<Box<dyn LabelExtractor>>) -> Self {
        Self { extractors }
    }

    /// Reduce any server payload to `{label, edu_key, confidence}`.
    ///
    /// Never fails: unrecognized shapes give an empty prediction.
    pub fn normalize(&self, registry: &LabelRegistry, zone: Zone, payload: &JsonValue) -> Prediction {
        let Some(obj) = payload.as_object() else {
            log::debug!("{zone}: response is not a JSON object");
            return Prediction::default();
        };

        let ctx = ExtractContext { zone, registry };
        let extraction = self
            .extractors
            .iter()
            .find_map(|ex| {
                let found = ex.extract(&ctx, obj)?;
                log::debug!("{zone}: label taken from '{}'", ex.name());
                Some(found)
            })
            .unwrap_or_default();

        let confidence = match extraction.confidence {
            Some(v) if !v.is_null() => Some(v),
            _ => CONFIDENCE_FIELDS
                .iter()
                .filter_map(|f| obj.get(*f))
                .find(|v| !v.is_null())
                .cloned(),
        };

        let label = label_from(registry, zone, extraction.label.as_deref());
        let edu_key = canonical(zone, label.as_deref());

        Prediction {
            label,
            edu_key,
            confidence: confidence.as_ref().and_then(JsonValue::as_f64),
        }
    }
}

/// Normalize with the default extractor order.
pub fn normalize_response(registry: &LabelRegistry, zone: Zone, payload: &JsonValue) -> Prediction {
    Normalizer::default().normalize(registry, zone, payload)
}

// -- JSON value coercions --

/// String form of a label token; `null` means "no label".
pub(crate) fn js_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(js_number_string(n.as_f64().unwrap_or(f64::NAN))),
        JsonValue::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Numeric coercion of an index or probability. Strings are parsed, `null` is 0.
fn js_number(value: &JsonValue) -> f64 {
    match value {
        JsonValue::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        JsonValue::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse().unwrap_or(f64::NAN)
            }
        }
        JsonValue::Bool(b) => f64::from(u8::from(*b)),
        JsonValue::Null => 0.0,
        _ => f64::NAN,
    }
}

fn js_number_string(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

fn as_index(v: f64) -> Option<usize> {
    (v.fract() == 0.0 && v >= 0.0 && v < usize::MAX as f64).then(|| v as usize)
}
