use std::collections::BTreeMap;

use super::model::Zone;

// ---------------------------------------------------------------------------
// LabelRegistry – per-zone class index → display label
// ---------------------------------------------------------------------------

/// Ordered class labels for every zone.
///
/// Starts from the built-in defaults. The boot sequence may overwrite a
/// zone's list once with what the server reports; afterwards it is only read.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelRegistry {
    labels: BTreeMap<Zone, Vec<String>>,
}

impl Default for LabelRegistry {
    fn default() -> Self {
        let labels = Zone::ALL
            .iter()
            .map(|&zone| (zone, zone.default_labels()))
            .collect();
        Self { labels }
    }
}

impl LabelRegistry {
    /// Replace a zone's labels. Empty lists are ignored.
    ///
    /// Returns whether the registry changed.
    pub fn replace(&mut self, zone: Zone, labels: Vec<String>) -> bool {
        if labels.is_empty() {
            return false;
        }
        self.labels.insert(zone, labels);
        true
    }

    /// All labels for a zone, in class-index order.
    pub fn labels(&self, zone: Zone) -> &[String] {
        self.labels.get(&zone).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Label at a class index, if in range.
    pub fn get(&self, zone: Zone, idx: usize) -> Option<&str> {
        self.labels(zone).get(idx).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Label resolution
// ---------------------------------------------------------------------------

const CLASS_PREFIX: &str = "class_";

/// Turn an index-like token (`class_<i>`) into a human label.
///
/// Tokens that do not start with `class_` are already labels and come back
/// unchanged. Unparseable or out-of-range indices fall back to the token.
pub fn label_from(registry: &LabelRegistry, zone: Zone, token: Option<&str>) -> Option<String> {
    let token = token?;
    if !token.starts_with(CLASS_PREFIX) {
        return Some(token.to_string());
    }

    let index_part = token.split('_').nth(1).unwrap_or("");
    let resolved = parse_leading_int(index_part)
        .and_then(|i| usize::try_from(i).ok())
        .and_then(|i| registry.get(zone, i));

    Some(resolved.unwrap_or(token).to_string())
}

/// Parse an optionally signed run of leading digits, ignoring what follows.
///
/// `"2"` → 2, `"2x"` → 2, `" 7"` → 7, `"-1"` → -1, `""` / `"x"` → None.
pub(crate) fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|v| sign * v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_class_index_against_defaults() {
        let reg = LabelRegistry::default();
        assert_eq!(
            label_from(&reg, Zone::Brain, Some("class_2")).as_deref(),
            Some("no_tumor")
        );
        assert_eq!(
            label_from(&reg, Zone::Lung, Some("class_0")).as_deref(),
            Some("Bacterial Pneumonia")
        );
    }

    #[test]
    fn out_of_range_index_falls_back_to_token() {
        let reg = LabelRegistry::default();
        assert_eq!(
            label_from(&reg, Zone::Brain, Some("class_99")).as_deref(),
            Some("class_99")
        );
        assert_eq!(
            label_from(&reg, Zone::Brain, Some("class_-1")).as_deref(),
            Some("class_-1")
        );
    }

    #[test]
    fn malformed_index_falls_back_to_token() {
        let reg = LabelRegistry::default();
        assert_eq!(
            label_from(&reg, Zone::Brain, Some("class_abc")).as_deref(),
            Some("class_abc")
        );
        assert_eq!(
            label_from(&reg, Zone::Brain, Some("class_")).as_deref(),
            Some("class_")
        );
    }

    #[test]
    fn leading_digits_are_enough() {
        let reg = LabelRegistry::default();
        assert_eq!(
            label_from(&reg, Zone::Brain, Some("class_1b")).as_deref(),
            Some("meningioma")
        );
    }

    #[test]
    fn plain_labels_pass_through() {
        let reg = LabelRegistry::default();
        assert_eq!(
            label_from(&reg, Zone::Lung, Some("Tuberculosis")).as_deref(),
            Some("Tuberculosis")
        );
        assert_eq!(label_from(&reg, Zone::Lung, None), None);
    }

    #[test]
    fn replace_ignores_empty_lists() {
        let mut reg = LabelRegistry::default();
        assert!(!reg.replace(Zone::Brain, Vec::new()));
        assert_eq!(reg.labels(Zone::Brain).len(), 4);

        assert!(reg.replace(Zone::Brain, vec!["a".into(), "b".into()]));
        assert_eq!(reg.get(Zone::Brain, 1), Some("b"));
        assert_eq!(
            label_from(&reg, Zone::Brain, Some("class_0")).as_deref(),
            Some("a")
        );
    }
}
