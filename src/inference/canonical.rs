use super::education;
use super::model::Zone;

// ---------------------------------------------------------------------------
// Canonicalizer: free-form label → education key
// ---------------------------------------------------------------------------

const BRAIN_NO_TUMOR: [&str; 3] = ["no tumor", "no tumour", "notumor"];

const BRAIN_SUBSTRINGS: [(&str, &str); 3] = [
    ("glioma", "glioma"),
    ("meningioma", "meningioma"),
    ("pituitary", "pituitary"),
];

const LUNG_ALIASES: [(&str, &str); 8] = [
    ("bacterial pneumonia", "Bacterial Pneumonia"),
    ("viral pneumonia", "Viral Pneumonia"),
    ("tuberculosis", "Tuberculosis"),
    ("normal", "Normal"),
    ("covid", "Corona Virus Disease"),
    ("covid 19", "Corona Virus Disease"),
    ("coronavirus disease", "Corona Virus Disease"),
    ("corona virus disease", "Corona Virus Disease"),
];

/// Trim, lowercase, and collapse runs of `_` / `-` into one space.
pub fn normalize_label(label: &str) -> String {
    let lowered = label.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut in_run = false;
    for c in lowered.chars() {
        if c == '_' || c == '-' {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Map a label to the zone's education key.
///
/// Unrecognized labels come back unchanged (not normalized) so they can
/// still be displayed; the caller treats an unmapped key as "no education".
pub fn canonical(zone: Zone, label: Option<&str>) -> Option<String> {
    let label = label.filter(|l| !l.is_empty())?;
    let normalized = normalize_label(label);

    let hit = match zone {
        Zone::Brain => brain_rule(&normalized),
        Zone::Lung => lung_rule(&normalized),
    }
    .or_else(|| {
        education::keys(zone).find(|k| k.to_lowercase() == normalized)
    });

    Some(hit.unwrap_or(label).to_string())
}

fn brain_rule(normalized: &str) -> Option<&'static str> {
    if BRAIN_NO_TUMOR.contains(&normalized) {
        return Some("no_tumor");
    }
    BRAIN_SUBSTRINGS
        .iter()
        .find(|(needle, _)| normalized.contains(needle))
        .map(|(_, key)| *key)
}

fn lung_rule(normalized: &str) -> Option<&'static str> {
    LUNG_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, key)| *key)
}
