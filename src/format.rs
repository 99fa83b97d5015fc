// ---------------------------------------------------------------------------
// Display formatting helpers
// ---------------------------------------------------------------------------

/// Shown wherever a value is missing.
pub const PLACEHOLDER: &str = "—";

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Binary-prefixed file size: `"0 B"`, `"2.0 KB"`, `"1.4 MB"`.
pub fn human_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} {}", SIZE_UNITS[0])
    } else {
        format!("{} {}", to_fixed_1(value), SIZE_UNITS[unit])
    }
}

/// Confidence as a percentage with one decimal, or the placeholder.
pub fn format_confidence(confidence: Option<f64>) -> String {
    match confidence {
        Some(c) => format!("{}%", to_fixed_1(c * 100.0)),
        None => PLACEHOLDER.to_string(),
    }
}

/// One decimal place, with exact halfway values rounded away from zero.
///
/// `{:.1}` rounds halfway values to even (`1.25` → `1.2`); displayed sizes
/// and percentages round them up (`1.25` → `1.3`). A double sits exactly
/// halfway between two tenths only when it is an odd multiple of 0.25.
pub fn to_fixed_1(v: f64) -> String {
    let quarters = v * 4.0;
    let halfway = quarters.is_finite() && quarters.fract() == 0.0 && quarters.abs() % 2.0 == 1.0;
    if !halfway || v.abs() >= 1e15 {
        return format!("{v:.1}");
    }
    let tenths = (v.abs() * 10.0).ceil() as u64;
    let sign = if v < 0.0 { "-" } else { "" };
    format!("{sign}{}.{}", tenths / 10, tenths % 10)
}
