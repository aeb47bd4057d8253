/// Canonical form for every raw text field: trimmed, uppercased.
///
/// Idempotent: normalizing an already-normalized string returns it
/// unchanged.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_uppercase()
}
