// Canonical hex rendering for diagnostics

/// Render bytes as two uppercase hex digits each, separated by single spaces.
///
/// An empty slice renders as `(empty)`.
pub fn to_hex(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "(empty)".to_string();
    }

    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
