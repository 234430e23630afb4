//! Template name sanitization.
//!
//! This is the only barrier between caller-supplied names and the
//! filesystem during `add`.

use std::path::Path;

/// Replace every character outside `[A-Za-z0-9_-]` with `-`.
///
/// Dots, separators, drive prefixes and control characters all become `-`,
/// so the result can never climb out of a directory or name a hidden file.
/// A name made only of disallowed characters turns into a run of `-`.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Derive a template name from an uploaded file's original name.
pub fn name_from_filename(original_filename: &str) -> String {
    let stem = Path::new(original_filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("");
    sanitize_name(stem)
}

/// Whether `segment` can be joined onto a directory without leaving it.
pub fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.starts_with('.')
        && !segment.contains(['/', '\\', '\0', ':'])
}
