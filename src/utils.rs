use std::path::Path;

use crate::core::store::METADATA_FILE_NAME;

/// Whether a string has any non-whitespace content.
pub fn has_text(s: &str) -> bool {
    !s.trim().is_empty()
}

/// Default section name for an input: the file stem, or the containing
/// directory's name when the input points at the metadata file itself.
pub fn section_name_for(path: &Path) -> String {
    let named_after = if path.file_name().and_then(|n| n.to_str()) == Some(METADATA_FILE_NAME) {
        path.parent()
    } else {
        Some(path)
    };
    named_after
        .and_then(|p| p.file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
