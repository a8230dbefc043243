//! Document writer
//!
//! Persists any serializable value as `<path>.json`: parent directories are
//! created as needed, keys are sorted lexicographically at every depth and
//! the output is indented with two spaces. Existing files are overwritten,
//! so rerunning an export against unchanged data yields identical bytes.

use crate::domain::{ExportError, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const EXTENSION: &str = ".json";

/// Returns `path` with `.json` appended to its final component
///
/// The extension is appended rather than substituted, so an ID containing a
/// dot keeps its full name.
pub fn json_path(path: &Path) -> PathBuf {
    let mut target = path.as_os_str().to_owned();
    target.push(EXTENSION);
    PathBuf::from(target)
}

/// Renders a document as key-sorted, 2-space indented JSON
pub fn render_document<T: Serialize + ?Sized>(document: &T) -> Result<String> {
    // Round-tripping through `Value` sorts keys: its map is ordered.
    let value = serde_json::to_value(document)?;
    let mut rendered = serde_json::to_string_pretty(&value)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Writes `document` to `<path>.json` and returns the file written
///
/// # Errors
///
/// Returns [`ExportError::Io`] when a directory cannot be created or the file
/// cannot be written, and [`ExportError::Serialization`] when the document
/// does not serialize.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stormpath_export::core::writer::write_document;
///
/// # fn example() -> stormpath_export::domain::Result<()> {
/// let dir = tempfile::tempdir()?;
/// let written = write_document(&dir.path().join("t1/meta"), &json!({"b": 1, "a": 2}))?;
/// assert!(written.ends_with("t1/meta.json"));
/// # Ok(())
/// # }
/// ```
pub fn write_document<T: Serialize + ?Sized>(path: &Path, document: &T) -> Result<PathBuf> {
    let target = json_path(path);
    let rendered = render_document(document)?;

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ExportError::Io(format!(
                "Failed to create directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    fs::write(&target, rendered).map_err(|e| {
        ExportError::Io(format!("Failed to write {}: {e}", target.display()))
    })?;

    tracing::trace!(path = %target.display(), "Wrote document");
    Ok(target)
}
