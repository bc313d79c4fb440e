//! Configuration file reading and writing.

use std::io::{ErrorKind, Write};
use std::path::Path;

use serde_json::{Map, Value};

use super::value::type_name;
use crate::error::ConfigError;

/// The in-memory configuration document: a flat JSON object.
pub type Document = Map<String, Value>;

/// Loads the configuration file from disk and parses it.
///
/// The file must hold a single JSON object at the top level.
pub fn load_from_path(path: &Path) -> Result<Document, ConfigError> {
    let content = std::fs::read(path).map_err(|e| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_document(path, &content)
}

/// Parses document bytes read from `path`.
///
/// Content that is not valid UTF-8 is reported as a parse failure.
pub fn parse_document(path: &Path, content: &[u8]) -> Result<Document, ConfigError> {
    let value: Value = serde_json::from_slice(content).map_err(|e| ConfigError::ParseFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(ConfigError::NotAnObject {
            path: path.to_path_buf(),
            found: type_name(&other),
        }),
    }
}

/// Renders a document as indented JSON with a trailing newline.
///
/// Keys come out sorted, so the same document always renders to the same
/// bytes.
pub fn render_document(path: &Path, document: &Document) -> Result<String, ConfigError> {
    let mut rendered =
        serde_json::to_string_pretty(document).map_err(|e| ConfigError::SerializeFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    rendered.push('\n');
    Ok(rendered)
}

/// Writes the document to `path`, replacing any existing file atomically.
///
/// Symlinks are followed, so the file they point at is the one replaced. The
/// content goes to a temporary file next to that file which is then renamed
/// over it. The target directory must already exist, and an existing
/// read-only file is never replaced.
pub fn save_to_path(path: &Path, document: &Document) -> Result<(), ConfigError> {
    let rendered = render_document(path, document)?;

    let write_failed = |e: std::io::Error| ConfigError::WriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    let target = match std::fs::canonicalize(path) {
        Ok(resolved) => resolved,
        Err(e) if e.kind() == ErrorKind::NotFound => path.to_path_buf(),
        Err(e) => return Err(write_failed(e)),
    };

    let existing = std::fs::metadata(&target).ok();
    if let Some(metadata) = &existing {
        if metadata.permissions().readonly() {
            return Err(write_failed(std::io::Error::new(
                ErrorKind::PermissionDenied,
                "config file is read-only",
            )));
        }
    }

    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent).map_err(write_failed)?;
    temp.write_all(rendered.as_bytes()).map_err(write_failed)?;
    temp.as_file().sync_all().map_err(write_failed)?;

    // Keep the mode of a file we are replacing
    if let Some(metadata) = existing {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(write_failed)?;
    }

    temp.persist(&target).map_err(|e| write_failed(e.error))?;

    Ok(())
}
