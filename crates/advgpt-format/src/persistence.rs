//! Reading and writing `.advgpt` files.
//!
//! Both directions are gated by the validator. A document that fails
//! validation is never written, and a file that fails parsing or validation
//! never produces a document. Saves go through a temporary file in the
//! destination directory followed by a rename, so an existing file is either
//! fully replaced or left as it was. A replaced file keeps its permissions.

use std::fs::Permissions;
use std::io::Write;
use std::path::Path;

use serde_json::Value;

use crate::error::FormatError;
use crate::schema::GameDocument;
use crate::validation::{ValidationOptions, validate_value_with, validate_with};

/// Extension used for game files. The editor also accepts plain `.json`.
pub const FILE_EXTENSION: &str = "advgpt";

const MEMORY_ORIGIN: &str = "<memory>";

/// Mode given to newly created game files on Unix.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Whether a save may replace an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overwrite {
    Allow,
    Refuse,
}

// ===========================================================================
// In-memory encoding
// ===========================================================================

/// Encode a valid document as pretty-printed JSON.
pub fn to_string(doc: &GameDocument) -> Result<String, FormatError> {
    to_string_with(doc, &ValidationOptions::default())
}

/// Encode a document after validating it with `options`.
///
/// Output uses two-space indentation, keeps map keys in document order,
/// writes non-ASCII text unescaped and ends with a newline.
pub fn to_string_with(
    doc: &GameDocument,
    options: &ValidationOptions,
) -> Result<String, FormatError> {
    let errors = validate_with(doc, options);
    if !errors.is_empty() {
        return Err(FormatError::Invalid { errors });
    }

    let mut text = serde_json::to_string_pretty(doc).map_err(|e| FormatError::Serialize {
        detail: e.to_string(),
    })?;
    text.push('\n');
    Ok(text)
}

/// Decode and validate a document from JSON text.
pub fn from_str(text: &str) -> Result<GameDocument, FormatError> {
    decode(text, MEMORY_ORIGIN, &ValidationOptions::default())
}

/// Decode a document from JSON text, validating it with `options`.
pub fn from_str_with(text: &str, options: &ValidationOptions) -> Result<GameDocument, FormatError> {
    decode(text, MEMORY_ORIGIN, options)
}

fn decode(
    text: &str,
    origin: &str,
    options: &ValidationOptions,
) -> Result<GameDocument, FormatError> {
    let value: Value = serde_json::from_str(text).map_err(|e| FormatError::Parse {
        origin: origin.to_string(),
        detail: e.to_string(),
    })?;

    let errors = validate_value_with(&value, options);
    if !errors.is_empty() {
        return Err(FormatError::Invalid { errors });
    }

    serde_json::from_value(value).map_err(|e| FormatError::Schema {
        origin: origin.to_string(),
        detail: e.to_string(),
    })
}

// ===========================================================================
// Files
// ===========================================================================

/// Validate `doc` and write it to `path`, replacing any existing file.
pub fn save(doc: &GameDocument, path: &Path) -> Result<(), FormatError> {
    save_with(doc, path, &ValidationOptions::default())
}

/// Validate `doc` with `options` and write it to `path`, replacing any
/// existing file.
pub fn save_with(
    doc: &GameDocument,
    path: &Path,
    options: &ValidationOptions,
) -> Result<(), FormatError> {
    write_document(doc, path, options, Overwrite::Allow)
}

/// Validate `doc` and write it to a new file at `path`.
///
/// Fails with an [`std::io::ErrorKind::AlreadyExists`] I/O error if `path`
/// exists, including when another process creates it while the document is
/// being written.
pub fn save_new(doc: &GameDocument, path: &Path) -> Result<(), FormatError> {
    save_new_with(doc, path, &ValidationOptions::default())
}

/// [`save_new`] with explicit validation options.
pub fn save_new_with(
    doc: &GameDocument,
    path: &Path,
    options: &ValidationOptions,
) -> Result<(), FormatError> {
    write_document(doc, path, options, Overwrite::Refuse)
}

fn write_document(
    doc: &GameDocument,
    path: &Path,
    options: &ValidationOptions,
    overwrite: Overwrite,
) -> Result<(), FormatError> {
    let text = to_string_with(doc, options).inspect_err(|e| {
        tracing::warn!(path = %path.display(), "refusing to save game document: {e}");
    })?;

    write_atomic(path, text.as_bytes(), overwrite)?;

    tracing::debug!(
        path = %path.display(),
        locations = doc.locations.len(),
        items = doc.inventory_items.len(),
        "saved game document"
    );
    Ok(())
}

/// Read, parse and validate the game document at `path`.
pub fn load(path: &Path) -> Result<GameDocument, FormatError> {
    load_with(path, &ValidationOptions::default())
}

/// Read, parse and validate the game document at `path` with `options`.
pub fn load_with(path: &Path, options: &ValidationOptions) -> Result<GameDocument, FormatError> {
    let text = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;

    let doc = decode(&text, &path.display().to_string(), options).inspect_err(|e| {
        tracing::warn!(path = %path.display(), "refusing to load game document: {e}");
    })?;

    tracing::debug!(
        path = %path.display(),
        locations = doc.locations.len(),
        items = doc.inventory_items.len(),
        "loaded game document"
    );
    Ok(doc)
}

/// Whether `path` carries an extension the editor opens as a game file.
pub fn is_game_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(FILE_EXTENSION | "json")
    )
}

fn write_atomic(path: &Path, bytes: &[u8], overwrite: Overwrite) -> Result<(), FormatError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| io_error(path, e))?;
    tmp.write_all(bytes).map_err(|e| io_error(path, e))?;
    // The temp file is created owner-only.
    if let Some(permissions) = target_permissions(path) {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| io_error(path, e))?;
    }
    tmp.as_file().sync_all().map_err(|e| io_error(path, e))?;

    let persisted = match overwrite {
        Overwrite::Allow => tmp.persist(path),
        Overwrite::Refuse => tmp.persist_noclobber(path),
    };
    persisted.map_err(|e| io_error(path, e.error))?;
    Ok(())
}

/// Permissions for the file about to be written: those of the file being
/// replaced, or the default for a new one.
fn target_permissions(path: &Path) -> Option<Permissions> {
    match std::fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => new_file_permissions(),
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(NEW_FILE_MODE))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}

fn io_error(path: &Path, source: std::io::Error) -> FormatError {
    FormatError::Io {
        path: path.to_path_buf(),
        source,
    }
}
