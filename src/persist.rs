//! Artifact persistence.
//!
//! An artifact lives at the endpoint's route below the output directory,
//! with `.json` appended to the last segment unless it already has it:
//!
//! | route            | artifact           |
//! |------------------|--------------------|
//! | `/v2/build`      | `v2/build.json`    |
//! | `/v1/build.json` | `v1/build.json`    |
//!
//! Files are overwritten on every run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

use crate::catalog::Endpoint;
use crate::error::{Error, Result};

const JSON_SUFFIX: &str = ".json";
const INDENT: &[u8] = b"    ";

/// Location of the artifact for `endpoint` below `out_dir`.
#[must_use]
pub fn artifact_path(out_dir: &Path, endpoint: &Endpoint) -> PathBuf {
    let relative = endpoint.relative_path().trim_start_matches('/');
    let mut path = out_dir.to_path_buf();
    let mut segments = relative.split('/').peekable();

    while let Some(segment) = segments.next() {
        if segments.peek().is_some() {
            path.push(segment);
        } else if segment.ends_with(JSON_SUFFIX) {
            path.push(segment);
        } else {
            path.push(format!("{segment}{JSON_SUFFIX}"));
        }
    }

    path
}

/// Serializes `value` with four-space indentation and no trailing newline.
///
/// # Errors
///
/// Returns [`Error::Serialize`] (attributed to `path`) if serialization fails.
pub fn render_json(value: &Value, path: &Path) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer).map_err(|source| Error::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(buf)
}

/// Writes the artifact for `endpoint`, creating parent directories as
/// needed, and returns where it was written.
///
/// # Errors
///
/// [`Error::Serialize`] if the value cannot be rendered, [`Error::Io`] if the
/// directories or the file cannot be written.
pub fn persist(out_dir: &Path, endpoint: &Endpoint, value: &Value) -> Result<PathBuf> {
    let path = artifact_path(out_dir, endpoint);
    let rendered = render_json(value, &path)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| Error::io(parent, source))?;
    }
    fs::write(&path, rendered).map_err(|source| Error::io(&path, source))?;

    Ok(path)
}
