//! Test scaffolding for API model sources.
//!
//! Reads a Rust source file that declares response models, pairs each
//! struct with a JSON fixture and emits an accessor test for it. The output
//! is meant to be pasted into the file's test module and reviewed.

mod declarations;
mod emitter;

use std::fs;
use std::path::Path;

pub use declarations::{extract, FieldDecl, Fixture, SourceFile, StructDecl};
pub use emitter::{emit_accessor_tests, fixture_const_name, snake_case, Fixtures};

use crate::error::{Error, Result};

/// Reads `path` and emits accessor tests for its structs.
///
/// # Errors
///
/// [`Error::NotRustSource`] if `path` lacks an `.rs` extension, [`Error::Io`]
/// if it cannot be read, [`Error::Fixture`] for a malformed fixture.
pub fn scaffold_file(path: &Path, overrides: &Fixtures) -> Result<String> {
    if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
        return Err(Error::NotRustSource(path.to_path_buf()));
    }
    let source = fs::read_to_string(path).map_err(|source| Error::io(path, source))?;
    emit_accessor_tests(&extract(&source), overrides)
}
