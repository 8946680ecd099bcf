//! Accessor test emission.
//!
//! For each struct that has a fixture, one test is generated:
//!
//! ```text
//! #[test]
//! fn amulet_accessors() {
//!     let amulet = serde_json::from_str::<Amulet>(JSON_AMULET).unwrap();
//!     // Name of the amulet.
//!     assert_eq!(amulet.name, "Assassin Amulet");
//! }
//! ```
//!
//! Only scalar fields get an assertion. Collections, maps, enums and nested
//! structs are left for a human.

use std::collections::HashMap;
use std::fmt::Write as _;

use serde_json::Value;
use tracing::debug;

use super::declarations::{FieldDecl, SourceFile, StructDecl};
use crate::error::{Error, Result};

/// Fixture payloads supplied from outside the source file, keyed by struct
/// name. They take precedence over in-source `JSON_*` constants.
pub type Fixtures = HashMap<String, String>;

const INTEGER_TYPES: &[&str] = &[
    "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32", "i64", "i128", "isize",
];
const FLOAT_TYPES: &[&str] = &["f32", "f64"];
const STRING_TYPES: &[&str] = &["String", "&str", "&'static str", "Cow<'a, str>", "Box<str>"];

/// `MatchDetails` -> `match_details`.
#[must_use]
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        }
    }
    out
}

/// Name of the in-source constant holding the fixture for `struct_name`.
#[must_use]
pub fn fixture_const_name(struct_name: &str) -> String {
    format!("JSON_{}", snake_case(struct_name).to_uppercase())
}

/// Emits one accessor test per struct with a fixture.
///
/// # Errors
///
/// Returns [`Error::Fixture`] if a fixture payload is not valid JSON.
pub fn emit_accessor_tests(file: &SourceFile, overrides: &Fixtures) -> Result<String> {
    let mut out = String::new();

    for decl in &file.structs {
        let const_name = fixture_const_name(&decl.name);
        let (payload, source_expr) = if let Some(payload) = overrides.get(&decl.name) {
            (payload.as_str(), format!("r#\"{payload}\"#"))
        } else if let Some(fixture) = file.fixture(&const_name) {
            (fixture.payload.as_str(), const_name.clone())
        } else {
            debug!(name = %decl.name, "no fixture, skipping");
            continue;
        };

        let value: Value = serde_json::from_str(payload).map_err(|source| Error::Fixture {
            name: decl.name.clone(),
            source,
        })?;
        let Value::Object(object) = value else {
            debug!(name = %decl.name, "fixture is not an object, skipping");
            continue;
        };

        if !out.is_empty() {
            out.push('\n');
        }
        write_test(&mut out, decl, &source_expr, &object);
    }

    Ok(out)
}

fn write_test(out: &mut String, decl: &StructDecl, source_expr: &str, object: &serde_json::Map<String, Value>) {
    let var = snake_case(&decl.name);
    // Writing into a String cannot fail.
    let _ = writeln!(out, "#[test]");
    let _ = writeln!(out, "fn {var}_accessors() {{");
    let _ = writeln!(
        out,
        "    let {var} = serde_json::from_str::<{}>({source_expr}).unwrap();",
        decl.name
    );
    for field in &decl.fields {
        let Some(expected) = expected_literal(field, object.get(&field.json_key)) else {
            continue;
        };
        if let Some(doc) = &field.doc {
            let _ = writeln!(out, "    // {doc}");
        }
        let _ = writeln!(out, "    assert_eq!({var}.{}, {expected});", field.name);
    }
    let _ = writeln!(out, "}}");
}

/// Rust literal for the fixture value of `field`, or `None` when the field is
/// not a scalar or the fixture lacks it.
fn expected_literal(field: &FieldDecl, value: Option<&Value>) -> Option<String> {
    let ty = field.ty.trim();
    if let Some(inner) = ty.strip_prefix("Option<").and_then(|t| t.strip_suffix('>')) {
        return match value {
            None | Some(Value::Null) => Some("None".to_string()),
            Some(v) => scalar_literal(inner.trim(), v, true).map(|lit| format!("Some({lit})")),
        };
    }
    scalar_literal(ty, value?, false)
}

fn scalar_literal(ty: &str, value: &Value, owned: bool) -> Option<String> {
    match value {
        Value::String(s) if STRING_TYPES.contains(&ty) => {
            if owned && ty == "String" {
                Some(format!("{s:?}.to_string()"))
            } else {
                Some(format!("{s:?}"))
            }
        }
        Value::Bool(b) if ty == "bool" => Some(b.to_string()),
        Value::Number(n) if INTEGER_TYPES.contains(&ty) && (n.is_i64() || n.is_u64()) => Some(n.to_string()),
        Value::Number(n) if FLOAT_TYPES.contains(&ty) => {
            let lit = n.to_string();
            if lit.contains(['.', 'e', 'E']) {
                Some(lit)
            } else {
                Some(format!("{lit}.0"))
            }
        }
        _ => None,
    }
}
