//! Struct declaration extraction.
//!
//! A single pass over the source classifies every line with the patterns
//! below. Only braced `pub struct` items are collected; tuple structs, enums
//! and anything inside nested items are ignored.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// `pub struct Name {` (optionally generic).
static STRUCT_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*pub\s+struct\s+(\w+)\s*(?:<[^>{]*>)?\s*\{\s*$").expect("STRUCT_START regex")
});

/// `/// text` doc comment, capturing the text.
static DOC_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*///\s?(.*)$").expect("DOC_COMMENT regex"));

/// Plain `// text` comment.
static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*//").expect("LINE_COMMENT regex"));

/// `// pub old: u32,` field disabled by commenting it out.
static COMMENTED_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*//\s*pub(?:\([^)]*\))?\s+(?:r#)?\w+\s*:").expect("COMMENTED_FIELD regex")
});

/// `#[...]` outer attribute on a single line.
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*#\[(.*)\]\s*$").expect("ATTRIBUTE regex"));

/// First line of an attribute that continues on the following lines.
static ATTRIBUTE_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*#\[(.*)$").expect("ATTRIBUTE_OPEN regex"));

/// Last line of a multi-line attribute.
static ATTRIBUTE_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*)\]\s*$").expect("ATTRIBUTE_CLOSE regex"));

/// `rename = "key"` inside a serde attribute.
static SERDE_RENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^serde\(.*\brename\s*=\s*"([^"]+)""#).expect("SERDE_RENAME regex"));

/// `pub name: Type,`
static FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:r#)?(\w+)\s*:\s*(.+?)\s*,?\s*$").expect("FIELD regex")
});

/// `}` closing the struct.
static STRUCT_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\}").expect("STRUCT_END regex"));

/// `const JSON_NAME: &str = r#"...."#;`
static FIXTURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##"(?s)const\s+(JSON_\w+)\s*:\s*&(?:'static\s+)?str\s*=\s*r#"(.*?)"#\s*;"##).expect("FIXTURE regex")
});

/// One named field of a struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Rust field name.
    pub name: String,
    /// Type as written, e.g. `Option<String>`.
    pub ty: String,
    /// Doc comment lines joined with spaces.
    pub doc: Option<String>,
    /// Key of the field in the JSON payload (`serde(rename)` aware).
    pub json_key: String,
}

/// One braced struct and its fields, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    pub name: String,
    pub fields: Vec<FieldDecl>,
}

/// An in-source JSON payload constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    /// Constant name, e.g. `JSON_AMULET`.
    pub name: String,
    pub payload: String,
}

/// Everything extracted from one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFile {
    pub structs: Vec<StructDecl>,
    pub fixtures: Vec<Fixture>,
}

impl SourceFile {
    #[must_use]
    pub fn fixture(&self, name: &str) -> Option<&Fixture> {
        self.fixtures.iter().find(|f| f.name == name)
    }
}

/// Extracts struct declarations and fixture constants from Rust source.
#[must_use]
pub fn extract(source: &str) -> SourceFile {
    let mut structs = Vec::new();
    let mut current: Option<StructDecl> = None;
    let mut doc: Vec<String> = Vec::new();
    let mut rename: Option<String> = None;
    let mut attribute: Option<String> = None;

    for line in source.lines() {
        if current.is_none() {
            if let Some(caps) = STRUCT_START.captures(line) {
                current = Some(StructDecl {
                    name: caps[1].to_string(),
                    fields: Vec::new(),
                });
                doc.clear();
                rename = None;
                attribute = None;
            }
            continue;
        }

        if let Some(mut text) = attribute.take() {
            text.push(' ');
            match ATTRIBUTE_CLOSE.captures(line) {
                Some(caps) => {
                    text.push_str(caps[1].trim());
                    if let Some(key) = serde_rename(&text) {
                        rename = Some(key);
                    }
                }
                None => {
                    text.push_str(line.trim());
                    attribute = Some(text);
                }
            }
            continue;
        }

        if line.trim().is_empty() {
            continue;
        }
        if let Some(caps) = DOC_COMMENT.captures(line) {
            doc.push(caps[1].trim().to_string());
            continue;
        }
        if LINE_COMMENT.is_match(line) {
            // Docs and attributes above a disabled field belong to it.
            if COMMENTED_FIELD.is_match(line) {
                doc.clear();
                rename = None;
            }
            continue;
        }
        if let Some(caps) = ATTRIBUTE.captures(line) {
            if let Some(key) = serde_rename(&caps[1]) {
                rename = Some(key);
            }
            continue;
        }
        if let Some(caps) = ATTRIBUTE_OPEN.captures(line) {
            attribute = Some(caps[1].trim().to_string());
            continue;
        }
        if STRUCT_END.is_match(line) {
            structs.extend(current.take());
            continue;
        }
        if let (Some(decl), Some(caps)) = (current.as_mut(), FIELD.captures(line)) {
            let name = caps[1].to_string();
            decl.fields.push(FieldDecl {
                json_key: rename.take().unwrap_or_else(|| name.clone()),
                ty: caps[2].to_string(),
                doc: (!doc.is_empty()).then(|| doc.join(" ")),
                name,
            });
            doc.clear();
        }
    }

    let fixtures = FIXTURE
        .captures_iter(source)
        .map(|caps| Fixture {
            name: caps[1].to_string(),
            payload: caps[2].to_string(),
        })
        .collect();

    SourceFile { structs, fixtures }
}

fn serde_rename(attribute: &str) -> Option<String> {
    SERDE_RENAME.captures(attribute.trim()).map(|key| key[1].to_string())
}
