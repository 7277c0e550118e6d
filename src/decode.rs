//! Decoding webhook bodies into the typed entity model.
//!
//! Entities derive [`serde::Deserialize`]; the entry points here run them
//! under `serde_path_to_error`, so a failure three levels down reports as
//! `data.resolved.users.80351110224678912.id` instead of a bare "missing
//! field".
//!
//! Field-presence rules, shared by all entities:
//!
//! - A required field that is absent fails with `missing field`. An
//!   explicit `null` in a required field fails as a type mismatch.
//! - An optional field that is absent or `null` decodes to `None`. Nothing
//!   is ever defaulted to a concrete value.
//! - Unknown keys are ignored.

use serde::de::DeserializeOwned;
use serde_json::{error::Category, Value};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Deepest option tree accepted under a single command.
///
/// Discord itself nests at most three levels (group, subcommand, argument);
/// the limit only exists so a hostile payload can't recurse without bound.
pub const MAX_OPTION_DEPTH: usize = 32;

// ---------------------------------------------------------------------------
// Field paths
// ---------------------------------------------------------------------------

/// One step from a JSON value into a child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Object member.
    Key(Box<str>),
    /// Array element.
    Index(usize),
}

/// Location of a value inside the decoded document.
///
/// Displays as `data.options[0].value`; the document root displays as
/// `<root>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<Segment>);

impl FieldPath {
    /// The document root.
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Whether this is the document root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Steps from the root to this location.
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }
}

impl From<&serde_path_to_error::Path> for FieldPath {
    fn from(path: &serde_path_to_error::Path) -> Self {
        use serde_path_to_error::Segment as Tracked;

        Self(
            path.iter()
                .filter_map(|segment| match segment {
                    Tracked::Seq { index } => Some(Segment::Index(*index)),
                    Tracked::Map { key } => Some(Segment::Key(key.as_str().into())),
                    Tracked::Enum { variant } => Some(Segment::Key(variant.as_str().into())),
                    _ => None,
                })
                .collect(),
        )
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }

        for (position, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Key(key) if position == 0 => f.write_str(key)?,
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A payload that doesn't match the entity model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{path}`: {kind}")]
pub struct DecodeError {
    /// Where decoding failed.
    pub path: FieldPath,
    /// Why decoding failed.
    pub kind: DecodeErrorKind,
}

/// Reason a value failed to decode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeErrorKind {
    /// The body is not JSON at all, or has trailing garbage.
    #[error("body is not valid JSON: {0}")]
    Json(String),
    /// Well-formed JSON that doesn't fit the entity model: a missing field,
    /// a type mismatch, a bad snowflake or timestamp, an out-of-range enum
    /// code, or an option tree past [`MAX_OPTION_DEPTH`].
    #[error("{0}")]
    Invalid(String),
}

impl DecodeErrorKind {
    /// The human-readable reason.
    pub fn message(&self) -> &str {
        match self {
            Self::Json(message) | Self::Invalid(message) => message,
        }
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for DecodeError {
    fn from(error: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = FieldPath::from(error.path());
        let inner = error.into_inner();

        let kind = match inner.classify() {
            Category::Data => DecodeErrorKind::Invalid(without_position(&inner)),
            Category::Io | Category::Syntax | Category::Eof => {
                DecodeErrorKind::Json(inner.to_string())
            }
        };

        Self { path, kind }
    }
}

/// The message of `error` minus serde_json's ` at line L column C` suffix,
/// so the same mistake reads the same from bytes and from a [`Value`].
fn without_position(error: &serde_json::Error) -> String {
    let message = error.to_string();
    let suffix = format!(" at line {} column {}", error.line(), error.column());

    match message.strip_suffix(&suffix) {
        Some(stripped) if error.line() > 0 => stripped.to_owned(),
        _ => message,
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Decode a raw request body.
pub fn from_slice<T: DeserializeOwned>(body: &[u8]) -> Result<T, DecodeError> {
    let mut deserializer = serde_json::Deserializer::from_slice(body);
    let value = serde_path_to_error::deserialize(&mut deserializer)?;

    deserializer.end().map_err(|e| DecodeError {
        path: FieldPath::root(),
        kind: DecodeErrorKind::Json(e.to_string()),
    })?;

    Ok(value)
}

/// Decode an already-parsed JSON document.
pub fn from_value<T: DeserializeOwned>(value: &Value) -> Result<T, DecodeError> {
    Ok(serde_path_to_error::deserialize(value)?)
}
