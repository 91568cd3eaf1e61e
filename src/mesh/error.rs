//! Error types for descriptor parsing
//!
//! Three failure classes reach the consumer of a descriptor stream:
//! tokenizer-level [`ParseError`]s (fatal), per-record
//! [`RecordValidationError`]s, and I/O errors from the underlying stream.

use std::fmt;
use std::sync::Arc;

/// Errors that can occur while streaming descriptor records
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    /// Malformed XML; the stream cannot be resumed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A completed descriptor subtree failed schema mapping
    #[error(transparent)]
    Validation(#[from] RecordValidationError),

    /// I/O error from the underlying stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeshError {
    /// Whether the stream may still be advanced after this error.
    ///
    /// Only validation errors leave the walker at a well-defined position
    /// (right after the offending record).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, MeshError::Validation(_))
    }

    /// Split a quick-xml error into an I/O error or a positioned parse error
    pub(crate) fn from_xml(err: quick_xml::Error, position: u64) -> Self {
        match err {
            quick_xml::Error::Io(io) => MeshError::Io(
                Arc::try_unwrap(io).unwrap_or_else(|shared| {
                    std::io::Error::new(shared.kind(), shared.to_string())
                }),
            ),
            other => MeshError::Parse(ParseError::new(position, ParseErrorKind::Xml(other))),
        }
    }
}

/// Malformed XML at the tokenization level
#[derive(Debug, thiserror::Error)]
#[error("XML parse error at byte {position}: {kind}")]
pub struct ParseError {
    /// Byte offset into the input where the error was detected
    pub position: u64,
    /// What went wrong
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Create a new parse error at the given byte offset
    pub fn new(position: u64, kind: ParseErrorKind) -> Self {
        Self { position, kind }
    }
}

/// Reason for a [`ParseError`]
#[derive(Debug, thiserror::Error)]
pub enum ParseErrorKind {
    /// Error reported by the XML tokenizer (mismatched end tag, bad syntax, ...)
    #[error("{0}")]
    Xml(quick_xml::Error),

    /// End of input reached while elements were still open
    #[error("unexpected end of input, <{0}> is not closed")]
    UnclosedElement(String),

    /// Attribute value contains an unknown or malformed entity reference
    #[error("{0}")]
    Escape(quick_xml::escape::EscapeError),

    /// Text or attribute content is not valid UTF-8
    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// A descriptor record that could not be mapped onto the output schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordValidationError {
    /// Identifier of the offending record, if it could be read
    pub descriptor_ui: Option<String>,
    /// Tag path of the offending field, relative to the record element
    pub field: String,
    /// What is wrong with the field
    pub issue: ValidationIssue,
}

impl RecordValidationError {
    /// Create a validation error for a field of a record
    pub fn new(
        descriptor_ui: Option<String>,
        field: impl Into<String>,
        issue: ValidationIssue,
    ) -> Self {
        Self {
            descriptor_ui,
            field: field.into(),
            issue,
        }
    }
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.descriptor_ui {
            Some(ui) => write!(f, "invalid descriptor record {}: ", ui)?,
            None => write!(f, "invalid descriptor record (unknown UI): ")?,
        }
        write!(f, "{} {}", self.field, self.issue)
    }
}

impl std::error::Error for RecordValidationError {}

/// The specific problem found by record validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Required element is absent
    Missing,
    /// Required element is present but has no text
    Empty,
    /// Element that must occur once occurs this many times
    Duplicate(usize),
    /// Date component is not an integer
    InvalidInteger(String),
    /// Y/N flag attribute has some other value
    InvalidFlag(String),
    /// Year/Month/Day do not form a calendar date
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component
        month: u32,
        /// Day component
        day: u32,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::Missing => write!(f, "is missing"),
            ValidationIssue::Empty => write!(f, "is empty"),
            ValidationIssue::Duplicate(n) => write!(f, "occurs {} times, expected once", n),
            ValidationIssue::InvalidInteger(v) => write!(f, "is not an integer: {:?}", v),
            ValidationIssue::InvalidFlag(v) => write!(f, "is not a Y/N flag: {:?}", v),
            ValidationIssue::InvalidDate { year, month, day } => {
                write!(f, "is not a valid date: {:04}-{:02}-{:02}", year, month, day)
            }
        }
    }
}
