use rust_decimal::Decimal;
use thiserror::Error;

use super::types::LineItemId;

/// Errors that can occur during quote construction or editing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuoteError {
    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// The last remaining line item cannot be removed, only edited.
    #[error("a quote must keep at least one line item")]
    LastItem,

    /// No line item with the given id exists in the document.
    #[error("unknown line item {0}")]
    UnknownItem(LineItemId),

    /// Quote number sequencing error.
    #[error("numbering error: {0}")]
    Numbering(String),

    /// Unknown unit label or code.
    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    /// A quantity or unit price lies outside the accepted range.
    #[error("{field} out of range: {value} (limit {limit})")]
    OutOfRange {
        field: &'static str,
        value: Decimal,
        limit: Decimal,
    },

    /// A total does not fit the decimal range.
    #[error("arithmetic overflow: {0}")]
    Arithmetic(String),

    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// A single advisory validation finding with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the field (e.g. "items.2.quantity").
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
