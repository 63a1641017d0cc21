//! Structured error types for the Folio table engine.
//!
//! Table shape problems and surface state are caught before anything is
//! drawn. Pagination limits surface mid-layout. JSON and I/O errors only
//! come from the document and CLI layers.

use thiserror::Error;

/// The unified error type returned by all public Folio API functions.
#[derive(Debug, Error)]
pub enum FolioError {
    /// A body row does not have one cell per header.
    #[error("Invalid table shape: row {row} has {found} cells, expected {expected}")]
    InvalidTableShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The table has no headers, so there are no columns to lay out.
    #[error("Invalid table shape: a table needs at least one header")]
    NoColumns,

    /// The drawing surface can no longer accept drawing commands.
    #[error("Drawing surface is unavailable")]
    SurfaceUnavailable,

    /// A row cannot fit on an empty page and the overflow policy forbids
    /// drawing it anyway.
    #[error("Row {row} is {height:.2}pt tall but a page only holds {available:.2}pt")]
    RowTooTall {
        row: usize,
        height: f64,
        available: f64,
    },

    /// The table asked for more pages than its budget allows.
    #[error("Table exceeded its limit of {limit} new pages")]
    PageLimitExceeded { limit: usize },

    /// JSON input failed to parse as a valid Folio document.
    #[error("Failed to parse document: {source}{}", format_hint(.hint))]
    ParseError {
        #[source]
        source: serde_json::Error,
        hint: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_hint(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the Folio document schema. Check field names and types.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input, is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        FolioError::ParseError { source: e, hint }
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_carries_hint() {
        let err: FolioError = serde_json::from_str::<serde_json::Value>("{,}")
            .unwrap_err()
            .into();
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to parse document"));
        assert!(msg.contains("Hint: Check for trailing commas"));
    }

    #[test]
    fn shape_error_names_the_row() {
        let err = FolioError::InvalidTableShape {
            row: 3,
            expected: 2,
            found: 1,
        };
        assert_eq!(
            err.to_string(),
            "Invalid table shape: row 3 has 1 cells, expected 2"
        );
    }
}
