// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for classification and pattern configuration.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while classifying labels or loading pattern configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// A required label did not match any configured pattern.
    ///
    /// Carries the source row, the literal text, what kind of value was
    /// expected and the full candidate pattern list.
    #[error("Row #{row} - invalid {expected} <{value}>, expected one of: {patterns}")]
    Parse {
        row: usize,
        value: String,
        expected: &'static str,
        patterns: String,
    },

    /// A configured pattern is not a valid regular expression.
    #[error("invalid pattern <{pattern}>: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The pattern configuration could not be read or decoded.
    #[error("pattern configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn parse(
        row: usize,
        value: impl Into<String>,
        expected: &'static str,
        patterns: impl Into<String>,
    ) -> Self {
        Error::Parse {
            row,
            value: value.into(),
            expected,
            patterns: patterns.into(),
        }
    }

    /// Returns the source row for parse errors.
    pub fn row(&self) -> Option<usize> {
        match self {
            Error::Parse { row, .. } => Some(*row),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Config(format!("IO error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_message_names_row_and_value() {
        let err = Error::parse(12, "Stalagmite", "point category", "(Outline|Contour)");
        let msg = err.to_string();
        assert!(msg.contains("Row #12"));
        assert!(msg.contains("<Stalagmite>"));
        assert!(msg.contains("(Outline|Contour)"));
        assert_eq!(err.row(), Some(12));
    }
}
