// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for point parsing.

use thiserror::Error;

/// Result type alias for parsing.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal conditions aborting the parse of a file.
#[derive(Error, Debug)]
pub enum Error {
    /// Classification or configuration failure.
    #[error(transparent)]
    Core(#[from] cave_carto_core::Error),

    /// Room model integrity failure.
    #[error(transparent)]
    Room(#[from] cave_carto_topology::Error),

    /// More than a start and an end reference a junction group.
    #[error("Row #{row} - junction group <{group}> referenced more than twice, expected a start and an end")]
    JunctionOverflow { row: usize, group: String },

    /// The start and end of a junction lie in different groups.
    #[error("Row #{row} - junction group <{group}> starts and ends in different groups")]
    JunctionGroupMismatch { row: usize, group: String },
}

impl Error {
    /// Source row of the failure, when known.
    pub fn row(&self) -> Option<usize> {
        match self {
            Error::Core(e) => e.row(),
            Error::Room(_) => None,
            Error::JunctionOverflow { row, .. } | Error::JunctionGroupMismatch { row, .. } => Some(*row),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_keep_their_row() {
        let err: Error = cave_carto_core::Error::parse(7, "Stalagmite", "point category", "Outline").into();
        assert_eq!(err.row(), Some(7));
        assert!(err.to_string().contains("Stalagmite"));

        let err = Error::JunctionOverflow {
            row: 12,
            group: "COLUMN 2".into(),
        };
        assert_eq!(err.row(), Some(12));
        assert!(err.to_string().contains("COLUMN 2"));
    }
}
