// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for room model operations.

use crate::keys::{GroupKey, JunctionKey, PointKey};

/// Result type alias for room operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or exporting a room.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Point key not found in the room.
    #[error("point not found: {0:?}")]
    PointNotFound(PointKey),

    /// Group key not found in the room.
    #[error("group not found: {0:?}")]
    GroupNotFound(GroupKey),

    /// Junction key not found in the room.
    #[error("junction not found: {0:?}")]
    JunctionNotFound(JunctionKey),

    /// A group name is already registered.
    #[error("group <{0}> already exists")]
    DuplicateGroup(String),

    /// A room has exactly one boundary.
    #[error("only one outline for each room: <{existing}> exists, <{rejected}> rejected")]
    DuplicateOutline { existing: String, rejected: String },

    /// A junction joins two distinct groups.
    #[error("junction of group <{0}> with itself")]
    SelfJunction(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
