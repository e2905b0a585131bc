// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Key types for arena-based storage.
//!
//! Each room entity gets a unique, type-safe key for O(1) lookup. Keys are
//! created by `slotmap::SlotMap` and remain valid even after other entities
//! are removed (generational indices).

use slotmap::new_key_type;

new_key_type! {
    /// Key for a point (one surveyed or derived location).
    pub struct PointKey;

    /// Key for a group (ordered points of one category).
    pub struct GroupKey;

    /// Key for a junction (shared points between two groups).
    pub struct JunctionKey;
}

/// Unordered pair of groups, the lookup key of a junction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupPair(GroupKey, GroupKey);

impl GroupPair {
    pub fn new(a: GroupKey, b: GroupKey) -> Self {
        if a <= b {
            GroupPair(a, b)
        } else {
            GroupPair(b, a)
        }
    }

    pub fn contains(&self, group: GroupKey) -> bool {
        self.0 == group || self.1 == group
    }
}
