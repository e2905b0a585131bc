// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena-based storage for a cartography room.
//!
//! The [`CartographyRoom`] is the central owner of all room data. Points,
//! groups and junctions live inside slot maps with stable, generational keys.
//! Groups reference their points by key in survey order; each point records
//! its owning group, so a point belongs to exactly one group at a time.
//!
//! Side indices keep name lookup, junction lookup by unordered group pair and
//! shared-location detection O(1).

use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::group::CartographyGroup;
use crate::junction::CartographyJunction;
use crate::keys::*;
use crate::point::CartographyPoint;
use crate::spatial::LocationIndex;

/// Room for cartography: the aggregate root handed to geometry generation.
///
/// # Example
///
/// ```
/// use cave_carto_core::Category;
/// use cave_carto_topology::{CartographyGroup, CartographyPoint, CartographyRoom};
/// use nalgebra::Point3;
///
/// let mut room = CartographyRoom::new("Salle 1");
/// let outline = room
///     .add_group(CartographyGroup::for_category(Category::Outline, 0))
///     .unwrap();
/// room.add_point(
///     outline,
///     CartographyPoint::new("P1", Category::Outline, Point3::new(0.0, 0.0, 0.0)),
/// )
/// .unwrap();
///
/// assert_eq!(room.outline_group(), Some(outline));
/// assert_eq!(room.all_points().count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CartographyRoom {
    pub name: String,

    // Entity storage
    pub(crate) points: SlotMap<PointKey, CartographyPoint>,
    pub(crate) groups: SlotMap<GroupKey, CartographyGroup>,
    pub(crate) junctions: SlotMap<JunctionKey, CartographyJunction>,

    // Indices
    pub(crate) group_names: FxHashMap<String, GroupKey>,
    pub(crate) junction_pairs: FxHashMap<GroupPair, JunctionKey>,
    pub(crate) locations: LocationIndex,

    pub(crate) outline_group: Option<GroupKey>,
}

impl CartographyRoom {
    /// Creates a new, empty room.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: SlotMap::with_key(),
            groups: SlotMap::with_key(),
            junctions: SlotMap::with_key(),
            group_names: FxHashMap::default(),
            junction_pairs: FxHashMap::default(),
            locations: LocationIndex::new(),
            outline_group: None,
        }
    }

    // --- Point access ---

    pub fn point(&self, key: PointKey) -> Option<&CartographyPoint> {
        self.points.get(key)
    }

    /// Mutable access for annotations. Moving a point is not supported.
    pub fn point_mut(&mut self, key: PointKey) -> Option<&mut CartographyPoint> {
        self.points.get_mut(key)
    }

    /// Number of points held by groups.
    pub fn point_count(&self) -> usize {
        self.groups.values().map(|g| g.points.len()).sum()
    }

    // --- Group access ---

    pub fn group(&self, key: GroupKey) -> Option<&CartographyGroup> {
        self.groups.get(key)
    }

    pub fn group_key(&self, name: &str) -> Option<GroupKey> {
        self.group_names.get(name).copied()
    }

    pub fn group_by_name(&self, name: &str) -> Option<&CartographyGroup> {
        self.group_key(name).and_then(|k| self.groups.get(k))
    }

    /// All groups. Order is not meaningful.
    pub fn groups(&self) -> impl Iterator<Item = (GroupKey, &CartographyGroup)> + '_ {
        self.groups.iter()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// The single room boundary, if any point declared it.
    pub fn outline_group(&self) -> Option<GroupKey> {
        self.outline_group
    }

    // --- Junction access ---

    pub fn junction(&self, key: JunctionKey) -> Option<&CartographyJunction> {
        self.junctions.get(key)
    }

    pub fn junctions(&self) -> impl Iterator<Item = (JunctionKey, &CartographyJunction)> + '_ {
        self.junctions.iter()
    }

    pub fn junction_count(&self) -> usize {
        self.junctions.len()
    }

    // --- Location index ---

    pub fn locations(&self) -> &LocationIndex {
        &self.locations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_room_is_empty() {
        let room = CartographyRoom::new("Salle");
        assert_eq!(room.name, "Salle");
        assert_eq!(room.point_count(), 0);
        assert_eq!(room.group_count(), 0);
        assert_eq!(room.junction_count(), 0);
        assert!(room.outline_group().is_none());
        assert!(room.locations().is_empty());
    }
}
