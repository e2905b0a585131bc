// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room queries: point enumeration, junction lookup and location search.

use cave_carto_core::Category;
use nalgebra::Point3;

use crate::group::CartographyGroup;
use crate::junction::CartographyJunction;
use crate::keys::*;
use crate::point::CartographyPoint;
use crate::room::CartographyRoom;

impl CartographyRoom {
    /// Every point held by a group, group by group in survey order.
    ///
    /// Detached points are not listed.
    pub fn all_points(&self) -> impl Iterator<Item = (PointKey, &CartographyPoint)> + '_ {
        self.groups
            .values()
            .flat_map(|g| g.points.iter())
            .filter_map(|&k| self.points.get(k).map(|p| (k, p)))
    }

    /// Points of one group, in order.
    pub fn group_points(
        &self,
        group: GroupKey,
    ) -> impl Iterator<Item = (PointKey, &CartographyPoint)> + '_ {
        self.groups
            .get(group)
            .into_iter()
            .flat_map(|g| g.points.iter())
            .filter_map(|&k| self.points.get(k).map(|p| (k, p)))
    }

    /// Point of `group` at exactly `location`, if any.
    pub fn find_in_group(&self, group: GroupKey, location: &Point3<f64>) -> Option<PointKey> {
        self.locations
            .at(location)
            .iter()
            .copied()
            .find(|&k| self.points.get(k).and_then(|p| p.group) == Some(group))
    }

    /// Indexed points at exactly `location`, in insertion order.
    pub fn points_at(&self, location: &Point3<f64>) -> &[PointKey] {
        self.locations.at(location)
    }

    pub fn groups_by_category(
        &self,
        category: Category,
    ) -> impl Iterator<Item = (GroupKey, &CartographyGroup)> + '_ {
        self.groups.iter().filter(move |(_, g)| g.category == category)
    }

    /// Junction key between two groups, in either order.
    pub fn junction_key(&self, group1: GroupKey, group2: GroupKey) -> Option<JunctionKey> {
        self.junction_pairs
            .get(&GroupPair::new(group1, group2))
            .copied()
    }

    /// Junction between two groups, in either order.
    pub fn get_junction(&self, group1: GroupKey, group2: GroupKey) -> Option<&CartographyJunction> {
        self.junction_key(group1, group2)
            .and_then(|k| self.junctions.get(k))
    }

    /// With `other`, whether the two groups are joined. Without, whether
    /// `group` takes part in any junction.
    pub fn has_junction(&self, group: GroupKey, other: Option<GroupKey>) -> bool {
        match other {
            Some(other) => self.junction_key(group, other).is_some(),
            None => self.junction_pairs.keys().any(|pair| pair.contains(group)),
        }
    }

    /// Junctions involving `group`.
    pub fn junctions_of(
        &self,
        group: GroupKey,
    ) -> impl Iterator<Item = (JunctionKey, &CartographyJunction)> + '_ {
        self.junctions.iter().filter(move |(_, j)| j.involves(group))
    }
}
