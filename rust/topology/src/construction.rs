// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Construction and mutation of room entities.
//!
//! Every entity is created through the room, which checks referential
//! integrity (referenced groups and points must exist) and keeps the name,
//! junction and location indices current.

use crate::error::{Error, Result};
use crate::group::CartographyGroup;
use crate::junction::CartographyJunction;
use crate::keys::*;
use crate::point::{CartographyPoint, PointOrigin};
use crate::room::CartographyRoom;

impl CartographyRoom {
    /// Registers a group under its name.
    ///
    /// An outline group becomes the room's outline; a second one is
    /// rejected with [`Error::DuplicateOutline`].
    pub fn add_group(&mut self, group: CartographyGroup) -> Result<GroupKey> {
        if self.group_names.contains_key(&group.name) {
            return Err(Error::DuplicateGroup(group.name));
        }
        if group.is_outline() {
            if let Some(existing) = self.outline_group.and_then(|k| self.groups.get(k)) {
                return Err(Error::DuplicateOutline {
                    existing: existing.name.clone(),
                    rejected: group.name,
                });
            }
        }

        let outline = group.is_outline();
        let name = group.name.clone();
        let key = self.groups.insert(group);
        self.group_names.insert(name, key);
        if outline {
            self.outline_group = Some(key);
        }
        Ok(key)
    }

    /// Appends a point to a group, which becomes its owner.
    pub fn add_point(&mut self, group: GroupKey, mut point: CartographyPoint) -> Result<PointKey> {
        if !self.groups.contains_key(group) {
            return Err(Error::GroupNotFound(group));
        }

        point.group = Some(group);
        let location = point.location;
        let key = self.points.insert(point);
        self.groups[group].points.push(key);
        self.locations.insert(key, &location);
        Ok(key)
    }

    /// Creates a detached copy of a point, optionally moved to height `z`.
    ///
    /// The copy is marked [`PointOrigin::Derived`] and belongs to no group
    /// until placed with [`CartographyRoom::set_group_points`].
    pub fn derive_point(&mut self, source: PointKey, z: Option<f64>) -> Result<PointKey> {
        let mut copy = self
            .points
            .get(source)
            .ok_or(Error::PointNotFound(source))?
            .clone();
        if let Some(z) = z {
            copy.location.z = z;
        }
        copy.origin = PointOrigin::Derived { source };
        copy.group = None;
        Ok(self.points.insert(copy))
    }

    /// Replaces the ordered point list of a group.
    ///
    /// Listed points owned by another group move to this one. Points that
    /// were in this group and are not listed become detached and leave the
    /// location index.
    pub fn set_group_points(&mut self, group: GroupKey, points: Vec<PointKey>) -> Result<()> {
        if !self.groups.contains_key(group) {
            return Err(Error::GroupNotFound(group));
        }
        if let Some(&missing) = points.iter().find(|k| !self.points.contains_key(**k)) {
            return Err(Error::PointNotFound(missing));
        }

        let previous = std::mem::take(&mut self.groups[group].points);
        for key in previous {
            if !points.contains(&key) {
                let point = &mut self.points[key];
                point.group = None;
                let location = point.location;
                self.locations.remove(key, &location);
            }
        }

        for &key in &points {
            let owner = self.points[key].group;
            if let Some(other) = owner.filter(|o| *o != group) {
                if let Some(other_group) = self.groups.get_mut(other) {
                    other_group.points.retain(|k| *k != key);
                }
            }
            let point = &mut self.points[key];
            point.group = Some(group);
            let location = point.location;
            self.locations.insert(key, &location);
        }

        self.groups[group].points = points;
        Ok(())
    }

    /// Records that `group` depends on `linked`.
    pub fn link_groups(&mut self, group: GroupKey, linked: GroupKey) -> Result<()> {
        if !self.groups.contains_key(linked) {
            return Err(Error::GroupNotFound(linked));
        }
        let data = self
            .groups
            .get_mut(group)
            .ok_or(Error::GroupNotFound(group))?;
        if !data.linked.contains(&linked) {
            data.linked.push(linked);
        }
        Ok(())
    }

    /// Returns the junction between two groups, creating it if needed.
    pub fn add_junction(&mut self, group1: GroupKey, group2: GroupKey) -> Result<JunctionKey> {
        for g in [group1, group2] {
            if !self.groups.contains_key(g) {
                return Err(Error::GroupNotFound(g));
            }
        }
        if group1 == group2 {
            return Err(Error::SelfJunction(self.groups[group1].name.clone()));
        }

        let pair = GroupPair::new(group1, group2);
        if let Some(&key) = self.junction_pairs.get(&pair) {
            return Ok(key);
        }
        let key = self.junctions.insert(CartographyJunction::new(group1, group2));
        self.junction_pairs.insert(pair, key);
        Ok(key)
    }

    /// Adds a coinciding point pair to a junction. Each side is given as
    /// `(group, point)`, in any order.
    pub fn add_junction_points(
        &mut self,
        junction: JunctionKey,
        a: (GroupKey, PointKey),
        b: (GroupKey, PointKey),
    ) -> Result<()> {
        for (_, p) in [a, b] {
            if !self.points.contains_key(p) {
                return Err(Error::PointNotFound(p));
            }
        }
        let data = self
            .junctions
            .get_mut(junction)
            .ok_or(Error::JunctionNotFound(junction))?;
        if !data.involves(a.0) {
            return Err(Error::GroupNotFound(a.0));
        }
        if !data.involves(b.0) || a.0 == b.0 {
            return Err(Error::GroupNotFound(b.0));
        }
        data.add_points(a, b);
        Ok(())
    }

    /// Removes a point from its group and drops every junction referencing it.
    ///
    /// Returns `false` if the point does not exist.
    pub fn remove_point(&mut self, key: PointKey) -> bool {
        let Some(point) = self.points.remove(key) else {
            return false;
        };
        if let Some(group) = point.group.and_then(|g| self.groups.get_mut(g)) {
            group.points.retain(|k| *k != key);
        }
        self.locations.remove(key, &point.location);

        let dead: Vec<JunctionKey> = self
            .junctions
            .iter()
            .filter(|(_, j)| j.contains_point(key))
            .map(|(k, _)| k)
            .collect();
        for junction in dead {
            self.remove_junction(junction);
        }
        true
    }

    fn remove_junction(&mut self, key: JunctionKey) {
        if let Some(junction) = self.junctions.remove(key) {
            self.junction_pairs.remove(&junction.pair());
        }
    }
}
