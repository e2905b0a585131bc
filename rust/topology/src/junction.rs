// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Junctions between two groups.

use crate::keys::{GroupKey, GroupPair, PointKey};

/// Coinciding points between exactly two groups.
///
/// Each pair holds the point of `group1` first. The two groups never change.
#[derive(Debug, Clone)]
pub struct CartographyJunction {
    group1: GroupKey,
    group2: GroupKey,
    pub(crate) points: Vec<(PointKey, PointKey)>,
}

impl CartographyJunction {
    pub(crate) fn new(group1: GroupKey, group2: GroupKey) -> Self {
        Self {
            group1,
            group2,
            points: Vec::new(),
        }
    }

    pub fn group1(&self) -> GroupKey {
        self.group1
    }

    pub fn group2(&self) -> GroupKey {
        self.group2
    }

    pub fn groups(&self) -> (GroupKey, GroupKey) {
        (self.group1, self.group2)
    }

    pub fn pair(&self) -> GroupPair {
        GroupPair::new(self.group1, self.group2)
    }

    pub fn involves(&self, group: GroupKey) -> bool {
        self.group1 == group || self.group2 == group
    }

    /// The group on the other side, if `group` is one of the two.
    pub fn other(&self, group: GroupKey) -> Option<GroupKey> {
        if group == self.group1 {
            Some(self.group2)
        } else if group == self.group2 {
            Some(self.group1)
        } else {
            None
        }
    }

    pub fn points(&self) -> &[(PointKey, PointKey)] {
        &self.points
    }

    /// Point pairs seen from `group`: its own point first.
    pub fn points_from(&self, group: GroupKey) -> Vec<(PointKey, PointKey)> {
        if group == self.group2 {
            self.points.iter().map(|&(a, b)| (b, a)).collect()
        } else {
            self.points.clone()
        }
    }

    pub fn contains_point(&self, point: PointKey) -> bool {
        self.points.iter().any(|&(a, b)| a == point || b == point)
    }

    /// Appends a pair given in any group order.
    pub(crate) fn add_points(&mut self, a: (GroupKey, PointKey), b: (GroupKey, PointKey)) {
        let pair = if a.0 == self.group1 { (a.1, b.1) } else { (b.1, a.1) };
        if !self.points.contains(&pair) {
            self.points.push(pair);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn pairs_are_oriented_by_group() {
        let mut groups: SlotMap<GroupKey, ()> = SlotMap::with_key();
        let mut points: SlotMap<PointKey, ()> = SlotMap::with_key();
        let (g1, g2) = (groups.insert(()), groups.insert(()));
        let (p1, p2, p3, p4) = (
            points.insert(()),
            points.insert(()),
            points.insert(()),
            points.insert(()),
        );

        let mut junction = CartographyJunction::new(g1, g2);
        junction.add_points((g1, p1), (g2, p2));
        junction.add_points((g2, p4), (g1, p3));
        junction.add_points((g1, p1), (g2, p2));

        assert_eq!(junction.points(), &[(p1, p2), (p3, p4)]);
        assert_eq!(junction.points_from(g2), vec![(p2, p1), (p4, p3)]);
        assert_eq!(junction.other(g1), Some(g2));
        assert!(junction.contains_point(p4));
    }
}
