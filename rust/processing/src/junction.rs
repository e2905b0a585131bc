// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Junctions from shared locations.
//!
//! Points of different groups surveyed at the exact same coordinates join
//! their groups. Every pair of distinct groups at a location gets one
//! junction, reused across locations, and the points exchange categories so
//! the shared vertex reads the same from either side.

use std::collections::BTreeSet;

use cave_carto_core::Category;
use cave_carto_topology::{CartographyRoom, GroupKey, PointKey};

use crate::error::Result;

/// Joins the groups of points sharing one location.
///
/// Returns the number of point pairs registered. Points of the same group
/// are never paired.
pub fn create_junctions(room: &mut CartographyRoom, points: &[(GroupKey, PointKey)]) -> Result<usize> {
    let mut pairs = 0;
    let mut joined: Vec<PointKey> = Vec::with_capacity(points.len());

    for (i, &(group1, point1)) in points.iter().enumerate() {
        for &(group2, point2) in &points[i + 1..] {
            if group1 == group2 {
                continue;
            }
            let junction = room.add_junction(group1, group2)?;
            room.add_junction_points(junction, (group1, point1), (group2, point2))?;
            tracing::debug!(
                group1 = %group_label(room, group1),
                group2 = %group_label(room, group2),
                point = %room.point(point1).map(|p| p.name.as_str()).unwrap_or_default(),
                "Add junction point"
            );
            pairs += 1;
            for p in [point1, point2] {
                if !joined.contains(&p) {
                    joined.push(p);
                }
            }
        }
    }

    propagate_categories(room, &joined);
    Ok(pairs)
}

/// Runs [`create_junctions`] once per location shared by several points.
///
/// Locations are visited in the order they were first surveyed.
pub fn determine_junctions(room: &mut CartographyRoom) -> Result<usize> {
    let buckets: Vec<Vec<(GroupKey, PointKey)>> = room
        .locations()
        .shared()
        .map(|bucket| {
            bucket
                .iter()
                .filter_map(|&p| room.point(p).and_then(|point| point.group()).map(|g| (g, p)))
                .collect()
        })
        .collect();

    let mut pairs = 0;
    for bucket in &buckets {
        pairs += create_junctions(room, bucket)?;
    }
    Ok(pairs)
}

// Every joined point gets the full category set of all the others.
fn propagate_categories(room: &mut CartographyRoom, points: &[PointKey]) {
    let union: BTreeSet<Category> = points
        .iter()
        .filter_map(|&p| room.point(p))
        .flat_map(|p| p.all_categories())
        .collect();
    for &p in points {
        if let Some(point) = room.point_mut(p) {
            point.absorb_categories(union.iter().copied());
        }
    }
}

fn group_label(room: &CartographyRoom, key: GroupKey) -> &str {
    room.group(key).map(|g| g.name.as_str()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cave_carto_topology::{CartographyGroup, CartographyPoint};
    use nalgebra::Point3;

    fn add(room: &mut CartographyRoom, group: GroupKey, name: &str, category: Category, at: Point3<f64>) -> PointKey {
        room.add_point(group, CartographyPoint::new(name, category, at))
            .unwrap()
    }

    #[test]
    fn three_groups_at_one_location() {
        let mut room = CartographyRoom::new("r");
        let outline = room
            .add_group(CartographyGroup::for_category(Category::Outline, 0))
            .unwrap();
        let bank = room
            .add_group(CartographyGroup::for_category(Category::Bank, 1))
            .unwrap();
        let chasm = room
            .add_group(CartographyGroup::for_category(Category::Chasm, 1))
            .unwrap();
        let at = Point3::new(2.0, 3.0, 0.0);
        let a = add(&mut room, outline, "A", Category::Outline, at);
        let b = add(&mut room, bank, "B", Category::Bank, at);
        let c = add(&mut room, chasm, "C", Category::Chasm, at);

        assert_eq!(determine_junctions(&mut room).unwrap(), 3);
        assert_eq!(room.junction_count(), 3);
        assert_eq!(room.get_junction(bank, chasm).unwrap().points(), &[(b, c)]);

        for p in [a, b, c] {
            let point = room.point(p).unwrap();
            for category in [Category::Outline, Category::Bank, Category::Chasm] {
                assert!(point.has_category(category));
            }
        }
    }

    #[test]
    fn same_group_points_are_not_paired() {
        let mut room = CartographyRoom::new("r");
        let outline = room
            .add_group(CartographyGroup::for_category(Category::Outline, 0))
            .unwrap();
        let at = Point3::new(1.0, 1.0, 1.0);
        let a = add(&mut room, outline, "A", Category::Outline, at);
        let b = add(&mut room, outline, "B", Category::Gate, at);

        assert_eq!(create_junctions(&mut room, &[(outline, a), (outline, b)]).unwrap(), 0);
        assert_eq!(room.junction_count(), 0);
        assert!(!room.point(a).unwrap().has_category(Category::Gate));
    }

    #[test]
    fn junction_accumulates_over_locations() {
        let mut room = CartographyRoom::new("r");
        let outline = room
            .add_group(CartographyGroup::for_category(Category::Outline, 0))
            .unwrap();
        let escarpment = room
            .add_group(CartographyGroup::for_category(Category::Escarpment, 1))
            .unwrap();
        let first = Point3::new(0.0, 0.0, 0.0);
        let second = Point3::new(4.0, 0.0, 0.0);
        let o1 = add(&mut room, outline, "O1", Category::Outline, first);
        let o2 = add(&mut room, outline, "O2", Category::Outline, second);
        let e1 = add(&mut room, escarpment, "E1", Category::Escarpment, second);
        let e2 = add(&mut room, escarpment, "E2", Category::Escarpment, first);

        determine_junctions(&mut room).unwrap();
        assert_eq!(room.junction_count(), 1);
        let junction = room.get_junction(escarpment, outline).unwrap();
        assert_eq!(junction.points_from(outline), vec![(o1, e2), (o2, e1)]);
    }
}
