// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON serialization for rooms.
//!
//! The snapshot lists groups with their points inline, then junctions by
//! group and point ids. Only points held by a group are exported.

use std::collections::BTreeSet;

use cave_carto_core::{Category, Interest};
use nalgebra::Point3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::group::CartographyGroup;
use crate::keys::*;
use crate::point::{CartographyPoint, PointOrigin};
use crate::room::CartographyRoom;

/// Serializable representation of a room.
#[derive(Debug, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub name: String,
    pub groups: Vec<GroupSnapshot>,
    pub junctions: Vec<JunctionSnapshot>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub id: usize,
    pub name: String,
    pub category: Category,
    pub points: Vec<PointSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linked: Vec<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PointSnapshot {
    pub id: usize,
    pub name: String,
    pub row: usize,
    pub group_identifier: u32,
    pub category: Category,
    pub location: [f64; 3],
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest: Option<Interest>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub additional_categories: BTreeSet<Category>,
    #[serde(default)]
    pub derived: bool,
    /// Id of the source point when it is exported too.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JunctionSnapshot {
    pub group1: usize,
    pub group2: usize,
    /// `[point of group1, point of group2]` pairs.
    pub points: Vec<[usize; 2]>,
}

impl CartographyRoom {
    /// Serializes the room to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        let snapshot = self.to_snapshot();
        serde_json::to_string_pretty(&snapshot).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Creates a serializable snapshot of the room.
    ///
    /// SlotMap keys are mapped to sequential integer IDs for portability.
    pub fn to_snapshot(&self) -> RoomSnapshot {
        let group_ids: FxHashMap<GroupKey, usize> =
            self.groups.keys().enumerate().map(|(i, k)| (k, i)).collect();
        let point_ids: FxHashMap<PointKey, usize> = self
            .all_points()
            .enumerate()
            .map(|(i, (k, _))| (k, i))
            .collect();

        let groups = self
            .groups
            .iter()
            .map(|(gk, g)| GroupSnapshot {
                id: group_ids[&gk],
                name: g.name.clone(),
                category: g.category,
                points: g
                    .points
                    .iter()
                    .filter_map(|pk| {
                        let p = self.points.get(*pk)?;
                        Some(PointSnapshot {
                            id: point_ids[pk],
                            name: p.name.clone(),
                            row: p.row,
                            group_identifier: p.group_identifier,
                            category: p.category,
                            location: [p.location.x, p.location.y, p.location.z],
                            comments: p.comments.clone(),
                            observations: p.observations.clone(),
                            interest: p.interest,
                            additional_categories: p.additional_categories.clone(),
                            derived: p.is_derived(),
                            derived_from: match p.origin {
                                PointOrigin::Derived { source } => point_ids.get(&source).copied(),
                                PointOrigin::Surveyed => None,
                            },
                        })
                    })
                    .collect(),
                linked: g
                    .linked
                    .iter()
                    .filter_map(|l| group_ids.get(l).copied())
                    .collect(),
            })
            .collect();

        let junctions = self
            .junctions
            .values()
            .map(|j| JunctionSnapshot {
                group1: group_ids[&j.group1()],
                group2: group_ids[&j.group2()],
                points: j
                    .points()
                    .iter()
                    .filter_map(|(a, b)| Some([*point_ids.get(a)?, *point_ids.get(b)?]))
                    .collect(),
            })
            .collect();

        RoomSnapshot {
            name: self.name.clone(),
            groups,
            junctions,
        }
    }

    /// Deserializes a room from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: RoomSnapshot =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        Self::from_snapshot(&snapshot)
    }

    /// Reconstructs a room from a snapshot.
    pub fn from_snapshot(snap: &RoomSnapshot) -> Result<Self> {
        let mut room = CartographyRoom::new(snap.name.clone());
        let mut group_keys: FxHashMap<usize, GroupKey> = FxHashMap::default();
        let mut point_keys: FxHashMap<usize, PointKey> = FxHashMap::default();
        let mut derived: Vec<(PointKey, Option<usize>)> = Vec::new();

        for gs in &snap.groups {
            let gk = room.add_group(CartographyGroup::new(gs.name.clone(), gs.category))?;
            group_keys.insert(gs.id, gk);

            for ps in &gs.points {
                let [x, y, z] = ps.location;
                let mut point = CartographyPoint::new(ps.name.clone(), ps.category, Point3::new(x, y, z));
                point.row = ps.row;
                point.group_identifier = ps.group_identifier;
                point.comments = ps.comments.clone();
                point.observations = ps.observations.clone();
                point.interest = ps.interest;
                point.additional_categories = ps.additional_categories.clone();
                let pk = room.add_point(gk, point)?;
                point_keys.insert(ps.id, pk);
                if ps.derived {
                    derived.push((pk, ps.derived_from));
                }
            }
        }

        // A derived point whose source was not exported points at itself.
        for (pk, from) in derived {
            let source = from.and_then(|id| point_keys.get(&id).copied()).unwrap_or(pk);
            room.points[pk].origin = PointOrigin::Derived { source };
        }

        let group = |id: usize| {
            group_keys
                .get(&id)
                .copied()
                .ok_or_else(|| Error::Serialization(format!("unknown group id {id}")))
        };
        let point = |id: usize| {
            point_keys
                .get(&id)
                .copied()
                .ok_or_else(|| Error::Serialization(format!("unknown point id {id}")))
        };

        for gs in &snap.groups {
            for &linked in &gs.linked {
                room.link_groups(group(gs.id)?, group(linked)?)?;
            }
        }

        for js in &snap.junctions {
            let (g1, g2) = (group(js.group1)?, group(js.group2)?);
            let jk = room.add_junction(g1, g2)?;
            for &[a, b] in &js.points {
                room.add_junction_points(jk, (g1, point(a)?), (g2, point(b)?))?;
            }
        }

        Ok(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cave_carto_core::InterestType;

    fn sample_room() -> CartographyRoom {
        let mut room = CartographyRoom::new("Salle 1");
        let outline = room
            .add_group(CartographyGroup::for_category(Category::Outline, 0))
            .unwrap();
        let base = room
            .add_group(CartographyGroup::for_category(Category::ColumnBase, 1))
            .unwrap();
        let column = room
            .add_group(CartographyGroup::for_category(Category::Column, 1))
            .unwrap();

        let a = room
            .add_point(
                outline,
                CartographyPoint::new("P1", Category::Outline, Point3::new(0.0, 0.0, 0.0)),
            )
            .unwrap();
        let mut p = CartographyPoint::new("P2", Category::ColumnBase, Point3::new(0.0, 0.0, 0.0));
        p.interest = Some(Interest::new(InterestType::Box, 2));
        p.additional_categories.insert(Category::Outline);
        let b = room.add_point(base, p).unwrap();
        room.add_point(
            column,
            CartographyPoint::new("P3", Category::Column, Point3::new(2.0, 1.0, 0.5)),
        )
        .unwrap();

        room.link_groups(base, column).unwrap();
        let j = room.add_junction(outline, base).unwrap();
        room.add_junction_points(j, (outline, a), (base, b)).unwrap();
        room
    }

    #[test]
    fn snapshot_uses_sequential_ids() {
        let snap = sample_room().to_snapshot();
        assert_eq!(snap.groups.len(), 3);
        let mut ids: Vec<usize> = snap
            .groups
            .iter()
            .flat_map(|g| g.points.iter().map(|p| p.id))
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(snap.junctions.len(), 1);
        assert_eq!(snap.junctions[0].points.len(), 1);
    }

    #[test]
    fn json_names_categories_canonically() {
        let json = sample_room().to_json().unwrap();
        assert!(json.contains("\"COLUMN_BASE 1\""));
        assert!(json.contains("\"OUTLINE\""));
    }

    #[test]
    fn roundtrip_preserves_structure() {
        let room = sample_room();
        let restored = CartographyRoom::from_json(&room.to_json().unwrap()).unwrap();

        assert_eq!(restored.name, "Salle 1");
        assert_eq!(restored.group_count(), 3);
        assert_eq!(restored.point_count(), 3);
        assert_eq!(restored.junction_count(), 1);
        assert!(restored.outline_group().is_some());

        let base = restored.group_key("COLUMN_BASE 1").unwrap();
        let column = restored.group_key("COLUMN 1").unwrap();
        assert_eq!(restored.group(base).unwrap().linked(), &[column]);
        assert!(restored.has_junction(base, restored.outline_group()));

        let (_, p2) = restored.group_points(base).next().unwrap();
        assert_eq!(p2.interest, Some(Interest::new(InterestType::Box, 2)));
        assert!(p2.has_category(Category::Outline));
    }

    #[test]
    fn derived_origin_survives_roundtrip() {
        let mut room = CartographyRoom::new("r");
        let g = room
            .add_group(CartographyGroup::for_category(Category::Outline, 0))
            .unwrap();
        let p = room
            .add_point(g, CartographyPoint::new("1", Category::Outline, Point3::new(1.0, 2.0, 3.0)))
            .unwrap();
        let d = room.derive_point(p, Some(0.0)).unwrap();
        room.set_group_points(g, vec![p, d]).unwrap();

        let restored = CartographyRoom::from_json(&room.to_json().unwrap()).unwrap();
        let points: Vec<_> = restored.all_points().map(|(k, p)| (k, p.clone())).collect();
        assert_eq!(points.len(), 2);
        assert!(!points[0].1.is_derived());
        assert_eq!(points[1].1.origin, PointOrigin::Derived { source: points[0].0 });
    }

    #[test]
    fn invalid_json_is_a_serialization_error() {
        assert!(matches!(
            CartographyRoom::from_json("{"),
            Err(Error::Serialization(_))
        ));
    }
}
