// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Junctions written in observations.
//!
//! A host point may say "Junction with column 2". The first such point is
//! where the referenced group starts along the host, the second where it
//! ends. The referenced group's points are then inserted into the host
//! between the two, and the host span they replace is handed to the
//! referenced group in reverse, so both polygons share the boundary.
//!
//! Inserted points are derived copies: each point keeps a single owning
//! group. When the host runs at another height, the copies take the host's
//! height.

use cave_carto_core::Classifier;
use cave_carto_topology::{CartographyRoom, GroupKey, PointKey};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy)]
struct JunctionEnd {
    point: PointKey,
    group: GroupKey,
    row: usize,
}

#[derive(Debug)]
struct PendingJunction {
    /// The referenced group, spliced into the host.
    group: GroupKey,
    start: JunctionEnd,
    end: Option<JunctionEnd>,
}

/// Finds textual junction references and splices the referenced groups.
///
/// Returns the number of groups spliced.
pub fn splice_junctions(room: &mut CartographyRoom, classifier: &Classifier) -> Result<usize> {
    let pending = determine_junctions(room, classifier)?;
    let mut spliced = 0;
    for junction in pending {
        if splice(room, junction)? {
            spliced += 1;
        }
    }
    Ok(spliced)
}

fn determine_junctions(room: &CartographyRoom, classifier: &Classifier) -> Result<Vec<PendingJunction>> {
    let mut pending: Vec<PendingJunction> = Vec::new();

    for (host, group) in room.groups() {
        for &key in group.points() {
            let Some(point) = room.point(key) else {
                continue;
            };
            let Some(reference) = point
                .observations
                .iter()
                .find_map(|o| classifier.junction_reference(o))
            else {
                continue;
            };

            let Some(target) = find_group(room, classifier, &reference, point.row)? else {
                tracing::warn!(reference = %reference, point = %point.name, "Junction group not found");
                continue;
            };
            if target == host {
                tracing::warn!(reference = %reference, point = %point.name, "Junction group is the point's own group");
                continue;
            }

            let end = JunctionEnd {
                point: key,
                group: host,
                row: point.row,
            };
            match pending.iter_mut().find(|j| j.group == target) {
                None => {
                    tracing::debug!(group = %group_name(room, target), point = %point.name, "Junction start point found");
                    pending.push(PendingJunction {
                        group: target,
                        start: end,
                        end: None,
                    });
                }
                Some(junction) if junction.end.is_none() => {
                    tracing::debug!(group = %group_name(room, target), point = %point.name, "Junction end point found");
                    junction.end = Some(end);
                }
                Some(_) => {
                    return Err(Error::JunctionOverflow {
                        row: point.row,
                        group: group_name(room, target).to_string(),
                    });
                }
            }
        }
    }
    Ok(pending)
}

/// Resolves a reference such as `column 2` to a group.
///
/// The canonical name wins; without a number, the only group of that
/// category is taken. Anything else is not found.
fn find_group(
    room: &CartographyRoom,
    classifier: &Classifier,
    reference: &str,
    row: usize,
) -> Result<Option<GroupKey>> {
    let Some(found) = classifier.classify_category(reference, row, None, false)? else {
        return Ok(None);
    };
    let name = cave_carto_topology::group_name(found.category, found.number.unwrap_or(0));
    if let Some(key) = room.group_key(&name) {
        return Ok(Some(key));
    }
    if found.number.is_some() {
        return Ok(None);
    }

    let candidates: Vec<GroupKey> = room
        .groups()
        .filter(|(_, g)| g.category == found.category)
        .map(|(k, _)| k)
        .collect();
    if candidates.len() > 1 {
        tracing::warn!(
            reference,
            count = candidates.len(),
            "Too many groups found for junction reference"
        );
        return Ok(None);
    }
    Ok(candidates.first().copied())
}

fn splice(room: &mut CartographyRoom, junction: PendingJunction) -> Result<bool> {
    let int_group = junction.group;
    let int_name = group_name(room, int_group).to_string();
    let start = junction.start;

    let end = match junction.end {
        None => {
            tracing::warn!(group = %int_name, "No end found for junction group, use the start point");
            start
        }
        Some(end) if end.group != start.group => {
            return Err(Error::JunctionGroupMismatch {
                row: end.row,
                group: int_name,
            });
        }
        Some(end) => end,
    };

    let ext_group = start.group;
    let Some(ext) = room.group(ext_group) else {
        return Ok(false);
    };
    if !ext.is_outline() {
        tracing::warn!(group = %int_name, host = %ext.name, "Junction host is not the outline, skipped");
        return Ok(false);
    }
    let ext_points = ext.points().to_vec();
    let int_points = room.group(int_group).map(|g| g.points().to_vec()).unwrap_or_default();
    if int_points.is_empty() {
        tracing::warn!(group = %int_name, "Junction group has no point, skipped");
        return Ok(false);
    }

    // An earlier splice may have moved a recorded point to another group.
    let [start_idx, end_idx] = [start.point, end.point].map(|key| {
        let idx = ext_points.iter().position(|&p| p == key);
        if idx.is_none() {
            tracing::warn!(
                group = %int_name,
                point = %point_name(room, key),
                "Junction point no longer on the host, skipped"
            );
        }
        idx
    });
    let (Some(start_idx), Some(end_idx)) = (start_idx, end_idx) else {
        return Ok(false);
    };
    if end_idx < start_idx {
        tracing::warn!(group = %int_name, "Junction end comes before its start along the host, skipped");
        return Ok(false);
    }

    let fst = &ext_points[..start_idx];
    let mid = &ext_points[start_idx..=end_idx];
    let lst = &ext_points[end_idx + 1..];

    // Height of the host next to the junction.
    let ext_z = if fst.len() > 1 {
        location_z(room, fst[fst.len() - 2])
    } else if lst.len() > 1 {
        location_z(room, lst[1])
    } else {
        None
    };
    let int_z = location_z(room, int_points[0]);
    let normalize_z = ext_z.filter(|z| Some(*z) != int_z);

    // Host: its points up to the start, the referenced group, then the rest.
    let mut new_ext: Vec<PointKey> = Vec::with_capacity(ext_points.len() + int_points.len() + 2);
    new_ext.extend_from_slice(fst);
    let boundary_start = match normalize_z {
        Some(z) => room.derive_point(start.point, Some(z))?,
        None => start.point,
    };
    new_ext.push(boundary_start);
    for &p in &int_points {
        new_ext.push(room.derive_point(p, normalize_z)?);
    }
    let boundary_end = match normalize_z {
        Some(z) => room.derive_point(end.point, Some(z))?,
        None if end.point == start.point => room.derive_point(end.point, None)?,
        None => end.point,
    };
    new_ext.push(boundary_end);
    new_ext.extend_from_slice(lst);

    // Referenced group: its own points, then the host span reversed.
    let mut new_int = int_points.clone();
    for &p in mid.iter().rev() {
        let kept_by_host = new_ext.contains(&p);
        new_int.push(if kept_by_host { room.derive_point(p, None)? } else { p });
    }

    let transferred = mid.len();
    room.set_group_points(ext_group, new_ext)?;
    room.set_group_points(int_group, new_int)?;
    tracing::debug!(
        from = %int_name,
        to = %group_name(room, ext_group),
        inserted = int_points.len(),
        transferred,
        normalized = normalize_z.is_some(),
        "Groups spliced at junction"
    );
    Ok(true)
}

fn group_name(room: &CartographyRoom, key: GroupKey) -> &str {
    room.group(key).map(|g| g.name.as_str()).unwrap_or_default()
}

fn point_name(room: &CartographyRoom, key: PointKey) -> &str {
    room.point(key).map(|p| p.name.as_str()).unwrap_or_default()
}

fn location_z(room: &CartographyRoom, key: PointKey) -> Option<f64> {
    room.point(key).map(|p| p.location.z)
}
