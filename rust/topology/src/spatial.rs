// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Exact-location index for shared point detection.
//!
//! Survey coordinates are computed from the same field measurements, so two
//! records naming the same physical spot carry bit-identical coordinates.
//! Points are bucketed by the bit pattern of their location; buckets keep
//! the order in which locations were first seen so that junctions are built
//! in input order.

use nalgebra::Point3;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::keys::PointKey;

/// Points sharing one location. Usually 2 to 4.
pub type LocationBucket = SmallVec<[PointKey; 4]>;

/// Hashable identity of an exact 3D location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationKey([u64; 3]);

impl LocationKey {
    pub fn new(location: &Point3<f64>) -> Self {
        LocationKey([
            canonical_bits(location.x),
            canonical_bits(location.y),
            canonical_bits(location.z),
        ])
    }
}

impl From<&Point3<f64>> for LocationKey {
    fn from(location: &Point3<f64>) -> Self {
        LocationKey::new(location)
    }
}

// -0.0 and 0.0 are the same spot.
fn canonical_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

/// Buckets of points keyed by exact location.
#[derive(Debug, Default, Clone)]
pub struct LocationIndex {
    buckets: FxHashMap<LocationKey, LocationBucket>,
    order: Vec<LocationKey>,
}

impl LocationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a point at a location.
    pub fn insert(&mut self, key: PointKey, location: &Point3<f64>) {
        let loc = LocationKey::new(location);
        let bucket = self.buckets.entry(loc).or_insert_with(|| {
            self.order.push(loc);
            LocationBucket::new()
        });
        if !bucket.contains(&key) {
            bucket.push(key);
        }
    }

    /// Unregisters a point. Returns `true` if it was indexed.
    pub fn remove(&mut self, key: PointKey, location: &Point3<f64>) -> bool {
        let loc = LocationKey::new(location);
        let Some(bucket) = self.buckets.get_mut(&loc) else {
            return false;
        };
        let before = bucket.len();
        bucket.retain(|k| *k != key);
        let removed = bucket.len() != before;
        if bucket.is_empty() {
            self.buckets.remove(&loc);
            self.order.retain(|l| *l != loc);
        }
        removed
    }

    /// Points registered at exactly this location.
    pub fn at(&self, location: &Point3<f64>) -> &[PointKey] {
        self.buckets
            .get(&LocationKey::new(location))
            .map(|b| b.as_slice())
            .unwrap_or(&[])
    }

    /// Locations holding more than one point, in first-seen order.
    pub fn shared(&self) -> impl Iterator<Item = &LocationBucket> + '_ {
        self.order
            .iter()
            .filter_map(|loc| self.buckets.get(loc))
            .filter(|bucket| bucket.len() > 1)
    }

    /// Number of distinct locations.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
