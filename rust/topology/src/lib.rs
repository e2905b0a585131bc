// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Cave-Carto Topology
//!
//! Room model for cave cartography.
//!
//! A [`CartographyRoom`] owns its points, groups and junctions in slot maps
//! with stable keys. A group is an ordered list of points of one category
//! (a wall, a column, a chasm edge); a junction records the points two groups
//! share. Each point belongs to exactly one group, and a room has at most one
//! outline group.
//!
//! Groups reference points by key, points record their owning group and
//! junctions reference both by key, so there are no ownership cycles.

pub mod construction;
pub mod error;
pub mod group;
pub mod junction;
pub mod keys;
pub mod point;
pub mod query;
pub mod room;
pub mod serialization;
pub mod spatial;

pub use error::{Error, Result};
pub use group::{group_name, CartographyGroup};
pub use junction::CartographyJunction;
pub use keys::{GroupKey, GroupPair, JunctionKey, PointKey};
pub use point::{CartographyPoint, PointOrigin};
pub use room::CartographyRoom;
pub use serialization::RoomSnapshot;
pub use spatial::{LocationBucket, LocationIndex, LocationKey};
