// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point and group categories.
//!
//! A [`Category`] is a closed enumeration. Its type tag and drawing options are
//! looked up in a static table instead of being carried by each value, so
//! matching on a category stays exhaustive.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Primary classification of a point or group.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    // Structural
    Outline,
    Gate,
    Escarpment,
    Basement,
    Landing,
    Column,
    ColumnBase,
    Chasm,

    // Structural and interest
    Recess,
    Bank,

    // Interest
    ClimbingPoint,
    Harvestable,
    AnthropogenicObject,
    Structure,

    Unknown,
}

/// Type tag of a category.
///
/// Structural and interest are not exclusive: a bank is a wall that is also
/// worth a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryType {
    Structural,
    Interest,
    StructuralInterest,
    Unknown,
}

impl CategoryType {
    pub fn is_structural(&self) -> bool {
        matches!(self, CategoryType::Structural | CategoryType::StructuralInterest)
    }

    pub fn is_interest(&self) -> bool {
        matches!(self, CategoryType::Interest | CategoryType::StructuralInterest)
    }
}

/// Options consumed by the geometry stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryOptions {
    /// The group is the room boundary.
    pub outline: bool,
    /// Vertical extrusion height (negative for pits), 0 for none.
    pub level: f64,
    /// A ground face must be built from the group polygon.
    pub ground: bool,
    /// Points form a sub-polygon rather than standalone markers.
    pub structured: bool,
    /// Points must carry an interest type.
    pub detailed_required: bool,
}

impl CategoryOptions {
    const fn new(outline: bool, level: f64, ground: bool, structured: bool) -> Self {
        Self {
            outline,
            level,
            ground,
            structured,
            detailed_required: false,
        }
    }

    const fn marker(detailed_required: bool) -> Self {
        Self {
            outline: false,
            level: 0.0,
            ground: false,
            structured: false,
            detailed_required,
        }
    }
}

const OUTLINE: CategoryOptions = CategoryOptions::new(true, 0.0, true, true);
const GATE: CategoryOptions = CategoryOptions::new(true, 0.0, false, true);
const WALL: CategoryOptions = CategoryOptions::new(false, 0.0, false, true);
const FLOOR: CategoryOptions = CategoryOptions::new(false, 0.0, true, true);
const COLUMN: CategoryOptions = CategoryOptions::new(false, 5.0, false, true);
const CHASM: CategoryOptions = CategoryOptions::new(false, -5.0, true, true);
const MARKER: CategoryOptions = CategoryOptions::marker(false);
const DETAILED_MARKER: CategoryOptions = CategoryOptions::marker(true);

impl Category {
    /// Every category in declaration order.
    pub const ALL: [Category; 15] = [
        Category::Outline,
        Category::Gate,
        Category::Escarpment,
        Category::Basement,
        Category::Landing,
        Category::Column,
        Category::ColumnBase,
        Category::Chasm,
        Category::Recess,
        Category::Bank,
        Category::ClimbingPoint,
        Category::Harvestable,
        Category::AnthropogenicObject,
        Category::Structure,
        Category::Unknown,
    ];

    /// Canonical upper-case name, also used to build group names.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Outline => "OUTLINE",
            Category::Gate => "GATE",
            Category::Escarpment => "ESCARPMENT",
            Category::Basement => "BASEMENT",
            Category::Landing => "LANDING",
            Category::Column => "COLUMN",
            Category::ColumnBase => "COLUMN_BASE",
            Category::Chasm => "CHASM",
            Category::Recess => "RECESS",
            Category::Bank => "BANK",
            Category::ClimbingPoint => "CLIMBING_POINT",
            Category::Harvestable => "HARVESTABLE",
            Category::AnthropogenicObject => "ANTHROPOGENIC_OBJECT",
            Category::Structure => "STRUCTURE",
            Category::Unknown => "UNKNOWN",
        }
    }

    pub fn category_type(&self) -> CategoryType {
        match self {
            Category::Outline
            | Category::Gate
            | Category::Escarpment
            | Category::Basement
            | Category::Landing
            | Category::Column
            | Category::ColumnBase
            | Category::Chasm => CategoryType::Structural,
            Category::Recess | Category::Bank => CategoryType::StructuralInterest,
            Category::ClimbingPoint
            | Category::Harvestable
            | Category::AnthropogenicObject
            | Category::Structure => CategoryType::Interest,
            Category::Unknown => CategoryType::Unknown,
        }
    }

    pub fn options(&self) -> &'static CategoryOptions {
        match self {
            Category::Outline => &OUTLINE,
            Category::Gate => &GATE,
            Category::Escarpment | Category::Recess => &WALL,
            Category::Basement | Category::Landing | Category::ColumnBase | Category::Bank => {
                &FLOOR
            }
            Category::Column => &COLUMN,
            Category::Chasm => &CHASM,
            Category::Harvestable | Category::AnthropogenicObject => &DETAILED_MARKER,
            Category::ClimbingPoint | Category::Structure | Category::Unknown => &MARKER,
        }
    }

    /// Part of the single room boundary.
    pub fn is_outline(&self) -> bool {
        self.options().outline
    }

    /// Points of this category must carry an interest type.
    pub fn requires_interest(&self) -> bool {
        self.options().detailed_required
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Parses a canonical name, ignoring case (`"column_base"` is accepted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.name() == upper)
            .ok_or_else(|| format!("unknown category <{}>", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_outline_and_gate_are_outline() {
        let outlines: Vec<_> = Category::ALL.iter().filter(|c| c.is_outline()).collect();
        assert_eq!(outlines, vec![&Category::Outline, &Category::Gate]);
    }

    #[test]
    fn detailed_categories_require_interest() {
        assert!(Category::Harvestable.requires_interest());
        assert!(Category::AnthropogenicObject.requires_interest());
        assert!(!Category::ClimbingPoint.requires_interest());
        assert!(!Category::Column.requires_interest());
    }

    #[test]
    fn hybrid_categories_are_both_types() {
        let bank = Category::Bank.category_type();
        assert!(bank.is_structural());
        assert!(bank.is_interest());

        assert!(Category::Column.category_type().is_structural());
        assert!(!Category::Column.category_type().is_interest());
        assert!(!Category::Unknown.category_type().is_structural());
    }

    #[test]
    fn column_levels() {
        assert_eq!(Category::Column.options().level, 5.0);
        assert_eq!(Category::Chasm.options().level, -5.0);
        assert!(Category::Chasm.options().ground);
    }

    #[test]
    fn name_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.name().parse::<Category>().unwrap(), category);
        }
        assert_eq!("column_base".parse::<Category>().unwrap(), Category::ColumnBase);
        assert!("stalagmite".parse::<Category>().is_err());
    }

    #[test]
    fn serde_uses_canonical_names() {
        let json = serde_json::to_string(&Category::ClimbingPoint).unwrap();
        assert_eq!(json, "\"CLIMBING_POINT\"");
    }
}
