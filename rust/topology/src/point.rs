// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cartography points.

use std::collections::BTreeSet;
use std::fmt;

use cave_carto_core::{Category, Interest};
use nalgebra::Point3;

use crate::keys::{GroupKey, PointKey};

/// Where a point comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointOrigin {
    /// Parsed from a survey record.
    Surveyed,
    /// Synthesized from another point while splicing groups, possibly with
    /// its height moved to the host group's level. Not authoritative for
    /// display.
    Derived { source: PointKey },
}

/// One physical location in a room.
#[derive(Debug, Clone)]
pub struct CartographyPoint {
    pub name: String,
    /// Source row, for diagnostics.
    pub row: usize,
    /// Number distinguishing same-category groups, 0 when absent.
    pub group_identifier: u32,
    pub comments: Vec<String>,
    pub category: Category,
    pub location: Point3<f64>,
    pub observations: Vec<String>,
    pub interest: Option<Interest>,
    /// Other categories this point belongs to.
    pub additional_categories: BTreeSet<Category>,
    pub origin: PointOrigin,
    pub(crate) group: Option<GroupKey>,
}

impl CartographyPoint {
    pub fn new(name: impl Into<String>, category: Category, location: Point3<f64>) -> Self {
        Self {
            name: name.into(),
            row: 0,
            group_identifier: 0,
            comments: Vec::new(),
            category,
            location,
            observations: Vec::new(),
            interest: None,
            additional_categories: BTreeSet::new(),
            origin: PointOrigin::Surveyed,
            group: None,
        }
    }

    /// Name followed by the comments, e.g. `P12 (Gate, 2 boxes)`.
    pub fn label(&self) -> String {
        if self.comments.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.comments.join(", "))
        }
    }

    pub fn has_category(&self, category: Category) -> bool {
        self.category == category || self.additional_categories.contains(&category)
    }

    /// Primary category plus additional ones.
    pub fn all_categories(&self) -> BTreeSet<Category> {
        let mut all = self.additional_categories.clone();
        all.insert(self.category);
        all
    }

    /// Adds categories to the additional set. The primary category is
    /// never repeated there.
    pub fn absorb_categories(&mut self, categories: impl IntoIterator<Item = Category>) {
        let primary = self.category;
        self.additional_categories
            .extend(categories.into_iter().filter(|c| *c != primary));
    }

    /// Same category, interest, group number and exact location.
    pub fn is_same(&self, other: &CartographyPoint) -> bool {
        self.category == other.category
            && self.interest == other.interest
            && self.group_identifier == other.group_identifier
            && self.location == other.location
    }

    pub fn is_derived(&self) -> bool {
        matches!(self.origin, PointOrigin::Derived { .. })
    }

    /// Owning group, `None` while detached.
    pub fn group(&self) -> Option<GroupKey> {
        self.group
    }
}

impl fmt::Display for CartographyPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] ({}, {}, {})",
            self.label(),
            self.category,
            self.location.x,
            self.location.y,
            self.location.z
        )?;
        if let Some(interest) = &self.interest {
            write!(f, " {}", interest)?;
        }
        if self.is_derived() {
            f.write_str(" derived")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cave_carto_core::InterestType;

    #[test]
    fn label_joins_comments() {
        let mut point = CartographyPoint::new("P1", Category::Gate, Point3::origin());
        assert_eq!(point.label(), "P1");
        point.comments.push("Porte".into());
        point.comments.push("2 boxes".into());
        assert_eq!(point.label(), "P1 (Porte, 2 boxes)");
    }

    #[test]
    fn categories_include_primary() {
        let mut point = CartographyPoint::new("P1", Category::Gate, Point3::origin());
        point.absorb_categories([Category::Outline]);
        assert!(point.has_category(Category::Gate));
        assert!(point.has_category(Category::Outline));
        assert!(!point.has_category(Category::Column));
        assert_eq!(
            point.all_categories().into_iter().collect::<Vec<_>>(),
            vec![Category::Outline, Category::Gate]
        );
    }

    #[test]
    fn absorbed_primary_is_not_repeated() {
        let mut point = CartographyPoint::new("P1", Category::Bank, Point3::origin());
        point.absorb_categories([Category::Bank, Category::Outline, Category::Gate]);
        assert!(!point.additional_categories.contains(&Category::Bank));
        assert_eq!(point.additional_categories.len(), 2);
        assert_eq!(point.all_categories().len(), 3);
    }

    #[test]
    fn sameness_ignores_name() {
        let a = CartographyPoint::new("A", Category::Column, Point3::new(1.0, 2.0, 3.0));
        let mut b = CartographyPoint::new("B", Category::Column, Point3::new(1.0, 2.0, 3.0));
        assert!(a.is_same(&b));

        b.interest = Some(Interest::single(InterestType::Ore));
        assert!(!a.is_same(&b));
    }

    #[test]
    fn display_marks_derived_points() {
        let mut point = CartographyPoint::new("P1", Category::Outline, Point3::new(1.0, 0.0, 2.0));
        assert_eq!(point.to_string(), "P1 [OUTLINE] (1, 0, 2)");
        point.origin = PointOrigin::Derived {
            source: PointKey::default(),
        };
        assert!(point.to_string().ends_with("derived"));
    }
}
