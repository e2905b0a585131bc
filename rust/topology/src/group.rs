// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point groups.

use cave_carto_core::Category;

use crate::keys::{GroupKey, PointKey};

/// Canonical group name: the category name, plus the number when non-zero.
///
/// Every outline category folds into `OUTLINE`: a room has a single boundary.
pub fn group_name(category: Category, number: u32) -> String {
    if category.is_outline() {
        Category::Outline.name().to_string()
    } else if number > 0 {
        format!("{} {}", category.name(), number)
    } else {
        category.name().to_string()
    }
}

/// Ordered points of one category.
///
/// Point order is the polygon winding or wall sequence.
#[derive(Debug, Clone)]
pub struct CartographyGroup {
    pub name: String,
    pub category: Category,
    pub(crate) points: Vec<PointKey>,
    pub(crate) linked: Vec<GroupKey>,
}

impl CartographyGroup {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
            points: Vec::new(),
            linked: Vec::new(),
        }
    }

    /// Group for a category and number, named canonically.
    pub fn for_category(category: Category, number: u32) -> Self {
        let category = if category.is_outline() {
            Category::Outline
        } else {
            category
        };
        Self::new(group_name(category, number), category)
    }

    pub fn points(&self) -> &[PointKey] {
        &self.points
    }

    /// Groups this one depends on (a column base links its column).
    pub fn linked(&self) -> &[GroupKey] {
        &self.linked
    }

    /// Number parsed from the trailing part of the name, 0 when absent.
    pub fn number(&self) -> u32 {
        self.name
            .rsplit_once(' ')
            .and_then(|(_, n)| n.parse().ok())
            .unwrap_or(0)
    }

    pub fn first_point(&self) -> Option<PointKey> {
        self.points.first().copied()
    }

    pub fn last_point(&self) -> Option<PointKey> {
        self.points.last().copied()
    }

    pub fn contains(&self, point: PointKey) -> bool {
        self.points.contains(&point)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_outline(&self) -> bool {
        self.category.is_outline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names() {
        assert_eq!(group_name(Category::Column, 2), "COLUMN 2");
        assert_eq!(group_name(Category::Column, 0), "COLUMN");
        assert_eq!(group_name(Category::ColumnBase, 3), "COLUMN_BASE 3");
        assert_eq!(group_name(Category::Outline, 4), "OUTLINE");
        assert_eq!(group_name(Category::Gate, 2), "OUTLINE");
    }

    #[test]
    fn gate_group_is_the_outline() {
        let group = CartographyGroup::for_category(Category::Gate, 1);
        assert_eq!(group.name, "OUTLINE");
        assert_eq!(group.category, Category::Outline);
        assert!(group.is_outline());
    }

    #[test]
    fn number_from_name() {
        assert_eq!(CartographyGroup::for_category(Category::Chasm, 12).number(), 12);
        assert_eq!(CartographyGroup::for_category(Category::Chasm, 0).number(), 0);
        assert_eq!(CartographyGroup::for_category(Category::Gate, 5).number(), 0);
    }
}
