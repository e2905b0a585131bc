// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Group resolution and linking.

use cave_carto_core::Category;
use cave_carto_topology::{group_name, CartographyGroup, CartographyRoom, GroupKey};

use crate::error::Result;

/// Finds the group for a category and number, creating it on first use.
///
/// Outline categories always resolve to the room's single `OUTLINE` group.
/// `label` is the raw text the category came from.
pub fn get_or_create(
    room: &mut CartographyRoom,
    row: usize,
    category: Category,
    label: &str,
    number: u32,
) -> Result<GroupKey> {
    let name = group_name(category, number);

    if let Some(key) = room.group_key(&name) {
        tracing::debug!(group = %name, label, "Use existing group");
        return Ok(key);
    }
    if category.is_outline() {
        if let Some(key) = room.outline_group() {
            tracing::debug!(group = %name, label, "Use existing outline group");
            return Ok(key);
        }
    }

    tracing::debug!(group = %name, label, row, "Create new group");
    Ok(room.add_group(CartographyGroup::for_category(category, number))?)
}

/// Links every `COLUMN_BASE N` group to its `COLUMN N` group.
///
/// Returns the number of links made. A base without a column is logged and
/// left unlinked.
pub fn link_groups(room: &mut CartographyRoom) -> Result<usize> {
    let bases: Vec<(GroupKey, String, u32)> = room
        .groups_by_category(Category::ColumnBase)
        .map(|(key, group)| (key, group.name.clone(), group.number()))
        .collect();

    let mut linked = 0;
    for (base, base_name, number) in bases {
        let column_name = group_name(Category::Column, number);
        match room.group_key(&column_name) {
            Some(column) => {
                tracing::debug!(base = %base_name, column = %column_name, "Link column base");
                room.link_groups(base, column)?;
                linked += 1;
            }
            None => {
                tracing::warn!(base = %base_name, column = %column_name, "Column not found for column base");
            }
        }
    }
    Ok(linked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_extends_the_outline() {
        let mut room = CartographyRoom::new("r");
        let outline = get_or_create(&mut room, 1, Category::Outline, "Contour", 0).unwrap();
        let gate = get_or_create(&mut room, 2, Category::Gate, "Porte 2", 2).unwrap();
        assert_eq!(outline, gate);
        assert_eq!(room.group_count(), 1);
        assert_eq!(room.outline_group(), Some(outline));
    }

    #[test]
    fn numbers_separate_groups() {
        let mut room = CartographyRoom::new("r");
        let c1 = get_or_create(&mut room, 1, Category::Column, "Column 1", 1).unwrap();
        let c1_again = get_or_create(&mut room, 2, Category::Column, "Pilier 1", 1).unwrap();
        let c2 = get_or_create(&mut room, 3, Category::Column, "Column 2", 2).unwrap();
        assert_eq!(c1, c1_again);
        assert_ne!(c1, c2);
        assert_eq!(room.group(c2).unwrap().name, "COLUMN 2");
    }

    #[test]
    fn existing_outline_is_reused() {
        let mut room = CartographyRoom::new("r");
        room.add_group(CartographyGroup::new("Imported boundary", Category::Outline))
            .unwrap();
        let key = get_or_create(&mut room, 4, Category::Gate, "Gate", 0).unwrap();
        assert_eq!(room.group(key).unwrap().name, "Imported boundary");
    }

    #[test]
    fn bases_link_to_matching_columns() {
        let mut room = CartographyRoom::new("r");
        let base3 = get_or_create(&mut room, 1, Category::ColumnBase, "Base colonne 3", 3).unwrap();
        let column3 = get_or_create(&mut room, 2, Category::Column, "Colonne 3", 3).unwrap();
        let base4 = get_or_create(&mut room, 3, Category::ColumnBase, "Base colonne 4", 4).unwrap();

        assert_eq!(link_groups(&mut room).unwrap(), 1);
        assert_eq!(room.group(base3).unwrap().linked(), &[column3]);
        assert!(room.group(base4).unwrap().linked().is_empty());
    }
}
