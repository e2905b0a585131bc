// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interest types refining interest points.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Secondary classification of an interest point.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterestType {
    // Objects
    Box,
    LittleBox,

    // Harvestables
    Lichen,
    Ore,
    Feces,

    Unknown,
}

impl InterestType {
    pub const ALL: [InterestType; 6] = [
        InterestType::Box,
        InterestType::LittleBox,
        InterestType::Lichen,
        InterestType::Ore,
        InterestType::Feces,
        InterestType::Unknown,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InterestType::Box => "BOX",
            InterestType::LittleBox => "LITTLE_BOX",
            InterestType::Lichen => "LICHEN",
            InterestType::Ore => "ORE",
            InterestType::Feces => "FECES",
            InterestType::Unknown => "UNKNOWN",
        }
    }

    /// Category this interest type refines, if any.
    pub fn parent(&self) -> Option<Category> {
        match self {
            InterestType::Box | InterestType::LittleBox => Some(Category::AnthropogenicObject),
            InterestType::Lichen | InterestType::Ore | InterestType::Feces => {
                Some(Category::Harvestable)
            }
            InterestType::Unknown => None,
        }
    }
}

impl fmt::Display for InterestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InterestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        InterestType::ALL
            .iter()
            .copied()
            .find(|i| i.name() == upper)
            .ok_or_else(|| format!("unknown interest type <{}>", s))
    }
}

/// An interest type with how many items were observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interest {
    pub kind: InterestType,
    pub quantity: u32,
}

impl Interest {
    pub fn new(kind: InterestType, quantity: u32) -> Self {
        Self { kind, quantity }
    }

    pub fn single(kind: InterestType) -> Self {
        Self::new(kind, 1)
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quantity == 1 {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} x{}", self.kind, self.quantity)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parents() {
        assert_eq!(InterestType::Box.parent(), Some(Category::AnthropogenicObject));
        assert_eq!(InterestType::Lichen.parent(), Some(Category::Harvestable));
        assert_eq!(InterestType::Unknown.parent(), None);
    }

    #[test]
    fn display_includes_quantity() {
        assert_eq!(Interest::single(InterestType::Ore).to_string(), "ORE");
        assert_eq!(Interest::new(InterestType::Box, 3).to_string(), "BOX x3");
    }

    #[test]
    fn parse_names() {
        assert_eq!("little_box".parse::<InterestType>().unwrap(), InterestType::LittleBox);
        assert!("gold".parse::<InterestType>().is_err());
    }
}
