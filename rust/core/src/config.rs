// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pattern configuration for the classifier.
//!
//! Synonyms are regular expressions matched case-insensitively. Entries are
//! kept as ordered lists because declaration order breaks ties between
//! categories matching the same label.
//!
//! ```json
//! {
//!   "categories": [
//!     { "category": "OUTLINE", "patterns": ["Outline", "Contour"] },
//!     { "category": "GATE", "patterns": ["Gate", "Porte", "Entr[ée]e"] }
//!   ],
//!   "interests": [
//!     { "interest": "LICHEN", "patterns": ["Lichens?"] }
//!   ]
//! }
//! ```
//!
//! Sections missing from a JSON document keep their built-in defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::Result;
use crate::interest::InterestType;

/// Environment variable naming a JSON pattern file.
pub const PATTERNS_ENV: &str = "CAVE_CARTO_PATTERNS";

/// Synonyms for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPatterns {
    pub category: Category,
    pub patterns: Vec<String>,
}

/// Synonyms for one interest type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestPatterns {
    pub interest: InterestType,
    pub patterns: Vec<String>,
}

/// Pattern tables, loaded once and handed to [`crate::Classifier::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub categories: Vec<CategoryPatterns>,
    pub interests: Vec<InterestPatterns>,
    /// Words that turn a category mention into a mere landmark
    /// ("near the column").
    pub proximity: Vec<String>,
    /// Words introducing a textual junction reference.
    pub junction: Vec<String>,
}

impl PatternConfig {
    /// Decodes a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON pattern file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Loads the file named by `CAVE_CARTO_PATTERNS`, or the built-in
    /// patterns when the variable is unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var(PATTERNS_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_path(path.trim()),
            _ => Ok(Self::default()),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Patterns declared for a category, empty if none.
    pub fn category_patterns(&self, category: Category) -> &[String] {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.patterns.as_slice())
            .unwrap_or(&[])
    }
}

fn category(category: Category, patterns: &[&str]) -> CategoryPatterns {
    CategoryPatterns {
        category,
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
    }
}

fn interest(interest: InterestType, patterns: &[&str]) -> InterestPatterns {
    InterestPatterns {
        interest,
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            categories: vec![
                category(Category::Outline, &["Outline", "Contour"]),
                category(Category::Gate, &["Gate", "Porte", "Entr[ée]e"]),
                category(Category::Escarpment, &["Escarpment", "Escarpement"]),
                category(Category::Basement, &["Basement", "Sou(s-)?bassement"]),
                category(Category::Landing, &["Landing", "Plateau"]),
                category(Category::Column, &["Column", "Colonn?e", "Pilier"]),
                category(
                    Category::ColumnBase,
                    &["Column base", "Base colonn?e", "Base pilier"],
                ),
                category(Category::Chasm, &["Chasm", "Gouffre"]),
                category(Category::Bank, &["Bank", "Talus( de pierr?e)?", "[Eé]bouli"]),
                category(Category::Recess, &["Recess", "Renfoncement"]),
                category(
                    Category::ClimbingPoint,
                    &["Climbing ?Point", "Point( d['’ ]?)?escalade"],
                ),
                category(Category::Harvestable, &["Harvestables?", "Consommables?"]),
                category(
                    Category::AnthropogenicObject,
                    &["(Anthropogenics? )?Objects?", "Objets?( Anthropiques?)?"],
                ),
                category(Category::Structure, &["Structure"]),
            ],
            interests: vec![
                interest(
                    InterestType::LittleBox,
                    &["Littles? box(es)?", "Petites? caisses?"],
                ),
                interest(
                    InterestType::Box,
                    &["Big box(es)?", "Grosses? caisses?", "Box(es)?", "Caisses?"],
                ),
                interest(InterestType::Lichen, &["Lichens?"]),
                interest(InterestType::Ore, &["Ores?", "Minerais?"]),
                interest(
                    InterestType::Feces,
                    &["Feces?", "(Mati[èe]res? )?f[ée]cales?", "Extr[ée]ments?"],
                ),
            ],
            proximity: ["proximity", "near", "proximité", "proche"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
            junction: ["Junction", "Jonction"].iter().map(|w| w.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_covers_every_known_category() {
        let config = PatternConfig::default();
        for category in Category::ALL {
            if category == Category::Unknown {
                continue;
            }
            assert!(
                !config.category_patterns(category).is_empty(),
                "no pattern for {}",
                category
            );
        }
        assert!(config.category_patterns(Category::Unknown).is_empty());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{
            "categories": [
                { "category": "COLUMN", "patterns": ["Säule"] }
            ]
        }"#;
        let config = PatternConfig::from_json(json).unwrap();
        assert_eq!(config.categories.len(), 1);
        assert_eq!(config.category_patterns(Category::Column), ["Säule".to_string()]);
        assert_eq!(config.interests, PatternConfig::default().interests);
        assert_eq!(config.proximity, PatternConfig::default().proximity);
    }

    #[test]
    fn invalid_json_is_config_error() {
        let err = PatternConfig::from_json("{ categories: ").unwrap_err();
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn unknown_category_name_is_rejected() {
        let json = r#"{ "categories": [ { "category": "STALAGMITE", "patterns": ["x"] } ] }"#;
        assert!(PatternConfig::from_json(json).is_err());
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = PatternConfig::from_path("/nonexistent/patterns.json").unwrap_err();
        assert!(err.to_string().contains("IO error"));
    }
}
