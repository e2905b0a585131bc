// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Cave-Carto Core
//!
//! Category model and label classifier for hand-written cave survey notes.
//!
//! - **Categories**: the closed set of point/group categories with their
//!   immutable drawing options ([`Category`], [`CategoryOptions`])
//! - **Interest types**: secondary classification of interest points
//!   ([`InterestType`], [`Interest`])
//! - **Pattern configuration**: multilingual synonym tables loaded once at
//!   startup ([`PatternConfig`])
//! - **Classifier**: compiled patterns mapping free-text labels to categories
//!   and interest types ([`Classifier`])
//!
//! ## Quick Start
//!
//! ```rust
//! use cave_carto_core::{Category, Classifier, PatternConfig};
//!
//! let classifier = Classifier::new(&PatternConfig::default()).unwrap();
//! let found = classifier
//!     .classify_category("Colonne 2", 1, None, true)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(found.category, Category::Column);
//! assert_eq!(found.number, Some(2));
//! ```

pub mod category;
pub mod classifier;
pub mod config;
pub mod error;
pub mod interest;

pub use category::{Category, CategoryOptions, CategoryType};
pub use classifier::{CategoryMatch, Classifier, MatchStrategy};
pub use config::{CategoryPatterns, InterestPatterns, PatternConfig, PATTERNS_ENV};
pub use error::{Error, Result};
pub use interest::{Interest, InterestType};
