// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Cave-Carto Processing
//!
//! Turns the point records of a survey file into a resolved
//! [`CartographyRoom`](cave_carto_topology::CartographyRoom).
//!
//! - **Parser**: classifies each record and places it in its group
//!   ([`CartographyParser`])
//! - **Groups**: canonical group resolution and column base linking
//!   ([`group`])
//! - **Junctions**: groups joined where their points share a location
//!   ([`junction`])
//! - **Compatibility**: categories read from observations ([`observation`])
//!   and junctions written as text ([`splice`]) for older files
//!
//! ## Quick Start
//!
//! ```rust
//! use cave_carto_core::Classifier;
//! use cave_carto_processing::{CartographyFile, CartographyParser, PointRecord};
//! use nalgebra::Point3;
//!
//! let classifier = Classifier::with_defaults().unwrap();
//! let file = CartographyFile::new("Salle 1")
//!     .with_point(PointRecord::new(1, "P1", Point3::new(0.0, 0.0, 0.0)).with_category("Contour"))
//!     .with_point(PointRecord::new(2, "P2", Point3::new(10.0, 0.0, 0.0)).with_category("Porte"));
//!
//! let room = CartographyParser::new(&classifier).parse(&file).unwrap();
//! assert_eq!(room.group_by_name("OUTLINE").unwrap().len(), 2);
//! ```

pub mod error;
pub mod group;
pub mod junction;
pub mod observation;
pub mod parser;
pub mod record;
pub mod splice;

pub use error::{Error, Result};
pub use observation::ObservedPoint;
pub use parser::{CartographyParser, ParserOptions};
pub use record::{CartographyFile, PointRecord};
