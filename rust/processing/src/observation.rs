// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Categories read from free-text observations.
//!
//! Older survey files carry no category column: the categories are written
//! in the observation text ("Gate, 2 boxes; near the column"). Each clause
//! naming a category becomes its own point.

use cave_carto_core::{Category, Classifier, Interest};

use crate::error::Result;
use crate::record::PointRecord;

/// A point derived from one observation clause.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedPoint {
    /// Record name followed by the clause, e.g. `P4 (Gate 2)`.
    pub name: String,
    pub category: Category,
    pub number: Option<u32>,
    pub clause: String,
    /// Categories named by the record's other clauses.
    pub additional_categories: Vec<Category>,
    pub interest: Option<Interest>,
}

/// Splits a record's observations into one point per categorized clause.
///
/// A record whose observations name no category fails with a parse error.
pub fn observed_points(classifier: &Classifier, record: &PointRecord) -> Result<Vec<ObservedPoint>> {
    let text = record.observations.join(", ");
    // "Junction with column 2" names another group, not this point.
    let matches: Vec<_> = classifier
        .scan_observations(&text)
        .into_iter()
        .filter(|found| classifier.junction_reference(&found.fragment).is_none())
        .collect();
    if matches.is_empty() {
        return Err(cave_carto_core::Error::parse(
            record.row,
            text,
            "point category in observations",
            classifier.category_patterns(),
        )
        .into());
    }

    let fallback_interest = classifier.find_interest(text.split([',', ';']));
    let points = matches
        .iter()
        .enumerate()
        .map(|(i, found)| ObservedPoint {
            name: format!("{} ({})", record.name, found.fragment),
            category: found.category,
            number: found.number,
            clause: found.fragment.clone(),
            additional_categories: matches
                .iter()
                .enumerate()
                .filter(|(j, other)| *j != i && other.category != found.category)
                .map(|(_, other)| other.category)
                .collect(),
            interest: classifier
                .find_interest([found.fragment.as_str()])
                .or(fallback_interest.filter(|_| found.category.category_type().is_interest())),
        })
        .collect();
    Ok(points)
}
