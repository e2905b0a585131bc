// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point parser: survey records in, resolved room out.
//!
//! Records are classified and grouped one by one, in file order. Once every
//! record is placed, post-treatments join the groups: textual junctions
//! (when enabled), junctions at shared locations, then column base links.

use std::time::Instant;

use cave_carto_core::{Category, Classifier, Interest};
use cave_carto_topology::{CartographyPoint, CartographyRoom, PointKey};

use crate::error::Result;
use crate::record::{CartographyFile, PointRecord};
use crate::{group, junction, observation, splice};

/// Compatibility switches for older survey files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Read categories from the observations of records without a
    /// category label.
    pub observation_fallback: bool,
    /// Splice groups at "Junction with ..." observations before the
    /// shared-location pass.
    pub textual_junctions: bool,
}

impl ParserOptions {
    /// Every compatibility path enabled.
    pub fn legacy() -> Self {
        Self {
            observation_fallback: true,
            textual_junctions: true,
        }
    }
}

/// A classified point waiting for its group.
struct PendingPoint<'r> {
    record: &'r PointRecord,
    name: String,
    category: Category,
    /// Text the category came from.
    label: String,
    number: u32,
    comments: Vec<String>,
    interest: Option<Interest>,
    additional_categories: Vec<Category>,
}

/// Parses survey files into rooms.
///
/// The classifier is built once and shared by every parse.
#[derive(Debug, Clone)]
pub struct CartographyParser<'c> {
    classifier: &'c Classifier,
    options: ParserOptions,
}

impl<'c> CartographyParser<'c> {
    pub fn new(classifier: &'c Classifier) -> Self {
        Self::with_options(classifier, ParserOptions::default())
    }

    pub fn with_options(classifier: &'c Classifier, options: ParserOptions) -> Self {
        Self {
            classifier,
            options,
        }
    }

    pub fn options(&self) -> ParserOptions {
        self.options
    }

    /// Parses one file into a room.
    ///
    /// The first fatal condition aborts the parse; no partial room is
    /// returned.
    pub fn parse(&self, file: &CartographyFile) -> Result<CartographyRoom> {
        let start = Instant::now();
        tracing::info!(room = %file.name, records = file.points.len(), "Starting point parsing");

        let mut room = CartographyRoom::new(file.name.clone());
        for record in &file.points {
            self.parse_record(&mut room, record)?;
        }

        let spliced = if self.options.textual_junctions {
            splice::splice_junctions(&mut room, self.classifier)?
        } else {
            0
        };
        let junction_points = junction::determine_junctions(&mut room)?;
        let links = group::link_groups(&mut room)?;

        tracing::info!(
            room = %room.name,
            groups = room.group_count(),
            points = room.point_count(),
            junctions = room.junction_count(),
            junction_points,
            spliced,
            links,
            parse_time_ms = start.elapsed().as_millis() as u64,
            "Point parsing complete"
        );
        Ok(room)
    }

    fn parse_record(&self, room: &mut CartographyRoom, record: &PointRecord) -> Result<()> {
        match record.category_label() {
            Some(label) => {
                let found = self
                    .classifier
                    .classify_category(label, record.row, None, true)?
                    .ok_or_else(|| {
                        cave_carto_core::Error::parse(
                            record.row,
                            label,
                            "point category",
                            self.classifier.category_patterns(),
                        )
                    })?;
                let interest = self.parse_interest(record, found.category)?;
                self.add_point(
                    room,
                    PendingPoint {
                        record,
                        name: record.name.clone(),
                        category: found.category,
                        label: label.to_string(),
                        number: record.group_number.or(found.number).unwrap_or(0),
                        comments: vec![found.fragment],
                        interest,
                        additional_categories: Vec::new(),
                    },
                )?;
            }
            None if self.options.observation_fallback => {
                for observed in observation::observed_points(self.classifier, record)? {
                    if observed.category.requires_interest() && observed.interest.is_none() {
                        return Err(cave_carto_core::Error::parse(
                            record.row,
                            observed.clause,
                            "point interest",
                            self.classifier.interest_patterns(),
                        )
                        .into());
                    }
                    self.add_point(
                        room,
                        PendingPoint {
                            record,
                            name: observed.name,
                            category: observed.category,
                            label: observed.clause.clone(),
                            number: record.group_number.or(observed.number).unwrap_or(0),
                            comments: vec![observed.clause],
                            interest: observed.interest,
                            additional_categories: observed.additional_categories,
                        },
                    )?;
                }
            }
            None => {
                let interest = self.parse_interest(record, Category::Unknown)?;
                self.add_point(
                    room,
                    PendingPoint {
                        record,
                        name: record.name.clone(),
                        category: Category::Unknown,
                        label: String::new(),
                        number: record.group_number.unwrap_or(0),
                        comments: Vec::new(),
                        interest,
                        additional_categories: Vec::new(),
                    },
                )?;
            }
        }
        Ok(())
    }

    /// Interest of a record. Mandatory for categories that need one, even
    /// when the record has no interest label.
    fn parse_interest(&self, record: &PointRecord, category: Category) -> Result<Option<Interest>> {
        let required = category.requires_interest();
        match record.interest_label() {
            Some(label) => Ok(self.classifier.classify_interest(label, record.row, required)?),
            None if required => Err(cave_carto_core::Error::parse(
                record.row,
                "",
                "point interest",
                self.classifier.interest_patterns(),
            )
            .into()),
            None => Ok(None),
        }
    }

    /// Places a point in its group, merging it into a point already there
    /// at the same location.
    fn add_point(&self, room: &mut CartographyRoom, pending: PendingPoint<'_>) -> Result<PointKey> {
        let record = pending.record;
        let group = group::get_or_create(
            room,
            record.row,
            pending.category,
            &pending.label,
            pending.number,
        )?;

        let mut point = CartographyPoint::new(pending.name, pending.category, record.location);
        point.row = record.row;
        point.group_identifier = pending.number;
        point.comments = pending.comments;
        point.observations = record.observations.clone();
        point.interest = pending.interest;
        point.absorb_categories(pending.additional_categories);
        if let Some(interest) = record.interest_label() {
            point.comments.push(interest.to_string());
        }

        // A gate closing the outline is a gate first, outline second.
        let group_category = room.group(group).map(|g| g.category);
        if let Some(group_category) = group_category.filter(|c| *c != point.category) {
            point.additional_categories.insert(group_category);
        }

        if let Some(existing) = room.find_in_group(group, &record.location) {
            let categories = point.all_categories();
            if let Some(target) = room.point_mut(existing) {
                tracing::debug!(
                    point = %point.name,
                    existing = %target.name,
                    row = record.row,
                    "Point already in group at this location, categories merged"
                );
                target.absorb_categories(categories);
            }
            return Ok(existing);
        }

        tracing::debug!(point = %point, "New point created");
        Ok(room.add_point(group, point)?)
    }
}
