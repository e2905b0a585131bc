// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point records produced by the survey file reader.

use std::path::Path;

use nalgebra::Point3;

/// One point line of a survey file, already split into fields.
#[derive(Debug, Clone, PartialEq)]
pub struct PointRecord {
    /// Source row, for diagnostics.
    pub row: usize,
    pub name: String,
    pub location: Point3<f64>,
    pub category: Option<String>,
    /// Group number column, distinguishing same-category groups.
    pub group_number: Option<u32>,
    pub interest: Option<String>,
    pub observations: Vec<String>,
}

impl PointRecord {
    pub fn new(row: usize, name: impl Into<String>, location: Point3<f64>) -> Self {
        Self {
            row,
            name: name.into(),
            location,
            category: None,
            group_number: None,
            interest: None,
            observations: Vec::new(),
        }
    }

    pub fn with_category(mut self, label: impl Into<String>) -> Self {
        self.category = Some(label.into());
        self
    }

    pub fn with_group_number(mut self, number: u32) -> Self {
        self.group_number = Some(number);
        self
    }

    pub fn with_interest(mut self, label: impl Into<String>) -> Self {
        self.interest = Some(label.into());
        self
    }

    pub fn with_observation(mut self, text: impl Into<String>) -> Self {
        self.observations.push(text.into());
        self
    }

    /// Category label, `None` when absent or blank.
    pub fn category_label(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }

    /// Interest label, `None` when absent or blank.
    pub fn interest_label(&self) -> Option<&str> {
        non_blank(self.interest.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// The ordered point records of one survey file. One file describes one room.
#[derive(Debug, Clone, Default)]
pub struct CartographyFile {
    /// Room name.
    pub name: String,
    pub points: Vec<PointRecord>,
}

impl CartographyFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    /// Names the room after the file stem (`Salle 1.tsv` is `Salle 1`).
    pub fn for_path(path: impl AsRef<Path>) -> Self {
        let name = path
            .as_ref()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(name)
    }

    pub fn push(&mut self, record: PointRecord) {
        self.points.push(record);
    }

    pub fn with_point(mut self, record: PointRecord) -> Self {
        self.push(record);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_name_from_path() {
        assert_eq!(CartographyFile::for_path("/data/Salle 1.tsv").name, "Salle 1");
        assert_eq!(CartographyFile::for_path("gallery").name, "gallery");
    }

    #[test]
    fn blank_labels_are_absent() {
        let record = PointRecord::new(3, "P1", Point3::origin())
            .with_category("  ")
            .with_interest(" Box ");
        assert_eq!(record.category_label(), None);
        assert_eq!(record.interest_label(), Some("Box"));
    }
}
