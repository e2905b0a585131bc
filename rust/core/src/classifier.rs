// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Label classification against the configured synonym patterns.
//!
//! A label is tested with three escalating strategies across every
//! configured value: an exact match of the whole label, then a prefix match,
//! then a match anywhere in the label. Only the first strategy that yields
//! anything is considered, so "Column base" resolves to `COLUMN_BASE` even
//! though "Column" is a prefix of it.
//!
//! A numeral before or after the label ("Gate 2", "2 Gate") is captured as
//! the category number. Interest labels instead read a leading numeral as a
//! count ("3 boxes").

use regex::{Regex, RegexBuilder};

use crate::category::Category;
use crate::config::PatternConfig;
use crate::error::{Error, Result};
use crate::interest::{Interest, InterestType};

/// How a pattern matched a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchStrategy {
    /// The whole label is a synonym.
    Exact,
    /// The label starts with a synonym.
    Prefix,
    /// A synonym appears somewhere in the label.
    Substring,
}

impl MatchStrategy {
    const ESCALATION: [MatchStrategy; 3] = [
        MatchStrategy::Exact,
        MatchStrategy::Prefix,
        MatchStrategy::Substring,
    ];
}

/// Result of a category classification.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMatch {
    pub category: Category,
    /// Number distinguishing groups of the same category.
    pub number: Option<u32>,
    /// Text that matched the pattern (the whole label for defaults).
    pub fragment: String,
    /// `None` when the default category was used.
    pub strategy: Option<MatchStrategy>,
}

#[derive(Debug, Clone)]
struct CompiledPattern<T> {
    value: T,
    source: String,
    exact: Regex,
    prefix: Regex,
    substring: Regex,
}

impl<T: Copy> CompiledPattern<T> {
    fn compile(value: T, patterns: &[String]) -> Result<Self> {
        let source = format!("({})", patterns.join("|"));
        Ok(Self {
            value,
            exact: build_regex(&format!("^(?:{})$", source))?,
            prefix: build_regex(&format!("^(?:{})", source))?,
            substring: build_regex(&source)?,
            source,
        })
    }

    fn find<'t>(&self, strategy: MatchStrategy, text: &'t str) -> Option<regex::Match<'t>> {
        match strategy {
            MatchStrategy::Exact => self.exact.find(text),
            MatchStrategy::Prefix => self.prefix.find(text),
            MatchStrategy::Substring => self.substring.find(text),
        }
    }
}

/// A candidate value with the byte span it matched.
#[derive(Debug, Clone, Copy)]
struct Candidate<T> {
    value: T,
    start: usize,
    end: usize,
}

fn build_regex(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| Error::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}

fn word_alternation(words: &[String]) -> String {
    words.join("|")
}

/// Runs the escalating strategies and returns the candidates of the first
/// strategy that matched anything, in declaration order.
fn candidates<T: Copy>(
    table: &[CompiledPattern<T>],
    text: &str,
) -> Option<(MatchStrategy, Vec<Candidate<T>>)> {
    for strategy in MatchStrategy::ESCALATION {
        let found: Vec<Candidate<T>> = table
            .iter()
            .filter_map(|p| {
                p.find(strategy, text).map(|m| Candidate {
                    value: p.value,
                    start: m.start(),
                    end: m.end(),
                })
            })
            .collect();
        if !found.is_empty() {
            return Some((strategy, found));
        }
    }
    None
}

/// Compiled pattern tables. Build once per process and share by reference.
#[derive(Debug, Clone)]
pub struct Classifier {
    categories: Vec<CompiledPattern<Category>>,
    interests: Vec<CompiledPattern<InterestType>>,
    proximity: Option<Regex>,
    junction: Option<Regex>,
    leading_number: Regex,
    trailing_number: Regex,
    following_number: Regex,
}

impl Classifier {
    /// Compiles every pattern of the configuration.
    ///
    /// Entries without patterns are skipped: an empty alternation would
    /// match every label.
    pub fn new(config: &PatternConfig) -> Result<Self> {
        let categories = config
            .categories
            .iter()
            .filter(|c| !c.patterns.is_empty())
            .map(|c| CompiledPattern::compile(c.category, &c.patterns))
            .collect::<Result<Vec<_>>>()?;
        let interests = config
            .interests
            .iter()
            .filter(|i| !i.patterns.is_empty())
            .map(|i| CompiledPattern::compile(i.interest, &i.patterns))
            .collect::<Result<Vec<_>>>()?;

        let proximity = if config.proximity.is_empty() {
            None
        } else {
            Some(build_regex(&format!(
                r"\b(?:{})\b",
                word_alternation(&config.proximity)
            ))?)
        };
        let junction = if config.junction.is_empty() {
            None
        } else {
            Some(build_regex(&format!(
                r"\b(?:{})\s+(.+)$",
                word_alternation(&config.junction)
            ))?)
        };

        Ok(Self {
            categories,
            interests,
            proximity,
            junction,
            leading_number: build_regex(r"^\s*(\d+)\s+(\S.*?)\s*$")?,
            trailing_number: build_regex(r"^\s*(\S.*?)\s+(\d+)\s*$")?,
            following_number: build_regex(r"^\s+(\d+)\b")?,
        })
    }

    /// Classifier over the built-in patterns.
    pub fn with_defaults() -> Result<Self> {
        Self::new(&PatternConfig::default())
    }

    /// All category patterns joined, as reported in parse errors.
    pub fn category_patterns(&self) -> String {
        join_sources(&self.categories)
    }

    /// All interest patterns joined, as reported in parse errors.
    pub fn interest_patterns(&self) -> String {
        join_sources(&self.interests)
    }

    /// Classifies a category label.
    ///
    /// Returns `default` when nothing matches. Without a default, a
    /// `required` label fails with [`Error::Parse`] and an optional one
    /// yields `None`. When several categories match, `OUTLINE` wins over
    /// `GATE`, otherwise the first declared category wins; either way a
    /// warning is logged.
    pub fn classify_category(
        &self,
        label: &str,
        row: usize,
        default: Option<Category>,
        required: bool,
    ) -> Result<Option<CategoryMatch>> {
        if let Some(found) = self.match_category(label) {
            return Ok(Some(found));
        }
        match default {
            Some(category) => Ok(Some(CategoryMatch {
                category,
                number: None,
                fragment: label.trim().to_string(),
                strategy: None,
            })),
            None if required => Err(Error::parse(
                row,
                label,
                "point category",
                self.category_patterns(),
            )),
            None => Ok(None),
        }
    }

    /// Classifies an interest label, reading a leading count.
    ///
    /// A missing count means one item.
    pub fn classify_interest(
        &self,
        label: &str,
        row: usize,
        required: bool,
    ) -> Result<Option<Interest>> {
        match self.match_interest(label) {
            Some(interest) => Ok(Some(interest)),
            None if required => Err(Error::parse(
                row,
                label,
                "point interest",
                self.interest_patterns(),
            )),
            None => Ok(None),
        }
    }

    /// Finds the first interest mentioned in any of the given texts.
    pub fn find_interest<'a>(&self, texts: impl IntoIterator<Item = &'a str>) -> Option<Interest> {
        texts.into_iter().find_map(|t| self.match_interest(t))
    }

    /// Scans free-text observations for category mentions.
    ///
    /// The text is split into clauses on `,` and `;`; each clause yields at
    /// most one match. A clause whose only mentions follow a proximity word
    /// ("near the column") is skipped.
    pub fn scan_observations(&self, text: &str) -> Vec<CategoryMatch> {
        text.split([',', ';'])
            .map(str::trim)
            .filter(|clause| !clause.is_empty())
            .filter_map(|clause| self.match_clause(clause))
            .collect()
    }

    /// Extracts the group referenced by a junction phrase
    /// ("Junction with column 2" gives `"column 2"`).
    ///
    /// The returned text starts at the first category mention after the
    /// junction word.
    pub fn junction_reference(&self, observation: &str) -> Option<String> {
        let captures = self.junction.as_ref()?.captures(observation)?;
        let rest = captures.get(1)?.as_str();
        let start = self
            .categories
            .iter()
            .filter_map(|p| p.substring.find(rest).map(|m| m.start()))
            .min()?;
        Some(rest[start..].trim().to_string())
    }

    fn match_category(&self, label: &str) -> Option<CategoryMatch> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return None;
        }

        let (text, number) = self.split_number(trimmed);
        let (strategy, found) = candidates(&self.categories, text)?;
        let chosen = self.tie_break(trimmed, &found);
        let number = number.or_else(|| {
            self.following_number
                .captures(&text[chosen.end..])
                .and_then(|c| c[1].parse().ok())
        });

        Some(CategoryMatch {
            category: chosen.value,
            number,
            fragment: text[chosen.start..chosen.end].to_string(),
            strategy: Some(strategy),
        })
    }

    fn match_clause(&self, clause: &str) -> Option<CategoryMatch> {
        let (text, number) = self.split_number(clause);
        let (strategy, found) = candidates(&self.categories, text)?;
        let kept: Vec<Candidate<Category>> = found
            .into_iter()
            .filter(|c| !self.is_proximity(&text[..c.start]))
            .collect();
        if kept.is_empty() {
            tracing::debug!(clause, "Category mention only used as a landmark, ignored");
            return None;
        }

        let chosen = self.tie_break(clause, &kept);
        let number = number.or_else(|| {
            self.following_number
                .captures(&text[chosen.end..])
                .and_then(|c| c[1].parse().ok())
        });
        Some(CategoryMatch {
            category: chosen.value,
            number,
            fragment: clause.to_string(),
            strategy: Some(strategy),
        })
    }

    fn match_interest(&self, label: &str) -> Option<Interest> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return None;
        }

        let (text, quantity) = match self.leading_number.captures(trimmed) {
            Some(c) => match (c[1].parse::<u32>(), c.get(2)) {
                (Ok(count), Some(rest)) => (rest.as_str(), count),
                _ => (trimmed, 1),
            },
            None => (trimmed, 1),
        };

        let (_, found) = candidates(&self.interests, text)?;
        if found.len() > 1 {
            tracing::warn!(
                label = trimmed,
                candidates = ?found.iter().map(|c| c.value.name()).collect::<Vec<_>>(),
                chosen = %found[0].value,
                "Multiple interest types match label"
            );
        }
        Some(Interest::new(found[0].value, quantity))
    }

    /// Separates a leading or trailing numeral from the label.
    fn split_number<'t>(&self, label: &'t str) -> (&'t str, Option<u32>) {
        if let Some(c) = self.leading_number.captures(label) {
            if let (Ok(n), Some(rest)) = (c[1].parse(), c.get(2)) {
                return (rest.as_str(), Some(n));
            }
        }
        if let Some(c) = self.trailing_number.captures(label) {
            if let (Some(rest), Ok(n)) = (c.get(1), c[2].parse()) {
                return (rest.as_str(), Some(n));
            }
        }
        (label, None)
    }

    fn tie_break(&self, label: &str, found: &[Candidate<Category>]) -> Candidate<Category> {
        let first = found[0];
        if found.len() == 1 {
            return first;
        }

        let has = |category: Category| found.iter().find(|c| c.value == category).copied();
        let chosen = match (has(Category::Outline), has(Category::Gate)) {
            (Some(outline), Some(_)) => outline,
            _ => first,
        };
        tracing::warn!(
            label,
            candidates = ?found.iter().map(|c| c.value.name()).collect::<Vec<_>>(),
            chosen = %chosen.value,
            "Multiple categories match label"
        );
        chosen
    }

    fn is_proximity(&self, before: &str) -> bool {
        self.proximity
            .as_ref()
            .map(|p| p.is_match(before))
            .unwrap_or(false)
    }
}

fn join_sources<T>(table: &[CompiledPattern<T>]) -> String {
    table
        .iter()
        .map(|p| p.source.as_str())
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::with_defaults().unwrap()
    }

    fn category_of(label: &str) -> Option<Category> {
        classifier()
            .classify_category(label, 1, None, false)
            .unwrap()
            .map(|m| m.category)
    }

    #[test]
    fn exact_synonyms_in_both_languages() {
        assert_eq!(category_of("Outline"), Some(Category::Outline));
        assert_eq!(category_of("contour"), Some(Category::Outline));
        assert_eq!(category_of("Porte"), Some(Category::Gate));
        assert_eq!(category_of("Entrée"), Some(Category::Gate));
        assert_eq!(category_of("ENTREE"), Some(Category::Gate));
        assert_eq!(category_of("Gouffre"), Some(Category::Chasm));
        assert_eq!(category_of("Point d'escalade"), Some(Category::ClimbingPoint));
    }

    #[test]
    fn exact_match_beats_prefix_of_another_category() {
        assert_eq!(category_of("Column base"), Some(Category::ColumnBase));
        assert_eq!(category_of("Base pilier"), Some(Category::ColumnBase));
        assert_eq!(category_of("Column"), Some(Category::Column));
    }

    #[test]
    fn prefix_and_substring_fallbacks() {
        let m = classifier()
            .classify_category("Escarpment north side", 1, None, true)
            .unwrap()
            .unwrap();
        assert_eq!(m.category, Category::Escarpment);
        assert_eq!(m.strategy, Some(MatchStrategy::Prefix));
        assert_eq!(m.fragment, "Escarpment");

        let m = classifier()
            .classify_category("big chasm", 1, None, true)
            .unwrap()
            .unwrap();
        assert_eq!(m.category, Category::Chasm);
        assert_eq!(m.strategy, Some(MatchStrategy::Substring));
    }

    #[test]
    fn numbers_are_captured() {
        let c = classifier();
        let m = c.classify_category("Gate 2", 1, None, true).unwrap().unwrap();
        assert_eq!((m.category, m.number), (Category::Gate, Some(2)));

        let m = c.classify_category("3 Colonne", 1, None, true).unwrap().unwrap();
        assert_eq!((m.category, m.number), (Category::Column, Some(3)));

        let m = c
            .classify_category("Column 4 west", 1, None, true)
            .unwrap()
            .unwrap();
        assert_eq!((m.category, m.number), (Category::Column, Some(4)));

        let m = c.classify_category("Outline", 1, None, true).unwrap().unwrap();
        assert_eq!(m.number, None);
    }

    #[test]
    fn outline_wins_over_gate() {
        assert_eq!(category_of("the outline gate"), Some(Category::Outline));
    }

    #[test]
    fn first_declared_wins_other_ambiguities() {
        // Both ESCARPMENT and COLUMN appear in the label.
        assert_eq!(
            category_of("un pilier contre escarpement"),
            Some(Category::Escarpment)
        );
    }

    #[test]
    fn unmatched_required_label_fails_with_row() {
        let err = classifier()
            .classify_category("Stalagmite", 7, None, true)
            .unwrap_err();
        match err {
            Error::Parse {
                row,
                value,
                expected,
                patterns,
            } => {
                assert_eq!(row, 7);
                assert_eq!(value, "Stalagmite");
                assert_eq!(expected, "point category");
                assert!(patterns.contains("(Outline|Contour)"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unmatched_label_uses_default() {
        let m = classifier()
            .classify_category("Stalagmite", 7, Some(Category::Unknown), true)
            .unwrap()
            .unwrap();
        assert_eq!(m.category, Category::Unknown);
        assert_eq!(m.strategy, None);

        assert!(classifier()
            .classify_category("Stalagmite", 7, None, false)
            .unwrap()
            .is_none());
    }

    #[test]
    fn classification_is_deterministic() {
        let c = classifier();
        let first = c.classify_category("Talus de pierre 2", 1, None, true).unwrap();
        for _ in 0..10 {
            assert_eq!(c.classify_category("Talus de pierre 2", 1, None, true).unwrap(), first);
        }
    }

    #[test]
    fn interest_count() {
        let c = classifier();
        assert_eq!(
            c.classify_interest("3 Boxes", 1, true).unwrap(),
            Some(Interest::new(InterestType::Box, 3))
        );
        assert_eq!(
            c.classify_interest("Lichen", 1, true).unwrap(),
            Some(Interest::single(InterestType::Lichen))
        );
        assert_eq!(
            c.classify_interest("2 petites caisses", 1, true).unwrap(),
            Some(Interest::new(InterestType::LittleBox, 2))
        );
    }

    #[test]
    fn required_interest_fails() {
        let err = classifier().classify_interest("Gold", 4, true).unwrap_err();
        assert_eq!(err.row(), Some(4));
        assert!(classifier().classify_interest("Gold", 4, false).unwrap().is_none());
    }

    #[test]
    fn observations_split_into_clauses() {
        let found = classifier().scan_observations("Contour, Colonne 2; rien");
        let cats: Vec<_> = found.iter().map(|m| (m.category, m.number)).collect();
        assert_eq!(
            cats,
            vec![(Category::Outline, None), (Category::Column, Some(2))]
        );
        assert_eq!(found[1].fragment, "Colonne 2");
    }

    #[test]
    fn proximity_mentions_are_ignored() {
        let found = classifier().scan_observations("Lichen near column, Escarpment");
        let cats: Vec<_> = found.iter().map(|m| m.category).collect();
        assert_eq!(cats, vec![Category::Escarpment]);
    }

    #[test]
    fn junction_reference_starts_at_category() {
        let c = classifier();
        assert_eq!(
            c.junction_reference("Junction with column base 2").as_deref(),
            Some("column base 2")
        );
        assert_eq!(
            c.junction_reference("Jonction avec escarpement 1").as_deref(),
            Some("escarpement 1")
        );
        assert_eq!(c.junction_reference("Column 2"), None);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let mut config = PatternConfig::default();
        config.categories[0].patterns.push("(unclosed".to_string());
        let err = Classifier::new(&config).unwrap_err();
        assert!(matches!(err, Error::Pattern { .. }));
    }
}
