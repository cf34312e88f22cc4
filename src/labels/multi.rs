// src/labels/multi.rs
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

use super::{normalize, slug};

/// Conjunctions that separate answers inside one fragment ("lunes y martes").
const CONJUNCTIONS: &[&str] = &["y", "and"];

/// Split one multi-select answer into its atomic normalized labels.
///
/// Delimiters: `,` `;` line breaks, and the whole words `y` / `and`.
/// Empty fragments are dropped and duplicates collapse.
pub fn split_labels(raw: &str) -> BTreeSet<String> {
    let mut labels = BTreeSet::new();

    for fragment in raw.split([',', ';', '\n', '\r']) {
        let fragment = normalize(fragment);
        if fragment.is_empty() {
            continue;
        }

        let mut current: Vec<&str> = Vec::new();
        for word in fragment.split(' ') {
            if CONJUNCTIONS.contains(&word) {
                push_words(&mut labels, &mut current);
            } else {
                current.push(word);
            }
        }
        push_words(&mut labels, &mut current);
    }

    labels
}

fn push_words(labels: &mut BTreeSet<String>, words: &mut Vec<&str>) {
    if !words.is_empty() {
        labels.insert(words.join(" "));
        words.clear();
    }
}

/// Indicator column name for `label` under the column's canonical label.
pub fn indicator_name(canonical_label: &str, label: &str) -> String {
    let s = slug(label);
    if s.is_empty() {
        format!("{}__other", canonical_label)
    } else {
        format!("{}__{}", canonical_label, s)
    }
}

/// The closed set of labels observed for one column across every record.
///
/// Only build this after the full record set has been scanned; a prefix of
/// records can miss labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelUniverse {
    labels: BTreeSet<String>,
}

/// One emitted one-hot column and the labels that set it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorColumn {
    pub name: String,
    pub labels: BTreeSet<String>,
}

impl IndicatorColumn {
    /// More than one label sets this column; which one did is lost.
    pub fn is_merged(&self) -> bool {
        self.labels.len() > 1
    }
}

impl LabelUniverse {
    pub fn from_sets<'a, I>(sets: I) -> Self
    where
        I: IntoIterator<Item = &'a BTreeSet<String>>,
    {
        let mut labels = BTreeSet::new();
        for set in sets {
            labels.extend(set.iter().cloned());
        }
        Self { labels }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// Indicator columns keyed by label text, sorted by column name.
    /// Labels whose slugs coincide share one column.
    pub fn columns(&self, canonical_label: &str) -> Vec<IndicatorColumn> {
        let mut by_name: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for label in &self.labels {
            by_name
                .entry(indicator_name(canonical_label, label))
                .or_default()
                .insert(label.clone());
        }
        let columns: Vec<IndicatorColumn> = by_name
            .into_iter()
            .map(|(name, labels)| IndicatorColumn { name, labels })
            .collect();
        for c in columns.iter().filter(|c| c.is_merged()) {
            warn!(column = %c.name, labels = ?c.labels, "labels share one indicator column");
        }
        columns
    }
}

/// One-hot encode `labels` against `universe` (one flag per universe label,
/// in universe order). Labels outside the universe are not representable.
pub fn encode(universe: &LabelUniverse, labels: &BTreeSet<String>) -> Vec<bool> {
    universe.labels().map(|l| labels.contains(l)).collect()
}

/// Inverse of [`encode`].
pub fn decode(universe: &LabelUniverse, flags: &[bool]) -> BTreeSet<String> {
    universe
        .labels()
        .zip(flags)
        .filter(|(_, set)| **set)
        .map(|(l, _)| l.to_string())
        .collect()
}
