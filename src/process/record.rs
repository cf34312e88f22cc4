use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::date_parser::format_datetime;
use crate::schema::ColumnDefinition;

/// A level of a finite ordered domain.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ordinal {
    pub rank: i32,
    pub label: String,
}

impl Ordinal {
    pub fn new(rank: i32, label: impl Into<String>) -> Self {
        Self {
            rank,
            label: label.into(),
        }
    }
}

/// A coerced cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Missing,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Date(NaiveDateTime),
    Labels(BTreeSet<String>),
    Ordinal(Ordinal),
}

/// Separator used when a label set is flattened to one text cell.
pub const LABEL_SEPARATOR: &str = ";";

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_labels(&self) -> Option<&BTreeSet<String>> {
        match self {
            Value::Labels(l) => Some(l),
            _ => None,
        }
    }

    /// Text rendering for delimited output; `None` for missing.
    pub fn render(&self) -> Option<String> {
        match self {
            Value::Missing => None,
            Value::Int(v) => Some(v.to_string()),
            Value::Float(v) => Some(v.to_string()),
            Value::Bool(v) => Some(v.to_string()),
            Value::Text(s) => Some(s.clone()),
            Value::Date(d) => Some(format_datetime(d)),
            Value::Labels(l) => Some(join_labels(l)),
            Value::Ordinal(o) => Some(o.label.clone()),
        }
    }
}

pub fn join_labels(labels: &BTreeSet<String>) -> String {
    labels
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(LABEL_SEPARATOR)
}

/// How diagnostics and views identify a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKey {
    Id(i64),
    /// The record has no usable `id`; fall back to its source row.
    Row(usize),
}

impl RecordKey {
    pub fn id(&self) -> Option<i64> {
        match self {
            RecordKey::Id(id) => Some(*id),
            RecordKey::Row(_) => None,
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Id(id) => write!(f, "id={id}"),
            RecordKey::Row(row) => write!(f, "row={row}"),
        }
    }
}

/// One registry column after coercion. `raw` keeps the trimmed source text
/// for derivations that need the original capitalisation.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalColumn {
    pub def: ColumnDefinition,
    pub values: Vec<Value>,
    pub raw: Vec<String>,
}

/// The typed survey, column-major, in registry order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CanonicalTable {
    pub keys: Vec<RecordKey>,
    /// Source `db` tag per record, if the export has one.
    pub sources: Vec<Option<String>>,
    pub columns: Vec<CanonicalColumn>,
}

/// Row view over a [`CanonicalTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord<'a> {
    pub key: RecordKey,
    pub db: Option<&'a str>,
    pub values: Vec<(&'a str, &'a Value)>,
}

impl<'a> CanonicalRecord<'a> {
    pub fn get(&self, canonical_label: &str) -> Option<&'a Value> {
        self.values
            .iter()
            .find(|(label, _)| *label == canonical_label)
            .map(|(_, v)| *v)
    }
}

impl CanonicalTable {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn column(&self, canonical_label: &str) -> Option<&CanonicalColumn> {
        self.columns
            .iter()
            .find(|c| c.def.canonical_label == canonical_label)
    }

    pub fn record(&self, idx: usize) -> Option<CanonicalRecord<'_>> {
        let key = *self.keys.get(idx)?;
        Some(CanonicalRecord {
            key,
            db: self.sources.get(idx).and_then(|s| s.as_deref()),
            values: self
                .columns
                .iter()
                .map(|c| (c.def.canonical_label.as_str(), &c.values[idx]))
                .collect(),
        })
    }

    /// Keep only the records whose flag in `keep` is set.
    pub fn retain(&mut self, keep: &[bool]) {
        fn filter<T>(items: &mut Vec<T>, keep: &[bool]) {
            let mut i = 0;
            items.retain(|_| {
                let k = keep.get(i).copied().unwrap_or(true);
                i += 1;
                k
            });
        }
        filter(&mut self.keys, keep);
        filter(&mut self.sources, keep);
        for col in &mut self.columns {
            filter(&mut col.values, keep);
            filter(&mut col.raw, keep);
        }
    }
}
