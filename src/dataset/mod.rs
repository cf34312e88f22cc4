//! Derived datasets: named, column-major tables materialized from the
//! canonical survey.

pub mod csv;
pub mod parquet;
pub mod translation;
pub mod views;

use chrono::NaiveDateTime;
use std::collections::BTreeSet;
use std::fmt;

use crate::process::date_parser::format_datetime;
use crate::process::record::join_labels;
use crate::process::RecordKey;

pub use translation::{translate_table, TranslatedTable};
pub use views::build_views;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewName {
    Basic,
    Translated,
    FamdReady,
    Optimized,
}

impl ViewName {
    pub const ALL: [ViewName; 4] = [
        ViewName::Basic,
        ViewName::Translated,
        ViewName::FamdReady,
        ViewName::Optimized,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewName::Basic => "basic",
            ViewName::Translated => "translated",
            ViewName::FamdReady => "famd_ready",
            ViewName::Optimized => "optimized",
        }
    }
}

impl fmt::Display for ViewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical encoding of one output column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Bool(Vec<Option<bool>>),
    Text(Vec<Option<String>>),
    /// Categorical factor; dictionary-encoded in Parquet.
    Category(Vec<Option<String>>),
    Date(Vec<Option<NaiveDateTime>>),
    LabelSet(Vec<Option<BTreeSet<String>>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Bool(v) => v.len(),
            ColumnData::Text(v) | ColumnData::Category(v) => v.len(),
            ColumnData::Date(v) => v.len(),
            ColumnData::LabelSet(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text of row `i` for delimited output; `None` when missing.
    pub fn render(&self, i: usize) -> Option<String> {
        match self {
            ColumnData::Int(v) => v[i].map(|x| x.to_string()),
            ColumnData::Float(v) => v[i].map(|x| x.to_string()),
            ColumnData::Bool(v) => v[i].map(|x| x.to_string()),
            ColumnData::Text(v) | ColumnData::Category(v) => v[i].clone(),
            ColumnData::Date(v) => v[i].as_ref().map(format_datetime),
            ColumnData::LabelSet(v) => v[i].as_ref().map(join_labels),
        }
    }

    /// Keep rows whose flag is set.
    pub fn filter(&self, keep: &[bool]) -> ColumnData {
        fn pick<T: Clone>(v: &[T], keep: &[bool]) -> Vec<T> {
            v.iter()
                .zip(keep)
                .filter(|(_, k)| **k)
                .map(|(x, _)| x.clone())
                .collect()
        }
        match self {
            ColumnData::Int(v) => ColumnData::Int(pick(v, keep)),
            ColumnData::Float(v) => ColumnData::Float(pick(v, keep)),
            ColumnData::Bool(v) => ColumnData::Bool(pick(v, keep)),
            ColumnData::Text(v) => ColumnData::Text(pick(v, keep)),
            ColumnData::Category(v) => ColumnData::Category(pick(v, keep)),
            ColumnData::Date(v) => ColumnData::Date(pick(v, keep)),
            ColumnData::LabelSet(v) => ColumnData::LabelSet(pick(v, keep)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetColumn {
    pub name: String,
    pub data: ColumnData,
}

impl DatasetColumn {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// A materialized view. Row `i` of every column belongs to `keys[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedDataset {
    pub view: ViewName,
    pub keys: Vec<RecordKey>,
    pub columns: Vec<DatasetColumn>,
}

impl DerivedDataset {
    pub fn name(&self) -> &'static str {
        self.view.as_str()
    }

    pub fn num_rows(&self) -> usize {
        self.keys.len()
    }

    pub fn column(&self, name: &str) -> Option<&DatasetColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// `id` of every row, in row order.
    pub fn ids(&self) -> Vec<Option<i64>> {
        self.keys.iter().map(RecordKey::id).collect()
    }

    /// Row index of `key`, if present.
    pub fn row_of(&self, key: RecordKey) -> Option<usize> {
        self.keys.iter().position(|k| *k == key)
    }
}
