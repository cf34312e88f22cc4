//! The four materialized views. Each is a pure projection of the canonical
//! (or translated) table; none reads another view.

use tracing::{info, warn};

use super::translation::TranslatedTable;
use super::{ColumnData, DatasetColumn, DerivedDataset, ViewName};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::labels::multi::{IndicatorColumn, LabelUniverse};
use crate::process::{CanonicalColumn, CanonicalTable, Value};
use crate::schema::{SemanticType, StorageType};

/// Suffix of the numeric companion of an ordinal column in `optimized`.
pub const RANK_SUFFIX: &str = "__rank";

fn ints(values: &[Value]) -> ColumnData {
    ColumnData::Int(values.iter().map(Value::as_int).collect())
}

fn floats(values: &[Value]) -> ColumnData {
    ColumnData::Float(
        values
            .iter()
            .map(|v| match v {
                Value::Float(f) => Some(*f),
                Value::Int(i) => Some(*i as f64),
                _ => None,
            })
            .collect(),
    )
}

fn bools(values: &[Value]) -> ColumnData {
    ColumnData::Bool(
        values
            .iter()
            .map(|v| match v {
                Value::Bool(b) => Some(*b),
                _ => None,
            })
            .collect(),
    )
}

fn dates(values: &[Value]) -> ColumnData {
    ColumnData::Date(
        values
            .iter()
            .map(|v| match v {
                Value::Date(d) => Some(*d),
                _ => None,
            })
            .collect(),
    )
}

fn texts(values: &[Value]) -> Vec<Option<String>> {
    values
        .iter()
        .map(|v| match v {
            Value::Text(s) => Some(s.clone()),
            Value::Ordinal(o) => Some(o.label.clone()),
            _ => None,
        })
        .collect()
}

fn label_sets(values: &[Value]) -> ColumnData {
    ColumnData::LabelSet(values.iter().map(|v| v.as_labels().cloned()).collect())
}

fn ranks(values: &[Value]) -> ColumnData {
    ColumnData::Int(
        values
            .iter()
            .map(|v| match v {
                Value::Ordinal(o) => Some(o.rank as i64),
                _ => None,
            })
            .collect(),
    )
}

/// Encoding shared by `basic` and `translated`: the column's own storage.
fn encode_plain(col: &CanonicalColumn) -> Vec<DatasetColumn> {
    let name = col.def.canonical_label.clone();
    let v = &col.values;
    let data = match col.def.semantic_type {
        SemanticType::Identifier | SemanticType::Count => ints(v),
        SemanticType::Percent | SemanticType::Continuous => floats(v),
        SemanticType::Binary => bools(v),
        SemanticType::Datetime => dates(v),
        SemanticType::MultiNominal => label_sets(v),
        ty if ty.is_ordinal() => match col.def.storage_type {
            StorageType::Numeric => ranks(v),
            _ => ColumnData::Text(texts(v)),
        },
        SemanticType::Ignore => return Vec::new(),
        _ => ColumnData::Text(texts(v)),
    };
    vec![DatasetColumn::new(name, data)]
}

fn encode_optimized(col: &CanonicalColumn) -> Vec<DatasetColumn> {
    let name = &col.def.canonical_label;
    let v = &col.values;
    match col.def.semantic_type {
        ty if ty.is_ordinal() => vec![
            DatasetColumn::new(name.clone(), ColumnData::Category(texts(v))),
            DatasetColumn::new(format!("{name}{RANK_SUFFIX}"), ranks(v)),
        ],
        SemanticType::Nominal => vec![DatasetColumn::new(
            name.clone(),
            ColumnData::Category(texts(v)),
        )],
        _ => encode_plain(col),
    }
}

fn indicator_data(values: &[Value], column: &IndicatorColumn) -> ColumnData {
    ColumnData::Bool(
        values
            .iter()
            .map(|v| {
                Some(
                    v.as_labels()
                        .map(|set| column.labels.iter().any(|l| set.contains(l)))
                        .unwrap_or(false),
                )
            })
            .collect(),
    )
}

fn encode_famd(col: &CanonicalColumn, diagnostics: &mut Diagnostics) -> Vec<DatasetColumn> {
    let ty = col.def.semantic_type;
    let v = &col.values;
    match ty {
        SemanticType::Identifier => encode_plain(col),
        _ if ty.is_free_text() => Vec::new(),
        SemanticType::MultiNominal => {
            let universe = LabelUniverse::from_sets(v.iter().filter_map(Value::as_labels));
            if universe.is_empty() {
                warn!(column = %col.def.canonical_label, "empty label universe");
                diagnostics.push(
                    DiagnosticKind::EmptyLabelUniverse,
                    col.def.canonical_label.as_str(),
                    None,
                    "no labels observed; no indicator columns emitted",
                );
                return Vec::new();
            }
            universe
                .columns(&col.def.canonical_label)
                .iter()
                .map(|ic| DatasetColumn::new(ic.name.clone(), indicator_data(v, ic)))
                .collect()
        }
        _ if ty.is_ordinal() => vec![DatasetColumn::new(
            col.def.canonical_label.clone(),
            ColumnData::Text(texts(v)),
        )],
        _ => encode_plain(col),
    }
}

/// Emit columns of `table` (plus derived columns after their anchors) with
/// the identifier first.
fn assemble<F>(
    view: ViewName,
    table: &CanonicalTable,
    translated: Option<&TranslatedTable>,
    mut encode: F,
) -> DerivedDataset
where
    F: FnMut(&CanonicalColumn) -> Vec<DatasetColumn>,
{
    let mut id_cols = Vec::new();
    let mut columns = Vec::new();

    for col in &table.columns {
        let out = encode(col);
        if col.def.semantic_type == SemanticType::Identifier {
            id_cols.extend(out);
        } else {
            columns.extend(out);
        }
        if let Some(t) = translated {
            for d in t.derived_after(&col.def.canonical_label) {
                columns.extend(encode(d));
            }
        }
    }

    id_cols.extend(columns);
    DerivedDataset {
        view,
        keys: table.keys.clone(),
        columns: id_cols,
    }
}

/// Coerced values, untranslated label sets.
pub fn basic(table: &CanonicalTable) -> DerivedDataset {
    assemble(ViewName::Basic, table, None, encode_plain)
}

/// `basic` with every grouped label translated, plus derived columns.
pub fn translated(t: &TranslatedTable) -> DerivedDataset {
    assemble(ViewName::Translated, &t.table, Some(t), encode_plain)
}

/// One-hot multi-labels, categorical ordinals, no free text. Records
/// without an `id` are excluded.
pub fn famd_ready(t: &TranslatedTable, diagnostics: &mut Diagnostics) -> DerivedDataset {
    let full = assemble(ViewName::FamdReady, &t.table, Some(t), |c| {
        encode_famd(c, diagnostics)
    });

    let keep: Vec<bool> = full.keys.iter().map(|k| k.id().is_some()).collect();
    let excluded = keep.iter().filter(|k| !**k).count();
    if excluded > 0 {
        info!(excluded, "records without id left out of famd_ready");
    }

    DerivedDataset {
        view: ViewName::FamdReady,
        keys: full
            .keys
            .iter()
            .zip(&keep)
            .filter(|(_, k)| **k)
            .map(|(key, _)| *key)
            .collect(),
        columns: full
            .columns
            .iter()
            .map(|c| DatasetColumn::new(c.name.clone(), c.data.filter(&keep)))
            .collect(),
    }
}

/// Ordinals as label + rank, nominals as dictionary-encoded factors.
pub fn optimized(t: &TranslatedTable) -> DerivedDataset {
    assemble(ViewName::Optimized, &t.table, Some(t), encode_optimized)
}

/// Build all four views from the canonical table and its translation.
#[tracing::instrument(level = "info", skip_all, fields(records = table.len()))]
pub fn build_views(
    table: &CanonicalTable,
    t: &TranslatedTable,
    diagnostics: &mut Diagnostics,
) -> Vec<DerivedDataset> {
    let views = vec![
        basic(table),
        translated(t),
        famd_ready(t, diagnostics),
        optimized(t),
    ];
    for v in &views {
        info!(view = v.name(), rows = v.num_rows(), columns = v.columns.len(), "view built");
    }
    views
}
