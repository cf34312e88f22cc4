//! Type coercion engine: one rule per semantic type, applied column-wise.

use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use super::date_parser;
use super::ordinal;
use super::raw_table::RawTable;
use super::record::{CanonicalColumn, CanonicalTable, RecordKey, Value};
use super::utils::{clean_str, parse_integer, parse_number, parse_percent};
use crate::labels::{normalize, split_labels};
use crate::schema::{ColumnDefinition, Registry, RegistryError, SemanticType};

/// Canonical label of the source-database tag column.
pub const SOURCE_LABEL: &str = "db";

/// Result of coercing one non-empty cell. A failure may still carry a value
/// (out-of-range percentages are kept).
#[derive(Debug, Clone, PartialEq)]
pub struct Coerced {
    pub value: Value,
    pub failure: Option<String>,
}

impl Coerced {
    fn ok(value: Value) -> Self {
        Self {
            value,
            failure: None,
        }
    }

    fn fail(reason: impl Into<String>) -> Self {
        Self {
            value: Value::Missing,
            failure: Some(reason.into()),
        }
    }
}

pub type CoerceFn = fn(&str) -> Coerced;

/// Coercion rule per semantic type. `ignore` has no rule.
static RULES: &[(SemanticType, CoerceFn)] = &[
    (SemanticType::Identifier, coerce_identifier),
    (SemanticType::Text, coerce_text),
    (SemanticType::TextEmail, coerce_text),
    (SemanticType::TextPhone, coerce_text),
    (SemanticType::Datetime, coerce_datetime),
    (SemanticType::Count, coerce_count),
    (SemanticType::Percent, coerce_percent),
    (SemanticType::Binary, coerce_binary),
    (SemanticType::Nominal, coerce_text),
    (SemanticType::MultiNominal, coerce_multi),
    (SemanticType::OrdinalRank, coerce_rank),
    (SemanticType::OrdinalScale, coerce_scale),
    (SemanticType::OrdinalFrequency, coerce_frequency),
    (SemanticType::OrdinalFloor, coerce_floor),
    (SemanticType::OrdinalAgeband, coerce_ageband),
    (SemanticType::Continuous, coerce_continuous),
];

pub fn rule_for(ty: SemanticType) -> Option<CoerceFn> {
    RULES.iter().find(|(t, _)| *t == ty).map(|(_, f)| *f)
}

/// Coerce one raw cell. Empty cells are missing, never failures.
pub fn coerce_value(ty: SemanticType, raw: &str) -> Coerced {
    let cleaned = clean_str(raw);
    if cleaned.is_empty() {
        return Coerced::ok(Value::Missing);
    }
    match rule_for(ty) {
        Some(rule) => rule(&cleaned),
        None => Coerced::ok(Value::Missing),
    }
}

fn coerce_identifier(s: &str) -> Coerced {
    match parse_integer(s) {
        Some(v) => Coerced::ok(Value::Int(v)),
        None => Coerced::fail(format!("`{s}` is not an integer identifier")),
    }
}

fn coerce_count(s: &str) -> Coerced {
    match parse_integer(s) {
        Some(v) => Coerced::ok(Value::Int(v.max(0))),
        None => Coerced::fail(format!("`{s}` is not a whole number")),
    }
}

fn coerce_percent(s: &str) -> Coerced {
    match parse_percent(s) {
        Some(v) if (0.0..=100.0).contains(&v) => Coerced::ok(Value::Float(v)),
        Some(v) => Coerced {
            value: Value::Float(v),
            failure: Some(format!("{v} is outside 0..100")),
        },
        None => Coerced::fail(format!("`{s}` is not a percentage")),
    }
}

fn coerce_continuous(s: &str) -> Coerced {
    match parse_number(s) {
        Some(v) => Coerced::ok(Value::Float(v)),
        None => Coerced::fail(format!("`{s}` is not a number")),
    }
}

fn coerce_binary(s: &str) -> Coerced {
    match normalize(s).as_str() {
        "si" | "yes" => Coerced::ok(Value::Bool(true)),
        "no" => Coerced::ok(Value::Bool(false)),
        other => Coerced::fail(format!("`{other}` is not a yes/no answer")),
    }
}

fn coerce_datetime(s: &str) -> Coerced {
    match date_parser::parse_datetime(s) {
        Some(dt) => Coerced::ok(Value::Date(dt)),
        None => Coerced::fail(format!("`{s}` matches no known date layout")),
    }
}

fn coerce_text(s: &str) -> Coerced {
    let n = normalize(s);
    if n.is_empty() {
        Coerced::ok(Value::Missing)
    } else {
        Coerced::ok(Value::Text(n))
    }
}

fn coerce_multi(s: &str) -> Coerced {
    let labels = split_labels(s);
    if labels.is_empty() {
        Coerced::ok(Value::Missing)
    } else {
        Coerced::ok(Value::Labels(labels))
    }
}

fn coerce_ordinal(ty: SemanticType, s: &str) -> Coerced {
    match ordinal::parse(ty, &normalize(s)) {
        Ok(o) => Coerced::ok(Value::Ordinal(o)),
        Err(reason) => Coerced::fail(reason),
    }
}

fn coerce_rank(s: &str) -> Coerced {
    coerce_ordinal(SemanticType::OrdinalRank, s)
}

fn coerce_scale(s: &str) -> Coerced {
    coerce_ordinal(SemanticType::OrdinalScale, s)
}

fn coerce_frequency(s: &str) -> Coerced {
    coerce_ordinal(SemanticType::OrdinalFrequency, s)
}

fn coerce_floor(s: &str) -> Coerced {
    coerce_ordinal(SemanticType::OrdinalFloor, s)
}

fn coerce_ageband(s: &str) -> Coerced {
    coerce_ordinal(SemanticType::OrdinalAgeband, s)
}

/// A value that could not be coerced to its column's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionFailure {
    /// Canonical label of the column.
    pub column: String,
    /// Position of the record in the coerced table.
    pub index: usize,
    pub record: RecordKey,
    pub reason: String,
}

/// A record dropped because an earlier record has the same `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateRecord {
    pub key: RecordKey,
    pub row: usize,
}

/// Which export column feeds each registry definition.
#[derive(Debug, Clone, Default)]
pub struct HeaderResolution {
    sources: HashMap<String, usize>,
    pub unknown: Vec<String>,
}

impl HeaderResolution {
    pub fn source_of(&self, def: &ColumnDefinition) -> Option<usize> {
        self.sources.get(&def.canonical_label).copied()
    }
}

/// Match every export header against the registry.
pub fn resolve_headers(registry: &Registry, headers: &[String]) -> HeaderResolution {
    let mut out = HeaderResolution::default();
    for (idx, header) in headers.iter().enumerate() {
        match registry.lookup(header) {
            Ok(def) => {
                if out.sources.contains_key(&def.canonical_label) {
                    warn!(column = %header, label = %def.canonical_label, "repeated header, keeping first");
                    continue;
                }
                out.sources.insert(def.canonical_label.clone(), idx);
            }
            Err(RegistryError::UnknownColumn { raw_name }) => out.unknown.push(raw_name),
            Err(e) => warn!(column = %header, error = %e, "header lookup failed"),
        }
    }
    out
}

#[derive(Debug, Clone, Default)]
pub struct CoercionOutput {
    pub table: CanonicalTable,
    pub failures: Vec<CoercionFailure>,
    pub unknown_columns: Vec<String>,
    pub duplicates: Vec<DuplicateRecord>,
}

struct ColumnResult {
    column: CanonicalColumn,
    failures: Vec<(usize, String)>,
}

fn coerce_column(def: &ColumnDefinition, raw: &RawTable, source: Option<usize>) -> ColumnResult {
    let n = raw.len();
    let mut values = Vec::with_capacity(n);
    let mut cells = Vec::with_capacity(n);
    let mut failures = Vec::new();

    match source {
        Some(col) => {
            for (i, cell) in raw.column(col).enumerate() {
                let c = coerce_value(def.semantic_type, cell);
                if let Some(reason) = c.failure {
                    failures.push((i, reason));
                }
                values.push(c.value);
                cells.push(clean_str(cell));
            }
        }
        None => {
            values.resize(n, Value::Missing);
            cells.resize(n, String::new());
        }
    }

    ColumnResult {
        column: CanonicalColumn {
            def: def.clone(),
            values,
            raw: cells,
        },
        failures,
    }
}

/// Coerce every active registry column of `raw`, in parallel, reassembled in
/// registry order. Later records repeating an `id` are dropped.
#[tracing::instrument(level = "info", skip_all, fields(records = raw.len(), headers = raw.headers.len()))]
pub fn coerce_table(registry: &Registry, raw: &RawTable) -> CoercionOutput {
    let resolution = resolve_headers(registry, &raw.headers);
    let active: Vec<&ColumnDefinition> = registry.active().collect();

    let results: Vec<ColumnResult> = active
        .par_iter()
        .map(|def| coerce_column(def, raw, resolution.source_of(def)))
        .collect();

    // keys from the identifier column; rows without one fall back to their row
    let id_col = results
        .iter()
        .position(|r| r.column.def.semantic_type == SemanticType::Identifier);
    let keys: Vec<RecordKey> = raw
        .records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            id_col
                .and_then(|c| results[c].column.values[i].as_int())
                .map(RecordKey::Id)
                .unwrap_or(RecordKey::Row(rec.row))
        })
        .collect();
    let sources: Vec<Option<String>> = match results
        .iter()
        .find(|r| r.column.def.canonical_label == SOURCE_LABEL)
    {
        Some(r) => r.column.values.iter().map(|v| v.as_text().map(str::to_string)).collect(),
        None => vec![None; raw.len()],
    };

    // first record per id wins
    let mut seen = std::collections::HashSet::new();
    let mut keep = Vec::with_capacity(keys.len());
    let mut duplicates = Vec::new();
    for (key, rec) in keys.iter().zip(&raw.records) {
        let first = match key {
            RecordKey::Id(id) => seen.insert(*id),
            RecordKey::Row(_) => true,
        };
        if !first {
            duplicates.push(DuplicateRecord {
                key: *key,
                row: rec.row,
            });
        }
        keep.push(first);
    }
    let mut new_index = Vec::with_capacity(keep.len());
    let mut next = 0usize;
    for k in &keep {
        new_index.push(k.then(|| {
            next += 1;
            next - 1
        }));
    }

    let mut failures = Vec::new();
    let mut columns = Vec::with_capacity(results.len());
    for r in results {
        for (i, reason) in r.failures {
            if let Some(index) = new_index[i] {
                debug!(column = %r.column.def.canonical_label, record = %keys[i], %reason, "coercion failure");
                failures.push(CoercionFailure {
                    column: r.column.def.canonical_label.clone(),
                    index,
                    record: keys[i],
                    reason,
                });
            }
        }
        columns.push(r.column);
    }

    let mut table = CanonicalTable {
        keys,
        sources,
        columns,
    };
    table.retain(&keep);

    info!(
        records = table.len(),
        columns = table.columns.len(),
        failures = failures.len(),
        unknown = resolution.unknown.len(),
        duplicates = duplicates.len(),
        "coercion finished"
    );

    CoercionOutput {
        table,
        failures,
        unknown_columns: resolution.unknown,
        duplicates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::raw_table::RawRecord;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            records: rows
                .iter()
                .enumerate()
                .map(|(i, r)| RawRecord {
                    row: i + 1,
                    cells: r.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn every_semantic_type_but_ignore_has_a_rule() {
        for (ty, _) in RULES {
            assert!(rule_for(*ty).is_some());
        }
        assert!(rule_for(SemanticType::Ignore).is_none());
        assert_eq!(RULES.len(), 16);
    }

    #[test]
    fn binary_answers() {
        assert_eq!(coerce_value(SemanticType::Binary, "Sí").value, Value::Bool(true));
        assert_eq!(coerce_value(SemanticType::Binary, "NO").value, Value::Bool(false));
        let c = coerce_value(SemanticType::Binary, "no aplica");
        assert_eq!(c.value, Value::Missing);
        assert!(c.failure.is_some());
    }

    #[test]
    fn empty_cells_are_missing_not_failures() {
        for ty in [SemanticType::Count, SemanticType::Binary, SemanticType::OrdinalScale] {
            let c = coerce_value(ty, "   ");
            assert_eq!(c, Coerced::ok(Value::Missing));
        }
    }

    #[test]
    fn counts_clamp_but_identifiers_do_not() {
        assert_eq!(coerce_value(SemanticType::Count, "-3").value, Value::Int(0));
        assert_eq!(coerce_value(SemanticType::Count, "4,0").value, Value::Int(4));
        assert_eq!(coerce_value(SemanticType::Identifier, "-3").value, Value::Int(-3));
        assert!(coerce_value(SemanticType::Count, "muchos").failure.is_some());
    }

    #[test]
    fn out_of_range_percent_is_kept_and_flagged() {
        let c = coerce_value(SemanticType::Percent, "120%");
        assert_eq!(c.value, Value::Float(120.0));
        assert!(c.failure.is_some());
        assert_eq!(coerce_value(SemanticType::Percent, "12,5").value, Value::Float(12.5));
    }

    #[test]
    fn scale_out_of_domain_fails() {
        let c = coerce_value(SemanticType::OrdinalScale, "7");
        assert_eq!(c.value, Value::Missing);
        assert!(c.failure.unwrap().contains("outside"));
    }

    #[test]
    fn fractional_ordinals_fail_instead_of_truncating() {
        for (ty, raw) in [(SemanticType::OrdinalScale, "2.5"), (SemanticType::OrdinalRank, "3,7")] {
            let c = coerce_value(ty, raw);
            assert_eq!(c.value, Value::Missing, "{raw}");
            assert!(c.failure.is_some(), "{raw}");
        }
    }

    #[test]
    fn large_identifiers_stay_distinct() {
        let raw = table(
            &["id", "Porcentaje mujeres"],
            &[&["9007199254740992", "10"], &["9007199254740993", "20"]],
        );
        let out = coerce_table(Registry::builtin(), &raw);
        assert!(out.duplicates.is_empty());
        assert_eq!(
            out.table.keys,
            vec![RecordKey::Id(9_007_199_254_740_992), RecordKey::Id(9_007_199_254_740_993)]
        );
    }

    #[test]
    fn multi_nominal_becomes_a_label_set() {
        let c = coerce_value(SemanticType::MultiNominal, "Lunes, Martes y Viernes");
        let labels = c.value.as_labels().unwrap();
        assert_eq!(labels.len(), 3);
        assert!(labels.contains("viernes"));
    }

    #[test]
    fn coerces_columns_in_registry_order() {
        let raw = table(
            &["Porcentaje mujeres", "id", "Columna rara", "Marca temporal"],
            &[
                &["50", "1", "x", "3/10/2023 14:05:09"],
                &["abc", "2", "y", ""],
            ],
        );
        let out = coerce_table(Registry::builtin(), &raw);

        assert_eq!(out.unknown_columns, vec!["Columna rara".to_string()]);
        assert_eq!(out.table.columns[0].def.canonical_label, "id");
        assert_eq!(out.table.keys, vec![RecordKey::Id(1), RecordKey::Id(2)]);

        let pct = out.table.column("female_percentage").unwrap();
        assert_eq!(pct.values, vec![Value::Float(50.0), Value::Missing]);
        assert_eq!(out.failures.len(), 1);
        assert_eq!(out.failures[0].record, RecordKey::Id(2));
        assert_eq!(out.failures[0].column, "female_percentage");

        // absent from the export: all missing, no failures
        let emp = out.table.column("employees").unwrap();
        assert!(emp.values.iter().all(Value::is_missing));
        assert!(out.table.column("end_of_survey").is_none());
    }

    #[test]
    fn duplicate_ids_keep_the_first_record() {
        let raw = table(
            &["id", "Porcentaje mujeres"],
            &[&["7", "10"], &["", "20"], &["7", "bad"], &["8", "40"]],
        );
        let out = coerce_table(Registry::builtin(), &raw);

        assert_eq!(
            out.table.keys,
            vec![RecordKey::Id(7), RecordKey::Row(2), RecordKey::Id(8)]
        );
        assert_eq!(out.duplicates, vec![DuplicateRecord { key: RecordKey::Id(7), row: 3 }]);
        // the dropped duplicate's failure is not reported
        assert!(out.failures.is_empty());
    }

    #[test]
    fn coercion_is_deterministic() {
        let raw = table(
            &["id", "¿Cuántas veces por semana abastece su establecimiento?", "Productos principales"],
            &[&["1", "6 o más", "Ropa"], &["2", "La periodicidad es mensual", "Calzado "]],
        );
        let a = coerce_table(Registry::builtin(), &raw);
        let b = coerce_table(Registry::builtin(), &raw);
        assert_eq!(a.table, b.table);
        assert_eq!(a.failures, b.failures);
    }
}
