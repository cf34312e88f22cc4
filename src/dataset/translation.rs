//! Translation stage: in-field labels to English, plus the columns derived
//! from translated data (`econ_*`, `fleet_total`).

use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

use crate::labels::{normalize, FieldGroup, Translator};
use crate::process::{CanonicalColumn, CanonicalTable, RecordKey, Value};
use crate::schema::{ColumnDefinition, ColumnTag, SemanticType};

/// Main categories of the economic-activity answer, matched as prefixes.
const ECON_MAIN: &[&str] = &[
    "Venta al detalle",
    "Fabricante",
    "Proveedor",
    "Ventas por internet",
];

static CAPITALIZED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-ZÁÉÍÓÚÑ][^A-ZÁÉÍÓÚÑ]*").expect("valid regex"));

pub const ECON_MAIN_LABEL: &str = "econ_main";
pub const ECON_SUB1_LABEL: &str = "econ_sub1";
pub const ECON_SUB2_LABEL: &str = "econ_sub2";
pub const FLEET_TOTAL_LABEL: &str = "fleet_total";

/// Labels of one column that no table knew, with occurrence counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmappedLabels {
    pub column: String,
    pub group: FieldGroup,
    pub counts: BTreeMap<String, usize>,
}

/// A column computed from others, emitted right after `anchor`.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedColumn {
    pub anchor: String,
    pub column: CanonicalColumn,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedTable {
    pub table: CanonicalTable,
    pub derived: Vec<DerivedColumn>,
    pub unmapped: Vec<UnmappedLabels>,
    /// Records whose vehicle counts overflow `fleet_total`; left missing.
    pub fleet_overflows: Vec<RecordKey>,
}

impl TranslatedTable {
    /// Derived columns anchored after `label`, in insertion order.
    pub fn derived_after<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a CanonicalColumn> {
        self.derived
            .iter()
            .filter(move |d| d.anchor == label)
            .map(|d| &d.column)
    }
}

fn translate_label(
    translator: &Translator,
    group: FieldGroup,
    label: &str,
    unmapped: &mut BTreeMap<String, usize>,
) -> String {
    let t = translator.translate(group, label);
    if !t.is_mapped() {
        *unmapped.entry(label.to_string()).or_insert(0) += 1;
    }
    t.label().to_string()
}

fn translate_column(
    col: &CanonicalColumn,
    translator: &Translator,
) -> (CanonicalColumn, Option<UnmappedLabels>) {
    let group = match col.def.field_group {
        Some(g) => g,
        None => return (col.clone(), None),
    };

    let mut counts = BTreeMap::new();
    let values = col
        .values
        .iter()
        .map(|v| match v {
            Value::Text(s) => Value::Text(translate_label(translator, group, s, &mut counts)),
            Value::Ordinal(o) => {
                let mut o = o.clone();
                o.label = translate_label(translator, group, &o.label, &mut counts);
                Value::Ordinal(o)
            }
            Value::Labels(set) => Value::Labels(
                set.iter()
                    .map(|l| translate_label(translator, group, l, &mut counts))
                    .collect::<BTreeSet<_>>(),
            ),
            other => other.clone(),
        })
        .collect();

    let unmapped = (!counts.is_empty()).then(|| UnmappedLabels {
        column: col.def.canonical_label.clone(),
        group,
        counts,
    });
    (
        CanonicalColumn {
            def: col.def.clone(),
            values,
            raw: col.raw.clone(),
        },
        unmapped,
    )
}

/// Split an economic-activity answer into main category and up to two
/// sub-activities. Sub-activities start at each capitalized word of the
/// remainder. Unknown categories become the main category as a whole.
pub fn split_activity(raw: &str) -> (Option<String>, Option<String>, Option<String>) {
    let raw = raw.trim();
    if raw.is_empty() {
        return (None, None, None);
    }
    let folded = normalize(raw);
    let main = ECON_MAIN
        .iter()
        .find(|m| folded.starts_with(&normalize(m)));

    let Some(main) = main else {
        return (Some(folded), None, None);
    };
    let rest: String = raw.chars().skip(main.chars().count()).collect();
    let mut parts = CAPITALIZED
        .find_iter(rest.trim())
        .map(|m| normalize(m.as_str().trim_matches(|c: char| c == ',' || c.is_whitespace())))
        .filter(|p| !p.is_empty());
    let sub1 = parts.next();
    let sub2 = parts.next();
    (Some(normalize(main)), sub1, sub2)
}

fn derived_def(label: &str, ty: SemanticType) -> ColumnDefinition {
    ColumnDefinition::new(label, label, ty)
}

fn text_value(s: Option<String>) -> Value {
    s.map(Value::Text).unwrap_or(Value::Missing)
}

fn econ_columns(
    col: &CanonicalColumn,
    translator: &Translator,
    unmapped: &mut Vec<UnmappedLabels>,
) -> Vec<DerivedColumn> {
    let n = col.values.len();
    let (mut main, mut sub1, mut sub2) = (
        Vec::with_capacity(n),
        Vec::with_capacity(n),
        Vec::with_capacity(n),
    );
    let mut counts = BTreeMap::new();

    for raw in &col.raw {
        let (m, s1, s2) = split_activity(raw);
        let m = m.map(|m| translate_label(translator, FieldGroup::EstablishmentType, &m, &mut counts));
        main.push(text_value(m));
        sub1.push(text_value(s1));
        sub2.push(text_value(s2));
    }

    if !counts.is_empty() {
        unmapped.push(UnmappedLabels {
            column: ECON_MAIN_LABEL.to_string(),
            group: FieldGroup::EstablishmentType,
            counts,
        });
    }

    let anchor = col.def.canonical_label.clone();
    [
        (ECON_MAIN_LABEL, main),
        (ECON_SUB1_LABEL, sub1),
        (ECON_SUB2_LABEL, sub2),
    ]
    .into_iter()
    .map(|(label, values)| DerivedColumn {
        anchor: anchor.clone(),
        column: CanonicalColumn {
            def: derived_def(label, SemanticType::Nominal),
            raw: vec![String::new(); values.len()],
            values,
        },
    })
    .collect()
}

/// Sum of the vehicle counts per record; missing when every count is missing
/// or when the sum does not fit an `i64` (those records go to `overflows`).
fn fleet_total(table: &CanonicalTable, overflows: &mut Vec<RecordKey>) -> Option<DerivedColumn> {
    let counts: Vec<&CanonicalColumn> = table
        .columns
        .iter()
        .filter(|c| c.def.has_tag(ColumnTag::VehicleCount))
        .collect();
    let anchor = counts.last()?.def.canonical_label.clone();

    let values: Vec<Value> = (0..table.len())
        .map(|i| {
            let present: Vec<i64> = counts.iter().filter_map(|c| c.values[i].as_int()).collect();
            if present.is_empty() {
                return Value::Missing;
            }
            match present.iter().try_fold(0i64, |acc, n| acc.checked_add(*n)) {
                Some(total) => Value::Int(total),
                None => {
                    warn!(record = %table.keys[i], "vehicle counts overflow fleet_total");
                    overflows.push(table.keys[i]);
                    Value::Missing
                }
            }
        })
        .collect();

    Some(DerivedColumn {
        anchor,
        column: CanonicalColumn {
            def: derived_def(FLEET_TOTAL_LABEL, SemanticType::Count),
            raw: vec![String::new(); values.len()],
            values,
        },
    })
}

/// Run every field-grouped column through `translator`, in parallel, and
/// compute the derived columns.
#[tracing::instrument(level = "info", skip_all, fields(records = table.len()))]
pub fn translate_table(table: &CanonicalTable, translator: &Translator) -> TranslatedTable {
    let results: Vec<(CanonicalColumn, Option<UnmappedLabels>)> = table
        .columns
        .par_iter()
        .map(|c| translate_column(c, translator))
        .collect();

    let mut columns = Vec::with_capacity(results.len());
    let mut unmapped = Vec::new();
    for (col, miss) in results {
        if let Some(m) = miss {
            debug!(column = %m.column, labels = m.counts.len(), "unmapped labels");
            unmapped.push(m);
        }
        columns.push(col);
    }

    let translated = CanonicalTable {
        keys: table.keys.clone(),
        sources: table.sources.clone(),
        columns,
    };

    let mut derived = Vec::new();
    for col in translated
        .columns
        .iter()
        .filter(|c| c.def.has_tag(ColumnTag::EconomicActivity))
    {
        derived.extend(econ_columns(col, translator, &mut unmapped));
    }
    let mut fleet_overflows = Vec::new();
    derived.extend(fleet_total(&translated, &mut fleet_overflows));

    info!(
        version = translator.version(),
        derived = derived.len(),
        unmapped_columns = unmapped.len(),
        "translation finished"
    );

    TranslatedTable {
        table: translated,
        derived,
        unmapped,
        fleet_overflows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{coerce_table, RawRecord, RawTable};
    use crate::schema::Registry;

    fn raw(headers: &[&str], rows: &[&[&str]]) -> RawTable {
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

    const DAYS: &str =
        "Por favor, seleccione los días en los cuales recibe materiales, materias primas o productos:";
    const ECON: &str = "Por favor, indique dentro de la siguientes categorías, cuál se relaciona con la actividad realizada en su comercio:";

    #[test]
    fn splits_economic_activity() {
        assert_eq!(
            split_activity("Venta al detalle Ropa y calzado Accesorios"),
            (
                Some("venta al detalle".into()),
                Some("ropa y calzado".into()),
                Some("accesorios".into())
            )
        );
        assert_eq!(
            split_activity("Proveedor"),
            (Some("proveedor".into()), None, None)
        );
        assert_eq!(
            split_activity("Servicios varios"),
            (Some("servicios varios".into()), None, None)
        );
        assert_eq!(split_activity("  "), (None, None, None));
    }

    #[test]
    fn translates_label_sets_and_counts_misses() {
        let table = coerce_table(
            Registry::builtin(),
            &raw(&["id", DAYS], &[&["1", "Lunes, Martes y Viernes"], &["2", "Lunes, Feriado"]]),
        )
        .table;
        let out = translate_table(&table, Translator::builtin());

        let days = out.table.column("supply_day").unwrap();
        let first: Vec<&str> = days.values[0].as_labels().unwrap().iter().map(String::as_str).collect();
        assert_eq!(first, vec!["friday", "monday", "tuesday"]);

        assert_eq!(out.unmapped.len(), 1);
        assert_eq!(out.unmapped[0].column, "supply_day");
        assert_eq!(out.unmapped[0].counts.get("feriado"), Some(&1));
        assert!(days.values[1].as_labels().unwrap().contains("feriado"));
    }

    #[test]
    fn derives_econ_and_fleet_columns() {
        let diesel = "Por favor indique la cantidad de vehículos con combustión a diésel (ACPM) con los que cuenta su empresa:";
        let electric = "Por favor indique la cantidad de vehículos con motor eléctrico con los que cuenta su empresa:";
        let table = coerce_table(
            Registry::builtin(),
            &raw(
                &["id", ECON, diesel, electric],
                &[
                    &["1", "Fabricante Textiles", "2", "1"],
                    &["2", "Venta al detalle", "", ""],
                    &["3", "", "4", ""],
                ],
            ),
        )
        .table;
        let out = translate_table(&table, Translator::builtin());

        let econ: Vec<&CanonicalColumn> = out.derived_after("economic_activity").collect();
        assert_eq!(econ.len(), 3);
        assert_eq!(econ[0].def.canonical_label, ECON_MAIN_LABEL);
        assert_eq!(econ[0].values[0], Value::Text("manufacturer".into()));
        assert_eq!(econ[0].values[1], Value::Text("retailer".into()));
        assert_eq!(econ[0].values[2], Value::Missing);
        assert_eq!(econ[1].values[0], Value::Text("textiles".into()));

        let fleet: Vec<&CanonicalColumn> = out.derived_after("vehicles_electric").collect();
        assert_eq!(fleet.len(), 1);
        assert_eq!(
            fleet[0].values,
            vec![Value::Int(3), Value::Missing, Value::Int(4)]
        );
    }

    #[test]
    fn overflowing_fleet_total_is_missing_and_reported() {
        let diesel = "Por favor indique la cantidad de vehículos con combustión a diésel (ACPM) con los que cuenta su empresa:";
        let gasoline = "Por favor indique la cantidad de vehículos con combustión a gasolina con los que cuenta su empresa:";
        let table = coerce_table(
            Registry::builtin(),
            &raw(
                &["id", diesel, gasoline],
                &[
                    &["1", "9000000000000000000", "9000000000000000000"],
                    &["2", "3", "4"],
                ],
            ),
        )
        .table;
        let out = translate_table(&table, Translator::builtin());

        let fleet: Vec<&CanonicalColumn> = out.derived_after("vehicles_electric").collect();
        assert_eq!(fleet[0].values, vec![Value::Missing, Value::Int(7)]);
        assert_eq!(out.fleet_overflows, vec![RecordKey::Id(1)]);
    }

    #[test]
    fn ungrouped_columns_are_untouched() {
        let table = coerce_table(
            Registry::builtin(),
            &raw(&["id", "Productos principales"], &[&["1", "Lunes"]]),
        )
        .table;
        let out = translate_table(&table, Translator::builtin());
        assert_eq!(
            out.table.column("main_products").unwrap().values[0],
            Value::Text("lunes".into())
        );
        assert!(out.unmapped.is_empty());
    }
}
