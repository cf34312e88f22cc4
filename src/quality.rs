//! Per-column missingness and coercion-failure audit. Informational only.

use anyhow::{Context, Result};
use prettytable::{format, Cell, Row, Table};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::process::{CanonicalTable, CoercionFailure};
use crate::schema::SemanticType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Tier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Tier {
    /// Excellent ≤5%, Good ≤15%, Fair ≤30%, Poor otherwise.
    pub fn from_percent(pct: f64) -> Self {
        if pct <= 5.0 {
            Tier::Excellent
        } else if pct <= 15.0 {
            Tier::Good
        } else if pct <= 30.0 {
            Tier::Fair
        } else {
            Tier::Poor
        }
    }

    fn style(self) -> &'static str {
        match self {
            Tier::Excellent => "Fg",
            Tier::Good => "Fc",
            Tier::Fair => "Fy",
            Tier::Poor => "Fr",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnQuality {
    pub column: String,
    pub semantic_type: SemanticType,
    pub missing: usize,
    pub failures: usize,
    pub percent: f64,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct QualityReport {
    pub records: usize,
    pub columns: Vec<ColumnQuality>,
}

/// Audit every coerced column, in registry order. A failed cell counts as a
/// failure, not as missing.
#[tracing::instrument(level = "info", skip_all, fields(records = table.len()))]
pub fn assess(table: &CanonicalTable, failures: &[CoercionFailure]) -> QualityReport {
    let mut failed: HashMap<&str, HashSet<usize>> = HashMap::new();
    for f in failures {
        failed.entry(f.column.as_str()).or_default().insert(f.index);
    }

    let records = table.len();
    let columns = table
        .columns
        .iter()
        .map(|col| {
            let empty = HashSet::new();
            let bad = failed.get(col.def.canonical_label.as_str()).unwrap_or(&empty);
            let missing = col
                .values
                .iter()
                .enumerate()
                .filter(|(i, v)| v.is_missing() && !bad.contains(i))
                .count();
            let percent = if records == 0 {
                0.0
            } else {
                (missing + bad.len()) as f64 * 100.0 / records as f64
            };
            ColumnQuality {
                column: col.def.canonical_label.clone(),
                semantic_type: col.def.semantic_type,
                missing,
                failures: bad.len(),
                percent,
                tier: Tier::from_percent(percent),
            }
        })
        .collect();

    let report = QualityReport { records, columns };
    let counts = report.tier_counts();
    info!(
        records,
        columns = report.columns.len(),
        excellent = counts.get(&Tier::Excellent).copied().unwrap_or(0),
        good = counts.get(&Tier::Good).copied().unwrap_or(0),
        fair = counts.get(&Tier::Fair).copied().unwrap_or(0),
        poor = counts.get(&Tier::Poor).copied().unwrap_or(0),
        "quality assessed"
    );
    report
}

impl QualityReport {
    pub fn column(&self, label: &str) -> Option<&ColumnQuality> {
        self.columns.iter().find(|c| c.column == label)
    }

    pub fn tier_counts(&self) -> HashMap<Tier, usize> {
        let mut out = HashMap::new();
        for c in &self.columns {
            *out.entry(c.tier).or_insert(0) += 1;
        }
        out
    }

    /// Box-drawn table for the terminal.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        table.add_row(Row::new(vec![
            Cell::new("Column").style_spec("bFg"),
            Cell::new("Type").style_spec("bFg"),
            Cell::new("Missing").style_spec("bFg"),
            Cell::new("Failures").style_spec("bFg"),
            Cell::new("% Missing+Failed").style_spec("bFg"),
            Cell::new("Tier").style_spec("bFg"),
        ]));

        for c in &self.columns {
            table.add_row(Row::new(vec![
                Cell::new(&c.column),
                Cell::new(c.semantic_type.as_str()),
                Cell::new(&c.missing.to_string()).style_spec("r"),
                Cell::new(&c.failures.to_string()).style_spec("r"),
                Cell::new(&format!("{:.1}", c.percent)).style_spec("r"),
                Cell::new(&c.tier.to_string()).style_spec(c.tier.style()),
            ]));
        }
        table
    }

    pub fn print(&self) {
        println!("\n--- Data Quality ({} records) ---", self.records);
        self.to_table().printstd();
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        let mut wtr = csv::Writer::from_path(path)
            .with_context(|| format!("creating {}", path.display()))?;
        for c in &self.columns {
            wtr.serialize(c)
                .with_context(|| format!("writing quality row for {}", c.column))?;
        }
        wtr.flush()
            .with_context(|| format!("flushing {}", path.display()))?;
        Ok(())
    }
}
