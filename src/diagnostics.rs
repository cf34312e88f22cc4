//! Run-level report of every recoverable problem.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::process::{CoercionOutput, RecordKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DiagnosticKind {
    UnknownColumn,
    CoercionFailure,
    UnmappedLabel,
    EmptyLabelUniverse,
    DuplicateRecord,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiagnosticKind::UnknownColumn => "UnknownColumn",
            DiagnosticKind::CoercionFailure => "CoercionFailure",
            DiagnosticKind::UnmappedLabel => "UnmappedLabel",
            DiagnosticKind::EmptyLabelUniverse => "EmptyLabelUniverse",
            DiagnosticKind::DuplicateRecord => "DuplicateRecord",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub column: String,
    /// `id=<id>` or `row=<n>`; empty for column-level diagnostics.
    pub record: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        kind: DiagnosticKind,
        column: impl Into<String>,
        record: Option<RecordKey>,
        reason: impl Into<String>,
    ) {
        self.items.push(Diagnostic {
            kind,
            column: column.into(),
            record: record.map(|k| k.to_string()).unwrap_or_default(),
            reason: reason.into(),
        });
    }

    /// Record everything the coercion stage found.
    pub fn record_coercion(&mut self, out: &CoercionOutput) {
        for column in &out.unknown_columns {
            warn!(column = %column, "unknown column dropped");
            self.push(
                DiagnosticKind::UnknownColumn,
                column.as_str(),
                None,
                "not in the dictionary; dropped from every view",
            );
        }
        for f in &out.failures {
            self.push(
                DiagnosticKind::CoercionFailure,
                f.column.as_str(),
                Some(f.record),
                f.reason.as_str(),
            );
        }
        if !out.failures.is_empty() {
            warn!(failures = out.failures.len(), "values could not be coerced");
        }
        for d in &out.duplicates {
            warn!(record = %d.key, row = d.row, "duplicate record dropped");
            self.push(
                DiagnosticKind::DuplicateRecord,
                "id",
                Some(d.key),
                format!("source row {} repeats an earlier id", d.row),
            );
        }
    }

    /// One `UnmappedLabel` per (column, label), with its occurrence count.
    pub fn record_unmapped(&mut self, column: &str, group: &str, counts: &BTreeMap<String, usize>) {
        for (label, n) in counts {
            warn!(column, group, label = %label, occurrences = n, "unmapped label");
            self.push(
                DiagnosticKind::UnmappedLabel,
                column,
                None,
                format!("`{label}` not in {group} table ({n} occurrences)"),
            );
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.items.iter().filter(|d| d.kind == kind).count()
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(move |d| d.kind == kind)
    }

    pub fn summary(&self) -> BTreeMap<DiagnosticKind, usize> {
        let mut out = BTreeMap::new();
        for d in &self.items {
            *out.entry(d.kind).or_insert(0) += 1;
        }
        out
    }

    /// Write `kind,column,record,reason` rows to `path`.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        let mut wtr = csv::Writer::from_path(path)
            .with_context(|| format!("creating {}", path.display()))?;
        wtr.write_record(["kind", "column", "record", "reason"])?;
        for d in &self.items {
            let kind = d.kind.to_string();
            wtr.write_record([
                kind.as_str(),
                d.column.as_str(),
                d.record.as_str(),
                d.reason.as_str(),
            ])?;
        }
        wtr.flush()
            .with_context(|| format!("flushing {}", path.display()))?;
        Ok(())
    }
}
