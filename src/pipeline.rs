//! End-to-end run: ingest, coerce, translate, build views, write everything.

use anyhow::{Context, Result};
use std::{
    io::Read,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::config::PipelineConfig;
use crate::dataset::{self, build_views, translate_table, DerivedDataset};
use crate::dataset::translation::FLEET_TOTAL_LABEL;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::labels::Translator;
use crate::process::{self, coerce_table, CanonicalTable, RawTable};
use crate::quality::{self, QualityReport};
use crate::schema::Registry;

pub const DIAGNOSTICS_FILE: &str = "diagnostics.csv";
pub const QUALITY_FILE: &str = "quality_report.csv";

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub canonical: CanonicalTable,
    pub views: Vec<DerivedDataset>,
    pub diagnostics: Diagnostics,
    pub quality: QualityReport,
}

impl PipelineOutput {
    pub fn view(&self, name: &str) -> Option<&DerivedDataset> {
        self.views.iter().find(|v| v.name() == name)
    }
}

/// Registry and translation tables a run works against.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'a> {
    registry: &'a Registry,
    translator: &'a Translator,
}

impl<'a> Pipeline<'a> {
    pub fn new(registry: &'a Registry, translator: &'a Translator) -> Self {
        Self {
            registry,
            translator,
        }
    }

    /// Built-in dictionary and mapping tables.
    pub fn builtin() -> Pipeline<'static> {
        Pipeline::new(Registry::builtin(), Translator::builtin())
    }

    /// Coerce `raw` and audit it, without building views.
    pub fn audit(&self, raw: &RawTable) -> (QualityReport, Diagnostics) {
        let coerced = coerce_table(self.registry, raw);
        let mut diagnostics = Diagnostics::new();
        diagnostics.record_coercion(&coerced);
        let report = quality::assess(&coerced.table, &coerced.failures);
        (report, diagnostics)
    }

    #[tracing::instrument(level = "info", skip_all, fields(records = raw.len()))]
    pub fn process(&self, raw: &RawTable) -> PipelineOutput {
        let mut diagnostics = Diagnostics::new();

        let coerced = coerce_table(self.registry, raw);
        diagnostics.record_coercion(&coerced);
        let quality = quality::assess(&coerced.table, &coerced.failures);

        let translated = translate_table(&coerced.table, self.translator);
        for u in &translated.unmapped {
            diagnostics.record_unmapped(&u.column, u.group.as_str(), &u.counts);
        }
        for key in &translated.fleet_overflows {
            diagnostics.push(
                DiagnosticKind::CoercionFailure,
                FLEET_TOTAL_LABEL,
                Some(*key),
                "sum of vehicle counts overflows; left missing",
            );
        }

        let views = build_views(&coerced.table, &translated, &mut diagnostics);

        info!(
            records = coerced.table.len(),
            views = views.len(),
            diagnostics = diagnostics.len(),
            "pipeline finished"
        );

        PipelineOutput {
            canonical: coerced.table,
            views,
            diagnostics,
            quality,
        }
    }

    pub fn process_reader<R: Read>(&self, reader: R, delimiter: u8) -> Result<PipelineOutput> {
        let raw = process::read_export(reader, delimiter)?;
        Ok(self.process(&raw))
    }
}

/// Write every view (CSV, optionally Parquet), the diagnostics and the
/// quality report under `dir`. Returns the written paths.
#[tracing::instrument(level = "info", skip(out, dir), fields(dir = %dir.display()))]
pub fn write_outputs(out: &PipelineOutput, dir: &Path, parquet: bool) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    let mut written = Vec::new();
    for view in &out.views {
        written.push(dataset::csv::write_csv(view, dir)?);
        if parquet {
            written.push(dataset::parquet::write_parquet(view, dir)?);
        }
    }

    let diag_path = dir.join(DIAGNOSTICS_FILE);
    out.diagnostics.write_csv(&diag_path)?;
    written.push(diag_path);

    let quality_path = dir.join(QUALITY_FILE);
    out.quality.write_csv(&quality_path)?;
    written.push(quality_path);

    info!(files = written.len(), "outputs written");
    Ok(written)
}

/// Load the dictionary `config` names, or fall back to the built-in one.
pub fn load_registry(config: &PipelineConfig) -> Result<Option<Registry>> {
    config
        .dictionary
        .as_ref()
        .map(|p| {
            Registry::from_json_file(p)
                .with_context(|| format!("loading dictionary {}", p.display()))
        })
        .transpose()
}

/// Full run as configured.
pub fn run(config: &PipelineConfig) -> Result<PipelineOutput> {
    let custom = load_registry(config)?;
    let registry = custom.as_ref().unwrap_or_else(|| Registry::builtin());
    let pipeline = Pipeline::new(registry, Translator::builtin());

    let raw = process::load_export(&config.input, config.delimiter)?;
    let out = pipeline.process(&raw);
    write_outputs(&out, &config.output_dir, config.write_parquet)?;

    for (kind, n) in out.diagnostics.summary() {
        info!(kind = %kind, count = n, "diagnostics");
    }
    Ok(out)
}
