use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

use zuapclean::{
    config::delimiter_byte,
    diagnostics::DiagnosticKind,
    pipeline::Pipeline,
    process,
    schema::Registry,
};

/// Audit a raw export: coerce it and print per-column quality, without
/// writing any view.
#[derive(Parser)]
#[command(author, version, about = "Per-column quality audit of a raw survey export")]
struct Args {
    #[arg(short, long, env = "ZUAP_INPUT")]
    input: PathBuf,
    #[arg(long, env = "ZUAP_DICTIONARY")]
    dictionary: Option<PathBuf>,
    #[arg(long, default_value_t = ',')]
    delimiter: char,
    /// Also write the report as CSV here.
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr) // Log to stderr
        .init();

    let args = Args::parse();
    let custom = args
        .dictionary
        .as_ref()
        .map(Registry::from_json_file)
        .transpose()
        .context("loading dictionary")?;
    let registry = custom.as_ref().unwrap_or_else(|| Registry::builtin());

    let raw = process::load_export(&args.input, delimiter_byte(args.delimiter)?)?;
    let (report, diagnostics) = Pipeline::new(registry, zuapclean::labels::Translator::builtin())
        .audit(&raw);

    report.print();
    println!(
        "\n{} unknown columns, {} coercion failures, {} duplicate records",
        diagnostics.count(DiagnosticKind::UnknownColumn),
        diagnostics.count(DiagnosticKind::CoercionFailure),
        diagnostics.count(DiagnosticKind::DuplicateRecord),
    );

    if let Some(path) = args.csv {
        report.write_csv(&path)?;
        tracing::info!(path = %path.display(), "quality report written");
    }
    Ok(())
}
