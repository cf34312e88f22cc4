use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use zuapclean::{
    config::{Args, PipelineConfig},
    pipeline,
};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();
    info!("startup");

    // ─── 2) configure ────────────────────────────────────────────────
    let config = PipelineConfig::from_args(Args::parse())?;
    info!(
        input = %config.input.display(),
        output = %config.output_dir.display(),
        parquet = config.write_parquet,
        "configured"
    );

    // ─── 3) run ──────────────────────────────────────────────────────
    let out = pipeline::run(&config)?;
    out.quality.print();

    for view in &out.views {
        info!(view = view.name(), rows = view.num_rows(), columns = view.columns.len(), "written");
    }
    info!(diagnostics = out.diagnostics.len(), "done");
    Ok(())
}
