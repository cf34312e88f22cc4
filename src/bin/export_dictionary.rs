use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

use zuapclean::{
    labels::Translator,
    schema::{write_dictionary, Registry},
};

#[derive(Parser)]
#[command(author, version, about = "Write the built-in column dictionary as JSON")]
struct Args {
    #[arg(short, long, default_value = "dictionary.json")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let registry = Registry::builtin();
    write_dictionary(registry, &args.output)?;

    tracing::info!(
        columns = registry.len(),
        active = registry.active().count(),
        mappings = Translator::builtin().version(),
        "exported"
    );
    Ok(())
}
