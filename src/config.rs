use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_DIR: &str = "data/intermediate";

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Normalize the ZUAP logistics survey export into analysis-ready datasets"
)]
pub struct Args {
    /// Raw survey export (delimited text with a header row).
    #[arg(short, long, env = "ZUAP_INPUT")]
    pub input: PathBuf,

    /// Directory receiving the views, diagnostics and quality report.
    #[arg(short, long, env = "ZUAP_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// JSON column dictionary replacing the built-in one.
    #[arg(long, env = "ZUAP_DICTIONARY")]
    pub dictionary: Option<PathBuf>,

    /// Field delimiter of the export.
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Skip the Parquet copies of the views.
    #[arg(long)]
    pub no_parquet: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub dictionary: Option<PathBuf>,
    pub delimiter: u8,
    pub write_parquet: bool,
}

impl PipelineConfig {
    /// Defaults for `input`: output to `data/intermediate`, comma-delimited,
    /// Parquet on, built-in dictionary.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            dictionary: None,
            delimiter: b',',
            write_parquet: true,
        }
    }

    pub fn from_args(args: Args) -> Result<Self> {
        Ok(Self {
            input: args.input,
            output_dir: args.output_dir,
            dictionary: args.dictionary,
            delimiter: delimiter_byte(args.delimiter)?,
            write_parquet: !args.no_parquet,
        })
    }
}

pub fn delimiter_byte(c: char) -> Result<u8> {
    if !c.is_ascii() {
        bail!("delimiter {:?} must be a single ASCII character", c);
    }
    Ok(c as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_with_defaults() -> anyhow::Result<()> {
        let args = Args::try_parse_from(["zuapclean", "--input", "raw.csv"])?;
        let cfg = PipelineConfig::from_args(args)?;
        assert_eq!(cfg.input, PathBuf::from("raw.csv"));
        assert_eq!(cfg.delimiter, b',');
        assert!(cfg.write_parquet);
        assert!(cfg.dictionary.is_none());
        Ok(())
    }

    #[test]
    fn honours_overrides() -> anyhow::Result<()> {
        let args = Args::try_parse_from([
            "zuapclean",
            "-i",
            "raw.csv",
            "-o",
            "out",
            "--delimiter",
            ";",
            "--no-parquet",
            "--dictionary",
            "dict.json",
        ])?;
        let cfg = PipelineConfig::from_args(args)?;
        assert_eq!(cfg.output_dir, PathBuf::from("out"));
        assert_eq!(cfg.delimiter, b';');
        assert!(!cfg.write_parquet);
        assert_eq!(cfg.dictionary, Some(PathBuf::from("dict.json")));
        Ok(())
    }

    #[test]
    fn rejects_non_ascii_delimiter() {
        assert!(delimiter_byte('¦').is_err());
    }
}
