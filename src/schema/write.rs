use anyhow::{Context, Result};
use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::info;

use super::Registry;

/// Write every definition of `registry` to `path` as pretty JSON.
///
/// The file is written to a dot-prefixed temp file next to `path` and renamed
/// over it, so readers never observe a partial dictionary.
pub fn write_dictionary<P: AsRef<Path>>(registry: &Registry, path: P) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("dictionary.json");
    let tmp_path = dir.join(format!(".{}.tmp", file_name));

    let tmp = fs::File::create(&tmp_path)
        .with_context(|| format!("creating {}", tmp_path.display()))?;
    let mut out = BufWriter::new(tmp);

    // pretty-print with a trailing newline
    serde_json::to_writer_pretty(&mut out, registry.all()).context("serializing dictionary")?;
    out.write_all(b"\n")?;
    out.flush()
        .with_context(|| format!("flushing {}", tmp_path.display()))?;
    drop(out);

    fs::rename(&tmp_path, path)
        .with_context(|| format!("renaming {} -> {}", tmp_path.display(), path.display()))?;

    info!(path = %path.display(), columns = registry.len(), "dictionary written");
    Ok(())
}
