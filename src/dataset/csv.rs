use anyhow::{Context, Result};
use std::{fs, path::Path};
use tracing::debug;

use super::DerivedDataset;

/// Write `dataset` as `<dir>/<view>.csv` through a temp file + rename.
/// Missing values are empty cells; label sets are `;`-joined.
pub fn write_csv(dataset: &DerivedDataset, dir: &Path) -> Result<std::path::PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let final_path = dir.join(format!("{}.csv", dataset.name()));
    let tmp_path = dir.join(format!(".{}.csv.tmp", dataset.name()));

    {
        let mut wtr = csv::Writer::from_path(&tmp_path)
            .with_context(|| format!("creating {}", tmp_path.display()))?;
        wtr.write_record(dataset.column_names())
            .context("writing CSV header")?;
        for i in 0..dataset.num_rows() {
            let row: Vec<String> = dataset
                .columns
                .iter()
                .map(|c| c.data.render(i).unwrap_or_default())
                .collect();
            wtr.write_record(&row)
                .with_context(|| format!("writing row {} of {}", i, dataset.name()))?;
        }
        wtr.flush()
            .with_context(|| format!("flushing {}", tmp_path.display()))?;
    }

    fs::rename(&tmp_path, &final_path).with_context(|| {
        format!(
            "renaming {} -> {}",
            tmp_path.display(),
            final_path.display()
        )
    })?;
    debug!(path = %final_path.display(), rows = dataset.num_rows(), "csv written");
    Ok(final_path)
}
