use anyhow::{Context, Result};
use arrow::{
    array::{
        ArrayRef, BooleanBuilder, Float64Builder, Int64Builder, ListBuilder, StringBuilder,
        StringDictionaryBuilder, TimestampMicrosecondBuilder,
    },
    datatypes::{DataType, Field, Int32Type, Schema, TimeUnit},
    record_batch::{RecordBatch, RecordBatchOptions},
};
use parquet::{arrow::ArrowWriter, basic::Compression, file::properties::WriterProperties};
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::debug;

use super::{ColumnData, DerivedDataset};

/// Arrow type of each column encoding.
pub fn arrow_type(data: &ColumnData) -> DataType {
    match data {
        ColumnData::Int(_) => DataType::Int64,
        ColumnData::Float(_) => DataType::Float64,
        ColumnData::Bool(_) => DataType::Boolean,
        ColumnData::Text(_) => DataType::Utf8,
        ColumnData::Category(_) => {
            DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8))
        }
        ColumnData::Date(_) => DataType::Timestamp(TimeUnit::Microsecond, None),
        ColumnData::LabelSet(_) => {
            DataType::List(Arc::new(Field::new("item", DataType::Utf8, true)))
        }
    }
}

/// Build an Arrow schema (inside an Arc) for `dataset`.
pub fn build_arrow_schema(dataset: &DerivedDataset) -> Arc<Schema> {
    let fields: Vec<Field> = dataset
        .columns
        .iter()
        .map(|c| Field::new(&c.name, arrow_type(&c.data), /* nullable = */ true))
        .collect();
    Arc::new(Schema::new(fields))
}

fn to_array(data: &ColumnData) -> Result<ArrayRef> {
    let array: ArrayRef = match data {
        ColumnData::Int(v) => {
            let mut b = Int64Builder::with_capacity(v.len());
            for x in v {
                b.append_option(*x);
            }
            Arc::new(b.finish())
        }
        ColumnData::Float(v) => {
            let mut b = Float64Builder::with_capacity(v.len());
            for x in v {
                b.append_option(*x);
            }
            Arc::new(b.finish())
        }
        ColumnData::Bool(v) => {
            let mut b = BooleanBuilder::with_capacity(v.len());
            for x in v {
                b.append_option(*x);
            }
            Arc::new(b.finish())
        }
        ColumnData::Text(v) => {
            let mut b = StringBuilder::new();
            for x in v {
                b.append_option(x.as_deref());
            }
            Arc::new(b.finish())
        }
        ColumnData::Category(v) => {
            let mut b = StringDictionaryBuilder::<Int32Type>::new();
            for x in v {
                match x {
                    Some(s) => {
                        b.append(s).context("appending dictionary value")?;
                    }
                    None => b.append_null(),
                }
            }
            Arc::new(b.finish())
        }
        ColumnData::Date(v) => {
            let mut b = TimestampMicrosecondBuilder::with_capacity(v.len());
            for x in v {
                b.append_option(x.map(|dt| dt.and_utc().timestamp_micros()));
            }
            Arc::new(b.finish())
        }
        ColumnData::LabelSet(v) => {
            let mut b = ListBuilder::new(StringBuilder::new());
            for x in v {
                match x {
                    Some(set) => {
                        for label in set {
                            b.values().append_value(label);
                        }
                        b.append(true);
                    }
                    None => b.append(false),
                }
            }
            Arc::new(b.finish())
        }
    };
    Ok(array)
}

/// Convert `dataset` into a single record batch.
pub fn to_record_batch(dataset: &DerivedDataset) -> Result<RecordBatch> {
    let schema = build_arrow_schema(dataset);
    let arrays: Vec<ArrayRef> = dataset
        .columns
        .iter()
        .map(|c| to_array(&c.data).with_context(|| format!("building column {}", c.name)))
        .collect::<Result<_>>()?;
    let options = RecordBatchOptions::new().with_row_count(Some(dataset.num_rows()));
    RecordBatch::try_new_with_options(schema, arrays, &options)
        .with_context(|| format!("building record batch for {}", dataset.name()))
}

/// Write `dataset` as `<dir>/<view>.parquet` (Snappy, dictionary encoding
/// on) via a temp file + rename.
pub fn write_parquet(dataset: &DerivedDataset, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let final_path = dir.join(format!("{}.parquet", dataset.name()));
    let tmp_path = dir.join(format!(".{}.parquet.tmp", dataset.name()));

    let batch = to_record_batch(dataset)?;

    let tmp_file = File::create(&tmp_path)
        .with_context(|| format!("creating temporary Parquet file {}", tmp_path.display()))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .set_dictionary_enabled(true)
        .build();
    let mut writer = ArrowWriter::try_new(tmp_file, batch.schema(), Some(props))
        .context("initializing Parquet writer")?;
    writer.write(&batch).context("writing batch to Parquet")?;
    writer.close().context("closing Parquet writer")?;

    fs::rename(&tmp_path, &final_path).with_context(|| {
        format!(
            "renaming {} -> {}",
            tmp_path.display(),
            final_path.display()
        )
    })?;

    let bytes = fs::metadata(&final_path)
        .context("getting file metadata")?
        .len();
    debug!(path = %final_path.display(), rows = dataset.num_rows(), bytes, "parquet written");
    Ok(final_path)
}
