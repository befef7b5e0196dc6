// src/output.rs
use crate::error::OutputError;
use crate::table::CreditTable;
use arrow::{
    csv::WriterBuilder,
    datatypes::Schema,
    record_batch::RecordBatch,
};
use parquet::{
    arrow::ArrowWriter,
    basic::{Compression, ZstdLevel},
    file::properties::WriterProperties,
};
use std::{
    fs::{self, File},
    path::Path,
    sync::Arc,
};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Parquet,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
        }
    }

    /// `.parquet` files are written as Parquet, anything else as CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(e) if e.eq_ignore_ascii_case("parquet") => OutputFormat::Parquet,
            _ => OutputFormat::Csv,
        }
    }
}

/// Move the key column to the front so persisted files lead with the row key.
fn key_first(table: &CreditTable) -> Result<RecordBatch, OutputError> {
    let batch = table.batch();
    let schema = batch.schema();
    let key_idx = schema.index_of(table.key_column())?;
    let order: Vec<usize> = std::iter::once(key_idx)
        .chain((0..schema.fields().len()).filter(|&i| i != key_idx))
        .collect();
    Ok(batch.project(&order)?)
}

fn write_batch(file: File, batch: &RecordBatch, format: OutputFormat) -> Result<(), OutputError> {
    match format {
        OutputFormat::Csv => {
            let mut writer = WriterBuilder::new().with_header(true).build(file);
            writer.write(batch)?;
        }
        OutputFormat::Parquet => {
            let props = WriterProperties::builder()
                .set_compression(Compression::ZSTD(ZstdLevel::default()))
                .set_dictionary_enabled(true)
                .build();
            let schema: Arc<Schema> = batch.schema();
            let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
            writer.write(batch)?;
            writer.close()?;
        }
    }
    Ok(())
}

/// Write `table` to `path`, picking the format from the extension. The file
/// is written to a `.tmp` sibling first and renamed once complete; a failed
/// write leaves neither file behind.
pub fn write_table(table: &CreditTable, path: &Path) -> Result<(), OutputError> {
    let io_err = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };
    let batch = key_first(table)?;
    let format = OutputFormat::from_path(path);
    let tmp_path = path.with_extension(format!("{}.tmp", format.extension()));

    let file = File::create(&tmp_path).map_err(io_err)?;
    if let Err(e) = write_batch(file, &batch, format) {
        if let Err(rm) = fs::remove_file(&tmp_path) {
            warn!(path = %tmp_path.display(), "failed to remove partial file: {}", rm);
        }
        return Err(e);
    }
    fs::rename(&tmp_path, path).map_err(io_err)?;

    info!(path = %path.display(), rows = batch.num_rows(), ?format, "wrote table");
    Ok(())
}
