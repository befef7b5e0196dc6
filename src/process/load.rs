// src/process/load.rs
use crate::error::LoadError;
use crate::schema;
use crate::table::CreditTable;
use arrow::{
    compute::concat_batches,
    csv::{reader::Format, ReaderBuilder},
    datatypes::{DataType, Field, Schema},
    error::ArrowError,
    record_batch::RecordBatch,
};
use std::{
    fs::File,
    io::Seek,
    path::Path,
    sync::Arc,
};
use tracing::{debug, info, instrument};

const INFER_ROWS: usize = 1_000;
const BATCH_ROWS: usize = 64 * 1024;

/// Build the schema the CSV is read with:
/// - key and `text` columns as Utf8 (ids keep leading zeros, labels are
///   never coerced to numbers or booleans),
/// - known dataset columns forced to their canonical type,
/// - everything else as inferred (Null → Utf8).
fn make_read_schema(inferred: &Schema, key: &str, text: &[&str]) -> Arc<Schema> {
    let fields: Vec<Field> = inferred
        .fields()
        .iter()
        .map(|f| {
            let dt = if f.name() == key || text.contains(&f.name().as_str()) {
                DataType::Utf8
            } else if let Some(dt) = schema::read_type(f.name()) {
                dt
            } else if f.data_type() == &DataType::Null {
                DataType::Utf8
            } else {
                f.data_type().clone()
            };
            Field::new(f.name(), dt, true)
        })
        .collect();
    Arc::new(Schema::new(fields))
}

/// Read a header-first CSV file into a table keyed by `key`. Columns named in
/// `text` are read as Utf8 whatever their contents look like.
#[instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_table<P: AsRef<Path>>(
    path: P,
    key: &str,
    text: &[&str],
) -> Result<CreditTable, LoadError> {
    let path = path.as_ref();
    let parse_err = |source: ArrowError| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    // 1) infer column names and types from the head of the file
    let format = Format::default().with_header(true);
    let (inferred, sampled) = format
        .infer_schema(&mut file, Some(INFER_ROWS))
        .map_err(parse_err)?;
    debug!(columns = inferred.fields().len(), sampled, "inferred schema");

    if inferred.field_with_name(key).is_err() {
        return Err(LoadError::MissingKey {
            path: path.to_path_buf(),
            column: key.to_string(),
        });
    }

    // 2) rewind and read with the canonical schema
    file.rewind().map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let read_schema = make_read_schema(&inferred, key, text);
    let reader = ReaderBuilder::new(read_schema.clone())
        .with_header(true)
        .with_batch_size(BATCH_ROWS)
        .build(file)
        .map_err(parse_err)?;

    let batches = reader
        .collect::<Result<Vec<RecordBatch>, ArrowError>>()
        .map_err(parse_err)?;
    let batch = concat_batches(&read_schema, &batches).map_err(parse_err)?;

    info!(rows = batch.num_rows(), columns = batch.num_columns(), "loaded");
    CreditTable::try_new(batch, key)
}

/// Fail with `MissingColumn` for the first of `columns` the table lacks.
pub fn require_columns<'a, I>(table: &CreditTable, columns: I) -> Result<(), LoadError>
where
    I: IntoIterator<Item = &'a str>,
{
    for col in columns {
        if !table.has_column(col) {
            return Err(LoadError::MissingColumn(col.to_string()));
        }
    }
    Ok(())
}
