// src/process/dedup.rs
use crate::error::{LoadError, PipelineError};
use crate::table::CreditTable;
use arrow::{
    array::{Array, BooleanArray},
    row::{RowConverter, SortField},
};
use std::collections::HashSet;

/// Drop rows that repeat an earlier row across every column (key included),
/// keeping the first occurrence and the original order.
pub fn deduplicate(table: &CreditTable) -> Result<CreditTable, PipelineError> {
    let batch = table.batch();
    let sort_fields = batch
        .schema()
        .fields()
        .iter()
        .map(|f| SortField::new(f.data_type().clone()))
        .collect();
    let converter = RowConverter::new(sort_fields)?;
    let rows = converter.convert_columns(batch.columns())?;

    let mut seen = HashSet::with_capacity(rows.num_rows());
    let keep: BooleanArray = rows.iter().map(|row| Some(seen.insert(row))).collect();
    table.filter(&keep)
}

/// Every customer id must now identify exactly one row.
pub fn ensure_unique_key(table: &CreditTable) -> Result<(), LoadError> {
    let ids = table.utf8_column(table.key_column())?;
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids.iter().flatten() {
        if !seen.insert(id) {
            return Err(LoadError::DuplicateKey(id.to_string()));
        }
    }
    Ok(())
}
