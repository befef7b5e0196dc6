// src/table.rs
use crate::error::{LoadError, PipelineError};
use arrow::{
    array::{Array, ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray},
    compute::filter_record_batch,
    datatypes::{Field, Schema},
    record_batch::RecordBatch,
};
use std::sync::Arc;

/// A record table: one Arrow batch plus the name of its row-key column.
///
/// Every transformation takes `&CreditTable` and hands back a new value; the
/// underlying arrays are reference counted so untouched columns are shared.
#[derive(Debug, Clone)]
pub struct CreditTable {
    batch: RecordBatch,
    key: String,
}

impl CreditTable {
    /// Wrap `batch`, checking the key column exists, is text and has no nulls.
    pub fn try_new(batch: RecordBatch, key: impl Into<String>) -> Result<Self, LoadError> {
        let key = key.into();
        let col = batch
            .column_by_name(&key)
            .ok_or_else(|| LoadError::MissingColumn(key.clone()))?;
        let ids = col
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| LoadError::ColumnType {
                column: key.clone(),
                expected: "Utf8".into(),
                found: col.data_type().to_string(),
            })?;
        if let Some(row) = (0..ids.len()).find(|&i| ids.is_null(i)) {
            return Err(LoadError::NullKey(row));
        }
        Ok(Self { batch, key })
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn into_batch(self) -> RecordBatch {
        self.batch
    }

    pub fn key_column(&self) -> &str {
        &self.key
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.batch.column_by_name(name).is_some()
    }

    pub fn column(&self, name: &str) -> Result<&ArrayRef, LoadError> {
        self.batch
            .column_by_name(name)
            .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
    }

    pub fn f64_column(&self, name: &str) -> Result<&Float64Array, LoadError> {
        self.typed_column(name, "Float64")
    }

    pub fn i64_column(&self, name: &str) -> Result<&Int64Array, LoadError> {
        self.typed_column(name, "Int64")
    }

    pub fn utf8_column(&self, name: &str) -> Result<&StringArray, LoadError> {
        self.typed_column(name, "Utf8")
    }

    fn typed_column<A: Array + 'static>(&self, name: &str, expected: &str) -> Result<&A, LoadError> {
        let col = self.column(name)?;
        col.as_any()
            .downcast_ref::<A>()
            .ok_or_else(|| LoadError::ColumnType {
                column: name.to_string(),
                expected: expected.to_string(),
                found: col.data_type().to_string(),
            })
    }

    /// Customer id of `row`, used to point error messages at a record.
    pub fn customer_id(&self, row: usize) -> String {
        self.batch
            .column_by_name(&self.key)
            .and_then(|c| c.as_any().downcast_ref::<StringArray>())
            .filter(|ids| row < ids.len() && ids.is_valid(row))
            .map(|ids| ids.value(row).to_string())
            .unwrap_or_else(|| format!("<row {row}>"))
    }

    /// Replace column `name` with `array`, or append it when absent. The
    /// field takes the array's data type.
    pub fn with_column(&self, name: &str, array: ArrayRef) -> Result<Self, PipelineError> {
        let schema = self.batch.schema();
        let mut fields: Vec<Field> = Vec::with_capacity(schema.fields().len() + 1);
        let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len() + 1);
        let mut replaced = false;

        for (field, col) in schema.fields().iter().zip(self.batch.columns()) {
            if field.name() == name {
                fields.push(Field::new(name, array.data_type().clone(), true));
                columns.push(array.clone());
                replaced = true;
            } else {
                fields.push(field.as_ref().clone());
                columns.push(col.clone());
            }
        }
        if !replaced {
            fields.push(Field::new(name, array.data_type().clone(), true));
            columns.push(array);
        }

        let schema = Arc::new(Schema::new_with_metadata(fields, schema.metadata().clone()));
        let batch = RecordBatch::try_new(schema, columns)?;
        Ok(Self {
            batch,
            key: self.key.clone(),
        })
    }

    /// Keep only the rows where `mask` is true.
    pub fn filter(&self, mask: &BooleanArray) -> Result<Self, PipelineError> {
        Ok(Self {
            batch: filter_record_batch(&self.batch, mask)?,
            key: self.key.clone(),
        })
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::CreditTable;
    use arrow::{
        array::{ArrayRef, Float64Array, Int64Array, StringArray},
        datatypes::{DataType, Field, Schema},
        record_batch::RecordBatch,
    };
    use std::sync::Arc;

    /// Build a table from named columns; the first must be the `customer_id` key.
    pub fn table(columns: Vec<(&str, ArrayRef)>) -> CreditTable {
        let fields: Vec<Field> = columns
            .iter()
            .map(|(n, a)| Field::new(*n, a.data_type().clone(), true))
            .collect();
        let arrays = columns.into_iter().map(|(_, a)| a).collect();
        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).unwrap();
        CreditTable::try_new(batch, "customer_id").unwrap()
    }

    pub fn ids(values: &[&str]) -> ArrayRef {
        Arc::new(StringArray::from(values.to_vec()))
    }

    pub fn ints(values: Vec<Option<i64>>) -> ArrayRef {
        Arc::new(Int64Array::from(values))
    }

    pub fn floats(values: Vec<Option<f64>>) -> ArrayRef {
        Arc::new(Float64Array::from(values))
    }

    pub fn strings(values: Vec<Option<&str>>) -> ArrayRef {
        Arc::new(StringArray::from(values))
    }

    pub fn field_type(table: &CreditTable, name: &str) -> DataType {
        table
            .batch()
            .schema()
            .field_with_name(name)
            .unwrap()
            .data_type()
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::test_util::*;
    use super::*;
    use crate::error::LoadError;

    #[test]
    fn test_with_column_replaces_in_place() {
        let t = table(vec![
            ("customer_id", ids(&["a", "b"])),
            ("sex", ints(vec![Some(1), Some(2)])),
            ("limit_bal", floats(vec![Some(1.0), Some(2.0)])),
        ]);
        let t2 = t
            .with_column("sex", strings(vec![Some("male"), Some("female")]))
            .unwrap();

        let names: Vec<String> = t2
            .batch()
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();
        assert_eq!(names, vec!["customer_id", "sex", "limit_bal"]);
        assert_eq!(t2.utf8_column("sex").unwrap().value(0), "male");
        // the original is untouched
        assert_eq!(t.i64_column("sex").unwrap().value(0), 1);
    }

    #[test]
    fn test_with_column_appends_new() {
        let t = table(vec![("customer_id", ids(&["a"]))]);
        let t2 = t.with_column("tmd", ints(vec![Some(3)])).unwrap();
        assert_eq!(t2.batch().num_columns(), 2);
        assert_eq!(t2.i64_column("tmd").unwrap().value(0), 3);
    }

    #[test]
    fn test_wrong_type_is_reported() {
        let t = table(vec![
            ("customer_id", ids(&["a"])),
            ("sex", strings(vec![Some("1")])),
        ]);
        match t.i64_column("sex") {
            Err(LoadError::ColumnType { column, .. }) => assert_eq!(column, "sex"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_null_key_rejected() {
        let batch = RecordBatch::try_new(
            Arc::new(Schema::new(vec![Field::new(
                "customer_id",
                arrow::datatypes::DataType::Utf8,
                true,
            )])),
            vec![strings(vec![Some("a"), None])],
        )
        .unwrap();
        assert!(matches!(
            CreditTable::try_new(batch, "customer_id"),
            Err(LoadError::NullKey(1))
        ));
    }

    #[test]
    fn test_customer_id_lookup() {
        let t = table(vec![("customer_id", ids(&["c-17", "c-18"]))]);
        assert_eq!(t.customer_id(1), "c-18");
        assert_eq!(t.customer_id(9), "<row 9>");
    }
}
