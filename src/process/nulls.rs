// src/process/nulls.rs
use crate::error::PipelineError;
use crate::table::CreditTable;
use arrow::{
    array::BooleanArray,
    compute::{and, is_not_null},
};

/// Drop rows with a null in any of `columns`.
pub fn drop_null_rows(table: &CreditTable, columns: &[&str]) -> Result<CreditTable, PipelineError> {
    let mut keep = BooleanArray::from(vec![true; table.num_rows()]);
    for name in columns {
        let col = table.column(name)?;
        keep = and(&keep, &is_not_null(col.as_ref())?)?;
    }
    table.filter(&keep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::test_util::*;

    #[test]
    fn test_drops_only_rows_with_nulls_in_listed_columns() {
        let t = table(vec![
            ("customer_id", ids(&["a", "b", "c", "d"])),
            ("sex", ints(vec![Some(1), None, Some(2), Some(1)])),
            ("limit_bal", floats(vec![Some(1.0), Some(1.0), None, Some(1.0)])),
            ("note", strings(vec![None, None, None, None])),
        ]);
        let out = drop_null_rows(&t, &["sex", "limit_bal"]).unwrap();
        let ids: Vec<_> = out.utf8_column("customer_id").unwrap().iter().flatten().collect();
        assert_eq!(ids, vec!["a", "d"]);
    }
}
