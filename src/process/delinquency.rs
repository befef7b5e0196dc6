// src/process/delinquency.rs
use crate::error::PipelineError;
use crate::table::CreditTable;
use arrow::{array::ArrayRef, compute::kernels::numeric::add};

/// Append `output` = sum of the monthly status columns. A null in any source
/// makes that row's total null.
pub fn total_months_delinquent(
    table: &CreditTable,
    sources: &[&str],
    output: &str,
) -> Result<CreditTable, PipelineError> {
    let mut total: Option<ArrayRef> = None;
    for name in sources {
        // checked before the sum so a wrongly typed column reports its name
        table.i64_column(name)?;
        let col = table.column(name)?;
        total = Some(match total {
            None => col.clone(),
            Some(acc) => add(&acc, col)?,
        });
    }
    let total = total.ok_or_else(|| {
        PipelineError::Arrow(arrow::error::ArrowError::InvalidArgumentError(
            "no source columns to sum".into(),
        ))
    })?;
    table.with_column(output, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PAY_STATUS;
    use crate::table::test_util::*;
    use arrow::array::Array;

    fn status_table(rows: &[[Option<i64>; 6]]) -> CreditTable {
        let keys: Vec<String> = (0..rows.len()).map(|i| format!("c{i}")).collect();
        let key_refs: Vec<&str> = keys.iter().map(String::as_str).collect();
        let mut cols = vec![("customer_id", ids(&key_refs))];
        for (m, name) in PAY_STATUS.iter().enumerate() {
            cols.push((*name, ints(rows.iter().map(|r| r[m]).collect())));
        }
        table(cols)
    }

    #[test]
    fn test_sum_of_six_months() {
        let t = status_table(&[
            [Some(0), Some(0), Some(0), Some(0), Some(0), Some(1)],
            [Some(2), Some(2), Some(-1), Some(0), Some(3), Some(1)],
        ]);
        let out = total_months_delinquent(&t, &PAY_STATUS, "tmd").unwrap();
        let tmd = out.i64_column("tmd").unwrap();
        assert_eq!(tmd.value(0), 1);
        assert_eq!(tmd.value(1), 7);
        // sources are kept
        assert!(out.has_column("pay_6"));
    }

    #[test]
    fn test_any_missing_month_gives_null() {
        let t = status_table(&[
            [Some(1), Some(1), None, Some(1), Some(1), Some(1)],
            [Some(1); 6],
        ]);
        let out = total_months_delinquent(&t, &PAY_STATUS, "tmd").unwrap();
        let tmd = out.i64_column("tmd").unwrap();
        assert!(tmd.is_null(0));
        assert_eq!(tmd.value(1), 6);
    }

    #[test]
    fn test_missing_source_column() {
        let t = table(vec![("customer_id", ids(&["a"]))]);
        assert!(matches!(
            total_months_delinquent(&t, &PAY_STATUS, "tmd"),
            Err(PipelineError::Load(_))
        ));
    }
}
