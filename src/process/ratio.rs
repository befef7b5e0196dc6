// src/process/ratio.rs
use crate::config::Strictness;
use crate::error::PipelineError;
use crate::schema;
use crate::table::CreditTable;
use arrow::array::{Array, ArrayRef, Float64Array};
use std::sync::Arc;
use tracing::{debug, warn};

/// Divide each of `columns` by `divisor`, row by row.
#[derive(Debug, Clone)]
pub struct RatioTransform {
    pub columns: Vec<String>,
    pub divisor: String,
}

impl RatioTransform {
    pub fn new<I, S>(columns: I, divisor: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            divisor: divisor.to_string(),
        }
    }

    /// Bill and payment amounts as a fraction of the credit limit.
    pub fn monetary_over_limit() -> Self {
        Self::new(schema::monetary_columns(), schema::LIMIT_BAL)
    }

    /// Rows whose divisor is zero or null; their ratios are undefined.
    pub fn undefined_rows(&self, table: &CreditTable) -> Result<Vec<usize>, PipelineError> {
        let divisor = table.f64_column(&self.divisor)?;
        Ok(divisor
            .iter()
            .enumerate()
            .filter(|(_, d)| !matches!(d, Some(d) if *d != 0.0))
            .map(|(i, _)| i)
            .collect())
    }

    /// Lenient: an undefined ratio becomes null. Strict: fails on the first
    /// row with a zero or missing divisor.
    pub fn apply(
        &self,
        table: &CreditTable,
        strictness: Strictness,
    ) -> Result<CreditTable, PipelineError> {
        let undefined = self.undefined_rows(table)?;
        if let Some(&row) = undefined.first() {
            if strictness == Strictness::Strict {
                return Err(PipelineError::DivisionUndefined {
                    divisor: self.divisor.clone(),
                    customer_id: table.customer_id(row),
                });
            }
            warn!(divisor = %self.divisor, rows = undefined.len(), "zero or missing divisor, ratios set to null");
        }

        // the divisor array is cloned out so it survives replacing columns
        let divisor: Float64Array = table.f64_column(&self.divisor)?.clone();
        let mut out = table.clone();
        for name in &self.columns {
            let values = out.f64_column(name)?;
            let ratio: Float64Array = values
                .iter()
                .zip(divisor.iter())
                .map(|(v, d)| match (v, d) {
                    (Some(v), Some(d)) if d != 0.0 => Some(v / d),
                    _ => None,
                })
                .collect();
            debug!(column = %name, nulls = ratio.null_count(), "normalized");
            out = out.with_column(name, Arc::new(ratio) as ArrayRef)?;
        }
        Ok(out)
    }
}
