// src/process/categorical.rs
use crate::config::Strictness;
use crate::error::PipelineError;
use crate::schema;
use crate::table::CreditTable;
use arrow::{
    array::{ArrayRef, DictionaryArray},
    datatypes::Int8Type,
};
use std::sync::Arc;
use tracing::debug;

/// Outcome of looking one code up in a label map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recoded<'a> {
    /// The code is in the map.
    Mapped(&'a str),
    /// The code is unknown or null and the column defines a fallback label.
    Fallback(&'a str),
    /// The code is unknown or null and there is no fallback.
    Missing,
}

impl<'a> Recoded<'a> {
    pub fn label(self) -> Option<&'a str> {
        match self {
            Recoded::Mapped(l) | Recoded::Fallback(l) => Some(l),
            Recoded::Missing => None,
        }
    }
}

/// Fixed mapping from integer codes to labels for one column.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    pub column: String,
    pub labels: Vec<(i64, String)>,
    pub fallback: Option<String>,
}

impl CategoryMap {
    pub fn new(column: &str, labels: &[(i64, &str)], fallback: Option<&str>) -> Self {
        Self {
            column: column.to_string(),
            labels: labels.iter().map(|(c, l)| (*c, l.to_string())).collect(),
            fallback: fallback.map(str::to_string),
        }
    }

    /// `sex` has no fallback: unknown codes stay missing.
    pub fn sex() -> Self {
        Self::new(schema::SEX, &[(1, "male"), (2, "female")], None)
    }

    pub fn education() -> Self {
        Self::new(
            schema::EDUCATION,
            &[
                (1, "graduate_school"),
                (2, "university"),
                (3, "high_school"),
                (4, "other"),
            ],
            Some("other"),
        )
    }

    pub fn marriage() -> Self {
        Self::new(
            schema::MARRIAGE,
            &[(1, "single"), (2, "married"), (3, "other")],
            Some("other"),
        )
    }

    pub fn lookup(&self, code: Option<i64>) -> Recoded<'_> {
        let mapped = code.and_then(|c| {
            self.labels
                .iter()
                .find(|(k, _)| *k == c)
                .map(|(_, l)| l.as_str())
        });
        match (mapped, self.fallback.as_deref()) {
            (Some(l), _) => Recoded::Mapped(l),
            (None, Some(f)) => Recoded::Fallback(f),
            (None, None) => Recoded::Missing,
        }
    }
}

/// How many rows of one column did not map directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct RecodeCounts {
    pub fallback: usize,
    pub missing: usize,
}

/// Replace the integer codes of `map.column` with a dictionary-encoded
/// label column.
///
/// In strict mode any code outside the map (null included) is an error, even
/// when the column has a fallback label.
pub fn recode_column(
    table: &CreditTable,
    map: &CategoryMap,
    strictness: Strictness,
) -> Result<(CreditTable, RecodeCounts), PipelineError> {
    let codes = table.i64_column(&map.column)?;
    let mut counts = RecodeCounts::default();
    let mut labels: Vec<Option<&str>> = Vec::with_capacity(codes.len());

    for (row, code) in codes.iter().enumerate() {
        let outcome = map.lookup(code);
        match outcome {
            Recoded::Mapped(_) => {}
            _ if strictness == Strictness::Strict => {
                return Err(PipelineError::UnmappedCategory {
                    column: map.column.clone(),
                    customer_id: table.customer_id(row),
                    code,
                });
            }
            Recoded::Fallback(_) => counts.fallback += 1,
            Recoded::Missing => counts.missing += 1,
        }
        labels.push(outcome.label());
    }

    debug!(column = %map.column, fallback = counts.fallback, missing = counts.missing, "recoded");
    let dict: DictionaryArray<Int8Type> = labels.into_iter().collect();
    let out = table.with_column(&map.column, Arc::new(dict) as ArrayRef)?;
    Ok((out, counts))
}
