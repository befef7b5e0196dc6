// src/process/target.rs
use crate::config::Strictness;
use crate::error::PipelineError;
use crate::table::CreditTable;
use arrow::array::{Array, ArrayRef, BooleanArray};
use std::sync::Arc;
use tracing::warn;

fn parse_label(s: &str) -> Option<bool> {
    match s {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

/// Cast the yes/no label in `column` to a boolean. Returns the new table and
/// how many rows had no usable label.
pub fn recode_target(
    table: &CreditTable,
    column: &str,
    strictness: Strictness,
) -> Result<(CreditTable, usize), PipelineError> {
    let labels = table.utf8_column(column)?;
    let mut unknown = 0;
    let mut values = Vec::with_capacity(labels.len());

    for (row, label) in labels.iter().enumerate() {
        let parsed = label.and_then(parse_label);
        if parsed.is_none() {
            if strictness == Strictness::Strict {
                return Err(PipelineError::UnknownLabel {
                    column: column.to_string(),
                    customer_id: table.customer_id(row),
                    value: label.map(str::to_string),
                });
            }
            unknown += 1;
        }
        values.push(parsed);
    }

    if unknown > 0 {
        warn!(column, unknown, "target labels other than yes/no set to null");
    }
    let out = table.with_column(column, Arc::new(BooleanArray::from(values)) as ArrayRef)?;
    Ok((out, unknown))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::test_util::*;

    fn target_table(labels: Vec<Option<&str>>) -> CreditTable {
        let keys: Vec<String> = (0..labels.len()).map(|i| format!("c{i}")).collect();
        let key_refs: Vec<&str> = keys.iter().map(String::as_str).collect();
        table(vec![
            ("customer_id", ids(&key_refs)),
            ("default_oct", strings(labels)),
        ])
    }

    fn bools(t: &CreditTable) -> Vec<Option<bool>> {
        t.column("default_oct")
            .unwrap()
            .as_any()
            .downcast_ref::<BooleanArray>()
            .unwrap()
            .iter()
            .collect()
    }

    #[test]
    fn test_yes_no_to_bool() {
        let t = target_table(vec![Some("yes"), Some("no"), Some("no")]);
        let (out, unknown) = recode_target(&t, "default_oct", Strictness::Lenient).unwrap();
        assert_eq!(bools(&out), vec![Some(true), Some(false), Some(false)]);
        assert_eq!(unknown, 0);
    }

    #[test]
    fn test_unknown_label_null_when_lenient() {
        let t = target_table(vec![Some("maybe"), None, Some("YES")]);
        let (out, unknown) = recode_target(&t, "default_oct", Strictness::Lenient).unwrap();
        assert_eq!(bools(&out), vec![None, None, None]);
        assert_eq!(unknown, 3);
    }

    #[test]
    fn test_unknown_label_fails_when_strict() {
        let t = target_table(vec![Some("yes"), Some("maybe")]);
        match recode_target(&t, "default_oct", Strictness::Strict) {
            Err(PipelineError::UnknownLabel {
                customer_id, value, ..
            }) => {
                assert_eq!(customer_id, "c1");
                assert_eq!(value.as_deref(), Some("maybe"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
