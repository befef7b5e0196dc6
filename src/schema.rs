// src/schema.rs
//! Column names of the credit-card default dataset and the Arrow types they
//! are read as.

use arrow::datatypes::DataType;

pub const SEX: &str = "sex";
pub const EDUCATION: &str = "education";
pub const MARRIAGE: &str = "marriage";
pub const LIMIT_BAL: &str = "limit_bal";

pub const BILL_AMOUNTS: [&str; 6] = [
    "bill_amt1",
    "bill_amt2",
    "bill_amt3",
    "bill_amt4",
    "bill_amt5",
    "bill_amt6",
];

pub const PAY_AMOUNTS: [&str; 6] = [
    "pay_amt1", "pay_amt2", "pay_amt3", "pay_amt4", "pay_amt5", "pay_amt6",
];

/// Monthly repayment status counters.
pub const PAY_STATUS: [&str; 6] = ["pay_1", "pay_2", "pay_3", "pay_4", "pay_5", "pay_6"];

/// Bill amounts followed by payment amounts, in file order.
pub fn monetary_columns() -> Vec<&'static str> {
    BILL_AMOUNTS.iter().chain(PAY_AMOUNTS.iter()).copied().collect()
}

/// The type a known column is read as. `None` leaves the inferred type alone.
pub fn read_type(name: &str) -> Option<DataType> {
    match name {
        SEX | EDUCATION | MARRIAGE => Some(DataType::Int64),
        LIMIT_BAL => Some(DataType::Float64),
        n if BILL_AMOUNTS.contains(&n) || PAY_AMOUNTS.contains(&n) => Some(DataType::Float64),
        n if PAY_STATUS.contains(&n) => Some(DataType::Int64),
        _ => None,
    }
}

/// Columns every input file must carry, excluding the key and the target.
pub fn required_columns() -> Vec<&'static str> {
    let mut cols = vec![SEX, EDUCATION, MARRIAGE, LIMIT_BAL];
    cols.extend(monetary_columns());
    cols.extend(PAY_STATUS);
    cols
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_types() {
        assert_eq!(read_type("sex"), Some(DataType::Int64));
        assert_eq!(read_type("pay_amt3"), Some(DataType::Float64));
        assert_eq!(read_type("pay_3"), Some(DataType::Int64));
        assert_eq!(read_type("customer_id"), None);
    }

    #[test]
    fn test_required_columns_are_unique() {
        let cols = required_columns();
        let mut dedup = cols.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(cols.len(), dedup.len());
        assert_eq!(cols.len(), 4 + 12 + 6);
    }
}
