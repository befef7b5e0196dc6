// src/process/mod.rs
//! Column-level steps of the feature pipeline. Each step takes a table by
//! reference and returns a new one.

pub mod categorical;
pub mod dedup;
pub mod delinquency;
pub mod load;
pub mod nulls;
pub mod ratio;
pub mod target;

pub use categorical::{recode_column, CategoryMap, RecodeCounts, Recoded};
pub use dedup::{deduplicate, ensure_unique_key};
pub use delinquency::total_months_delinquent;
pub use load::{load_table, require_columns};
pub use nulls::drop_null_rows;
pub use ratio::RatioTransform;
pub use target::recode_target;
