//! Feature pipeline for the credit-card default dataset: load a keyed CSV,
//! clean and recode it, and hand back an Arrow-backed table ready for
//! modeling.

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod schema;
pub mod table;

pub use config::{NullRowPolicy, PipelineConfig, Strictness};
pub use error::{ConfigError, LoadError, OutputError, PipelineError};
pub use output::{write_table, OutputFormat};
pub use pipeline::{FeaturePipeline, Mode, RunStats, Transformed};
pub use table::CreditTable;
