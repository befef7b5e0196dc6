// src/pipeline.rs
use crate::config::{NullRowPolicy, PipelineConfig};
use crate::error::Result;
use crate::process::{
    deduplicate, drop_null_rows, ensure_unique_key, load_table, recode_column, recode_target,
    require_columns, total_months_delinquent, CategoryMap, RatioTransform, RecodeCounts,
};
use crate::schema;
use crate::table::CreditTable;
use serde::Serialize;
use std::{collections::BTreeMap, path::Path};
use tracing::{info, instrument};

/// Training runs also recode the target label; inference runs leave it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Training,
    Inference,
}

/// Counters collected while a table moves through the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub rows_loaded: usize,
    pub duplicates_removed: usize,
    pub null_rows_dropped: usize,
    pub categories: BTreeMap<String, RecodeCounts>,
    /// Rows whose credit limit was zero or missing.
    pub undefined_ratios: usize,
    pub unknown_targets: usize,
    pub rows_out: usize,
}

#[derive(Debug, Clone)]
pub struct Transformed {
    pub table: CreditTable,
    pub stats: RunStats,
}

/// Maps a raw credit-card default table to a model-ready feature table.
///
/// Steps, in order: deduplicate, (optionally) drop null rows, recode the
/// categorical codes, normalize monetary columns by the credit limit, sum the
/// delinquency counters, and in training mode cast the target to boolean.
#[derive(Debug, Clone, Default)]
pub struct FeaturePipeline {
    config: PipelineConfig,
}

impl FeaturePipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load `path` and run every step for `mode`.
    #[instrument(level = "info", skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn run<P: AsRef<Path>>(&self, path: P, mode: Mode) -> Result<Transformed> {
        // the label stays text so 1/0 or true/false reach the yes/no check
        let text = [self.config.target_column.as_str()];
        let table = load_table(path, &self.config.key_column, &text)?;
        self.transform(&table, mode)
    }

    /// Columns a table must carry before it can be transformed in `mode`.
    pub fn consumed_columns(&self, mode: Mode) -> Vec<&str> {
        let mut cols = schema::required_columns();
        if mode == Mode::Training {
            cols.push(self.config.target_column.as_str());
        }
        cols
    }

    pub fn transform(&self, input: &CreditTable, mode: Mode) -> Result<Transformed> {
        let cfg = &self.config;
        let consumed = self.consumed_columns(mode);
        require_columns(input, consumed.iter().copied())?;

        let mut stats = RunStats {
            rows_loaded: input.num_rows(),
            ..RunStats::default()
        };

        let table = deduplicate(input)?;
        stats.duplicates_removed = input.num_rows() - table.num_rows();
        ensure_unique_key(&table)?;

        let table = match cfg.null_rows {
            NullRowPolicy::Keep => table,
            NullRowPolicy::Drop => {
                let kept = drop_null_rows(&table, &consumed)?;
                stats.null_rows_dropped = table.num_rows() - kept.num_rows();
                kept
            }
        };

        let mut table = table;
        for map in [
            CategoryMap::sex(),
            CategoryMap::education(),
            CategoryMap::marriage(),
        ] {
            let (recoded, counts) = recode_column(&table, &map, cfg.strictness)?;
            stats.categories.insert(map.column.clone(), counts);
            table = recoded;
        }

        let ratios = RatioTransform::monetary_over_limit();
        stats.undefined_ratios = ratios.undefined_rows(&table)?.len();
        let table = ratios.apply(&table, cfg.strictness)?;

        let mut table =
            total_months_delinquent(&table, &schema::PAY_STATUS, &cfg.delinquency_column)?;

        if mode == Mode::Training {
            let (recoded, unknown) = recode_target(&table, &cfg.target_column, cfg.strictness)?;
            stats.unknown_targets = unknown;
            table = recoded;
        }

        stats.rows_out = table.num_rows();
        info!(
            ?mode,
            rows_in = stats.rows_loaded,
            rows_out = stats.rows_out,
            duplicates = stats.duplicates_removed,
            null_rows = stats.null_rows_dropped,
            undefined_ratios = stats.undefined_ratios,
            "pipeline finished"
        );
        Ok(Transformed { table, stats })
    }
}
