use anyhow::{Context, Result};
use clap::Parser;
use creditprep::{
    write_table, FeaturePipeline, Mode, NullRowPolicy, OutputFormat, PipelineConfig, Strictness,
    Transformed,
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about = "Prepare credit-card default data for modeling")]
struct Args {
    /// Labelled training file
    #[arg(long)]
    train: PathBuf,
    /// Unlabelled scoring file
    #[arg(long)]
    score: PathBuf,
    #[arg(long, default_value = "./output")]
    out_dir: PathBuf,
    /// YAML pipeline config; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Fail on unmapped codes, zero credit limits and unknown labels
    #[arg(long)]
    strict: bool,
    /// Drop rows with missing values before recoding
    #[arg(long)]
    drop_null_rows: bool,
    #[arg(long, value_enum, default_value = "csv")]
    format: Format,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Format {
    Csv,
    Parquet,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Csv => OutputFormat::Csv,
            Format::Parquet => OutputFormat::Parquet,
        }
    }
}

fn load_config(args: &Args) -> Result<PipelineConfig> {
    let mut cfg = match &args.config {
        Some(path) => PipelineConfig::from_yaml_file(path)?,
        None => PipelineConfig::default(),
    };
    if args.strict {
        cfg.strictness = Strictness::Strict;
    }
    if args.drop_null_rows {
        cfg.null_rows = NullRowPolicy::Drop;
    }
    Ok(cfg)
}

fn persist(out: &Transformed, out_dir: &Path, name: &str, format: OutputFormat) -> Result<()> {
    let path = out_dir.join(format!("{}.{}", name, format.extension()));
    write_table(&out.table, &path).with_context(|| format!("writing {}", path.display()))?;

    let stats_path = out_dir.join(format!("{}.stats.json", name));
    fs::write(&stats_path, serde_json::to_string_pretty(&out.stats)?)
        .with_context(|| format!("writing {}", stats_path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();
    let cfg = load_config(&args)?;
    info!(?cfg, "startup");
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    // ─── 2) run both pipelines; they share nothing but the config ────
    let pipeline = FeaturePipeline::new(cfg);
    let (train, score) = rayon::join(
        || pipeline.run(&args.train, Mode::Training),
        || pipeline.run(&args.score, Mode::Inference),
    );
    let train = train.with_context(|| format!("training pipeline on {}", args.train.display()));
    let score = score.with_context(|| format!("scoring pipeline on {}", args.score.display()));

    // ─── 3) persist whatever succeeded ───────────────────────────────
    let format = OutputFormat::from(args.format);
    let mut failed = false;
    for (name, result) in [("train", train), ("score", score)] {
        match result.and_then(|out| persist(&out, &args.out_dir, name, format)) {
            Ok(()) => info!(name, "done"),
            Err(e) => {
                error!(name, "{:#}", e);
                failed = true;
            }
        }
    }

    if failed {
        anyhow::bail!("one or more pipelines failed");
    }
    info!("all done");
    Ok(())
}
