//! aquabench CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "aquabench", version, about = "MCQ benchmark scoring and reporting")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one model's predictions against a benchmark
    Evaluate {
        /// Bundled benchmark name (e.g. "aquabench")
        #[arg(long)]
        benchmark: Option<String>,

        /// Path to a benchmark JSON or CSV file (overrides --benchmark)
        #[arg(long)]
        benchmark_path: Option<PathBuf>,

        /// JSON or CSV file containing model outputs
        #[arg(long)]
        predictions: PathBuf,

        /// Column name for question ids in tabular predictions.
        /// Pass an empty string to match by row order instead.
        #[arg(long, default_value = "ID")]
        predictions_id_col: String,

        /// Column name for answers in tabular predictions
        #[arg(long, default_value = "Answer")]
        predictions_answer_col: String,

        /// Optional report destination
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, csv, md, sheets, auto
        #[arg(long, default_value = "auto")]
        output_format: String,

        /// Print per-question correctness to stdout
        #[arg(long)]
        show_details: bool,
    },

    /// Score every model column of a tabular predictions file
    BatchEvaluate {
        /// CSV file containing predictions from multiple models
        #[arg(long)]
        predictions: PathBuf,

        /// Bundled benchmark name
        #[arg(long, default_value = "aquabench")]
        benchmark: String,

        /// Path to a benchmark JSON or CSV file (overrides --benchmark)
        #[arg(long)]
        benchmark_path: Option<PathBuf>,

        /// Column name for question ids (default: auto-detect)
        #[arg(long)]
        id_col: Option<String>,

        /// Directory for per-model reports and the comparison summary
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Suppress the console comparison table
        #[arg(long)]
        quiet: bool,
    },

    /// Draw a deterministic per-category sample from a benchmark
    Sample {
        /// Bundled benchmark name
        #[arg(long)]
        benchmark: Option<String>,

        /// Path to a benchmark JSON or CSV file (overrides --benchmark)
        #[arg(long)]
        benchmark_path: Option<PathBuf>,

        /// Questions to draw from each category
        #[arg(long)]
        per_category: usize,

        /// Seed for reproducible sampling
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Destination file (.json or .csv)
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("aquabench=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Evaluate {
            benchmark,
            benchmark_path,
            predictions,
            predictions_id_col,
            predictions_answer_col,
            output,
            output_format,
            show_details,
        } => commands::evaluate::execute(
            benchmark,
            benchmark_path,
            predictions,
            predictions_id_col,
            predictions_answer_col,
            output,
            output_format,
            show_details,
        ),
        Commands::BatchEvaluate {
            predictions,
            benchmark,
            benchmark_path,
            id_col,
            output_dir,
            quiet,
        } => commands::batch::execute(
            predictions,
            benchmark,
            benchmark_path,
            id_col,
            output_dir,
            quiet,
        ),
        Commands::Sample {
            benchmark,
            benchmark_path,
            per_category,
            seed,
            output,
        } => commands::sample::execute(benchmark, benchmark_path, per_category, seed, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
