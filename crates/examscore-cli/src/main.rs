//! examscore CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "examscore", version, about = "Exam answer scoring and band aggregation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one section's submissions against its question set
    Score {
        /// Path to the question set TOML
        #[arg(long)]
        questions: PathBuf,

        /// Path to the submissions JSON
        #[arg(long)]
        submissions: PathBuf,

        /// Synonym table TOML (defaults to the builtin groups)
        #[arg(long)]
        synonyms: Option<PathBuf>,

        /// Which submission wins when a question was answered twice
        #[arg(long, default_value = "first")]
        dedup: String,

        /// Disable lenient substring matching
        #[arg(long)]
        strict: bool,

        /// Directory to save the scoring result JSON into
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Map a raw score to its band
    Band {
        /// Section with a band table (listening or reading)
        #[arg(long)]
        section: String,

        /// Raw score in 0..=40
        #[arg(long)]
        raw: u32,
    },

    /// Aggregate section bands into an overall band
    Aggregate {
        #[arg(long)]
        listening: Option<f64>,

        #[arg(long)]
        reading: Option<f64>,

        #[arg(long)]
        writing: Option<f64>,

        #[arg(long)]
        speaking: Option<f64>,
    },

    /// Validate question set TOML files
    Validate {
        /// Path to question set file or directory
        #[arg(long)]
        questions: PathBuf,
    },

    /// Create starter question set and synonym files
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("examscore=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            questions,
            submissions,
            synonyms,
            dedup,
            strict,
            output,
        } => commands::score::execute(questions, submissions, synonyms, dedup, strict, output),
        Commands::Band { section, raw } => commands::band::execute(section, raw),
        Commands::Aggregate {
            listening,
            reading,
            writing,
            speaking,
        } => commands::aggregate::execute(listening, reading, writing, speaking),
        Commands::Validate { questions } => commands::validate::execute(questions),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
