//! promptgrade CLI — manual grading of AI prompt test cases.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "promptgrade",
    version,
    about = "Grade AI prompt test cases by hand and track the pass rate"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade prompts interactively (reads commands from stdin)
    Session {
        /// Path to .toml eval set (default: built-in prompts)
        #[arg(long)]
        eval_set: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show prompts and the pass rate
    List {
        /// Path to .toml eval set (default: built-in prompts)
        #[arg(long)]
        eval_set: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format: table, json, markdown
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Compute the pass rate for a batch of grades
    Rate {
        /// Path to .toml eval set (default: built-in prompts)
        #[arg(long)]
        eval_set: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Grade assignment as ID=GRADE (e.g. "5=pass"); repeatable
        #[arg(long = "grade")]
        grades: Vec<String>,
    },

    /// Copy one prompt to the clipboard
    Copy {
        /// Item id to copy
        #[arg(long)]
        id: u32,

        /// Path to .toml eval set (default: built-in prompts)
        #[arg(long)]
        eval_set: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate eval set TOML files
    Validate {
        /// Path to eval set file or directory
        #[arg(long)]
        eval_set: PathBuf,
    },

    /// Create starter config and example eval set
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Session { eval_set, config } => {
            commands::session::execute(eval_set, config).await
        }
        Commands::List {
            eval_set,
            config,
            format,
        } => commands::list::execute(eval_set, config, format),
        Commands::Rate {
            eval_set,
            config,
            grades,
        } => commands::rate::execute(eval_set, config, grades),
        Commands::Copy {
            id,
            eval_set,
            config,
        } => commands::copy::execute(id, eval_set, config).await,
        Commands::Validate { eval_set } => commands::validate::execute(eval_set),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
