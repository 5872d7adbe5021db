mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use roster_core::model::UploadKind;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Bulk course and exam imports with catalog matching"
)]
struct Cli {
    /// Log filter (e.g. "warn", "roster_core=debug")
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Custom JSON settings file (default: built-in settings)
    #[arg(long, value_name = "FILE", global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Course,
    Exam,
}

impl From<KindArg> for UploadKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Course => UploadKind::Course,
            KindArg::Exam => UploadKind::Exam,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate an upload without touching any catalog
    Parse {
        #[arg(value_enum)]
        kind: KindArg,

        /// Delimited text file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Import an upload into a JSON catalog file (created if missing)
    Import {
        #[arg(value_enum)]
        kind: KindArg,

        /// Delimited text file
        input_file: PathBuf,

        /// Catalog JSON file
        #[arg(short, long, value_name = "FILE")]
        catalog: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Suggest catalog links for unlinked entities
    Match {
        /// JSON array of {"id", "raw_code"} objects
        #[arg(short, long, value_name = "FILE")]
        unlinked: PathBuf,

        /// Catalog JSON file
        #[arg(short, long, value_name = "FILE")]
        catalog: PathBuf,

        /// Also emit link decisions for high-confidence suggestions
        #[arg(long)]
        auto_accept: bool,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Inspect settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the effective settings
    Show,
    /// Validate a settings file
    Validate {
        /// Path to JSON settings file
        file: PathBuf,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let settings = match commands::load_settings(cli.settings.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Parse {
            kind,
            input_file,
            output,
        } => commands::parse::run(kind.into(), input_file, &output, &settings),
        Commands::Import {
            kind,
            input_file,
            catalog,
            output,
        } => commands::import::run(kind.into(), input_file, catalog, &output, &settings),
        Commands::Match {
            unlinked,
            catalog,
            auto_accept,
            output,
        } => commands::matching::run(unlinked, catalog, auto_accept, &output, &settings),
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::settings::show(&settings),
            SettingsAction::Validate { file } => commands::settings::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
