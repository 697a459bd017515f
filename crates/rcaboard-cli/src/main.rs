mod commands;
mod config;
mod output;

use clap::{Parser, Subcommand};
use config::{Backend, Settings};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "rcaboard",
    version,
    about = "Turn the 315 sales-by-RCA PDF report into dashboard JSON"
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract rows from the report PDF and write the dashboard JSON
    Build {
        /// Path to the report PDF (default: data/latest.pdf)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Where to write the JSON (default: public/data/latest.json)
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        output: Option<PathBuf>,

        /// Text extraction backend
        #[arg(short, long, value_enum)]
        backend: Option<Backend>,

        /// TOML settings file (default: ./rcaboard.toml if present)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Parse a report (PDF or pre-extracted .txt) and print the rows
    Parse {
        /// Path to PDF or text file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Text extraction backend
        #[arg(short, long, value_enum, default_value_t = Backend::Pdftotext)]
        backend: Backend,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rcaboard=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Build {
            input,
            output,
            backend,
            config,
        } => Settings::load(config.as_deref())
            .map(|s| s.with_overrides(input, output, backend))
            .and_then(|settings| commands::build::run(&settings)),
        Commands::Parse {
            input_file,
            output,
            backend,
        } => commands::parse::run(input_file, &output, backend),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
