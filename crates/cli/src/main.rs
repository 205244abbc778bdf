mod commands;
mod input;
mod rules;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// How input documents are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum InputFormat {
    /// application/x-www-form-urlencoded text
    Form,
    /// A JSON object
    Json,
}

/// Check, process and convert tagged values.
#[derive(Parser)]
#[command(name = "optval", version, about = "Check, process and convert tagged values")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log pipeline decisions to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and process a document against a rules file
    Check {
        /// Path to the TOML rules file
        #[arg(long)]
        rules: PathBuf,
        /// Input document, or - for stdin
        input: Option<PathBuf>,
        /// Input encoding
        #[arg(long, default_value = "form", value_enum)]
        format: InputFormat,
    },

    /// Convert a scalar from one kind to another
    Convert {
        /// The value, as text
        value: String,
        /// Kind the text is read as first
        #[arg(long, default_value = "string")]
        from: String,
        /// Kind to convert to
        #[arg(long)]
        to: String,
    },

    /// Show the type and fields of a document
    Inspect {
        /// Input document, or - for stdin
        input: Option<PathBuf>,
        /// Input encoding
        #[arg(long, default_value = "form", value_enum)]
        format: InputFormat,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check {
            rules,
            input,
            format,
        } => {
            commands::check::cmd_check(&rules, input.as_deref(), format, cli.output, cli.quiet);
        }
        Commands::Convert { value, from, to } => {
            commands::convert::cmd_convert(&value, &from, &to, cli.output, cli.quiet);
        }
        Commands::Inspect { input, format } => {
            commands::inspect::cmd_inspect(input.as_deref(), format, cli.output, cli.quiet);
        }
    }
}

/// Install the stderr subscriber. `OPTVAL_LOG` holds a filter directive;
/// `--verbose` forces debug.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("OPTVAL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
