mod commands;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use commands::{EXIT_FAILURE, EXIT_INPUT_ERROR, EXIT_INVALID_MANIFEST};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "relpack",
    version,
    about = "Package manifest channel generator for release bundles"
)]
struct Cli {
    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate or update a package manifest for a new release.
    Generate {
        /// Name of the package the manifest describes.
        package_name: String,
        /// Semantic version of the release being published.
        #[arg(long)]
        version: String,
        /// Channel the release is published on.
        #[arg(long)]
        channel: Option<String>,
        /// Make --channel the manifest's default channel.
        #[arg(long, default_value_t = false)]
        default_channel: bool,
        /// Directory containing an existing manifest to update.
        #[arg(long)]
        input_dir: Option<PathBuf>,
        /// Directory to write the manifest to (defaults to the current directory).
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Write the manifest to stdout instead of a file.
        #[arg(long, default_value_t = false)]
        stdout: bool,
    },
    /// Validate an existing package manifest file.
    Validate {
        /// Path to a .package.yaml manifest.
        path: PathBuf,
    },
    /// Generate shell completions for bash, zsh, fish, elvish, or powershell.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RELPACK_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let json_output = cli.json;
    let result = match cli.command {
        Commands::Generate {
            package_name,
            version,
            channel,
            default_channel,
            input_dir,
            output_dir,
            stdout,
        } => commands::generate::run(
            &package_name,
            &version,
            channel.as_deref(),
            default_channel,
            commands::generate::Target {
                input_dir: input_dir.as_deref(),
                output_dir: output_dir.as_deref(),
                stdout,
            },
            json_output,
        ),
        Commands::Validate { path } => commands::validate::run(&path, json_output),
        Commands::Completions { shell } => commands::completions::run::<Cli>(shell),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            let code = if msg.starts_with("package name must be set")
                || msg.starts_with("version must be set")
                || msg.starts_with("output directory must be set")
                || msg.starts_with("--")
                || msg.contains("is not a valid semantic version")
            {
                EXIT_INPUT_ERROR
            } else if msg.starts_with("invalid generated package manifest") {
                EXIT_INVALID_MANIFEST
            } else {
                EXIT_FAILURE
            };
            ExitCode::from(code)
        }
    }
}
