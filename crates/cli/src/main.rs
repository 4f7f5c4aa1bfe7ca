//! Textbridge CLI - run commands and read env vars as UTF-16 text
//!
//! Composition root: wires the system adapters into the bridge service.

mod config;
mod logging;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::{Read, Write};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};

use textbridge_core::{BridgeService, Codec, TruncatedSequence, Utf16Text, VERSION};
use textbridge_infra_system::{ProcessEnv, SubprocessRunner};

use config::BridgeConfig;
use output::OutputMode;

#[derive(Parser)]
#[command(name = "textbridge")]
#[command(about = "Capture command output and env vars as UTF-16 text", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// How to print the result
    #[arg(short, long, value_enum, default_value_t = OutputMode::Text, global = true)]
    output: OutputMode,

    /// Replace truncated multi-byte sequences with U+FFFD instead of
    /// decoding their partial value
    #[arg(long, global = true)]
    strict_truncation: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a command line through the shell (caller does the quoting)
    Run {
        /// Full command line, passed verbatim to the shell
        command: String,
    },

    /// Run a program directly, without a shell
    Exec {
        /// Program name or path
        program: String,

        /// Arguments passed as-is
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Read an environment variable (empty if unset)
    Env {
        /// Variable name
        key: String,
    },

    /// Encode text (or stdin when omitted) without running anything
    Encode {
        /// UTF-8 text to encode
        text: Option<String>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    // 1. Load configuration
    let config = BridgeConfig::from_env().context("Invalid configuration")?;

    // 2. Initialize logging
    logging::init(config.log_format)?;
    debug!(version = VERSION, config = ?config, "Textbridge starting");

    // 3. Setup dependencies (DI wiring)
    let truncation = if cli.strict_truncation {
        TruncatedSequence::Replace
    } else {
        TruncatedSequence::NominalWidth
    };
    let runner = Arc::new(SubprocessRunner::new(
        config.shell.clone(),
        config.capture_capacity,
    ));
    let bridge = BridgeService::new(runner, Arc::new(ProcessEnv)).with_codec(Codec::new(truncation));

    // 4. Execute
    let result: Utf16Text = match cli.command {
        Commands::Run { command } => bridge.run_command(command.as_bytes()),
        Commands::Exec { program, args } => bridge.run_program(&program, &args),
        Commands::Env { key } => bridge.get_env(key.as_bytes()),
        Commands::Encode { text } => {
            let bytes = match text {
                Some(text) => text.into_bytes(),
                None => read_stdin().context("Failed to read stdin")?,
            };
            bridge.encode(&bytes)
        }
    };

    info!(units = result.len(), "Result encoded");

    // 5. Print
    let rendered = output::render(&result, cli.output).context("Failed to render result")?;
    write_result(&rendered, cli.output != OutputMode::Text).context("Failed to write result")?;

    if output::is_error(&result) {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn read_stdin() -> textbridge_core::Result<Vec<u8>> {
    let mut buf = Vec::new();
    std::io::stdin().read_to_end(&mut buf)?;
    Ok(buf)
}

fn write_result(rendered: &str, newline: bool) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    if newline {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()
}
