//! CLI for the appswitch return URL dispatcher.

mod commands;

use anyhow::Result;
use appswitch_core::{config, AppContextSwitcher, SwitcherConfig};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use commands::{run_completions, run_drivers, run_open};

const EXIT_OK: u8 = 0;
/// Exit status when no driver claimed the URL. Errors, including bad
/// arguments, exit with 1.
const EXIT_UNCLAIMED: u8 = 2;

/// Top-level CLI for appswitch.
#[derive(Debug, Parser)]
#[command(name = "appswitch")]
#[command(about = "Route return URLs to the driver that owns them", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/appswitch/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Dispatch a return URL to the first configured driver that claims it.
    Open {
        /// Return URL as delivered to the app.
        url: String,

        /// Identifier of the app that opened the URL.
        #[arg(long, value_name = "ID")]
        source_app: Option<String>,

        /// Print the outcome as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List configured drivers in dispatch order.
    Drivers,

    /// Print shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<ExitCode> {
        run(std::env::args_os())
    }
}

/// Parse `args` and run the command. Help and version output exit the
/// process directly; any other parse error is returned so it maps to status 1
/// instead of clap's usage status, which would read as "unclaimed".
pub fn run<I, T>(args: I) -> Result<ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => return Err(e.into()),
    };
    Ok(ExitCode::from(execute(cli)?))
}

/// Run a parsed command and return its exit status.
fn execute(cli: Cli) -> Result<u8> {
    if let CliCommand::Completions { shell } = cli.command {
        run_completions(shell);
        return Ok(EXIT_OK);
    }

    let cfg = load_config(cli.config.as_deref())?;
    tracing::debug!("loaded config: {:?}", cfg);
    let switcher = AppContextSwitcher::from_config(&cfg);

    match cli.command {
        CliCommand::Open {
            url,
            source_app,
            json,
        } => {
            let handled = run_open(&switcher, &url, source_app, json)?;
            Ok(open_exit_status(handled))
        }
        CliCommand::Drivers => {
            run_drivers(&switcher, &cfg);
            Ok(EXIT_OK)
        }
        CliCommand::Completions { .. } => Ok(EXIT_OK),
    }
}

fn open_exit_status(handled: bool) -> u8 {
    if handled {
        EXIT_OK
    } else {
        EXIT_UNCLAIMED
    }
}

fn load_config(path: Option<&Path>) -> Result<SwitcherConfig> {
    match path {
        Some(path) => config::load_or_init_at(path),
        None => config::load_or_init(),
    }
}

#[cfg(test)]
mod tests;
