use anyhow::{Context, Result};
use clap::Parser;

mod cmd;
mod utils;

use calibrewrap::calibredb::to_exit_code;
use cmd::{Commands, ConnectionArgs, Outcome};

/// calibrewrap - typed front end for calibre's `calibredb`
///
/// Every calibredb sub-command is available with validated, typed options:
///   calibrewrap -l ~/Calibre\ Library list --fields title,authors --limit 10
///   calibrewrap -l http://localhost:8080/#books --username me add book.epub
///   calibrewrap -l ~/Books saved_searches -- add fav "tag:favourite"
///
/// Extras:
///   books           structured listing (list --for-machine), table or --json
///   version         calibredb --version
///   help [COMMAND]  calibredb help text
///
/// Global flags / env:
///   -v / -vv        Increase verbosity (RUST_LOG overrides)
///   -q / --quiet    Errors only
///   --json          Machine-readable output
///   --calibredb     calibredb executable (CALIBREDB_PATH)
///   -l / --library  Library path or Content server URL (CALIBRE_LIBRARY)
///   --username / --password (CALIBRE_USERNAME / CALIBRE_PASSWORD), remote only
///   --timeout SECS  Kill calibredb after SECS
///   --config PATH   JSON/YAML file with the same keys; flags and env win
///
/// Exit codes: 0 ok, 1 calibredb failed, 2 invalid options, 3 bad configuration,
/// 4 undecodable output.
#[derive(Parser, Debug)]
#[command(
    name = "calibrewrap",
    version,
    author,
    about = "Typed front end for calibre's calibredb",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error logging
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    let json = cli.json;
    let code = match run(cli) {
        Ok(outcome) => {
            cmd::output::print_success(&outcome, json);
            0
        }
        Err(err) => {
            cmd::output::print_error(&err, json);
            to_exit_code(cmd::output::error_kind(&err))
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<Outcome> {
    let calibre = cmd::resolve(&cli.connection)?;
    tracing::debug!(?calibre, "resolved connection settings");

    // main is sync; one runtime per invocation
    let rt = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    rt.block_on(cmd::dispatch(&calibre, cli.command))
}
