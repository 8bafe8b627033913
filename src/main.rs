//! datapeek - print the contents of every data file in a directory

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use datapeek::config::{Config, LogLevel, SessionConfig, DEFAULT_INPUT_DIR};
use datapeek::parser::CommandSession;
use datapeek::{logging, run_batch, Loader, Renderer};

/// Print the contents of every data file in a directory
#[derive(Parser, Debug)]
#[command(name = "datapeek")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to scan (not recursive)
    #[arg(env = "DATAPEEK_INPUT_DIR", default_value = DEFAULT_INPUT_DIR)]
    input_dir: PathBuf,

    /// Converter program for statistical tables (sas7bdat, xpt, sav, dta);
    /// called with the file path last, must print CSV on stdout
    #[arg(long, env = "DATAPEEK_SESSION_PROGRAM")]
    session_program: Option<String>,

    /// Arguments passed to the converter before the file path (comma-separated)
    #[arg(long, env = "DATAPEEK_SESSION_ARGS", value_delimiter = ',', requires = "session_program")]
    session_arg: Vec<String>,

    /// Log level (error, warn, info, debug); RUST_LOG takes precedence
    #[arg(long, env = "DATAPEEK_LOG_LEVEL", default_value = "info")]
    log_level: LogLevel,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let mut config = Config::new(cli.input_dir).with_log_level(cli.log_level);
        if let Some(program) = cli.session_program {
            config = config.with_session(SessionConfig::new(program).with_args(cli.session_arg));
        }
        config
    }
}

fn main() -> ExitCode {
    let config = Config::from(Cli::parse());

    if let Err(e) = logging::init(config.log_level) {
        eprintln!("Warning: {:#}", e);
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<()> {
    let mut loader = Loader::new();
    if let Some(ref session) = config.session {
        loader = loader.with_session(Box::new(CommandSession::new(session.clone())));
        // A session that fails to open only affects statistical files
        if let Err(e) = loader.open_session() {
            error!("Failed to open analytics session: {}", e);
        }
    }

    let renderer = Renderer::new();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = run_batch(&config.input_dir, &mut loader, &renderer, &mut out);

    if let Err(e) = loader.close_session() {
        error!("Failed to close analytics session: {}", e);
    }

    let summary = result?;
    info!("Done: {} of {} entries displayed", summary.rendered, summary.total());
    Ok(())
}
