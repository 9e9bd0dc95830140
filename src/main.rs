//! Rigup CLI entry point.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use rigup::cli::{Cli, Commands};
use rigup::shell::ProcessRunner;
use rigup::toolchain::{ToolchainInstaller, WorkDir};
use rigup::ui::{OutputMode, Reporter};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("rigup=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rigup=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("Rigup starting with args: {:?}", cli);

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    if let Some(Commands::Completions(args)) = &cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(args.shell, &mut cmd, "rigup", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    let mode = if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let reporter = Reporter::new(mode);

    let workdir = match WorkDir::create(WorkDir::default_location()) {
        Ok(dir) => dir,
        Err(e) => {
            reporter.error(&format!("Error: {}", e));
            return ExitCode::from(1);
        }
    };

    let runner = ProcessRunner;
    let installer = ToolchainInstaller::new(&runner, workdir);

    let ok = installer.install(
        &mut |msg| reporter.message(msg),
        &mut |err| reporter.error(err),
    );

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
