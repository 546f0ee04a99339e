//! Requirementz CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use requirementz::cli::{Cli, CommandDispatcher};
use requirementz::config::{load_config, Settings};
use requirementz::error::{ReqzError, Result};
use requirementz::ui::{create_ui, should_use_colors, OutputMode, UserInterface};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("requirementz=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("requirementz=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(code.clamp(0, 255) as u8)
}

/// Print `err` the way its kind calls for and pick the exit code.
fn report(ui: &mut dyn UserInterface, err: &ReqzError, debug: bool) -> ExitCode {
    match err {
        ReqzError::UserCancelled | ReqzError::EmptyManifest { .. } => ui.warning(&err.to_string()),
        _ if debug => ui.error(&format!("Error: {:?}", err)),
        _ => ui.error(&format!("Error: {}", err)),
    }
    exit_code(err.exit_code())
}

fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, cli.config.as_deref())?;
    Ok(Settings::from_config(&config)
        .with_file(cli.file.clone())
        .with_no_color(cli.no_color))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("Requirementz starting with args: {:?}", cli);

    let output_mode = OutputMode::from_flags(cli.verbose, cli.quiet);
    let interactive = !cli.non_interactive;

    let settings = match resolve_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            let color = should_use_colors(cli.no_color.then_some(false));
            let mut ui = create_ui(interactive, output_mode, color);
            return report(ui.as_mut(), &e, cli.debug);
        }
    };
    tracing::debug!("Resolved settings: {:?}", settings);

    let color = should_use_colors(settings.color);
    console::set_colors_enabled(color);
    console::set_colors_enabled_stderr(color);

    let mut ui = create_ui(interactive, output_mode, color);

    let dispatcher = match CommandDispatcher::new(settings) {
        Ok(dispatcher) => dispatcher,
        Err(e) => return report(ui.as_mut(), &e, cli.debug),
    };

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => exit_code(result.exit_code),
        Err(e) => report(ui.as_mut(), &e, cli.debug),
    }
}
