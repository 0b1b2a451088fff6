//! Extension publisher CLI entrypoint.
//!
//! This binary validates its arguments, locates `gext` on PATH, and publishes
//! the given archive to extensions.gnome.org, relaying `gext`'s output.

use clap::Parser;
use gnome_extension_publish::cli::Cli;
use gnome_extension_publish::error::Result;
use gnome_extension_publish::executor::SystemCommandExecutor;
use gnome_extension_publish::output::write_stderr_line;
use gnome_extension_publish::publish::Publisher;
use gnome_extension_publish::tool::SearchPathResolver;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();

    if let Err(err) = initialize_logger(cli.verbosity, cli.quiet) {
        write_stderr_line(&mut stderr, format!("failed to initialise logging: {err}"));
    }
    log::debug!("parsed arguments: {cli:?}");

    let mut stdout = std::io::stdout().lock();
    let run_result = run(&cli, &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<()> {
    // Validation happens before anything is resolved or spawned.
    let request = cli.publish_request()?;

    let resolver = SearchPathResolver::from_env();
    let executor = SystemCommandExecutor;
    Publisher::new(&resolver, &executor).publish(&request, cli.publish_options(), stdout, stderr)
}

fn log_level(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Logs go to stderr only so relayed stdout stays byte-identical.
fn initialize_logger(verbosity: u8, quiet: bool) -> std::result::Result<(), log::SetLoggerError> {
    let config = ConfigBuilder::new()
        .add_filter_allow_str("gnome_extension_publish")
        .build();

    TermLogger::init(
        log_level(verbosity, quiet),
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            err.exit_code()
        }
    }
}
