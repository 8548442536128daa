use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use ifacegen::cli::Cli;
use ifacegen::error::GenError;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match dispatch(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(err, cli.no_color);
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: &Cli) -> Result<()> {
    let mut stdout = io::stdout().lock();

    if let Some(shell) = cli.completions {
        ifacegen::completion::run(shell, &mut stdout);
        return Ok(());
    }

    if cli.init_config {
        let path = ifacegen::infra::config_init(&std::env::current_dir()?, cli.force)?;
        if !cli.quiet {
            eprintln!("Created {}", path.display());
        }
        return Ok(());
    }

    ifacegen::core::generate_run(cli, &mut stdout)
}

/// IFACEGEN_LOG wins over -v. Logs always go to stderr.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_env("IFACEGEN_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn report(err: anyhow::Error, no_color: bool) {
    // Domain errors carry source snippets, render them through miette
    match err.downcast::<GenError>() {
        Ok(gen_err) => eprintln!("{:?}", miette::Report::new(gen_err)),
        Err(other) if no_color => eprintln!("error: {other:#}"),
        Err(other) => eprintln!("{} {other:#}", "error:".red()),
    }
}
