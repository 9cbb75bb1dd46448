// ffargs-cli/src/main.rs
//
// Entry point for the ffargs command-line tool.
//
// Responsibilities:
// - Parsing arguments with clap.
// - Installing the logger (stderr only).
// - Dispatching to the command implementations.
// - Printing errors with their context chain and setting the exit code.

use clap::Parser;
use ffargs_cli::config::EXIT_FAILURE;
use ffargs_cli::logging::init_logging;
use ffargs_cli::{Cli, Commands, run_pixfmt, run_render};
use std::io::{self, Write};
use std::process;

fn run(cli: &Cli) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Commands::Render(args) => run_render(args, &mut out)?,
        Commands::Pixfmt(args) => run_pixfmt(args, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        // {:#} prints the whole context chain on one line
        let _ = writeln!(io::stderr(), "Error: {:#}", e);
        process::exit(EXIT_FAILURE);
    }
}
