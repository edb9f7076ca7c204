mod cli;
mod pipeline;
mod transport;

use clap::Parser;
use cli::{Cli, ResolvedCommand};
use pipeline::{Session, check_file, dump_tokens, print_lowered, run_file};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.resolve_command() else {
        eprintln!("error: no input file (see `solas --help`)");
        process::exit(2);
    };

    let session = |file: &Path| {
        Session::load(
            file,
            cli.config.as_deref(),
            &cli.credentials,
            cli.offline,
        )
    };

    let result = match command {
        ResolvedCommand::Run { file } => session(&file).and_then(|s| run_file(&file, &s)),
        ResolvedCommand::Check { file } => session(&file).and_then(|s| check_file(&file, &s)),
        ResolvedCommand::Tokens { file } => dump_tokens(&file),
        ResolvedCommand::Lower { file } => session(&file).and_then(|s| print_lowered(&file, &s)),
    };

    if let Err(error) = result {
        eprintln!("{}", error);
        process::exit(1);
    }
}

/// Logs go to stderr so program output on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
