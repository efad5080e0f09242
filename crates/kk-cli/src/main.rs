use anyhow::Result;
use clap::FromArgMatches;
use clap_complete::env::CompleteEnv;
use kk_cli::commands::completion;
use kk_cli::{Cli, Commands};
use std::io;

fn main() -> Result<()> {
    // Answers tab presses from the generated scripts, then exits
    CompleteEnv::with_factory(|| kk_cli::command_tree(&mut io::sink()))
        .var(completion::COMPLETE_VAR)
        .complete();

    let mut cmd = kk_cli::command_tree(&mut io::stderr());

    let matches = cmd.get_matches_mut();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.format(&mut cmd).exit());

    // Initialize logging
    init_logging(cli.verbose);

    // Execute the command
    match cli.command {
        Commands::Completion(options) => {
            completion::execute(&options, &mut cmd, &mut io::stdout().lock())?
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("kk=debug,kk_cli=debug")
        } else {
            EnvFilter::new("kk=info,kk_cli=info")
        }
    });

    // Log to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
