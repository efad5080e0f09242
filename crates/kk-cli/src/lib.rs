use clap::{Command, CommandFactory, Parser, Subcommand};
use std::io::Write;

pub mod commands;
pub mod error;

use commands::completion::{self, CompletionOptions};

#[derive(Parser, Debug)]
#[command(name = "kk")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Deploy and manage Kubernetes and KubeSphere clusters",
    long_about = "KubeKey (kk) installs Kubernetes and KubeSphere clusters, \
                  and manages nodes and add-ons once they are running."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true, env = "KK_VERBOSE")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Generate shell completion scripts",
        long_about = completion::LONG_ABOUT,
        after_long_help = completion::EXAMPLES
    )]
    Completion(CompletionOptions),
}

/// Build the `kk` command tree, reporting completion setup problems on `err_out`
pub fn command_tree(err_out: &mut dyn Write) -> Command {
    let mut cmd = Cli::command();
    completion::register_or_report(&mut cmd, err_out);
    cmd
}
