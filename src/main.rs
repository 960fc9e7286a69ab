//! wpenv - WordPress environments from git repositories
//!
//! Clones a repository, collects the environment settings (interactively or
//! from a config file shipped in the repository), creates the environment and
//! moves the repository into its WordPress tree, optionally restoring a
//! snapshot on top.

use clap::Parser;
use console::style;
use miette::Diagnostic;

mod cli;
mod commands;
mod common;
mod config;
mod environment;
mod error;
mod git;
mod pipeline;
mod prompt;
mod relocate;
mod report;
mod snapshot;
mod ui;
mod workspace;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};

/// Log to stderr; `--verbose` shows debug output, `RUST_LOG` overrides both
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Clone(args) => commands::clone::run(cli.environments_dir, args),
        Commands::Completions(args) => commands::completions::run(&args),
    };

    if let Err(e) = result {
        if e.is_cancelled() {
            eprintln!("{} {e}", style("✖").yellow());
            std::process::exit(1);
        }
        eprintln!("{} Error: {e}", style("✖").red().bold());
        if let Some(help) = e.help() {
            eprintln!("  {} {help}", style("help:").cyan());
        }
        std::process::exit(1);
    }
}
