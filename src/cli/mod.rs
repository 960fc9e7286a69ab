//! CLI definitions using clap derive API
//!
//! - clone: Clone command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod clone;
pub mod completions;

pub use clone::CloneArgs;
pub use completions::CompletionsArgs;

/// wpenv - WordPress environments from git repositories
///
/// Clone a repository into a new local WordPress development environment.
#[derive(Parser, Debug)]
#[command(
    name = "wpenv",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Clone a repository into a local WordPress environment",
    long_about = "wpenv clones a git repository, asks for the environment settings it needs \
                  (or reads them from a config file in the repository), creates the environment \
                  and moves the repository into its WordPress tree.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  wpenv clone git@github.com:acme/site-theme.git        \x1b[90m# Clone master\x1b[0m\n   \
                  wpenv clone https://github.com/acme/site.git -b main  \x1b[90m# Clone another branch\x1b[0m\n   \
                  wpenv completions zsh > ~/.zfunc/_wpenv               \x1b[90m# Shell completions\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Directory holding the local environments
    #[arg(long, global = true, env = "WPENV_ENVIRONMENTS_DIR", value_name = "DIR")]
    pub environments_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clone a repository into a new environment
    Clone(CloneArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CONFIG_FILE;
    use crate::pipeline::DEFAULT_BRANCH;
    use crate::snapshot::DEFAULT_IMAGE;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_cli_parsing_clone_defaults() {
        let cli = Cli::try_parse_from(["wpenv", "clone", "git@example.test:site.git"]).unwrap();
        match cli.command {
            Commands::Clone(args) => {
                assert_eq!(args.url, "git@example.test:site.git");
                assert_eq!(args.branch, DEFAULT_BRANCH);
                assert_eq!(args.config, DEFAULT_CONFIG_FILE);
                assert_eq!(args.snapshots_image, DEFAULT_IMAGE);
            }
            Commands::Completions(_) => panic!("Expected Clone command"),
        }
    }

    #[test]
    fn test_cli_parsing_clone_options() {
        let cli = Cli::try_parse_from([
            "wpenv",
            "clone",
            "https://example.test/site.git",
            "-b",
            "develop",
            "-c",
            "env.json",
            "--snapshots-dir",
            "/tmp/snaps",
        ])
        .unwrap();
        match cli.command {
            Commands::Clone(args) => {
                assert_eq!(args.branch, "develop");
                assert_eq!(args.config, "env.json");
                assert_eq!(args.snapshots_dir, Some(PathBuf::from("/tmp/snaps")));
            }
            Commands::Completions(_) => panic!("Expected Clone command"),
        }
    }

    #[test]
    fn test_cli_clone_requires_url() {
        assert!(Cli::try_parse_from(["wpenv", "clone"]).is_err());
    }

    #[test]
    fn test_cli_global_options() {
        let cli = Cli::try_parse_from([
            "wpenv",
            "-v",
            "--environments-dir",
            "/tmp/envs",
            "clone",
            "https://example.test/site.git",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.environments_dir, Some(PathBuf::from("/tmp/envs")));
    }

    #[test]
    #[serial]
    fn test_cli_environments_dir_from_env() {
        unsafe {
            std::env::set_var("WPENV_ENVIRONMENTS_DIR", "/tmp/env-environments");
        }
        let cli = Cli::try_parse_from(["wpenv", "clone", "https://example.test/site.git"]).unwrap();
        unsafe {
            std::env::remove_var("WPENV_ENVIRONMENTS_DIR");
        }
        assert_eq!(cli.environments_dir, Some(PathBuf::from("/tmp/env-environments")));
    }

    #[test]
    #[serial]
    fn test_cli_flag_overrides_env() {
        unsafe {
            std::env::set_var("WPENV_SNAPSHOTS_IMAGE", "example/from-env:1");
        }
        let cli = Cli::try_parse_from([
            "wpenv",
            "clone",
            "https://example.test/site.git",
            "--snapshots-image",
            "example/from-flag:2",
        ])
        .unwrap();
        unsafe {
            std::env::remove_var("WPENV_SNAPSHOTS_IMAGE");
        }
        match cli.command {
            Commands::Clone(args) => assert_eq!(args.snapshots_image, "example/from-flag:2"),
            Commands::Completions(_) => panic!("Expected Clone command"),
        }
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::try_parse_from(["wpenv", "completions", "bash"]).unwrap();
        assert!(matches!(cli.command, Commands::Completions(_)));
        assert!(Cli::try_parse_from(["wpenv", "completions", "tcsh"]).is_err());
    }
}
