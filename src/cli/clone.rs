use clap::Parser;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;
use crate::pipeline::DEFAULT_BRANCH;
use crate::snapshot::DEFAULT_IMAGE;

/// Arguments for clone command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Clone the master branch:\n    wpenv clone git@github.com:acme/site.git\n\n\
                  Clone a branch and read answers from a JSON file:\n    wpenv clone https://github.com/acme/site.git -b develop -c wpenv.json\n\n\
                  Restore snapshots from a custom store:\n    wpenv clone ./site --snapshots-dir ~/snapshots")]
pub struct CloneArgs {
    /// Repository URL (HTTPS, SSH, git@host:path or a local path)
    pub url: String,

    /// Branch to check out
    #[arg(long, short = 'b', default_value = DEFAULT_BRANCH)]
    pub branch: String,

    /// Config file at the repository root that pre-answers the questions
    #[arg(long, short = 'c', default_value = DEFAULT_CONFIG_FILE, value_name = "FILE")]
    pub config: String,

    /// Snapshot store directory (defaults to ~/.wpsnapshots)
    #[arg(long, env = "WPENV_SNAPSHOTS_DIR", value_name = "DIR")]
    pub snapshots_dir: Option<PathBuf>,

    /// Image that runs the snapshot tooling
    #[arg(
        long,
        env = "WPENV_SNAPSHOTS_IMAGE",
        default_value = DEFAULT_IMAGE,
        value_name = "IMAGE"
    )]
    pub snapshots_image: String,
}
