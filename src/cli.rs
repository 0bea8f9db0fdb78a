//! Command-line argument definitions.
use clap::Parser;
use std::path::PathBuf;

/// Link dotfiles into place as described by `dotinst.json` manifests.
#[derive(Parser, Debug, Clone)]
#[command(name = "dotinst", version)]
pub struct Cli {
    /// Print each destination --> source mapping before linking it
    #[arg(short, long)]
    pub verbose: bool,

    /// Source directory searched for manifests [default: current directory]
    #[arg(short, long, value_name = "PATH")]
    pub source: Option<PathBuf>,

    /// Destination directory that manifest paths are relative to [default: home directory]
    #[arg(short, long, value_name = "PATH")]
    pub dest: Option<PathBuf>,
}
