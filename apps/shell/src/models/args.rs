//! # CLI Argument Definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ts64")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "TetraScript64 local encrypted vault terminal")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Defaults to the interactive terminal.
    #[command(subcommand)]
    pub command: Option<ShellCommand>,
}

/// Options shared by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Config file (TOML, YAML or JSON). `./ts64.*` is used when present.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Overrides `storage.data_dir`.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Overrides `downloads.dir`.
    #[arg(long, global = true)]
    pub downloads: Option<PathBuf>,

    /// Keep the vault in memory; nothing is written to disk.
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

#[derive(Debug, Subcommand)]
pub enum ShellCommand {
    /// Read commands from stdin until EOF or `exit`
    Repl,
    /// Run a single command line, e.g. `ts64 exec stash hello`
    Exec {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        line: Vec<String>,
    },
    /// Restore a `.ts64` / `.ts64vid` backup into the vault
    Restore {
        file: PathBuf,
    },
}
