mod handlers;
mod models;
mod services;

use crate::handlers::{exec, repl, restore};
use crate::models::args::{Cli, ShellCommand};
use crate::services::bootstrap;
use clap::Parser;
use std::process::ExitCode;

#[ts64_runtime::main(memory_efficient)]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = bootstrap::load(&cli.global)?;
    let _logger = bootstrap::init_logger(&config.logging)?;
    let terminal = bootstrap::open_terminal(&config, cli.global.ephemeral).await?;
    let media_dir = config.downloads.dir.as_path();

    match cli.command.unwrap_or(ShellCommand::Repl) {
        ShellCommand::Repl => {
            repl::run_repl(&terminal, media_dir).await?;
            Ok(ExitCode::SUCCESS)
        },
        ShellCommand::Exec { line } => exec::run_line(&terminal, &line.join(" "), media_dir).await,
        ShellCommand::Restore { file } => restore::restore_file(&terminal, &file, media_dir).await,
    }
}
