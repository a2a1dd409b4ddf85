use crate::services::bootstrap::ShellTerminal;
use crate::services::host::ConsoleRenderer;
use anyhow::Result;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Reads lines from stdin until EOF or `exit`.
pub async fn run_repl(terminal: &ShellTerminal, media_dir: &Path) -> Result<()> {
    let mut renderer = ConsoleRenderer::new(std::io::stdout(), media_dir);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        renderer.prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if matches!(line.trim(), "exit" | "quit") {
            break;
        }
        terminal.submit(&line, &mut renderer).await?;
    }
    Ok(())
}
