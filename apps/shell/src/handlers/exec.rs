use crate::services::bootstrap::ShellTerminal;
use crate::services::host::ConsoleRenderer;
use anyhow::Result;
use std::path::Path;
use std::process::ExitCode;
use ts64::Renderer;

/// Runs one command line. A failed command exits with status 1.
pub async fn run_line(terminal: &ShellTerminal, line: &str, media_dir: &Path) -> Result<ExitCode> {
    let mut renderer = ConsoleRenderer::new(std::io::stdout(), media_dir);

    match terminal.execute(line).await {
        Ok(Some(response)) => renderer.render(&response)?,
        Ok(None) => {},
        Err(err) => {
            renderer.render_error(&err)?;
            return Ok(ExitCode::FAILURE);
        },
    }
    Ok(ExitCode::SUCCESS)
}
