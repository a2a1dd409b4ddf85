use crate::services::bootstrap::ShellTerminal;
use crate::services::host::ConsoleRenderer;
use anyhow::Result;
use std::path::Path;
use std::process::ExitCode;
use ts64::Renderer;

/// Stores a previously exported backup file verbatim.
pub async fn restore_file(terminal: &ShellTerminal, path: &Path, media_dir: &Path) -> Result<ExitCode> {
    let mut renderer = ConsoleRenderer::new(std::io::stdout(), media_dir);
    match terminal.restore_from(&path.to_string_lossy()).await {
        Ok(response) => {
            renderer.render(&response)?;
            Ok(ExitCode::SUCCESS)
        },
        Err(err) => {
            renderer.render_error(&err)?;
            Ok(ExitCode::FAILURE)
        },
    }
}
