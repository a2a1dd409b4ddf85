//! Seams to the host environment: picking files, delivering downloads and
//! presenting results. The interpreter never touches a filesystem or a screen
//! directly.

use crate::error::TerminalError;
use crate::response::Response;
use std::future::Future;
use ts64_kernel::prelude::{InputFile, MediaKind};

/// Supplies the file a media or restore command operates on.
pub trait FileSource: Send + Sync {
    /// `kind` is `None` when a backup is requested. `hint` is the raw command
    /// argument (the shell treats it as a path). `Ok(None)` means the user
    /// picked nothing.
    fn pick(
        &self,
        kind: Option<MediaKind>,
        hint: &str,
    ) -> impl Future<Output = std::io::Result<Option<InputFile>>> + Send;
}

/// Hands a finished byte buffer to the user under a file name.
pub trait DownloadSink: Send + Sync {
    /// Returns where the file can be found again, in a form `restore` accepts.
    fn save(&self, name: &str, bytes: &[u8]) -> impl Future<Output = std::io::Result<String>> + Send;
}

/// Presents command outcomes.
pub trait Renderer {
    /// # Errors
    /// Output could not be written.
    fn render(&mut self, response: &Response) -> std::io::Result<()>;

    /// # Errors
    /// Output could not be written.
    fn render_error(&mut self, error: &TerminalError) -> std::io::Result<()>;
}
