//! Filesystem and console implementations of the terminal's host seams.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::AsyncWriteExt;
use tracing::debug;
use ts64::kernel::prelude::{InputFile, MediaKind};
use ts64::terminal::Payload;
use ts64::{DownloadSink, FileSource, Renderer, Response, TerminalError};

const ANSI_CLEAR: &str = "\x1b[2J\x1b[H";

/// Reads the file named by the command argument.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathFileSource;

impl FileSource for PathFileSource {
    async fn pick(&self, kind: Option<MediaKind>, hint: &str) -> io::Result<Option<InputFile>> {
        if hint.is_empty() {
            return Ok(None);
        }
        let path = Path::new(hint);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, format!("not a file: {hint}")))?;

        let bytes = tokio::fs::read(path).await?;
        debug!(kind = ?kind, file = %name, bytes = bytes.len(), "Picked media file");
        Ok(Some(InputFile::new(name, bytes)))
    }
}

/// Writes downloads into one directory, replacing files atomically.
#[derive(Debug)]
pub struct DirectoryDownloads {
    dir: PathBuf,
    tmp_counter: AtomicU64,
}

impl DirectoryDownloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), tmp_counter: AtomicU64::new(0) }
    }

    /// Final and temp paths for `name`.
    fn paths(&self, name: &str) -> io::Result<(PathBuf, PathBuf)> {
        if name.is_empty() || Path::new(name).file_name().is_none_or(|n| n != name) {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("unsafe download name: {name}")));
        }
        let seq = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
        let tmp = self.dir.join(format!(".{name}.part.{}.{seq}", std::process::id()));
        Ok((self.dir.join(name), tmp))
    }

    /// Writes `bytes` to `<dir>/<name>` through a temp file and returns the final path.
    /// Only for callers outside the async runtime, such as the renderer.
    ///
    /// # Errors
    /// Any I/O failure, or a `name` that is not a plain file name.
    pub fn save_blocking(&self, name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        let (target, tmp) = self.paths(name)?;
        fs::create_dir_all(&self.dir)?;

        let written = fs::File::create(&tmp).and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        });
        if let Err(err) = written.and_then(|()| fs::rename(&tmp, &target)) {
            let _ = fs::remove_file(&tmp);
            return Err(err);
        }

        debug!(file = %target.display(), bytes = bytes.len(), "Download written");
        Ok(target)
    }
}

impl DownloadSink for DirectoryDownloads {
    async fn save(&self, name: &str, bytes: &[u8]) -> io::Result<String> {
        let (target, tmp) = self.paths(name)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let written = async {
            let mut file = tokio::fs::File::create(&tmp).await?;
            file.write_all(bytes).await?;
            file.sync_all().await?;
            drop(file);
            tokio::fs::rename(&tmp, &target).await
        };
        if let Err(err) = written.await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(err);
        }

        debug!(file = %target.display(), bytes = bytes.len(), "Download written");
        Ok(target.display().to_string())
    }
}

/// Writes the transcript to `out`. Decrypted media goes to the downloads
/// directory as `decrypted_<id>.bin` since a terminal cannot play it.
#[derive(Debug)]
pub struct ConsoleRenderer<W> {
    out: W,
    media: DirectoryDownloads,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W, media_dir: impl Into<PathBuf>) -> Self {
        Self { out, media: DirectoryDownloads::new(media_dir) }
    }

    /// # Errors
    /// Output could not be written.
    pub fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "tetrascript64@system:~$ ")?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn render(&mut self, response: &Response) -> io::Result<()> {
        match response {
            Response::Clear => write!(self.out, "{ANSI_CLEAR}")?,
            Response::Unlocked { id, payload: Payload::Opaque(bytes) } => {
                writeln!(self.out, "{response}")?;
                match self.media.save_blocking(&format!("decrypted_{id}.bin"), bytes) {
                    Ok(path) => writeln!(self.out, "Saved to: {}", path.display())?,
                    Err(err) => writeln!(self.out, "Could not save decrypted media: {err}")?,
                }
                writeln!(self.out)?;
            },
            _ => {
                writeln!(self.out, "{response}")?;
                writeln!(self.out)?;
            },
        }
        self.out.flush()
    }

    fn render_error(&mut self, error: &TerminalError) -> io::Result<()> {
        writeln!(self.out, "{error}")?;
        writeln!(self.out)?;
        self.out.flush()
    }
}
