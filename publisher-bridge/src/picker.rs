//! Folder pickers: the host side of `select_folder`.
//!
//! A desktop host plugs in its native dialog; [`PromptPicker`] asks on a text
//! stream instead, which is what the CLI uses.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

/// Folder dialog failures (not cancellation).
#[derive(Debug, Error)]
pub enum PickerError {
    /// Reading the answer or drawing the dialog failed.
    #[error("folder dialog I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The chosen path is not an existing directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Something that can ask the user for a folder.
#[async_trait]
pub trait FolderPicker: Send + Sync {
    /// Show the dialog, starting in `start_dir` when given.
    ///
    /// `Ok(None)` means the user canceled.
    async fn pick_folder(&self, start_dir: Option<&Path>) -> Result<Option<PathBuf>, PickerError>;
}

/// Line-based picker: prints a prompt, reads one line.
///
/// An empty line or end of input cancels.
pub struct PromptPicker<R, W> {
    io: Mutex<(R, W)>,
}

impl<R, W> PromptPicker<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Create a picker reading answers from `reader` and prompting on `writer`.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Mutex::new((reader, writer)),
        }
    }
}

impl PromptPicker<tokio::io::BufReader<tokio::io::Stdin>, tokio::io::Stderr> {
    /// Picker on the process's stdin, prompting on stderr.
    pub fn stdio() -> Self {
        Self::new(
            tokio::io::BufReader::new(tokio::io::stdin()),
            tokio::io::stderr(),
        )
    }
}

#[async_trait]
impl<R, W> FolderPicker for PromptPicker<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn pick_folder(&self, start_dir: Option<&Path>) -> Result<Option<PathBuf>, PickerError> {
        let mut guard = self.io.lock().await;
        let (reader, writer) = &mut *guard;

        let prompt = match start_dir {
            Some(dir) => format!("Folder path (empty to cancel) [{}]: ", dir.display()),
            None => "Folder path (empty to cancel): ".to_string(),
        };
        writer.write_all(prompt.as_bytes()).await?;
        writer.flush().await?;

        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        let answer = line.trim();
        if answer.is_empty() {
            return Ok(None);
        }

        let path = PathBuf::from(answer);
        let is_dir = tokio::fs::metadata(&path)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(PickerError::NotADirectory(path));
        }
        Ok(Some(path))
    }
}
