//! Scratch storage for the serialized buffer.
//!
//! Each run writes the buffer once and reads it back twice from offset zero. Storage is
//! owned by the run and released when it is dropped, whichever way the run ends.

use async_trait::async_trait;
use std::io::{self, Cursor, SeekFrom};
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::task::{Context, Poll};
use tempfile::TempPath;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncSeekExt, AsyncWrite, AsyncWriteExt};

/// Writable, rewindable byte sink that can hand out readers over what was written.
#[async_trait]
pub trait ScratchStorage: AsyncWrite + Unpin + Send {
    /// Owned reader over the stored bytes.
    type Reader: AsyncRead + Unpin + Send + 'static;

    /// Human-readable location, for logging.
    fn describe(&self) -> String;

    /// Complete pending writes and reset the position to the start.
    async fn rewind(&mut self) -> io::Result<()>;

    /// Reader starting at the current position.
    async fn open_reader(&mut self) -> io::Result<Self::Reader>;
}

/// In-memory scratch buffer.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    cursor: Cursor<Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes written so far.
    pub fn bytes(&self) -> &[u8] {
        self.cursor.get_ref()
    }
}

impl AsyncWrite for MemoryStorage {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.get_mut().cursor).poll_write(cx, buf)
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().cursor).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().cursor).poll_shutdown(cx)
    }
}

#[async_trait]
impl ScratchStorage for MemoryStorage {
    type Reader = Cursor<Vec<u8>>;

    fn describe(&self) -> String {
        format!("memory ({} bytes)", self.cursor.get_ref().len())
    }

    async fn rewind(&mut self) -> io::Result<()> {
        self.cursor.set_position(0);
        Ok(())
    }

    async fn open_reader(&mut self) -> io::Result<Self::Reader> {
        let start = (self.cursor.position() as usize).min(self.cursor.get_ref().len());
        Ok(Cursor::new(self.cursor.get_ref()[start..].to_vec()))
    }
}

/// Scratch file deleted when the storage is dropped.
#[derive(Debug)]
pub struct TempFileStorage {
    file: File,
    path: TempPath,
}

impl TempFileStorage {
    /// Create a uniquely named scratch file in `dir`, or in the system temp directory.
    pub fn create(dir: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("stream-parity-").suffix(".json");
        let named = match dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                builder.tempfile_in(dir)?
            }
            None => builder.tempfile()?,
        };
        let (file, path) = named.into_parts();
        tracing::debug!("Created scratch file: {}", path.display());

        Ok(Self {
            file: File::from_std(file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keep the scratch file on disk after the storage is dropped.
    ///
    /// Returns where the file lives, for triage of a failed run.
    pub fn persist(self) -> io::Result<PathBuf> {
        self.path.keep().map_err(|err| err.error)
    }
}

impl AsyncWrite for TempFileStorage {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.get_mut().file).poll_write(cx, buf)
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().file).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().file).poll_shutdown(cx)
    }
}

#[async_trait]
impl ScratchStorage for TempFileStorage {
    type Reader = File;

    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn rewind(&mut self) -> io::Result<()> {
        self.file.flush().await?;
        self.file.seek(SeekFrom::Start(0)).await?;
        Ok(())
    }

    /// The reader shares the file handle, and with it the position set by
    /// [`rewind`](ScratchStorage::rewind).
    async fn open_reader(&mut self) -> io::Result<Self::Reader> {
        self.file.try_clone().await
    }
}
