//! Append-only file sink with first-line eviction
//!
//! Every record becomes one line terminated by [`LINE_ENDING`]. The sink keeps
//! a running byte count and line count that match what is on disk, so size
//! and count limits can be checked without touching the file.
//!
//! Eviction streams the file through a filter that drops everything up to and
//! including the first `\n`, writes the remainder to `<file>.tmp`, and
//! atomically renames the temporary file over the original. The write handle
//! is flushed and released before the file is replaced, and reopened on every
//! exit path afterwards.

use crate::core::{format, LogRecord, LoggerError, Result, RetentionPolicy, Sink, LINE_ENDING};
use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tracing::Level;

/// File sink writing one formatted record per line
///
/// # Example
///
/// ```no_run
/// use sink_logger::sinks::FileSink;
///
/// # async fn example() -> sink_logger::Result<()> {
/// let mut sink = FileSink::new("logs/app.log").await?;
/// sink.write_line("[INF] [App] started").await?;
///
/// assert_eq!(sink.line_count(), 1);
/// sink.delete_first_line().await?;
/// assert_eq!(sink.current_size(), 0);
/// # Ok(())
/// # }
/// ```
pub struct FileSink {
    path: PathBuf,
    writer: Option<File>,
    current_size: u64,
    line_count: u64,
}

impl FileSink {
    /// Create a sink for the file at `path`
    ///
    /// Nothing is created on disk until the first write (or an explicit
    /// [`open_stream`](Self::open_stream)). If the file already exists, size
    /// and line counters are initialised from its content.
    ///
    /// # Errors
    ///
    /// An empty path is a configuration error; an existing file that cannot
    /// be read is a file sink error.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if path.as_os_str().is_empty() {
            return Err(LoggerError::config("FileSink", "log file path must not be empty"));
        }

        let mut sink = Self {
            path,
            writer: None,
            current_size: 0,
            line_count: 0,
        };
        sink.sync_from_disk().await?;
        Ok(sink)
    }

    /// Open the append handle, creating the file and its parent directory
    /// if needed; a no-op when already open
    pub async fn open_stream(&mut self) -> Result<()> {
        if self.writer.is_some() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                LoggerError::file_sink(self.path.display().to_string(), format!("Failed to open: {}", e))
            })?;

        self.writer = Some(file);
        Ok(())
    }

    /// Flush and release the append handle; returns whether one was open
    pub async fn close(&mut self) -> Result<bool> {
        match self.writer.take() {
            Some(mut writer) => {
                writer.flush().await.map_err(|e| {
                    LoggerError::file_sink(
                        self.path.display().to_string(),
                        format!("Failed to flush before close: {}", e),
                    )
                })?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    /// Append `line` plus the line terminator
    ///
    /// Returns the number of bytes written, which is also added to
    /// [`current_size`](Self::current_size).
    pub async fn write_line(&mut self, line: &str) -> Result<u64> {
        self.open_stream().await?;

        let mut bytes = String::with_capacity(line.len() + LINE_ENDING.len());
        bytes.push_str(line);
        bytes.push_str(LINE_ENDING);

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;

        if let Err(e) = Self::append(writer, bytes.as_bytes()).await {
            // part of the line may already be on disk
            if let Err(sync_err) = self.sync_from_disk().await {
                tracing::event!(
                    Level::DEBUG,
                    path = %self.path.display(),
                    "could not resync counters after failed write: {sync_err}"
                );
            }
            return Err(LoggerError::file_sink(
                self.path.display().to_string(),
                format!("Failed to write log entry: {}", e),
            ));
        }

        let written = bytes.len() as u64;
        self.current_size += written;
        self.line_count += 1;
        Ok(written)
    }

    /// Remove the file; a missing file is not an error
    pub async fn delete(&mut self) -> Result<()> {
        self.close().await?;
        self.remove_file().await?;
        self.current_size = 0;
        self.line_count = 0;
        Ok(())
    }

    /// Drop all content by deleting and recreating the file
    ///
    /// Readers holding the old file observe end-of-file instead of a file
    /// truncated underneath them. The file is only recreated if the sink had
    /// it open, so clearing a deleted sink leaves nothing behind.
    pub async fn clear(&mut self) -> Result<()> {
        let was_open = self.close().await?;
        self.remove_file().await?;
        self.current_size = 0;
        self.line_count = 0;

        if was_open {
            self.open_stream().await?;
        }
        tracing::event!(Level::DEBUG, path = %self.path.display(), "cleared log file");
        Ok(())
    }

    /// Move the file to `new_path` and continue writing there
    pub async fn rename(&mut self, new_path: impl AsRef<Path>) -> Result<()> {
        let new_path = new_path.as_ref().to_path_buf();
        if new_path.as_os_str().is_empty() {
            return Err(LoggerError::config("FileSink", "rename target must not be empty"));
        }

        let was_open = self.close().await?;
        let renamed = fs::rename(&self.path, &new_path).await;
        if renamed.is_ok() {
            self.path = new_path;
        }
        if was_open {
            self.open_stream().await?;
        }

        renamed.map_err(|e| {
            LoggerError::file_sink(self.path.display().to_string(), format!("Failed to rename: {}", e))
        })
    }

    /// Remove the oldest line, returning how many bytes were removed
    ///
    /// An empty or missing file removes nothing. The tracked size never goes
    /// below zero, even if the file was modified externally.
    pub async fn delete_first_line(&mut self) -> Result<u64> {
        let was_open = self.close().await?;
        let stripped = self.strip_first_line().await;

        if let Ok(removed) = stripped {
            if removed > 0 {
                self.current_size = self.current_size.saturating_sub(removed);
                self.line_count = self.line_count.saturating_sub(1);
                tracing::event!(
                    Level::DEBUG,
                    path = %self.path.display(),
                    removed,
                    "evicted oldest line"
                );
            }
        }

        if was_open {
            self.open_stream().await?;
        }
        stripped
    }

    async fn strip_first_line(&self) -> Result<u64> {
        let source = match File::open(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(LoggerError::io_operation(
                    "evict oldest line",
                    format!("Failed to open '{}'", self.path.display()),
                    e,
                ))
            }
        };

        let mut reader = BufReader::new(source);
        let mut first_line = Vec::new();
        let removed = reader.read_until(b'\n', &mut first_line).await.map_err(|e| {
            LoggerError::io_operation(
                "evict oldest line",
                format!("Failed to read '{}'", self.path.display()),
                e,
            )
        })? as u64;

        if removed == 0 {
            return Ok(0);
        }

        let temp_path = self.temp_path();
        if let Err(e) = Self::copy_remainder(&mut reader, &temp_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(LoggerError::io_operation(
                "evict oldest line",
                format!("Failed to write '{}'", temp_path.display()),
                e,
            ));
        }
        drop(reader);

        // rename replaces the destination atomically
        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(LoggerError::file_sink(
                self.path.display().to_string(),
                format!("Failed to replace with trimmed copy: {}", e),
            ));
        }

        Ok(removed)
    }

    async fn append(writer: &mut File, bytes: &[u8]) -> io::Result<()> {
        writer.write_all(bytes).await?;
        writer.flush().await
    }

    async fn copy_remainder(reader: &mut BufReader<File>, temp_path: &Path) -> io::Result<()> {
        let mut temp = File::create(temp_path).await?;
        tokio::io::copy_buf(reader, &mut temp).await?;
        temp.flush().await?;
        Ok(())
    }

    async fn remove_file(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LoggerError::file_sink(
                self.path.display().to_string(),
                format!("Failed to delete: {}", e),
            )),
        }
    }

    /// Re-read size and line count from the file
    async fn sync_from_disk(&mut self) -> Result<()> {
        let file = match File::open(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.current_size = 0;
                self.line_count = 0;
                return Ok(());
            }
            Err(e) => {
                return Err(LoggerError::file_sink(
                    self.path.display().to_string(),
                    format!("Cannot read existing content: {}", e),
                ))
            }
        };

        let size = file.metadata().await.map_err(|e| {
            LoggerError::file_sink(
                self.path.display().to_string(),
                format!("Cannot access file metadata: {}", e),
            )
        })?;
        self.current_size = size.len();
        self.line_count = Self::count_lines(file, size.len()).await?;
        Ok(())
    }

    /// Count `\n` bytes within the first `len` bytes
    async fn count_lines(file: File, len: u64) -> Result<u64> {
        let mut reader = BufReader::new(file.take(len));
        let mut lines = 0u64;
        loop {
            let chunk = reader.fill_buf().await?;
            if chunk.is_empty() {
                break;
            }
            lines += chunk.iter().filter(|b| **b == b'\n').count() as u64;
            let consumed = chunk.len();
            reader.consume(consumed);
        }
        Ok(lines)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("log"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Bytes currently retained, including line terminators
    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    /// Lines currently retained
    #[must_use]
    pub fn line_count(&self) -> u64 {
        self.line_count
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Sink for FileSink {
    async fn write(&mut self, record: &LogRecord) -> Result<()> {
        self.write_line(&format(record)).await?;
        Ok(())
    }

    async fn needs_eviction(&mut self, policy: &RetentionPolicy) -> Result<bool> {
        Ok(policy.count_exceeded(self.line_count) || policy.size_exceeded(self.current_size))
    }

    async fn evict_oldest(&mut self) -> Result<()> {
        self.delete_first_line().await?;
        Ok(())
    }

    async fn clear(&mut self) -> Result<()> {
        FileSink::clear(self).await
    }

    async fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().await.map_err(|e| {
                LoggerError::file_sink(self.path.display().to_string(), format!("Failed to flush: {}", e))
            })?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}
