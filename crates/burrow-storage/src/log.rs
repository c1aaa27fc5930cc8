//! The persisted log: newline-delimited JSON records, one per accepted
//! insertion, appended in acceptance order. The only rewrite is cutting off
//! an undecodable tail, see [`discard_tail`].

use crate::error::{Result, StorageError};
use burrow_core::Record;
use std::io::{ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncSeekExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

/// Appends records to the log file.
#[derive(Debug)]
pub struct LogWriter {
    file: File,
    sync: bool,
}

impl LogWriter {
    /// Opens `path` for appending, creating it if needed.
    ///
    /// If the file does not end with a newline one is written first, so the
    /// next record always starts on a line of its own.
    ///
    /// When `sync` is set every append is followed by `sync_data`.
    pub async fn open(path: impl AsRef<Path>, sync: bool) -> Result<Self> {
        let path = path.as_ref();
        let unavailable =
            |e: std::io::Error| StorageError::LogUnavailable(format!("{}: {e}", path.display()));

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)
            .await
            .map_err(unavailable)?;

        let len = file.metadata().await.map_err(unavailable)?.len();
        if len > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::Start(len - 1))
                .await
                .map_err(unavailable)?;
            file.read_exact(&mut last).await.map_err(unavailable)?;
            if last[0] != b'\n' {
                file.write_all(b"\n").await.map_err(unavailable)?;
                file.flush().await.map_err(unavailable)?;
            }
        }

        Ok(Self { file, sync })
    }

    /// Writes one record as a single line and flushes it before returning.
    pub async fn append(&mut self, record: &Record) -> Result<()> {
        let mut line =
            serde_json::to_vec(record).map_err(|e| StorageError::Encode(e.to_string()))?;
        line.push(b'\n');

        self.file.write_all(&line).await.map_err(io_error)?;
        self.file.flush().await.map_err(io_error)?;
        if self.sync {
            self.file.sync_data().await.map_err(io_error)?;
        }
        Ok(())
    }
}

/// Outcome of replaying a log file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Records that were installed.
    pub applied: usize,
    /// Records whose key was already present (first write wins).
    pub duplicates: usize,
    /// Byte length of the log up to the end of the last line that was read
    /// and decoded successfully.
    pub valid_len: u64,
    /// Why replay stopped early, if it did.
    pub error: Option<StorageError>,
}

impl ReplaySummary {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Streams the log at `path` from the beginning, handing every record to
/// `apply`.
///
/// `apply` returns whether the record was installed. Replay ends at the end
/// of the file, or at the first line that cannot be read or decoded; in the
/// latter case everything before that line has been applied, the error is
/// reported in the summary and `valid_len` marks where the bad line starts.
/// A missing file is an empty log.
pub async fn replay<F>(path: impl AsRef<Path>, mut apply: F) -> ReplaySummary
where
    F: FnMut(Record) -> bool,
{
    let path = path.as_ref();
    let mut summary = ReplaySummary::default();

    let file = match File::open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "no existing log, starting empty");
            return summary;
        }
        Err(e) => {
            summary.error = Some(StorageError::Io(format!("{}: {e}", path.display())));
            return summary;
        }
    };

    let mut reader = BufReader::new(file);
    let mut line = Vec::new();
    let mut line_no = 0;
    loop {
        line.clear();
        let read = match reader.read_until(b'\n', &mut line).await {
            Ok(0) => break,
            Ok(read) => read as u64,
            Err(e) => {
                summary.error = Some(StorageError::Io(format!(
                    "{}: line {}: {e}",
                    path.display(),
                    line_no + 1
                )));
                break;
            }
        };
        line_no += 1;

        if line.iter().all(u8::is_ascii_whitespace) {
            summary.valid_len += read;
            continue;
        }

        match serde_json::from_slice::<Record>(&line) {
            Ok(record) => {
                summary.valid_len += read;
                if apply(record) {
                    summary.applied += 1;
                } else {
                    summary.duplicates += 1;
                }
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    line = line_no,
                    error = %e,
                    "malformed log record, stopping replay"
                );
                summary.error = Some(StorageError::Decode {
                    line: line_no,
                    message: e.to_string(),
                });
                break;
            }
        }
    }

    debug!(
        path = %path.display(),
        lines = line_no,
        applied = summary.applied,
        "log replay finished"
    );
    summary
}

/// Cuts the log at `path` back to its first `valid_len` bytes.
///
/// The removed bytes are appended to the [`rejected_path`] next to the log
/// so nothing is thrown away. Returns how many bytes were moved.
pub async fn discard_tail(path: impl AsRef<Path>, valid_len: u64) -> Result<u64> {
    let path = path.as_ref();
    let unavailable =
        |e: std::io::Error| StorageError::LogUnavailable(format!("{}: {e}", path.display()));

    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .await
        .map_err(unavailable)?;
    file.seek(SeekFrom::Start(valid_len))
        .await
        .map_err(unavailable)?;
    let mut tail = Vec::new();
    file.read_to_end(&mut tail).await.map_err(unavailable)?;
    if tail.is_empty() {
        return Ok(0);
    }
    if tail.last() != Some(&b'\n') {
        tail.push(b'\n');
    }

    let rejected = rejected_path(path);
    let mut sink = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&rejected)
        .await
        .map_err(unavailable)?;
    sink.write_all(&tail).await.map_err(unavailable)?;
    sink.sync_all().await.map_err(unavailable)?;

    file.set_len(valid_len).await.map_err(unavailable)?;
    file.sync_all().await.map_err(unavailable)?;

    warn!(
        path = %path.display(),
        rejected = %rejected.display(),
        kept = valid_len,
        moved = tail.len(),
        "moved unreadable log tail aside"
    );
    Ok(tail.len() as u64)
}

/// Where [`discard_tail`] keeps the bytes it cuts from `path`.
pub fn rejected_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".rejected");
    PathBuf::from(name)
}

fn io_error(e: std::io::Error) -> StorageError {
    StorageError::Io(e.to_string())
}
