use crate::error::{Result, StorageError};
use crate::log::{self, LogWriter, ReplaySummary};
use crate::settings::StoreSettings;
use crate::writer::{self, Command};
use async_trait::async_trait;
use burrow_core::{KeyStore, Record, ShortCode};
use burrow_generator::Generator;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{error, info, trace, warn};

/// In-memory key store persisted to an append-only log.
///
/// - lookups and counts take the read side of a single `RwLock`, inserts the
///   write side; the lock is never held across I/O
/// - every accepted insertion is queued for the background writer before
///   [`KeyStore::put`] returns its key
/// - the log is written by exactly one task, in queue order
///
/// Records are durable only once the writer has reached them. Use
/// [`LogStore::flush`] or [`LogStore::shutdown`] to wait for that.
#[derive(Debug)]
pub struct LogStore<G> {
    urls: RwLock<HashMap<ShortCode, String>>,
    generator: G,
    queue: mpsc::Sender<Command>,
    writer: JoinHandle<()>,
    path: PathBuf,
    replay: ReplaySummary,
}

impl<G: Generator> LogStore<G> {
    /// Rebuilds the mapping from the log at `settings.path`, opens the log
    /// for appending and starts the background writer.
    ///
    /// A missing, unreadable or malformed log is not an error: the store
    /// comes up with whatever could be replayed. When replay stopped at an
    /// undecodable line, the log is cut back to the last good record and the
    /// cut bytes go to [`log::rejected_path`], so later appends stay
    /// reachable on the next restart. Failing to repair or open the log for
    /// appending is fatal, since the store would have no durability path.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn open(settings: StoreSettings, generator: G) -> Result<Self> {
        let StoreSettings {
            path,
            queue_capacity,
            sync,
        } = settings;

        let urls = RwLock::new(HashMap::new());
        let replay = log::replay(&path, |record| {
            insert_if_absent(&urls, record.key, record.url)
        })
        .await;

        match &replay.error {
            None => info!(
                path = %path.display(),
                records = replay.applied,
                duplicates = replay.duplicates,
                "log replayed"
            ),
            Some(e) => warn!(
                path = %path.display(),
                records = replay.applied,
                error = %e,
                "log replay stopped early, continuing with partial state"
            ),
        }

        if let Some(StorageError::Decode { .. }) = replay.error {
            log::discard_tail(&path, replay.valid_len).await?;
        }

        let log = LogWriter::open(&path, sync).await?;
        let (queue, receiver) = mpsc::channel(queue_capacity.max(1));
        let writer = writer::spawn(log, receiver);

        Ok(Self {
            urls,
            generator,
            queue,
            writer,
            path,
            replay,
        })
    }

    /// Location of the persisted log.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// What the startup replay loaded, and why it stopped if it stopped early.
    pub fn replay_summary(&self) -> &ReplaySummary {
        &self.replay
    }

    /// Waits until every record queued before this call has been written.
    pub async fn flush(&self) -> Result<()> {
        let (ack, done) = oneshot::channel();
        self.queue
            .send(Command::Flush(ack))
            .await
            .map_err(|_| StorageError::WriterClosed)?;
        done.await.map_err(|_| StorageError::WriterClosed)
    }

    /// Closes the persistence queue, lets the writer drain it and waits for
    /// the writer to release the log.
    pub async fn shutdown(self) -> Result<()> {
        let Self { queue, writer, .. } = self;
        drop(queue);
        writer
            .await
            .map_err(|e| StorageError::WriterFailed(e.to_string()))
    }

    async fn persist(&self, record: Record) {
        let Err(mpsc::error::SendError(command)) = self.queue.send(Command::Append(record)).await
        else {
            return;
        };
        if let Command::Append(record) = command {
            error!(
                key = %record.key,
                url = %record.url,
                "log writer is gone, record not persisted"
            );
        }
    }
}

#[async_trait]
impl<G: Generator> KeyStore for LogStore<G> {
    fn get(&self, key: &str) -> Option<String> {
        self.urls.read().get(key).cloned()
    }

    fn set(&self, key: &ShortCode, url: &str) -> bool {
        insert_if_absent(&self.urls, key.clone(), url.to_owned())
    }

    fn count(&self) -> usize {
        self.urls.read().len()
    }

    /// Claims a key derived from the current size of the store.
    ///
    /// Each attempt re-reads the count. When the count moved since the last
    /// attempt (a concurrent writer won) the candidate is simply
    /// `generate(count)`. When it did not move, the taken key came from
    /// outside the sequence (a direct `set`, or a log written with another
    /// generator) and `generate(count)` would return it again, so a growing
    /// offset is added to the seed instead. Only in that case does the key
    /// depart from being a pure function of the count.
    /// The loop has no upper bound; it ends once an insert succeeds.
    async fn put(&self, url: &str) -> ShortCode {
        let mut last_count = None;
        let mut offset = 0u64;
        loop {
            let count = self.count() as u64;
            if last_count == Some(count) {
                offset = offset.wrapping_add(1);
            } else {
                offset = 0;
            }
            last_count = Some(count);

            let key = self.generator.generate(count.saturating_add(offset));
            if self.set(&key, url) {
                self.persist(Record::new(key.clone(), url)).await;
                return key;
            }
            trace!(key = %key, count, offset, "key already taken, retrying");
        }
    }
}

fn insert_if_absent(
    urls: &RwLock<HashMap<ShortCode, String>>,
    key: ShortCode,
    url: String,
) -> bool {
    let mut urls = urls.write();
    if urls.contains_key(&key) {
        return false;
    }
    urls.insert(key, url);
    true
}
