use crate::log::LogWriter;
use burrow_core::Record;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Messages consumed by the background writer, in FIFO order.
#[derive(Debug)]
pub(crate) enum Command {
    /// Append one record to the log.
    Append(Record),
    /// Acknowledge once every command queued before this one is done.
    Flush(oneshot::Sender<()>),
}

/// Starts the single consumer of the persistence queue.
///
/// The task owns the log handle and runs until every sender is dropped,
/// draining whatever is still queued before it releases the file.
pub(crate) fn spawn(log: LogWriter, queue: mpsc::Receiver<Command>) -> JoinHandle<()> {
    tokio::spawn(run(log, queue))
}

async fn run(mut log: LogWriter, mut queue: mpsc::Receiver<Command>) {
    let mut written = 0u64;
    while let Some(command) = queue.recv().await {
        match command {
            Command::Append(record) => match log.append(&record).await {
                Ok(()) => written += 1,
                // The mapping stays visible in memory; only durability is lost.
                Err(e) => error!(key = %record.key, error = %e, "failed to append record to log"),
            },
            Command::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
    debug!(written, "persistence queue closed, log writer stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use burrow_core::ShortCode;

    fn record(key: &str) -> Record {
        Record::new(ShortCode::new_unchecked(key), "https://example.com")
    }

    async fn flush(queue: &mpsc::Sender<Command>) {
        let (ack, done) = oneshot::channel();
        queue.send(Command::Flush(ack)).await.unwrap();
        done.await.unwrap();
    }

    // Every write to /dev/full fails with ENOSPC.
    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn failed_append_keeps_the_writer_running() {
        let log = LogWriter::open("/dev/full", false).await.unwrap();
        let (queue, receiver) = mpsc::channel(4);
        let handle = spawn(log, receiver);

        queue.send(Command::Append(record("a"))).await.unwrap();
        flush(&queue).await;
        queue.send(Command::Append(record("b"))).await.unwrap();
        flush(&queue).await;
        assert!(!handle.is_finished());

        drop(queue);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn stops_once_every_sender_is_gone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let log = LogWriter::open(&path, false).await.unwrap();
        let (queue, receiver) = mpsc::channel(4);
        let handle = spawn(log, receiver);

        queue.send(Command::Append(record("a"))).await.unwrap();
        drop(queue);
        handle.await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents.lines().count(), 1);
    }
}
