//! The record store: durable writes through a single writer thread, reads
//! through live queries.
//!
//! Writes are applied strictly in submission order, one at a time, by a
//! dedicated thread that owns the SQLite connection. Reads never touch the
//! connection; they observe the change feed's last published snapshot and
//! converge to the latest commit.

use crate::db::Database;
use crate::error::StoreError;
use crate::live::ChangeFeed;
use crate::photos::PhotoLocator;
use crate::record::{CaseRecord, RecordId};
use casefile_config::CasefileConfig;
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tokio::sync::{mpsc, oneshot, watch};
use tokio_stream::wrappers::WatchStream;

enum WriteOp {
    Insert(CaseRecord),
    Update(CaseRecord),
}

impl WriteOp {
    fn name(&self) -> &'static str {
        match self {
            WriteOp::Insert(_) => "insert",
            WriteOp::Update(_) => "update",
        }
    }

    fn record_id(&self) -> RecordId {
        match self {
            WriteOp::Insert(record) | WriteOp::Update(record) => record.id,
        }
    }
}

struct WriteJob {
    op: WriteOp,
    done: oneshot::Sender<Result<(), StoreError>>,
}

/// Completion handle for a submitted write.
///
/// The write runs whether or not the ticket is awaited or dropped; awaiting
/// it yields the write's result strictly after the commit and its change-feed
/// publication.
pub struct WriteTicket {
    done: oneshot::Receiver<Result<(), StoreError>>,
}

impl WriteTicket {
    /// Wait for the write to be applied (or rejected).
    pub async fn wait(self) -> Result<(), StoreError> {
        self.done.await.unwrap_or(Err(StoreError::Closed))
    }
}

/// Handle to the case record store.
///
/// Cheap to clone; all clones share the same writer queue and change feed.
/// Construct one per process with [`RecordStore::open`] and hand references
/// to every consumer.
#[derive(Clone)]
pub struct RecordStore {
    inner: Arc<Inner>,
}

struct Inner {
    feed: Arc<ChangeFeed>,
    photos: PhotoLocator,
    queue: Mutex<Option<mpsc::UnboundedSender<WriteJob>>>,
    writer: Mutex<Option<thread::JoinHandle<()>>>,
}

impl RecordStore {
    /// Open the store described by the given config.
    ///
    /// Creates the data directory, opens the database, reads the initial
    /// snapshot, and spawns the writer thread. Any failure is fatal: the
    /// store either serves fully or not at all.
    pub fn open(config: &CasefileConfig) -> Result<Self, StoreError> {
        let database_path = config.database_path();
        if let Some(parent) = database_path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                StoreError::StorageUnavailable(format!("{}: {err}", parent.display()))
            })?;
        }

        let db = Database::open(&database_path)?;
        let snapshot = db.list_all()?;
        let feed = Arc::new(ChangeFeed::new(snapshot));

        let (sender, receiver) = mpsc::unbounded_channel();
        let writer_feed = feed.clone();
        let writer = thread::Builder::new()
            .name("casefile-writer".to_string())
            .spawn(move || writer_loop(db, receiver, writer_feed))
            .map_err(|err| {
                StoreError::StorageUnavailable(format!("failed to spawn writer thread: {err}"))
            })?;

        info!(
            "opened record store (database={}, photos={})",
            database_path.display(),
            config.photo_dir().display()
        );
        Ok(Self {
            inner: Arc::new(Inner {
                feed,
                photos: PhotoLocator::new(config.photo_dir()),
                queue: Mutex::new(Some(sender)),
                writer: Mutex::new(Some(writer)),
            }),
        })
    }

    /// Persist a new record.
    ///
    /// Returns immediately; fails with [`StoreError::Conflict`] on the ticket
    /// when the id already exists.
    pub fn insert(&self, record: CaseRecord) -> WriteTicket {
        self.submit(WriteOp::Insert(record))
    }

    /// Replace the stored record with the same id wholesale.
    ///
    /// Returns immediately; fails with [`StoreError::NotFound`] on the ticket
    /// when no such record exists.
    pub fn update(&self, record: CaseRecord) -> WriteTicket {
        self.submit(WriteOp::Update(record))
    }

    /// Live query over the full table.
    ///
    /// The receiver is seeded with the current snapshot and re-emits a full
    /// snapshot after every committed write. Ordering of records within a
    /// snapshot is stable across unrelated updates but otherwise unspecified.
    pub fn list_all(&self) -> watch::Receiver<Vec<CaseRecord>> {
        self.inner.feed.watch_list()
    }

    /// [`RecordStore::list_all`] as a stream of snapshots.
    pub fn stream_all(&self) -> WatchStream<Vec<CaseRecord>> {
        WatchStream::new(self.list_all())
    }

    /// Live query over a single record, `None` while absent.
    pub fn get_by_id(&self, id: RecordId) -> watch::Receiver<Option<CaseRecord>> {
        self.inner.feed.watch_record(id)
    }

    /// [`RecordStore::get_by_id`] as a stream of states.
    pub fn stream_record(&self, id: RecordId) -> WatchStream<Option<CaseRecord>> {
        WatchStream::new(self.get_by_id(id))
    }

    /// Path of the photo associated with a record.
    ///
    /// Pure derivation from the record's id over the configured photo
    /// directory; performs no I/O and never fails.
    pub fn photo_path(&self, record: &CaseRecord) -> PathBuf {
        self.inner.photos.path_for(record.id)
    }

    /// Shut the store down.
    ///
    /// Stops accepting writes, lets the writer drain everything already
    /// submitted, then joins it. Idempotent; later calls are no-ops. Writes
    /// submitted after this point fail with [`StoreError::Closed`].
    pub fn close(&self) {
        let sender = self.inner.queue.lock().take();
        drop(sender);
        if let Some(writer) = self.inner.writer.lock().take() {
            if writer.join().is_err() {
                warn!("writer thread panicked during shutdown");
            }
        }
    }

    fn submit(&self, op: WriteOp) -> WriteTicket {
        let (done_tx, done_rx) = oneshot::channel();
        debug!("submitting write (op={}, id={})", op.name(), op.record_id());
        let job = WriteJob { op, done: done_tx };
        let queue = self.inner.queue.lock();
        match queue.as_ref() {
            Some(sender) => {
                if let Err(rejected) = sender.send(job) {
                    let _ = rejected.0.done.send(Err(StoreError::Closed));
                }
            }
            None => {
                let _ = job.done.send(Err(StoreError::Closed));
            }
        }
        WriteTicket { done: done_rx }
    }
}

/// Body of the writer thread: apply writes FIFO, publish after each commit,
/// complete the submitter's ticket last.
fn writer_loop(db: Database, mut jobs: mpsc::UnboundedReceiver<WriteJob>, feed: Arc<ChangeFeed>) {
    while let Some(job) = jobs.blocking_recv() {
        let result = match &job.op {
            WriteOp::Insert(record) => db.insert(record),
            WriteOp::Update(record) => db.update(record),
        };
        match &result {
            Ok(()) => match db.list_all() {
                Ok(snapshot) => feed.publish(snapshot),
                Err(err) => warn!("snapshot refresh failed after write: {err}"),
            },
            Err(err) => {
                debug!(
                    "write rejected (op={}, id={}, error={err})",
                    job.op.name(),
                    job.op.record_id()
                );
            }
        }
        // A dropped ticket is fine; the write already happened.
        let _ = job.done.send(result);
    }
    debug!("writer queue drained, stopping");
}
