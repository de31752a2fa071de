//! Backing-store access and the process-wide dataset cache.
//!
//! RULE: Only store.rs touches the backing store.
//! Everything downstream works from the parsed `TransactionData` it
//! hands out, behind an `Arc` that is swapped whole on reload.

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use serde::Deserialize;

use crate::dataset::{Customer, Transaction, TransactionData};
use crate::error::{RewardsError, RewardsResult};

/// A stat-and-read view of wherever the record set lives.
pub trait DataSource: Send + Sync {
    /// Last-modified stamp of the backing store.
    fn modified(&self) -> io::Result<SystemTime>;

    /// The full serialized record set.
    fn read(&self) -> io::Result<Vec<u8>>;
}

/// A JSON document on disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for FileSource {
    fn modified(&self) -> io::Result<SystemTime> {
        std::fs::metadata(&self.path)?.modified()
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        std::fs::read(&self.path)
    }
}

/// An in-process source with a settable stamp (used in tests).
/// Clones share content, so a handle kept outside the store can edit
/// the document a `DataStore` is reading.
#[derive(Clone)]
pub struct MemorySource {
    inner: Arc<Mutex<MemoryState>>,
}

struct MemoryState {
    modified: SystemTime,
    bytes: Vec<u8>,
}

impl MemorySource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryState {
                modified: SystemTime::UNIX_EPOCH,
                bytes: bytes.into(),
            })),
        }
    }

    /// Replace the content and advance the stamp.
    pub fn update(&self, bytes: impl Into<Vec<u8>>) {
        let mut state = self.inner.lock().expect("memory source lock poisoned");
        state.bytes = bytes.into();
        state.modified += Duration::from_secs(1);
    }

    /// Replace the content without touching the stamp, as if the store
    /// changed underneath an unchanged mtime.
    pub fn set_bytes(&self, bytes: impl Into<Vec<u8>>) {
        let mut state = self.inner.lock().expect("memory source lock poisoned");
        state.bytes = bytes.into();
    }

    /// Advance the stamp without changing content.
    pub fn touch(&self) {
        let mut state = self.inner.lock().expect("memory source lock poisoned");
        state.modified += Duration::from_secs(1);
    }
}

impl DataSource for MemorySource {
    fn modified(&self) -> io::Result<SystemTime> {
        Ok(self.inner.lock().expect("memory source lock poisoned").modified)
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        Ok(self
            .inner
            .lock()
            .expect("memory source lock poisoned")
            .bytes
            .clone())
    }
}

struct CacheEntry {
    modified: SystemTime,
    data: Arc<TransactionData>,
}

/// Caches the last successfully parsed record set, keyed by the
/// source's modification stamp. The stamp only advances on a successful
/// parse, so a failed reload leaves the previous entry intact and the
/// next request tries again.
pub struct DataStore {
    source: Box<dyn DataSource>,
    cache: Mutex<Option<CacheEntry>>,
}

impl DataStore {
    pub fn new(source: impl DataSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cache: Mutex::new(None),
        }
    }

    /// A store over a JSON document on disk.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(FileSource::new(path))
    }

    /// The current record set, re-read only when the backing store's
    /// stamp has changed since the last successful parse.
    pub fn load(&self) -> RewardsResult<Arc<TransactionData>> {
        let modified = self.source.modified()?;

        let mut cache = self.cache.lock().expect("dataset cache lock poisoned");
        if let Some(entry) = cache.as_ref() {
            if entry.modified == modified {
                return Ok(Arc::clone(&entry.data));
            }
        }

        let bytes = self.source.read()?;
        let data = Arc::new(parse_dataset(&bytes)?);
        log::debug!(
            "dataset reloaded: {} customers, {} transactions",
            data.customers.len(),
            data.transactions.len()
        );
        *cache = Some(CacheEntry {
            modified,
            data: Arc::clone(&data),
        });
        Ok(data)
    }
}

/// File shape: both collections must be present; anything else is
/// malformed.
#[derive(Deserialize)]
struct TransactionDataFile {
    #[serde(default)]
    customers: Option<Vec<Customer>>,
    #[serde(default)]
    transactions: Option<Vec<Transaction>>,
}

fn parse_dataset(bytes: &[u8]) -> RewardsResult<TransactionData> {
    let file: TransactionDataFile = serde_json::from_slice(bytes)
        .map_err(|e| RewardsError::MalformedData(e.to_string()))?;
    match (file.customers, file.transactions) {
        (Some(customers), Some(transactions)) => Ok(TransactionData {
            customers,
            transactions,
        }),
        (None, _) => Err(RewardsError::MalformedData(
            "missing customers collection".into(),
        )),
        (_, None) => Err(RewardsError::MalformedData(
            "missing transactions collection".into(),
        )),
    }
}
