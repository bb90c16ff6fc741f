//! Session persistence.
//!
//! Sessions are written as JSON under [`PRIMARY_KEY`]. The component list is
//! mirrored under [`LEGACY_KEY`] for older readers. If the primary write
//! fails, the legacy key is still written so the components survive.
//!
//! # Examples
//!
//! ```
//! use ds_scanner::{MemoryStore, ScanSessionBuilder, load_last_scan, persist_session};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let store = MemoryStore::new();
//! let session = ScanSessionBuilder::new("2.1.0").with_scan_time(1).build();
//!
//! persist_session(&store, &session).await.unwrap();
//! assert_eq!(load_last_scan(&store).await.unwrap(), Some(session));
//! # });
//! ```

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use ds_core::{ComponentRecord, FxHashMap, ScanSession, fx_hash_map};
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::ScanError;

/// Key holding the full session.
pub const PRIMARY_KEY: &str = "design-system-scan";

/// Key holding the components array only.
pub const LEGACY_KEY: &str = "last-scan-results";

/// A string key/value store for serialized sessions.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads a value, `None` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>, ScanError>;

    /// Writes a value, replacing any previous one.
    async fn set(&self, key: &str, value: String) -> Result<(), ScanError>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: Utf8PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory.
    #[must_use]
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    fn path(&self, key: &str) -> Utf8PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ScanError> {
        match tokio::fs::read_to_string(self.path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ScanError::storage(key, e)),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), ScanError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ScanError::storage(key, e))?;
        let path = self.path(key);
        tokio::fs::write(&path, value)
            .await
            .map_err(|e| ScanError::storage(key, e))?;
        debug!(%path, "Wrote store entry");
        Ok(())
    }
}

/// An in-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<FxHashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(fx_hash_map()),
        }
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ScanError> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), ScanError> {
        self.entries.write().insert(key.to_owned(), value);
        Ok(())
    }
}

/// Writes `session` under the primary key and its components under the
/// legacy key.
///
/// # Errors
///
/// Returns the primary write's error after the legacy fallback has been
/// attempted, or the legacy write's error if only that one failed.
pub async fn persist_session<S>(store: &S, session: &ScanSession) -> Result<(), ScanError>
where
    S: KeyValueStore + ?Sized,
{
    let full = serde_json::to_string(session).map_err(|e| ScanError::storage(PRIMARY_KEY, e))?;
    let legacy = serde_json::to_string(session.components())
        .map_err(|e| ScanError::storage(LEGACY_KEY, e))?;

    let primary = store.set(PRIMARY_KEY, full).await;
    if let Err(e) = &primary {
        warn!(error = %e, "Primary session write failed, keeping legacy copy only");
    }
    store.set(LEGACY_KEY, legacy).await?;
    primary
}

/// Reads the last persisted session.
///
/// # Errors
///
/// Returns [`ScanError::Storage`] if the store fails or the stored value is
/// not a session.
pub async fn load_last_scan<S>(store: &S) -> Result<Option<ScanSession>, ScanError>
where
    S: KeyValueStore + ?Sized,
{
    store
        .get(PRIMARY_KEY)
        .await?
        .map(|raw| serde_json::from_str(&raw).map_err(|e| ScanError::storage(PRIMARY_KEY, e)))
        .transpose()
}

/// Reads the legacy components list.
///
/// # Errors
///
/// Returns [`ScanError::Storage`] if the store fails or the stored value is
/// not a component list.
pub async fn load_legacy_components<S>(store: &S) -> Result<Option<Vec<ComponentRecord>>, ScanError>
where
    S: KeyValueStore + ?Sized,
{
    store
        .get(LEGACY_KEY)
        .await?
        .map(|raw| serde_json::from_str(&raw).map_err(|e| ScanError::storage(LEGACY_KEY, e)))
        .transpose()
}

/// Best component id for a UI role in the last persisted session.
///
/// # Errors
///
/// Propagates [`load_last_scan`] failures.
pub async fn component_id_for_type<S>(
    store: &S,
    suggested_type: &str,
) -> Result<Option<String>, ScanError>
where
    S: KeyValueStore + ?Sized,
{
    Ok(load_last_scan(store)
        .await?
        .and_then(|session| session.component_id_for_type(suggested_type).map(str::to_owned)))
}
