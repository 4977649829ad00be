use crate::{Error, Result};
use rocksdb::{IteratorMode, Options, WriteBatch, DB};
use serde::Deserialize;
use std::path::Path;
use std::path::PathBuf;

pub struct RegistryDatastore {
    db: DB,
    #[allow(dead_code)]
    path: PathBuf,
}

/// Writes staged for a single all-or-nothing commit.
///
/// A registration transition stages every record it touches into one batch
/// and hands it to [`RegistryDatastore::commit`]; either all staged writes
/// become visible or none do.
pub struct AtomicBatch {
    inner: WriteBatch,
}

impl AtomicBatch {
    pub fn new() -> Self {
        Self {
            inner: WriteBatch::default(),
        }
    }

    pub fn put(&mut self, key: &str, value: &[u8]) {
        self.inner.put(key, value);
    }

    pub fn delete(&mut self, key: &str) {
        self.inner.delete(key);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for AtomicBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryDatastore {
    pub fn new(path: &Path) -> Result<Self> {
        let db = DB::open_default(path)?;
        Ok(Self {
            db,
            path: path.to_path_buf(),
        })
    }

    pub fn create_in_directory(path: &Path) -> Result<Self> {
        let db = DB::open_default(path)?;
        Ok(Self {
            db,
            path: path.to_path_buf(),
        })
    }

    // "in-memory" database
    pub fn create_in_memory() -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.set_allow_mmap_reads(false);
        opts.set_compression_type(rocksdb::DBCompressionType::None);
        opts.set_use_direct_io_for_flush_and_compaction(true);
        opts.set_use_direct_reads(true);
        let temp_path = tempfile::tempdir().unwrap().into_path();
        let db = DB::open(&opts, &temp_path)?;
        Ok(Self { db, path: temp_path })
    }

    pub async fn clone_to_memory(&self) -> Result<RegistryDatastore> {
        let datastore = RegistryDatastore::create_in_memory()?;
        let iterator = self.iterator("".into());
        for result in iterator {
            let (key, value) = result?;
            datastore.db.put(&key, value)?;
        }
        Ok(datastore)
    }

    pub async fn get_data_by_key(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.db.get(key)? {
            Some(value) => Ok(Some(value)),
            None => Ok(None),
        }
    }

    pub async fn set_data_by_key(&self, key: &str, value: &[u8]) -> Result<()> {
        self.db.put(key, value)?;
        Ok(())
    }

    pub async fn get_string(&self, key: &str) -> Result<Option<String>> {
        match self.get_data_by_key(key).await? {
            Some(data) => Ok(Some(String::from_utf8(data)?)),
            None => Ok(None),
        }
    }

    pub async fn get_json<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>> {
        match self.get_string(key).await? {
            Some(data) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    pub async fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.db.put(key, value)?;
        Ok(())
    }

    pub async fn delete(&self, key: &str) -> Result<()> {
        self.db.delete(key)?;
        Ok(())
    }

    /// Apply a staged batch in one write. No partial application: if this
    /// returns an error, none of the staged writes are visible.
    pub async fn commit(&self, batch: AtomicBatch) -> Result<()> {
        self.db.write(batch.inner)?;
        Ok(())
    }

    pub fn iterator_starting(
        &self,
        prefix: &str,
    ) -> impl Iterator<Item = Result<(Box<[u8]>, Box<[u8]>)>> + '_ {
        self.db
            .iterator(IteratorMode::From(prefix.as_bytes(), rocksdb::Direction::Forward))
            .map(|result| result.map_err(|e| Error::Database(e.to_string())))
    }

    pub fn iterator(&self, prefix: &str) -> impl Iterator<Item = Result<(Box<[u8]>, Box<[u8]>)>> + '_ {
        let mut readopts = rocksdb::ReadOptions::default();
        readopts.set_iterate_lower_bound(format!("{}/", prefix).as_bytes());
        readopts.set_iterate_upper_bound(format!("{}0", prefix).as_bytes());
        let iter = self.db.iterator_opt(IteratorMode::Start, readopts);
        iter.map(|result| result.map_err(|e| Error::Database(e.to_string())))
    }
}
