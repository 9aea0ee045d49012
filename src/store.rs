//! Dataset persistence with owner-or-admin access checks.
//!
//! The store performs no business logic: it assigns identity and creation
//! time on save, orders listings newest-first, and re-checks access on every
//! read so nothing is trusted from a prior call. Two implementations are
//! provided: [`MemoryStore`] for tests and embedding, and [`FileStore`],
//! which snapshots the collection to a single binary file.

use std::{
    collections::HashMap,
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    data::CellValue,
    dataset::{Caller, Dataset},
    error::{CoreError, Result},
};

const STORE_VERSION: u32 = 1;

/// Input to [`DatasetStore::save`]; everything derived (id, timestamp,
/// counters) is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewDataset {
    pub owner_id: String,
    pub filename: String,
    pub headers: Vec<String>,
    pub records: Vec<Vec<CellValue>>,
    pub category: String,
    pub quality: u8,
}

pub trait DatasetStore {
    /// Persists a new dataset, assigning its id and creation timestamp, and
    /// returns the stored entity.
    fn save(&mut self, new: NewDataset) -> Result<Dataset>;

    /// All datasets owned by `owner_id`, newest-first by creation time.
    fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Dataset>>;

    /// Fetches one dataset. Fails with [`CoreError::NotFound`] when the id
    /// is unknown and [`CoreError::AccessDenied`] when the caller is neither
    /// the owner nor an administrator; the two are never conflated.
    fn get_by_id(&self, id: Uuid, caller: &Caller) -> Result<Dataset>;

    /// Removes one dataset under the same access rules as [`get_by_id`].
    fn delete(&mut self, id: Uuid, caller: &Caller) -> Result<()>;
}

fn build_dataset(new: NewDataset) -> Dataset {
    Dataset {
        id: Uuid::new_v4(),
        owner_id: new.owner_id,
        filename: new.filename,
        headers: new.headers,
        records: new.records,
        created_at: Utc::now(),
        category: new.category,
        quality: new.quality,
        chart_count: 0,
        insight_count: 0,
    }
}

fn sorted_newest_first(mut datasets: Vec<Dataset>) -> Vec<Dataset> {
    datasets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    datasets
}

fn lookup<'a>(
    datasets: &'a HashMap<Uuid, Dataset>,
    id: Uuid,
    caller: &Caller,
) -> Result<&'a Dataset> {
    let dataset = datasets.get(&id).ok_or(CoreError::NotFound(id))?;
    if !caller.may_access(dataset) {
        return Err(CoreError::AccessDenied);
    }
    Ok(dataset)
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    datasets: HashMap<Uuid, Dataset>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DatasetStore for MemoryStore {
    fn save(&mut self, new: NewDataset) -> Result<Dataset> {
        let dataset = build_dataset(new);
        self.datasets.insert(dataset.id, dataset.clone());
        Ok(dataset)
    }

    fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Dataset>> {
        let owned = self
            .datasets
            .values()
            .filter(|d| d.owner_id == owner_id)
            .cloned()
            .collect();
        Ok(sorted_newest_first(owned))
    }

    fn get_by_id(&self, id: Uuid, caller: &Caller) -> Result<Dataset> {
        lookup(&self.datasets, id, caller).cloned()
    }

    fn delete(&mut self, id: Uuid, caller: &Caller) -> Result<()> {
        lookup(&self.datasets, id, caller)?;
        self.datasets.remove(&id);
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoreSnapshot {
    version: u32,
    datasets: Vec<Dataset>,
}

/// File-backed store: the whole collection is rewritten on every mutation.
/// Good enough for the single-writer CLI; a server deployment would swap in
/// a database-backed implementation of the same trait.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    datasets: HashMap<Uuid, Dataset>,
}

impl FileStore {
    /// Opens an existing snapshot or starts empty when the file is missing.
    pub fn open(path: &Path) -> Result<Self> {
        let datasets = if path.exists() {
            let bytes = std::fs::read(path)?;
            let snapshot: StoreSnapshot = bincode::deserialize(&bytes)
                .map_err(|err| CoreError::Storage(format!("reading {path:?}: {err}")))?;
            if snapshot.version != STORE_VERSION {
                return Err(CoreError::Storage(format!(
                    "unsupported store version {} (expected {STORE_VERSION})",
                    snapshot.version
                )));
            }
            snapshot.datasets.into_iter().map(|d| (d.id, d)).collect()
        } else {
            HashMap::new()
        };
        debug!("Opened store {:?} with {} dataset(s)", path, datasets.len());
        Ok(FileStore {
            path: path.to_path_buf(),
            datasets,
        })
    }

    fn persist(&self) -> Result<()> {
        let snapshot = StoreSnapshot {
            version: STORE_VERSION,
            datasets: self.datasets.values().cloned().collect(),
        };
        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, &snapshot)
            .map_err(|err| CoreError::Storage(format!("writing {:?}: {err}", self.path)))
    }
}

impl DatasetStore for FileStore {
    fn save(&mut self, new: NewDataset) -> Result<Dataset> {
        let dataset = build_dataset(new);
        self.datasets.insert(dataset.id, dataset.clone());
        self.persist()?;
        Ok(dataset)
    }

    fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Dataset>> {
        let owned = self
            .datasets
            .values()
            .filter(|d| d.owner_id == owner_id)
            .cloned()
            .collect();
        Ok(sorted_newest_first(owned))
    }

    fn get_by_id(&self, id: Uuid, caller: &Caller) -> Result<Dataset> {
        lookup(&self.datasets, id, caller).cloned()
    }

    fn delete(&mut self, id: Uuid, caller: &Caller) -> Result<()> {
        lookup(&self.datasets, id, caller)?;
        self.datasets.remove(&id);
        self.persist()
    }
}
