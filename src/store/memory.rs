//! In-process record store
//!
//! Backs the integration tests and local runs with `STORE_BACKEND=memory`.
//! Records are kept in insertion order per collection.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};

use super::{Collection, Record, RecordStore, StoreError, StoreResult, TimeWindow};

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held in `collection`
    pub fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .get(&collection)
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: Collection) -> bool {
        self.len(collection) == 0
    }
}

/// Uniqueness key beyond the id; operators are unique per address
fn unique_key(record: &Record) -> Option<&str> {
    match record {
        Record::Operator(op) => Some(&op.address),
        _ => None,
    }
}

fn check_duplicates(
    existing: &HashMap<Collection, Vec<Record>>,
    incoming: &[Record],
) -> StoreResult<()> {
    let mut seen_ids: HashSet<(Collection, &str)> = HashSet::new();
    let mut seen_keys: HashSet<(Collection, &str)> = HashSet::new();

    for record in incoming {
        let collection = record.collection();
        let stored = existing.get(&collection).map(Vec::as_slice).unwrap_or(&[]);

        let id_taken = stored.iter().any(|r| r.id() == record.id());
        if id_taken || !seen_ids.insert((collection, record.id())) {
            return Err(StoreError::Duplicate {
                collection,
                key: record.id().to_string(),
            });
        }

        if let Some(key) = unique_key(record) {
            let key_taken = stored.iter().any(|r| unique_key(r) == Some(key));
            if key_taken || !seen_keys.insert((collection, key)) {
                return Err(StoreError::Duplicate {
                    collection,
                    key: key.to_string(),
                });
            }
        }
    }

    Ok(())
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert_all(&self, records: Vec<Record>) -> StoreResult<()> {
        let mut collections = self.collections.write();

        // Validate the whole batch before touching anything
        check_duplicates(&collections, &records)?;

        for record in records {
            collections
                .entry(record.collection())
                .or_default()
                .push(record);
        }

        Ok(())
    }

    async fn list_all(&self, collection: Collection) -> StoreResult<Vec<Record>> {
        Ok(self
            .collections
            .read()
            .get(&collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn find_by_id(&self, collection: Collection, id: &str) -> StoreResult<Option<Record>> {
        Ok(self
            .collections
            .read()
            .get(&collection)
            .and_then(|records| records.iter().find(|r| r.id() == id).cloned()))
    }

    async fn find_window(
        &self,
        collection: Collection,
        window: TimeWindow,
    ) -> StoreResult<Vec<Record>> {
        Ok(self
            .collections
            .read()
            .get(&collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| window.contains(r.timestamp()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_by_parent(
        &self,
        collection: Collection,
        parent_id: &str,
    ) -> StoreResult<Vec<Record>> {
        Ok(self
            .collections
            .read()
            .get(&collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| r.parent_id() == Some(parent_id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
