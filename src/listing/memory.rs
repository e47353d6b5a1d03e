//! In-memory listing store.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::identifier::IntId;
use crate::listing::model::RoutingAttributes;
use crate::listing::store::{ListingStore, StoreError};

/// A concurrent map of listings keyed by primary key.
///
/// Uniqueness of `int_id` is deliberately not enforced, so tests can
/// reproduce integrity anomalies.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<Uuid, RoutingAttributes>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: impl IntoIterator<Item = RoutingAttributes>) -> Self {
        let store = Self::new();
        for row in rows {
            store.upsert(row);
        }
        store
    }

    /// Load a JSON array of rows.
    pub fn load_from_file(path: &Path) -> std::io::Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let rows: Vec<RoutingAttributes> = serde_json::from_reader(reader)?;
        let store = Self::from_rows(rows);
        tracing::info!(path = %path.display(), listings = store.len(), "Loaded listings into memory store");
        Ok(store)
    }

    /// Insert or replace a listing.
    pub fn upsert(&self, row: RoutingAttributes) {
        self.inner.insert(row.id, row);
    }

    pub fn remove(&self, id: Uuid) -> Option<RoutingAttributes> {
        self.inner.remove(&id).map(|(_, row)| row)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl ListingStore for MemoryStore {
    async fn select_by_id(&self, id: Uuid) -> Result<Vec<RoutingAttributes>, StoreError> {
        Ok(self.inner.get(&id).map(|row| vec![row.value().clone()]).unwrap_or_default())
    }

    async fn select_by_int_id(&self, int_id: IntId) -> Result<Vec<RoutingAttributes>, StoreError> {
        let mut rows: Vec<RoutingAttributes> = self
            .inner
            .iter()
            .filter(|entry| entry.int_id == Some(int_id))
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by_key(|row| row.id);
        Ok(rows)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn row(id: &str, int_id: u64, district: &str) -> RoutingAttributes {
        RoutingAttributes {
            id: Uuid::parse_str(id).unwrap(),
            int_id: IntId::new(int_id),
            district: Some(district.to_string()),
            location: None,
        }
    }

    #[tokio::test]
    async fn test_select_by_both_keys() {
        let listing = row("0b9e6f3a-1c2d-4e5f-8a9b-0c1d2e3f4a5b", 7, "Гурьевский");
        let store = MemoryStore::from_rows([listing.clone()]);

        assert_eq!(store.select_by_id(listing.id).await.unwrap(), vec![listing.clone()]);
        assert_eq!(store.select_by_int_id(IntId::new(7).unwrap()).await.unwrap(), vec![listing]);
        assert!(store.select_by_int_id(IntId::new(8).unwrap()).await.unwrap().is_empty());
        assert!(store.select_by_id(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_replaces_and_remove_deletes() {
        let store = MemoryStore::new();
        let mut listing = row("0b9e6f3a-1c2d-4e5f-8a9b-0c1d2e3f4a5b", 7, "Гурьевский");
        store.upsert(listing.clone());
        listing.district = Some("Зеленоградский".into());
        store.upsert(listing.clone());

        assert_eq!(store.len(), 1);
        let found = store.select_by_id(listing.id).await.unwrap();
        assert_eq!(found[0].district.as_deref(), Some("Зеленоградский"));

        assert!(store.remove(listing.id).is_some());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_int_ids_are_returned_in_stable_order() {
        let a = row("00000000-0000-4000-8000-000000000001", 3, "A");
        let b = row("00000000-0000-4000-8000-000000000002", 3, "B");
        let store = MemoryStore::from_rows([b.clone(), a.clone()]);

        let rows = store.select_by_int_id(IntId::new(3).unwrap()).await.unwrap();
        assert_eq!(rows, vec![a, b]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"0b9e6f3a-1c2d-4e5f-8a9b-0c1d2e3f4a5b","int_id":1,"district":"Гурьевский","location":"Кумачёво"}}]"#
        )
        .unwrap();

        let store = MemoryStore::load_from_file(file.path()).unwrap();
        assert_eq!(store.len(), 1);
    }
}
