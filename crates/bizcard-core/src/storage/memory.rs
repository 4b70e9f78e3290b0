//! In-process card store.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use super::{CardStore, Result};
use crate::error::StorageError;
use crate::models::card::{CardId, CardRecord, StoredCard};

#[derive(Default)]
struct Inner {
    next_id: i64,
    cards: BTreeMap<CardId, StoredCard>,
}

/// Card store kept in memory; ids are never reused.
#[derive(Default)]
pub struct MemoryCardStore {
    inner: Mutex<Inner>,
}

impl MemoryCardStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned map is still structurally valid.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CardStore for MemoryCardStore {
    fn insert(&self, record: &CardRecord, image: &[u8]) -> Result<CardId> {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = CardId(inner.next_id);
        inner.cards.insert(
            id,
            StoredCard {
                id,
                record: record.clone(),
                image: image.to_vec(),
                captured_at: Utc::now(),
            },
        );
        Ok(id)
    }

    fn list(&self) -> Result<Vec<StoredCard>> {
        Ok(self.lock().cards.values().cloned().collect())
    }

    fn get(&self, id: CardId) -> Result<Option<StoredCard>> {
        Ok(self.lock().cards.get(&id).cloned())
    }

    fn update(&self, id: CardId, record: &CardRecord) -> Result<()> {
        let mut inner = self.lock();
        let card = inner.cards.get_mut(&id).ok_or(StorageError::NotFound(id))?;
        card.record = record.clone();
        Ok(())
    }

    fn delete(&self, id: CardId) -> Result<()> {
        self.lock()
            .cards
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_not_reused_after_delete() {
        let store = MemoryCardStore::new();
        let first = store.insert(&CardRecord::default(), b"a").unwrap();
        store.delete(first).unwrap();
        let second = store.insert(&CardRecord::default(), b"b").unwrap();
        assert_ne!(first, second);
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_update_unknown() {
        let store = MemoryCardStore::new();
        assert!(matches!(
            store.update(CardId(1), &CardRecord::default()),
            Err(StorageError::NotFound(CardId(1)))
        ));
    }
}
