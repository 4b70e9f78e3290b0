//! Card storage collaborator.

mod memory;
mod sqlite;

pub use memory::MemoryCardStore;
pub use sqlite::SqliteCardStore;

use crate::error::StorageError;
use crate::models::card::{CardId, CardRecord, StoredCard};

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A record store for extracted cards and their source images.
///
/// Identifiers are assigned by the store and stay stable for the lifetime
/// of a card. Updating or deleting an unknown id is an error.
pub trait CardStore {
    /// Store a new card with its original image bytes.
    fn insert(&self, record: &CardRecord, image: &[u8]) -> Result<CardId>;

    /// All stored cards, oldest first.
    fn list(&self) -> Result<Vec<StoredCard>>;

    /// One stored card.
    fn get(&self, id: CardId) -> Result<Option<StoredCard>>;

    /// Replace the fields of a stored card. The image is kept.
    fn update(&self, id: CardId, record: &CardRecord) -> Result<()>;

    /// Remove a stored card.
    fn delete(&self, id: CardId) -> Result<()>;
}
