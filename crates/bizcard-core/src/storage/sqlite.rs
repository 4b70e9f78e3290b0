//! SQLite-backed card store.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

use super::{CardStore, Result};
use crate::error::StorageError;
use crate::models::card::{CardId, CardRecord, StoredCard};

const SELECT_CARD: &str = "SELECT id, name, designation, company, phone, email, website, \
     address, city, state, postal_code, image, captured_at FROM card_data";

/// Card store in a single SQLite file.
///
/// A fresh connection is opened per call, so the store can be shared
/// between threads by reference.
pub struct SqliteCardStore {
    db_path: PathBuf,
}

impl SqliteCardStore {
    /// Open (and create if needed) the card database.
    pub fn open(db_path: &Path) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_path_buf(),
        };
        store.init_schema()?;
        info!("Opened card database at {}", db_path.display());
        Ok(store)
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path)?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        Ok(conn)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS card_data (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL DEFAULT '',
                designation TEXT NOT NULL DEFAULT '',
                company TEXT NOT NULL DEFAULT '',
                phone TEXT NOT NULL DEFAULT '',
                email TEXT NOT NULL DEFAULT '',
                website TEXT NOT NULL DEFAULT '',
                address TEXT NOT NULL DEFAULT '',
                city TEXT NOT NULL DEFAULT '',
                state TEXT NOT NULL DEFAULT '',
                postal_code TEXT NOT NULL DEFAULT '',
                image BLOB NOT NULL,
                captured_at TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }
}

impl CardStore for SqliteCardStore {
    fn insert(&self, record: &CardRecord, image: &[u8]) -> Result<CardId> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO card_data (name, designation, company, phone, email, website, \
             address, city, state, postal_code, image, captured_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                record.name,
                record.designation,
                record.company,
                record.phone,
                record.email,
                record.website,
                record.address,
                record.city,
                record.state,
                record.postal_code,
                image,
                Utc::now().to_rfc3339(),
            ],
        )?;

        let id = CardId(conn.last_insert_rowid());
        info!("Stored card {} ({} image bytes)", id, image.len());
        Ok(id)
    }

    fn list(&self) -> Result<Vec<StoredCard>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY id", SELECT_CARD))?;
        let rows = stmt
            .query_map([], row_to_card)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let cards = rows
            .into_iter()
            .map(RawCard::into_stored)
            .collect::<Result<Vec<_>>>()?;

        debug!("Listed {} cards", cards.len());
        Ok(cards)
    }

    fn get(&self, id: CardId) -> Result<Option<StoredCard>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("{} WHERE id = ?", SELECT_CARD))?;
        let raw = stmt.query_row(params![id.0], row_to_card).optional()?;
        raw.map(RawCard::into_stored).transpose()
    }

    fn update(&self, id: CardId, record: &CardRecord) -> Result<()> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE card_data SET name = ?1, designation = ?2, company = ?3, phone = ?4, \
             email = ?5, website = ?6, address = ?7, city = ?8, state = ?9, postal_code = ?10 \
             WHERE id = ?11",
            params![
                record.name,
                record.designation,
                record.company,
                record.phone,
                record.email,
                record.website,
                record.address,
                record.city,
                record.state,
                record.postal_code,
                id.0,
            ],
        )?;

        if changed == 0 {
            return Err(StorageError::NotFound(id));
        }
        info!("Updated card {}", id);
        Ok(())
    }

    fn delete(&self, id: CardId) -> Result<()> {
        let conn = self.connect()?;
        let changed = conn.execute("DELETE FROM card_data WHERE id = ?", params![id.0])?;

        if changed == 0 {
            return Err(StorageError::NotFound(id));
        }
        info!("Deleted card {}", id);
        Ok(())
    }
}

/// Row as read from SQLite, before timestamp parsing.
struct RawCard {
    id: i64,
    record: CardRecord,
    image: Vec<u8>,
    captured_at: String,
}

impl RawCard {
    fn into_stored(self) -> Result<StoredCard> {
        let captured_at = DateTime::parse_from_rfc3339(&self.captured_at)
            .map_err(|e| StorageError::Timestamp(format!("{}: {}", self.captured_at, e)))?
            .with_timezone(&Utc);

        Ok(StoredCard {
            id: CardId(self.id),
            record: self.record,
            image: self.image,
            captured_at,
        })
    }
}

fn row_to_card(row: &Row) -> rusqlite::Result<RawCard> {
    Ok(RawCard {
        id: row.get("id")?,
        record: CardRecord {
            name: row.get("name")?,
            designation: row.get("designation")?,
            company: row.get("company")?,
            phone: row.get("phone")?,
            email: row.get("email")?,
            website: row.get("website")?,
            address: row.get("address")?,
            city: row.get("city")?,
            state: row.get("state")?,
            postal_code: row.get("postal_code")?,
        },
        image: row.get("image")?,
        captured_at: row.get("captured_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn open_store(dir: &tempfile::TempDir) -> SqliteCardStore {
        SqliteCardStore::open(&dir.path().join("cards.db")).unwrap()
    }

    fn sample_record() -> CardRecord {
        CardRecord {
            name: "Selva".to_string(),
            designation: "DATA MANAGER".to_string(),
            phone: "+123-456-7890".to_string(),
            postal_code: "600113".to_string(),
            ..CardRecord::default()
        }
    }

    #[test]
    fn test_insert_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);

        let first = store.insert(&sample_record(), b"png-bytes").unwrap();
        let second = store.insert(&CardRecord::default(), b"").unwrap();
        assert_ne!(first, second);

        let cards = store.list().unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].id, first);
        assert_eq!(cards[0].record, sample_record());
        assert_eq!(cards[0].image, b"png-bytes".to_vec());
        assert_eq!(cards[1].record, CardRecord::default());
    }

    #[test]
    fn test_update_keeps_image() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let id = store.insert(&sample_record(), b"image").unwrap();

        let mut edited = sample_record();
        edited.city = "Chennai".to_string();
        store.update(id, &edited).unwrap();

        let card = store.get(id).unwrap().unwrap();
        assert_eq!(card.record.city, "Chennai");
        assert_eq!(card.image, b"image".to_vec());
    }

    #[test]
    fn test_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let id = store.insert(&sample_record(), b"image").unwrap();

        store.delete(id).unwrap();
        assert!(store.get(id).unwrap().is_none());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);

        assert!(matches!(
            store.update(CardId(99), &sample_record()),
            Err(StorageError::NotFound(CardId(99)))
        ));
        assert!(matches!(
            store.delete(CardId(99)),
            Err(StorageError::NotFound(CardId(99)))
        ));
        assert!(store.get(CardId(99)).unwrap().is_none());
    }

    #[test]
    fn test_reopen_keeps_cards() {
        let dir = tempfile::tempdir().unwrap();
        let id = open_store(&dir).insert(&sample_record(), b"image").unwrap();

        let store = open_store(&dir);
        assert_eq!(store.get(id).unwrap().unwrap().record, sample_record());
    }
}
