//! OCR, extraction and storage for one card image.

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::extract::{CardExtractor, CardParser, ExtractionResult};
use crate::models::card::CardId;
use crate::ocr::TextReader;
use crate::storage::CardStore;

/// A card that was extracted and stored.
#[derive(Debug, Clone, Serialize)]
pub struct ScannedCard {
    pub id: CardId,
    pub result: ExtractionResult,
}

/// Runs the card pipeline between an OCR reader and a card store.
///
/// Both collaborators are owned by the caller; the scanner holds borrows
/// only, and each call gets its own buffer and record.
pub struct CardScanner<'a, R: TextReader, S: CardStore> {
    reader: &'a R,
    store: &'a S,
    parser: CardParser,
}

impl<'a, R: TextReader, S: CardStore> CardScanner<'a, R, S> {
    pub fn new(reader: &'a R, store: &'a S) -> Self {
        Self {
            reader,
            store,
            parser: CardParser::new(),
        }
    }

    /// Use a configured parser.
    pub fn with_parser(mut self, parser: CardParser) -> Self {
        self.parser = parser;
        self
    }

    /// OCR and extract without storing.
    pub fn read(&self, image: &[u8]) -> Result<ExtractionResult> {
        let ocr_result = self.reader.read(image)?;
        Ok(self.parser.extract(&ocr_result))
    }

    /// OCR, extract, then store the record with the original image.
    pub fn scan_and_store(&self, image: &[u8]) -> Result<ScannedCard> {
        let result = self.read(image)?;
        let id = self.store.insert(&result.record, image)?;
        info!("Scanned card stored as {}", id);
        Ok(ScannedCard { id, result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BizcardError, OcrError};
    use crate::models::card::CardRecord;
    use crate::ocr::{OcrResult, StaticReader};
    use crate::storage::MemoryCardStore;
    use pretty_assertions::assert_eq;

    struct FailingReader;

    impl TextReader for FailingReader {
        fn read(&self, _image: &[u8]) -> std::result::Result<OcrResult, OcrError> {
            Err(OcrError::InvalidImage("not an image".to_string()))
        }
    }

    #[test]
    fn test_scan_and_store() {
        let reader = StaticReader::new(["John Smith", "Manager", "Acme & Co", "+91-987-6543"]);
        let store = MemoryCardStore::new();
        let scanner = CardScanner::new(&reader, &store);

        let scanned = scanner.scan_and_store(b"jpeg").unwrap();
        assert_eq!(scanned.result.record.name, "John Smith");
        assert_eq!(scanned.result.record.phone, "+91-987-6543");

        let stored = store.get(scanned.id).unwrap().unwrap();
        assert_eq!(stored.record, scanned.result.record);
        assert_eq!(stored.image, b"jpeg".to_vec());
    }

    #[test]
    fn test_read_does_not_store() {
        let reader = StaticReader::new(["Selva"]);
        let store = MemoryCardStore::new();
        let result = CardScanner::new(&reader, &store).read(b"").unwrap();
        assert_eq!(result.record.name, "Selva");
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_empty_ocr_still_stores_empty_card() {
        let reader = StaticReader::default();
        let store = MemoryCardStore::new();
        let scanned = CardScanner::new(&reader, &store).scan_and_store(b"img").unwrap();
        assert_eq!(scanned.result.record, CardRecord::default());
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_ocr_failure_surfaces() {
        let store = MemoryCardStore::new();
        let err = CardScanner::new(&FailingReader, &store)
            .scan_and_store(b"garbage")
            .unwrap_err();
        assert!(matches!(err, BizcardError::Ocr(OcrError::InvalidImage(_))));
        assert!(store.list().unwrap().is_empty());
    }
}
