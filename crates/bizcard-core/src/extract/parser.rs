//! Card parser running the ordered extraction passes.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::models::card::CardRecord;
use crate::models::config::ExtractionConfig;
use crate::ocr::OcrResult;

use super::buffer::WorkingBuffer;
use super::rules::{
    AddressSegmenter, EmailExtractor, NameClassifier, PatternPass, PhoneExtractor,
    PostalCodeExtractor, WebsiteExtractor,
};
use super::CardExtractor;

/// Pipeline states, visited strictly in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStage {
    Idle,
    Normalized,
    PhoneExtracted,
    EmailExtracted,
    WebsiteExtracted,
    PinExtracted,
    NamesClassified,
    AddressSegmented,
    Complete,
}

impl ExtractionStage {
    /// The state following this one; `Complete` is terminal.
    pub fn next(self) -> Option<Self> {
        use ExtractionStage::*;
        match self {
            Idle => Some(Normalized),
            Normalized => Some(PhoneExtracted),
            PhoneExtracted => Some(EmailExtracted),
            EmailExtracted => Some(WebsiteExtracted),
            WebsiteExtracted => Some(PinExtracted),
            PinExtracted => Some(NamesClassified),
            NamesClassified => Some(AddressSegmented),
            AddressSegmented => Some(Complete),
            Complete => None,
        }
    }
}

/// Non-fatal observations made during one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractionNotice {
    /// OCR returned no tokens; every field is empty.
    NoInputTokens,
    /// More name-shaped tokens than fields; the overflow went into company.
    AmbiguousClassification { candidates: usize },
}

/// Result of card extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Extracted card fields.
    pub record: CardRecord,
    /// OCR tokens the run started from.
    pub tokens: Vec<String>,
    /// Buffer tokens no pass claimed.
    pub remaining: Vec<String>,
    /// Diagnostics collected during the run.
    pub notices: Vec<ExtractionNotice>,
    /// States visited, `Idle` through `Complete`.
    pub stages: Vec<ExtractionStage>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Records state transitions for one run.
struct StageTrace {
    stages: Vec<ExtractionStage>,
}

impl StageTrace {
    fn new() -> Self {
        Self {
            stages: vec![ExtractionStage::Idle],
        }
    }

    fn current(&self) -> ExtractionStage {
        self.stages
            .last()
            .copied()
            .unwrap_or(ExtractionStage::Idle)
    }

    fn advance(&mut self, to: ExtractionStage) {
        debug_assert_eq!(self.current().next(), Some(to), "out of order stage");
        trace!("Extraction stage {:?} -> {:?}", self.current(), to);
        self.stages.push(to);
    }
}

/// Business card parser.
///
/// Each run builds its own buffer and record; the parser itself holds only
/// settings, so one instance can serve concurrent runs.
#[derive(Debug, Clone)]
pub struct CardParser {
    /// Whether to apply the OCR artifact replacements.
    normalize: bool,
    /// Whether overflowing name candidates are logged as warnings.
    warn_on_overflow: bool,
}

impl CardParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self {
            normalize: true,
            warn_on_overflow: false,
        }
    }

    /// Create a parser from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_normalization(config.normalize)
            .with_overflow_warning(config.warn_on_overflow)
    }

    /// Set text normalization.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Set overflow warnings.
    pub fn with_overflow_warning(mut self, warn: bool) -> Self {
        self.warn_on_overflow = warn;
        self
    }

    /// Parse a card from OCR tokens in scan order.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> ExtractionResult {
        let start = Instant::now();
        let mut stages = StageTrace::new();
        let mut notices = Vec::new();
        let mut record = CardRecord::default();

        info!("Parsing card from {} OCR tokens", tokens.len());

        if tokens.is_empty() {
            debug!("No OCR tokens, card will be empty");
            notices.push(ExtractionNotice::NoInputTokens);
        }

        let buffer = WorkingBuffer::from_tokens(tokens);
        let buffer = if self.normalize {
            buffer.normalized()
        } else {
            buffer
        };
        stages.advance(ExtractionStage::Normalized);

        // Phone before postal code: both are digit runs.
        let buffer = run_pass(&PhoneExtractor, buffer, &mut record);
        stages.advance(ExtractionStage::PhoneExtracted);

        let buffer = run_pass(&EmailExtractor, buffer, &mut record);
        stages.advance(ExtractionStage::EmailExtracted);

        let buffer = run_pass(&WebsiteExtractor, buffer, &mut record);
        stages.advance(ExtractionStage::WebsiteExtracted);

        let buffer = run_pass(&PostalCodeExtractor, buffer, &mut record);
        stages.advance(ExtractionStage::PinExtracted);

        let names = NameClassifier.classify(tokens);
        if names.is_ambiguous() {
            if self.warn_on_overflow {
                warn!(
                    "{} name-shaped tokens, folding overflow into company",
                    names.candidates
                );
            } else {
                debug!("{} name-shaped tokens, folding overflow into company", names.candidates);
            }
            notices.push(ExtractionNotice::AmbiguousClassification {
                candidates: names.candidates,
            });
        }
        let buffer = names.remove_from(buffer);
        record.name = names.name;
        record.designation = names.designation;
        record.company = names.company;
        stages.advance(ExtractionStage::NamesClassified);

        let remaining: Vec<String> = buffer.tokens().into_iter().map(String::from).collect();
        let address = AddressSegmenter.segment(&remaining);
        record.address = address.address;
        record.city = address.city;
        record.state = address.state;
        stages.advance(ExtractionStage::AddressSegmented);

        stages.advance(ExtractionStage::Complete);

        debug!(
            "Extracted {} of 10 card fields, {} tokens left over",
            record.populated(),
            remaining.len()
        );

        ExtractionResult {
            record,
            tokens: tokens.iter().map(|t| t.as_ref().to_string()).collect(),
            remaining,
            notices,
            stages: stages.stages,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl Default for CardParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CardExtractor for CardParser {
    fn extract(&self, ocr_result: &OcrResult) -> ExtractionResult {
        let tokens = ocr_result.tokens();
        let mut result = self.parse(tokens.as_slice());
        result.processing_time_ms += ocr_result.processing_time_ms;
        result
    }

    fn extract_tokens(&self, tokens: &[String]) -> ExtractionResult {
        self.parse(tokens)
    }
}

/// Run one pattern pass, store its value and return the rest of the buffer.
fn run_pass<P: PatternPass>(pass: &P, buffer: WorkingBuffer, record: &mut CardRecord) -> WorkingBuffer {
    let claim = pass.claim(buffer);
    debug!("{} pass claimed {} matches", pass.field(), claim.matches.len());
    record.set(pass.field(), claim.value());
    claim.remaining
}
