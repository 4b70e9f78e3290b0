//! OCR collaborator: image bytes in, recognized text tokens out.

#[cfg(feature = "native")]
mod engine;

#[cfg(feature = "native")]
pub use engine::{create_engine_from_dir, PureOcrEngine};

use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// Something that turns an image into text tokens.
///
/// Tokens come back in the engine's own scan order, which is not
/// necessarily reading order. Extraction only relies on that order.
pub trait TextReader {
    /// Recognize text regions in encoded image bytes.
    fn read(&self, image: &[u8]) -> Result<OcrResult, OcrError>;

    /// Recognize and keep only the token texts.
    fn read_tokens(&self, image: &[u8]) -> Result<Vec<String>, OcrError> {
        Ok(self.read(image)?.tokens())
    }
}

/// A recognized text region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    /// Quadrilateral corners (x1, y1, x2, y2, x3, y3, x4, y4).
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub confidence: f32,
}

impl TextBox {
    /// Box with text only, no geometry.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            bbox: [0.0; 8],
            text: text.into(),
            confidence: 1.0,
        }
    }

    /// Get the axis-aligned bounding rectangle.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Result of OCR processing on an image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrResult {
    /// Recognized text boxes in scan order.
    pub boxes: Vec<TextBox>,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// Image dimensions (width, height).
    pub image_size: (u32, u32),
}

impl OcrResult {
    /// Create an empty result.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            image_size: (width, height),
            ..Self::default()
        }
    }

    /// Build a result from bare token texts.
    pub fn from_tokens<S: Into<String>>(tokens: impl IntoIterator<Item = S>) -> Self {
        Self {
            boxes: tokens.into_iter().map(|t| TextBox::from_text(t)).collect(),
            ..Self::default()
        }
    }

    /// Token texts in scan order.
    pub fn tokens(&self) -> Vec<String> {
        self.boxes.iter().map(|b| b.text.clone()).collect()
    }
}

/// Reader that returns a fixed token list for any image.
///
/// Used for token files fed to the CLI and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticReader {
    tokens: Vec<String>,
}

impl StaticReader {
    pub fn new<S: Into<String>>(tokens: impl IntoIterator<Item = S>) -> Self {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a token file: one token per line, blank lines skipped.
    pub fn from_lines(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(|l| l.trim_end_matches('\r'))
                .filter(|l| !l.trim().is_empty()),
        )
    }
}

impl TextReader for StaticReader {
    fn read(&self, _image: &[u8]) -> Result<OcrResult, OcrError> {
        Ok(OcrResult::from_tokens(self.tokens.iter().cloned()))
    }
}
