//! Pure Rust OCR engine wrapper using `pure-onnx-ocr`.

use std::path::Path;
use std::time::Instant;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::{ModelConfig, OcrConfig};

use super::{OcrResult, TextBox, TextReader};

/// Marker emitted for characters missing from the dictionary.
const UNKNOWN_MARKER: &str = "[UNK]";

/// OCR engine backed by `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).
pub struct PureOcrEngine {
    engine: pure_onnx_ocr::engine::OcrEngine,
    config: OcrConfig,
}

impl PureOcrEngine {
    /// Create an engine from model files in a directory.
    pub fn from_dir(model_dir: &Path, models: &ModelConfig, config: OcrConfig) -> Result<Self, OcrError> {
        let det_path = model_dir.join(&models.detection_model);
        let rec_path = model_dir.join(&models.recognition_model);
        let dict_path = model_dir.join(&models.dictionary);

        for path in [&det_path, &rec_path, &dict_path] {
            if !path.exists() {
                return Err(OcrError::ModelLoad(format!(
                    "model file not found: {}",
                    path.display()
                )));
            }
        }

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", model_dir.display());

        Ok(Self { engine, config })
    }

    /// Process a decoded image and return its text boxes in scan order.
    pub fn process(&self, image: &DynamicImage) -> Result<OcrResult, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();

        info!("Processing image: {}x{}", width, height);

        let image = self.fit(image);
        let results = self
            .engine
            .run_from_image(&image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        debug!("pure-onnx-ocr returned {} text regions", results.len());

        let boxes: Vec<TextBox> = results
            .iter()
            .filter(|r| r.confidence >= self.config.min_confidence)
            .filter_map(|r| {
                let text = if self.config.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace(UNKNOWN_MARKER, " ")
                };
                let text = text.trim().to_string();
                if text.is_empty() {
                    return None;
                }
                Some(TextBox {
                    bbox: polygon_to_bbox(&r.bounding_box),
                    text,
                    confidence: r.confidence,
                })
            })
            .collect();

        let processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "OCR complete: {} text boxes in {}ms",
            boxes.len(),
            processing_time_ms
        );

        Ok(OcrResult {
            boxes,
            processing_time_ms,
            image_size: (width, height),
        })
    }

    /// Shrink oversized images so the longer side fits `max_image_size`.
    fn fit(&self, image: &DynamicImage) -> DynamicImage {
        let max = self.config.max_image_size;
        let (width, height) = image.dimensions();
        if max == 0 || width.max(height) <= max {
            return image.clone();
        }
        debug!("Downscaling {}x{} to fit {}", width, height, max);
        image.resize(max, max, FilterType::Triangle)
    }
}

impl TextReader for PureOcrEngine {
    fn read(&self, image: &[u8]) -> Result<OcrResult, OcrError> {
        let image = image::load_from_memory(image)
            .map_err(|e| OcrError::InvalidImage(e.to_string()))?;
        self.process(&image)
    }
}

/// Create an OCR engine from a model directory.
pub fn create_engine_from_dir(
    model_dir: &Path,
    models: &ModelConfig,
    config: OcrConfig,
) -> Result<PureOcrEngine, OcrError> {
    PureOcrEngine::from_dir(model_dir, models, config)
}

/// Convert a `Polygon<f64>` to our `[f32; 8]` bbox format.
///
/// Extracts the first 4 exterior points (quadrilateral) as
/// `[x1, y1, x2, y2, x3, y3, x4, y4]`.
fn polygon_to_bbox(polygon: &pure_onnx_ocr::Polygon<f64>) -> [f32; 8] {
    let mut bbox = [0.0f32; 8];
    for (i, coord) in polygon.exterior().coords().take(4).enumerate() {
        bbox[i * 2] = coord.x as f32;
        bbox[i * 2 + 1] = coord.y as f32;
    }
    bbox
}
