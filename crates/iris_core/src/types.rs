use serde::{Deserialize, Serialize};
use std::fmt;

/// One question plus the raw image payload extracted from a `query` event.
/// Consumed immediately, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub question: String,
    pub image: String,
}

/// A decoded, color-normalized image. Pixels are tightly packed RGB8,
/// row-major, exactly `width * height * 3` bytes. No alpha channel ever
/// survives decoding.
#[derive(Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixels", &format!("<{} bytes>", self.pixels.len()))
            .finish()
    }
}

/// The answer produced for one query. Scoped to that query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceResult {
    pub answer: String,
}
