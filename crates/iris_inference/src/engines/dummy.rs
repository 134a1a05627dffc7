use std::fmt;

use iris_core::{DecodedImage, Result};

use super::InferenceEngine;

/// Offline engine used by tests and `--engine dummy`. Answers
/// deterministically from the image dimensions and the question.
#[derive(Default)]
pub struct DummyEngine;

impl DummyEngine {
    pub fn new() -> Self {
        Self
    }
}

impl fmt::Debug for DummyEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyEngine").finish()
    }
}

#[async_trait::async_trait]
impl InferenceEngine for DummyEngine {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn query(&self, image: &DecodedImage, question: &str) -> Result<String> {
        Ok(format!(
            "I am looking at a {}x{} image. You asked: \"{}\"",
            image.width, image.height, question
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dummy_engine_always_answers() {
        let engine = DummyEngine::new();
        let image = DecodedImage {
            width: 8,
            height: 6,
            pixels: vec![0; 8 * 6 * 3],
        };

        let answer = engine.query(&image, "What is this?").await.unwrap();
        assert!(!answer.is_empty());
        assert!(answer.contains("8x6"));
        assert!(answer.contains("What is this?"));
    }
}
