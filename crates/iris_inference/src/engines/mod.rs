use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use iris_core::{DecodedImage, Error, Result};
use url::Url;

pub mod dummy;
pub mod moondream;

pub use dummy::DummyEngine;
pub use moondream::MoondreamEngine;

/// External capability mapping (image, question) to a natural-language
/// answer. Assumed non-reentrant: implementations are never called
/// concurrently, the gate enforces single-caller access.
#[async_trait]
pub trait InferenceEngine: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    async fn query(&self, image: &DecodedImage, question: &str) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    Dummy,
    Moondream,
}

impl FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "dummy" => Ok(EngineKind::Dummy),
            "moondream" => Ok(EngineKind::Moondream),
            other => Err(format!("unknown engine kind: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub kind: EngineKind,
    pub endpoint: String,
    pub model: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            kind: EngineKind::Moondream,
            endpoint: "http://127.0.0.1:11434".to_string(),
            model: "moondream".to_string(),
        }
    }
}

pub fn create_engine(config: &EngineConfig) -> Result<Arc<dyn InferenceEngine>> {
    match config.kind {
        EngineKind::Dummy => Ok(Arc::new(DummyEngine::new())),
        EngineKind::Moondream => {
            let endpoint = Url::parse(&config.endpoint)
                .map_err(|e| Error::InvalidUrl(format!("{}: {}", config.endpoint, e)))?;
            Ok(Arc::new(MoondreamEngine::new(endpoint, config.model.clone())))
        }
    }
}
