use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use iris_core::{DecodedImage, InferenceResult, Result};

use crate::engines::InferenceEngine;

/// Mutual-exclusion boundary around the shared inference engine. The engine
/// holds exclusive device context and cannot service two requests at once,
/// so every call funnels through one tokio mutex. Waiters are queued in
/// arrival order; no timeout is imposed here and failures are never retried.
pub struct InferenceGate {
    engine: Arc<dyn InferenceEngine>,
    slot: Mutex<()>,
}

impl InferenceGate {
    pub fn new(engine: Arc<dyn InferenceEngine>) -> Self {
        Self {
            engine,
            slot: Mutex::new(()),
        }
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// Runs one inference call. The caller suspends until the current holder
    /// releases the engine; a disconnected caller still completes the call,
    /// the result is simply discarded upstream.
    pub async fn ask(&self, image: &DecodedImage, question: &str) -> Result<InferenceResult> {
        let _slot = self.slot.lock().await;
        debug!("gate acquired for engine {}", self.engine.name());
        let outcome = self.engine.query(image, question).await;
        debug!("gate released");
        let answer = outcome?;
        Ok(InferenceResult { answer })
    }
}
