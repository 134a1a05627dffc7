use std::sync::Arc;

use iris_inference::InferenceGate;

/// Process-wide shared state. The gate is the only shared mutable resource
/// in the system; everything else is owned by a single session.
pub struct AppState {
    pub gate: Arc<InferenceGate>,
}
