pub mod engines;
pub mod gate;

pub use engines::{create_engine, EngineConfig, EngineKind, InferenceEngine};
pub use gate::InferenceGate;

pub mod prelude {
    pub use crate::engines::{create_engine, EngineConfig, EngineKind, InferenceEngine};
    pub use crate::gate::InferenceGate;
    pub use iris_core::{DecodedImage, Error, InferenceResult, Result};
}
