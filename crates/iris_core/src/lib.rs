pub mod error;
pub mod types;
pub mod wire;

pub use error::Error;
pub use types::{DecodedImage, InferenceResult, QueryRequest};

pub type Result<T> = std::result::Result<T, Error>;
