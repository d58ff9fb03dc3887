//! Application layer - Use cases and orchestration
//!
//! Contains the image and speech pipelines. Orchestrates domain objects,
//! the vision primitives and the speech engines.

pub mod error;
pub mod services;
pub mod storage;

pub use error::ApplicationError;
pub use services::*;
pub use storage::StorageLayout;
