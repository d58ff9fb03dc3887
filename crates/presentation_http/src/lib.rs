//! TextVox HTTP presentation layer
//!
//! Binds multipart and url-encoded forms to the image and speech pipelines
//! and streams the produced files back.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod tasks;

pub use error::ApiError;
pub use middleware::{REQUEST_ID_HEADER, RequestId};
pub use routes::{create_router, with_middleware};
pub use state::AppState;
pub use tasks::RetentionSweeper;
