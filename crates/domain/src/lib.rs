//! Domain layer for TextVox
//!
//! Contains the value objects and entities shared by the vision, speech and
//! HTTP layers. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
