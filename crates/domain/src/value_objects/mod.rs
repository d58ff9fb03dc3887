//! Value objects - immutable types identified by their value

mod confidence;
mod geometry;
mod language_set;

pub use confidence::Confidence;
pub use geometry::{BoundingBox, Point};
pub use language_set::LanguageSet;
