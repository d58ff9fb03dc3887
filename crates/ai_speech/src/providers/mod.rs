//! Speech provider implementations

pub mod espeak;
pub mod google_translate;
