//! Text detector implementations

pub mod tesseract;
