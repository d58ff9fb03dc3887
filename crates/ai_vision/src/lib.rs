//! AI Vision - text detection and text removal primitives
//!
//! Provides the pieces the image pipelines are assembled from:
//! - `TextDetector` / `DetectorFactory` - detect text instances in an image
//! - `DetectorCache` - shares detector handles per language set
//! - `coverage_mask` - rasterize detected regions into a single-channel mask
//! - `inpaint_telea` - OpenCV Telea fill of masked regions
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the traits (ports)
//! - `providers` module contains concrete implementations (adapters)
//!
//! # Supported Providers
//!
//! - Tesseract CLI (TSV output)
//!
//! # Example
//!
//! ```ignore
//! use ai_vision::{DetectorCache, TesseractDetectorFactory, coverage_mask, inpaint_telea};
//!
//! let cache = DetectorCache::new(Arc::new(TesseractDetectorFactory::new(config)), 1);
//! let detector = cache.get(&languages)?;
//! let detections = detector.detect(&image)?;
//! let mask = coverage_mask(image.width(), image.height(), &detections);
//! let cleaned = inpaint_telea(&image, &mask, 3)?;
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod inpaint;
pub mod mask;
pub mod ports;
pub mod providers;

pub use cache::DetectorCache;
pub use config::OcrConfig;
pub use error::VisionError;
pub use inpaint::inpaint_telea;
pub use mask::coverage_mask;
pub use ports::{DetectorFactory, TextDetector};
pub use providers::tesseract::{TesseractDetector, TesseractDetectorFactory};
