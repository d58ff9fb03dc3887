//! Image text service - text removal and text extraction pipelines
//!
//! Both pipelines decode the image, obtain a detector for the requested
//! languages and run detection. Removal then masks the detected regions,
//! inpaints them and writes the result next to the other results.
//!
//! Decoding, detection and inpainting block, so the public methods run the
//! pipeline on the blocking thread pool.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use ai_vision::{DetectorCache, coverage_mask, inpaint_telea};
use domain::{LanguageSet, TextExtraction};
use image::{DynamicImage, ImageFormat};
use tracing::{debug, info, instrument};

use crate::error::ApplicationError;

/// Suffix appended to the input stem of a cleaned image
const CLEANED_SUFFIX: &str = "_cleaned";

/// Service running the image pipelines
pub struct ImageTextService {
    detectors: Arc<DetectorCache>,
    results_dir: PathBuf,
}

impl fmt::Debug for ImageTextService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageTextService")
            .field("results_dir", &self.results_dir)
            .finish_non_exhaustive()
    }
}

impl ImageTextService {
    /// Create a new image text service
    pub fn new(detectors: Arc<DetectorCache>, results_dir: impl Into<PathBuf>) -> Self {
        Self {
            detectors,
            results_dir: results_dir.into(),
        }
    }

    /// The shared detector cache
    pub fn detectors(&self) -> &Arc<DetectorCache> {
        &self.detectors
    }

    /// Remove detected text from the image at `input`
    ///
    /// Returns the path of the cleaned image in the results directory.
    #[instrument(skip(self), fields(input = %input.display(), languages = %languages))]
    pub async fn remove_text(
        &self,
        input: &Path,
        languages: &LanguageSet,
        inpaint_radius: u32,
    ) -> Result<PathBuf, ApplicationError> {
        let detectors = Arc::clone(&self.detectors);
        let results_dir = self.results_dir.clone();
        let input = input.to_path_buf();
        let languages = languages.clone();

        run_blocking(move || {
            remove_text_blocking(&detectors, &results_dir, &input, &languages, inpaint_radius)
        })
        .await
    }

    /// Extract text from the image at `input`
    #[instrument(skip(self), fields(input = %input.display(), languages = %languages))]
    pub async fn extract_text(
        &self,
        input: &Path,
        languages: &LanguageSet,
    ) -> Result<TextExtraction, ApplicationError> {
        let detectors = Arc::clone(&self.detectors);
        let input = input.to_path_buf();
        let languages = languages.clone();

        run_blocking(move || extract_text_blocking(&detectors, &input, &languages)).await
    }
}

async fn run_blocking<T, F>(work: F) -> Result<T, ApplicationError>
where
    F: FnOnce() -> Result<T, ApplicationError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApplicationError::Internal(format!("Pipeline task failed: {e}")))?
}

fn remove_text_blocking(
    detectors: &DetectorCache,
    results_dir: &Path,
    input: &Path,
    languages: &LanguageSet,
    inpaint_radius: u32,
) -> Result<PathBuf, ApplicationError> {
    let image = load_image(input)?;
    let detector = detectors.get(languages)?;
    let detections = detector.detect(&image)?;

    let output = cleaned_output_path(results_dir, input);
    if detections.is_empty() {
        debug!("No text detected, writing unmodified copy");
        if same_extension(input, &output) {
            copy_file(input, &output)?;
        } else {
            save_image(&image, &output)?;
        }
    } else {
        let mask = coverage_mask(image.width(), image.height(), &detections);
        let cleaned = inpaint_telea(&image, &mask, inpaint_radius)?;
        save_image(&cleaned, &output)?;
    }

    info!(
        regions = detections.len(),
        output = %output.display(),
        "Text removal complete"
    );
    Ok(output)
}

fn extract_text_blocking(
    detectors: &DetectorCache,
    input: &Path,
    languages: &LanguageSet,
) -> Result<TextExtraction, ApplicationError> {
    let image = load_image(input)?;
    let detector = detectors.get(languages)?;
    let detections = detector.detect(&image)?;

    info!(regions = detections.len(), "Text extraction complete");
    Ok(TextExtraction::from_detections(detections))
}

fn load_image(path: &Path) -> Result<DynamicImage, ApplicationError> {
    image::ImageReader::open(path)
        .and_then(image::ImageReader::with_guessed_format)
        .map_err(|_| load_error(path))?
        .decode()
        .map_err(|_| load_error(path))
}

fn load_error(path: &Path) -> ApplicationError {
    ApplicationError::Load(format!("Could not read image from {}", path.display()))
}

fn same_extension(input: &Path, output: &Path) -> bool {
    match (input.extension(), output.extension()) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

fn copy_file(from: &Path, to: &Path) -> Result<(), ApplicationError> {
    std::fs::copy(from, to).map(|_| ()).map_err(|e| {
        ApplicationError::Storage(format!("Failed to write {}: {e}", to.display()))
    })
}

/// Output path for the cleaned version of `input`
///
/// `<stem>_cleaned<ext>` in `results_dir`; inputs whose extension has no
/// encoder get a `.png` extension.
pub fn cleaned_output_path(results_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "image".to_string());

    let extension = input
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .filter(|e| ImageFormat::from_extension(e).is_some_and(|f| f.writing_enabled()))
        .unwrap_or_else(|| "png".to_string());

    results_dir.join(format!("{stem}{CLEANED_SUFFIX}.{extension}"))
}

fn save_image(image: &DynamicImage, path: &Path) -> Result<(), ApplicationError> {
    let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);

    let result = if format == ImageFormat::Jpeg {
        // JPEG has no alpha channel
        DynamicImage::ImageRgb8(image.to_rgb8()).save_with_format(path, format)
    } else {
        image.save_with_format(path, format)
    };

    result.map_err(|e| {
        ApplicationError::Storage(format!("Failed to write {}: {e}", path.display()))
    })
}
