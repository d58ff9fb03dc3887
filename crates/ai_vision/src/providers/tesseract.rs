//! Tesseract CLI text detector
//!
//! Runs `tesseract <image> stdout -l <langs> --psm <mode> tsv` and groups the
//! word rows of the TSV output into line-level detections.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use domain::{BoundingBox, Confidence, LanguageSet, TextDetection};
use image::{DynamicImage, ImageFormat};
use tracing::{debug, instrument, warn};

use crate::{
    config::OcrConfig,
    error::VisionError,
    ports::{DetectorFactory, TextDetector},
};

/// Request language codes and the Tesseract traineddata they map to
///
/// Codes missing from this table are passed through unchanged, so native
/// Tesseract names (`eng`, `deu`) work as well.
const LANGUAGE_MAP: &[(&str, &str)] = &[
    ("en", "eng"),
    ("ar", "ara"),
    ("fa", "fas"),
    ("ur", "urd"),
    ("ch_sim", "chi_sim"),
    ("ch_tra", "chi_tra"),
    ("ja", "jpn"),
    ("ko", "kor"),
    ("th", "tha"),
    ("hi", "hin"),
    ("ru", "rus"),
    ("uk", "ukr"),
    ("de", "deu"),
    ("fr", "fra"),
    ("es", "spa"),
    ("pt", "por"),
    ("it", "ita"),
    ("nl", "nld"),
    ("pl", "pol"),
    ("tr", "tur"),
    ("vi", "vie"),
    ("id", "ind"),
    ("he", "heb"),
    ("el", "ell"),
    ("sv", "swe"),
    ("cs", "ces"),
];

/// TSV row level for individual words
const WORD_LEVEL: &str = "5";

/// Map a request language code to its Tesseract name
#[must_use]
pub fn tesseract_language(code: &str) -> &str {
    LANGUAGE_MAP
        .iter()
        .find(|(short, _)| *short == code)
        .map_or(code, |(_, long)| *long)
}

/// Builds [`TesseractDetector`]s after checking the languages are installed
#[derive(Debug, Clone)]
pub struct TesseractDetectorFactory {
    executable: PathBuf,
    page_segmentation_mode: u8,
}

impl TesseractDetectorFactory {
    /// Create a factory from the OCR configuration
    #[must_use]
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            executable: config.tesseract_path.clone(),
            page_segmentation_mode: config.page_segmentation_mode,
        }
    }

    /// Languages reported by `tesseract --list-langs`
    ///
    /// # Errors
    ///
    /// Returns `NotAvailable` if the executable cannot be run.
    pub fn installed_languages(&self) -> Result<Vec<String>, VisionError> {
        let output = Command::new(&self.executable)
            .arg("--list-langs")
            .output()
            .map_err(|e| spawn_error(&self.executable, &e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VisionError::NotAvailable(format!(
                "tesseract --list-langs failed: {}",
                stderr.trim()
            )));
        }

        // Older releases print the list on stderr
        let mut listing = String::from_utf8_lossy(&output.stdout).into_owned();
        if listing.trim().is_empty() {
            listing = String::from_utf8_lossy(&output.stderr).into_owned();
        }

        Ok(parse_language_list(&listing))
    }
}

impl DetectorFactory for TesseractDetectorFactory {
    #[instrument(skip(self, languages), fields(languages = %languages))]
    fn create(&self, languages: &LanguageSet) -> Result<Arc<dyn TextDetector>, VisionError> {
        let installed = self.installed_languages()?;
        let resolved: Vec<String> = languages
            .iter()
            .map(|code| tesseract_language(code).to_string())
            .collect();

        let missing: Vec<&str> = languages
            .iter()
            .zip(&resolved)
            .filter(|(_, name)| !installed.contains(name))
            .map(|(code, _)| code)
            .collect();

        if !missing.is_empty() {
            return Err(VisionError::UnsupportedLanguage {
                requested: missing.join(","),
                available: installed.join(", "),
            });
        }

        debug!(tesseract_languages = %resolved.join("+"), "Tesseract languages resolved");

        Ok(Arc::new(TesseractDetector {
            executable: self.executable.clone(),
            page_segmentation_mode: self.page_segmentation_mode,
            languages: languages.clone(),
            tesseract_languages: resolved.join("+"),
        }))
    }

    fn name(&self) -> &'static str {
        "tesseract"
    }
}

/// Text detector backed by the Tesseract CLI
#[derive(Debug, Clone)]
pub struct TesseractDetector {
    executable: PathBuf,
    page_segmentation_mode: u8,
    languages: LanguageSet,
    tesseract_languages: String,
}

impl TesseractDetector {
    fn run_tsv(&self, path: &Path) -> Result<String, VisionError> {
        let output = Command::new(&self.executable)
            .arg(path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.tesseract_languages)
            .arg("--psm")
            .arg(self.page_segmentation_mode.to_string())
            .arg("tsv")
            .output()
            .map_err(|e| spawn_error(&self.executable, &e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VisionError::DetectionFailed(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl TextDetector for TesseractDetector {
    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    fn detect(&self, image: &DynamicImage) -> Result<Vec<TextDetection>, VisionError> {
        let input = tempfile::Builder::new()
            .prefix("textvox-ocr-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| VisionError::DetectionFailed(format!("failed to create temp file: {e}")))?;

        image
            .save_with_format(input.path(), ImageFormat::Png)
            .map_err(|e| VisionError::DetectionFailed(format!("failed to stage image: {e}")))?;

        let tsv = self.run_tsv(input.path())?;
        let detections = parse_tsv(&tsv)?;

        debug!(count = detections.len(), "Tesseract detection complete");
        Ok(detections)
    }

    fn languages(&self) -> &LanguageSet {
        &self.languages
    }
}

fn spawn_error(executable: &Path, error: &std::io::Error) -> VisionError {
    if error.kind() == ErrorKind::NotFound {
        VisionError::NotAvailable(format!(
            "tesseract executable not found at '{}'",
            executable.display()
        ))
    } else {
        VisionError::DetectionFailed(format!("failed to run tesseract: {error}"))
    }
}

/// Parse `--list-langs` output, skipping the header line
fn parse_language_list(listing: &str) -> Vec<String> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("List of"))
        .map(ToString::to_string)
        .collect()
}

struct LineAccumulator {
    words: Vec<String>,
    bounding_box: BoundingBox,
    confidence_sum: f64,
}

/// Group TSV word rows into line detections
///
/// Words sharing (page, block, paragraph, line) form one detection. Lines
/// keep the order in which their first word appears, which is Tesseract's
/// reading order.
fn parse_tsv(tsv: &str) -> Result<Vec<TextDetection>, VisionError> {
    let mut rows = tsv.lines();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    if !header.starts_with("level") {
        return Err(VisionError::InvalidOutput(format!(
            "unexpected TSV header: {header}"
        )));
    }

    let mut order: Vec<(u32, u32, u32, u32)> = Vec::new();
    let mut lines: HashMap<(u32, u32, u32, u32), LineAccumulator> = HashMap::new();

    for row in rows {
        let cols: Vec<&str> = row.split('\t').collect();
        if cols.len() < 12 || cols[0] != WORD_LEVEL {
            continue;
        }

        let text = cols[11].trim();
        let confidence: f64 = cols[10].trim().parse().unwrap_or(-1.0);
        if text.is_empty() || confidence < 0.0 {
            continue;
        }

        let key = (
            parse_field(cols[1])?,
            parse_field(cols[2])?,
            parse_field(cols[3])?,
            parse_field(cols[4])?,
        );
        let word_box = BoundingBox::from_rect(
            parse_field(cols[6])? as i32,
            parse_field(cols[7])? as i32,
            parse_field(cols[8])? as i32,
            parse_field(cols[9])? as i32,
        );

        match lines.get_mut(&key) {
            Some(line) => {
                line.words.push(text.to_string());
                line.bounding_box = line.bounding_box.union(&word_box);
                line.confidence_sum += confidence;
            }
            None => {
                order.push(key);
                lines.insert(
                    key,
                    LineAccumulator {
                        words: vec![text.to_string()],
                        bounding_box: word_box,
                        confidence_sum: confidence,
                    },
                );
            }
        }
    }

    let detections = order
        .into_iter()
        .filter_map(|key| lines.remove(&key))
        .map(|line| {
            let mean = line.confidence_sum / line.words.len() as f64;
            TextDetection::new(
                line.bounding_box,
                line.words.join(" "),
                Confidence::from_percent(mean),
            )
        })
        .collect();

    Ok(detections)
}

fn parse_field(value: &str) -> Result<u32, VisionError> {
    value.trim().parse().map_err(|_| {
        warn!(value, "Non-numeric field in Tesseract TSV");
        VisionError::InvalidOutput(format!("expected a number, got '{value}'"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    fn tsv(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    #[test]
    fn maps_short_codes() {
        assert_eq!(tesseract_language("en"), "eng");
        assert_eq!(tesseract_language("ar"), "ara");
        assert_eq!(tesseract_language("ch_sim"), "chi_sim");
    }

    #[test]
    fn passes_through_unknown_codes() {
        assert_eq!(tesseract_language("eng"), "eng");
        assert_eq!(tesseract_language("frk"), "frk");
    }

    #[test]
    fn parses_language_listing() {
        let listing = "List of available languages in \"/usr/share/tessdata/\" (3):\nara\neng\nosd\n";
        assert_eq!(parse_language_list(listing), vec!["ara", "eng", "osd"]);
    }

    #[test]
    fn empty_output_has_no_detections() {
        assert!(parse_tsv("").unwrap().is_empty());
        assert!(parse_tsv(HEADER).unwrap().is_empty());
    }

    #[test]
    fn groups_words_into_lines() {
        let output = tsv(&[
            "1\t1\t0\t0\t0\t0\t0\t0\t200\t100\t-1\t",
            "4\t1\t1\t1\t1\t0\t10\t10\t90\t20\t-1\t",
            "5\t1\t1\t1\t1\t1\t10\t10\t40\t20\t90\tHello",
            "5\t1\t1\t1\t1\t2\t60\t12\t40\t18\t80\tWorld",
            "5\t1\t1\t1\t2\t1\t10\t40\t30\t20\t70\tSecond",
        ]);

        let detections = parse_tsv(&output).unwrap();

        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].text, "Hello World");
        assert_eq!(detections[0].bounding_box, BoundingBox::from_rect(10, 10, 90, 20));
        assert!((detections[0].confidence.value() - 0.85).abs() < 1e-9);
        assert_eq!(detections[1].text, "Second");
        assert!((detections[1].confidence.value() - 0.70).abs() < 1e-9);
    }

    #[test]
    fn keeps_first_seen_line_order() {
        let output = tsv(&[
            "5\t1\t2\t1\t1\t1\t0\t50\t10\t10\t90\tlater-block",
            "5\t1\t1\t1\t1\t1\t0\t0\t10\t10\t90\tearlier-block",
        ]);

        let texts: Vec<String> = parse_tsv(&output)
            .unwrap()
            .into_iter()
            .map(|d| d.text)
            .collect();

        assert_eq!(texts, vec!["later-block", "earlier-block"]);
    }

    #[test]
    fn skips_blank_and_unrecognized_words() {
        let output = tsv(&[
            "5\t1\t1\t1\t1\t1\t0\t0\t10\t10\t-1\tghost",
            "5\t1\t1\t1\t1\t2\t0\t0\t10\t10\t95\t   ",
            "5\t1\t1\t1\t1\t3\t0\t0\t10\t10\t95.5\tkept",
        ]);

        let detections = parse_tsv(&output).unwrap();

        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].text, "kept");
        assert!((detections[0].confidence.value() - 0.955).abs() < 1e-9);
    }

    #[test]
    fn rejects_unexpected_header() {
        let result = parse_tsv("garbage\n5\t1");
        assert!(matches!(result, Err(VisionError::InvalidOutput(_))));
    }

    #[test]
    fn rejects_non_numeric_geometry() {
        let output = tsv(&["5\t1\t1\t1\t1\t1\tx\t0\t10\t10\t90\tword"]);
        assert!(matches!(parse_tsv(&output), Err(VisionError::InvalidOutput(_))));
    }

    #[test]
    fn missing_executable_is_not_available() {
        let factory = TesseractDetectorFactory::new(&OcrConfig {
            tesseract_path: PathBuf::from("/nonexistent/textvox/tesseract"),
            ..Default::default()
        });

        let result = factory.create(&LanguageSet::parse("en").unwrap());

        assert!(matches!(result, Err(VisionError::NotAvailable(_))));
    }

    #[test]
    fn factory_reports_backend_name() {
        let factory = TesseractDetectorFactory::new(&OcrConfig::default());
        assert_eq!(factory.name(), "tesseract");
    }
}
