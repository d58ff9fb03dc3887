//! Inpainting of masked regions through OpenCV's Telea fill
//!
//! Pixel buffers are copied into `Mat`s, filled with `photo::inpaint` and
//! copied back. OpenCV only inpaints 1 and 3 channel images, so alpha is
//! carried over from the input untouched.

use image::{DynamicImage, GrayImage, Rgba, RgbaImage, RgbImage};
use opencv::core::{CV_8UC1, CV_8UC3, Mat, Scalar};
use opencv::photo;
use opencv::prelude::*;
use tracing::debug;

use crate::{error::VisionError, mask::covered_pixels};

/// Fill the pixels of `image` where `mask` is non-zero
///
/// Images with an alpha channel come back as RGBA, everything else as RGB.
/// A mask without set pixels returns the input unchanged. A radius below 1
/// is treated as 1.
///
/// # Errors
///
/// Returns an error if the mask and image dimensions differ or OpenCV fails.
pub fn inpaint_telea(
    image: &DynamicImage,
    mask: &GrayImage,
    radius: u32,
) -> Result<DynamicImage, VisionError> {
    if (image.width(), image.height()) != mask.dimensions() {
        return Err(VisionError::InvalidInput(format!(
            "mask is {}x{} but image is {}x{}",
            mask.width(),
            mask.height(),
            image.width(),
            image.height()
        )));
    }

    let covered = covered_pixels(mask);
    if covered == 0 {
        return Ok(image.clone());
    }
    debug!(covered, radius, "Inpainting masked pixels");

    let (width, height) = mask.dimensions();
    if image.color().has_alpha() {
        let rgba = image.to_rgba8();
        let rgb = DynamicImage::ImageRgba8(rgba.clone()).to_rgb8();
        let filled = inpaint_rgb(&rgb, mask, radius)?;
        let merged = RgbaImage::from_fn(width, height, |x, y| {
            let [r, g, b] = filled.get_pixel(x, y).0;
            Rgba([r, g, b, rgba.get_pixel(x, y).0[3]])
        });
        Ok(DynamicImage::ImageRgba8(merged))
    } else {
        Ok(DynamicImage::ImageRgb8(inpaint_rgb(
            &image.to_rgb8(),
            mask,
            radius,
        )?))
    }
}

fn inpaint_rgb(image: &RgbImage, mask: &GrayImage, radius: u32) -> Result<RgbImage, VisionError> {
    let (width, height) = image.dimensions();
    let src = to_mat(image.as_raw(), width, height, CV_8UC3)?;
    let inpaint_mask = to_mat(mask.as_raw(), width, height, CV_8UC1)?;

    let mut dst = Mat::default();
    photo::inpaint(
        &src,
        &inpaint_mask,
        &mut dst,
        f64::from(radius.max(1)),
        photo::INPAINT_TELEA,
    )
    .map_err(opencv_error)?;

    let data = dst.data_bytes().map_err(opencv_error)?.to_vec();
    RgbImage::from_raw(width, height, data).ok_or_else(|| {
        VisionError::Inpainting("inpainted buffer does not match image size".to_string())
    })
}

fn to_mat(raw: &[u8], width: u32, height: u32, typ: i32) -> Result<Mat, VisionError> {
    let rows = i32::try_from(height)
        .map_err(|_| VisionError::InvalidInput(format!("image height {height} is too large")))?;
    let cols = i32::try_from(width)
        .map_err(|_| VisionError::InvalidInput(format!("image width {width} is too large")))?;

    let mut mat = Mat::new_rows_cols_with_default(rows, cols, typ, Scalar::all(0.0))
        .map_err(opencv_error)?;
    let bytes = mat.data_bytes_mut().map_err(opencv_error)?;
    if bytes.len() != raw.len() {
        return Err(VisionError::InvalidInput(format!(
            "buffer holds {} bytes, Mat expects {}",
            raw.len(),
            bytes.len()
        )));
    }
    bytes.copy_from_slice(raw);
    Ok(mat)
}

fn opencv_error(err: opencv::Error) -> VisionError {
    VisionError::Inpainting(err.to_string())
}
