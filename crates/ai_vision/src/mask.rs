//! Coverage masks for detected text
//!
//! The mask has the source image's dimensions. Pixels inside any detected
//! polygon are 255, everything else is 0.

use domain::{BoundingBox, Point, TextDetection};
use image::{GrayImage, Luma};
use imageproc::drawing::{draw_filled_rect_mut, draw_polygon_mut};
use imageproc::point::Point as PolyPoint;
use imageproc::rect::Rect;

/// Mask value for covered pixels
pub const COVERED: Luma<u8> = Luma([255]);

/// Rasterize the union of all detection polygons into a mask
#[must_use]
pub fn coverage_mask(width: u32, height: u32, detections: &[TextDetection]) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    if width == 0 || height == 0 {
        return mask;
    }

    for detection in detections {
        fill_box(&mut mask, &detection.bounding_box);
    }

    mask
}

/// Number of covered pixels in a mask
#[must_use]
pub fn covered_pixels(mask: &GrayImage) -> usize {
    mask.pixels().filter(|p| p.0[0] > 0).count()
}

fn fill_box(mask: &mut GrayImage, bounding_box: &BoundingBox) {
    let polygon = distinct_vertices(bounding_box);

    if polygon.len() >= 3 {
        let points: Vec<PolyPoint<i32>> =
            polygon.iter().map(|p| PolyPoint::new(p.x, p.y)).collect();
        draw_polygon_mut(mask, &points, COVERED);
    } else {
        // Degenerate polygons (a line or a point) still cover their extent
        let (min_x, min_y, max_x, max_y) = bounding_box.extent();
        let width = (max_x - min_x + 1).max(1) as u32;
        let height = (max_y - min_y + 1).max(1) as u32;
        draw_filled_rect_mut(mask, Rect::at(min_x, min_y).of_size(width, height), COVERED);
    }
}

/// Corners with consecutive duplicates and a closing duplicate removed
///
/// The polygon rasterizer rejects polygons whose first and last vertices
/// coincide.
fn distinct_vertices(bounding_box: &BoundingBox) -> Vec<Point> {
    let mut vertices: Vec<Point> = Vec::with_capacity(4);
    for corner in bounding_box.corners() {
        if vertices.last() != Some(&corner) {
            vertices.push(corner);
        }
    }
    while vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    vertices
}

#[cfg(test)]
mod tests {
    use domain::Confidence;

    use super::*;

    fn detection(bounding_box: BoundingBox) -> TextDetection {
        TextDetection::new(bounding_box, "text", Confidence::new(0.9))
    }

    #[test]
    fn empty_detections_yield_empty_mask() {
        let mask = coverage_mask(20, 10, &[]);
        assert_eq!(mask.dimensions(), (20, 10));
        assert_eq!(covered_pixels(&mask), 0);
    }

    #[test]
    fn rectangle_is_filled() {
        let mask = coverage_mask(20, 20, &[detection(BoundingBox::from_rect(5, 5, 4, 3))]);

        assert_eq!(mask.get_pixel(6, 6), &COVERED);
        assert_eq!(mask.get_pixel(5, 5), &COVERED);
        assert_eq!(mask.get_pixel(0, 0).0[0], 0);
        assert_eq!(mask.get_pixel(15, 15).0[0], 0);
    }

    #[test]
    fn mask_is_union_of_regions() {
        let mask = coverage_mask(
            30,
            10,
            &[
                detection(BoundingBox::from_rect(1, 1, 5, 5)),
                detection(BoundingBox::from_rect(20, 2, 5, 5)),
            ],
        );

        assert_eq!(mask.get_pixel(3, 3), &COVERED);
        assert_eq!(mask.get_pixel(22, 4), &COVERED);
        assert_eq!(mask.get_pixel(12, 4).0[0], 0);
    }

    #[test]
    fn rotated_quadrilateral_is_filled() {
        let diamond = BoundingBox::new(
            Point::new(10, 0),
            Point::new(20, 10),
            Point::new(10, 20),
            Point::new(0, 10),
        );
        let mask = coverage_mask(21, 21, &[detection(diamond)]);

        assert_eq!(mask.get_pixel(10, 10), &COVERED);
        assert_eq!(mask.get_pixel(1, 1).0[0], 0);
        assert_eq!(mask.get_pixel(19, 19).0[0], 0);
    }

    #[test]
    fn degenerate_box_covers_its_line() {
        let flat = BoundingBox::from_rect(2, 4, 6, 0);
        let mask = coverage_mask(10, 10, &[detection(flat)]);

        assert_eq!(mask.get_pixel(4, 4), &COVERED);
        assert_eq!(mask.get_pixel(4, 6).0[0], 0);
    }

    #[test]
    fn single_point_box_covers_one_pixel() {
        let point = BoundingBox::from_rect(3, 3, 0, 0);
        let mask = coverage_mask(10, 10, &[detection(point)]);

        assert_eq!(mask.get_pixel(3, 3), &COVERED);
        assert_eq!(covered_pixels(&mask), 1);
    }

    #[test]
    fn regions_outside_image_are_clipped() {
        let mask = coverage_mask(10, 10, &[detection(BoundingBox::from_rect(-5, -5, 8, 8))]);

        assert_eq!(mask.get_pixel(0, 0), &COVERED);
        assert_eq!(mask.get_pixel(9, 9).0[0], 0);
    }

    #[test]
    fn zero_sized_image_is_handled() {
        let mask = coverage_mask(0, 0, &[detection(BoundingBox::from_rect(0, 0, 4, 4))]);
        assert_eq!(mask.dimensions(), (0, 0));
    }

    #[test]
    fn distinct_vertices_drops_duplicates() {
        let flat = BoundingBox::from_rect(0, 0, 10, 0);
        let vertices = distinct_vertices(&flat);
        assert_eq!(vertices, vec![Point::new(0, 0), Point::new(10, 0)]);

        let rect = BoundingBox::from_rect(0, 0, 10, 5);
        assert_eq!(distinct_vertices(&rect).len(), 4);
    }
}
