//! Pixel geometry for detected text regions

use serde::{Deserialize, Serialize};

/// A pixel coordinate, serialized as `[x, y]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<[i32; 2]> for Point {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [i32; 2] {
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}

/// Four-corner polygon around a text instance
///
/// Corner order is top-left, top-right, bottom-right, bottom-left, and the
/// box serializes as `[[x, y], [x, y], [x, y], [x, y]]` in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[Point; 4]", into = "[Point; 4]")]
pub struct BoundingBox {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_right: Point,
    pub bottom_left: Point,
}

impl BoundingBox {
    /// Create a box from its four corners
    #[must_use]
    pub const fn new(
        top_left: Point,
        top_right: Point,
        bottom_right: Point,
        bottom_left: Point,
    ) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Create an axis-aligned box from its top-left corner and size
    #[must_use]
    pub const fn from_rect(left: i32, top: i32, width: i32, height: i32) -> Self {
        let right = left + width;
        let bottom = top + height;
        Self {
            top_left: Point::new(left, top),
            top_right: Point::new(right, top),
            bottom_right: Point::new(right, bottom),
            bottom_left: Point::new(left, bottom),
        }
    }

    /// Corners in TL, TR, BR, BL order
    #[must_use]
    pub const fn corners(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// Axis-aligned extent as `(min_x, min_y, max_x, max_y)`
    #[must_use]
    pub fn extent(&self) -> (i32, i32, i32, i32) {
        let corners = self.corners();
        let min_x = corners.iter().map(|p| p.x).min().unwrap_or_default();
        let min_y = corners.iter().map(|p| p.y).min().unwrap_or_default();
        let max_x = corners.iter().map(|p| p.x).max().unwrap_or_default();
        let max_y = corners.iter().map(|p| p.y).max().unwrap_or_default();
        (min_x, min_y, max_x, max_y)
    }

    /// Smallest axis-aligned box containing both boxes
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let (ax0, ay0, ax1, ay1) = self.extent();
        let (bx0, by0, bx1, by1) = other.extent();
        let left = ax0.min(bx0);
        let top = ay0.min(by0);
        Self::from_rect(left, top, ax1.max(bx1) - left, ay1.max(by1) - top)
    }
}

impl From<[Point; 4]> for BoundingBox {
    fn from([top_left, top_right, bottom_right, bottom_left]: [Point; 4]) -> Self {
        Self::new(top_left, top_right, bottom_right, bottom_left)
    }
}

impl From<BoundingBox> for [Point; 4] {
    fn from(bbox: BoundingBox) -> Self {
        bbox.corners()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rect_orders_corners_clockwise_from_top_left() {
        let bbox = BoundingBox::from_rect(10, 20, 30, 5);
        assert_eq!(bbox.top_left, Point::new(10, 20));
        assert_eq!(bbox.top_right, Point::new(40, 20));
        assert_eq!(bbox.bottom_right, Point::new(40, 25));
        assert_eq!(bbox.bottom_left, Point::new(10, 25));
    }

    #[test]
    fn serializes_as_nested_arrays() {
        let bbox = BoundingBox::from_rect(1, 2, 3, 4);
        let json = serde_json::to_string(&bbox).unwrap();
        assert_eq!(json, "[[1,2],[4,2],[4,6],[1,6]]");
    }

    #[test]
    fn deserializes_from_nested_arrays() {
        let bbox: BoundingBox = serde_json::from_str("[[0,0],[5,0],[5,5],[0,5]]").unwrap();
        assert_eq!(bbox, BoundingBox::from_rect(0, 0, 5, 5));
    }

    #[test]
    fn extent_covers_rotated_quads() {
        let bbox = BoundingBox::new(
            Point::new(5, 0),
            Point::new(10, 5),
            Point::new(5, 10),
            Point::new(0, 5),
        );
        assert_eq!(bbox.extent(), (0, 0, 10, 10));
    }

    #[test]
    fn union_spans_both_boxes() {
        let a = BoundingBox::from_rect(0, 0, 10, 10);
        let b = BoundingBox::from_rect(20, 5, 5, 20);
        assert_eq!(a.union(&b), BoundingBox::from_rect(0, 0, 25, 25));
    }
}
