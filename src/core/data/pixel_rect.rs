use crate::core::data::point::Point;

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PixelRectError {
    #[error("pixel rect must be at least 2x2 pixels: {width}x{height}")]
    InvalidSize { width: i64, height: i64 },
}

/// An inclusive rectangle of pixels; the viewport every frame is rendered into.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PixelRect {
    top_left: Point,
    bottom_right: Point,
}

impl PixelRect {
    pub fn new(top_left: Point, bottom_right: Point) -> Result<Self, PixelRectError> {
        let dx = i64::from(bottom_right.x) - i64::from(top_left.x);
        let dy = i64::from(bottom_right.y) - i64::from(top_left.y);

        let width = dx + if dx >= 0 { 1 } else { -1 };
        let height = dy + if dy >= 0 { 1 } else { -1 };

        if width < 2 || height < 2 {
            return Err(PixelRectError::InvalidSize { width, height });
        }

        Ok(Self {
            top_left,
            bottom_right,
        })
    }

    /// Viewport anchored at the origin.
    pub fn from_size(width: u32, height: u32) -> Result<Self, PixelRectError> {
        let too_large = |value: u32| i32::try_from(value).is_err();

        if width < 2 || height < 2 || too_large(width) || too_large(height) {
            return Err(PixelRectError::InvalidSize {
                width: i64::from(width),
                height: i64::from(height),
            });
        }

        Self::new(
            Point { x: 0, y: 0 },
            Point {
                x: width as i32 - 1,
                y: height as i32 - 1,
            },
        )
    }

    #[must_use]
    pub fn top_left(&self) -> Point {
        self.top_left
    }

    #[must_use]
    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        (self.bottom_right.x - self.top_left.x + 1) as u32
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        (self.bottom_right.y - self.top_left.y + 1) as u32
    }

    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        self.top_left.x <= point.x
            && self.top_left.y <= point.y
            && self.bottom_right.x >= point.x
            && self.bottom_right.y >= point.y
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Row-major index of `point`, or `None` when it lies outside the rect.
    #[must_use]
    pub fn index_of(&self, point: Point) -> Option<usize> {
        if !self.contains_point(point) {
            return None;
        }

        let relative_x = (point.x - self.top_left.x) as usize;
        let relative_y = (point.y - self.top_left.y) as usize;

        Some(relative_y * self.width() as usize + relative_x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_rect_new_valid() {
        let top_left = Point { x: 0, y: 0 };
        let bottom_right = Point { x: 100, y: 100 };

        let rect = PixelRect::new(top_left, bottom_right).unwrap();

        assert_eq!(rect.top_left(), top_left);
        assert_eq!(rect.bottom_right(), bottom_right);
    }

    #[test]
    fn test_pixel_rect_dimensions() {
        let rect = PixelRect::new(Point { x: -10, y: -20 }, Point { x: 110, y: 80 }).unwrap();

        assert_eq!(rect.width(), 121);
        assert_eq!(rect.height(), 101);
        assert_eq!(rect.size(), 12221);
    }

    #[test]
    fn test_pixel_rect_dimensions_must_be_positive() {
        let rect_negative_width = PixelRect::new(Point { x: 0, y: 0 }, Point { x: -100, y: 10 });
        let rect_negative_height = PixelRect::new(Point { x: 0, y: 0 }, Point { x: 100, y: -10 });

        assert_eq!(
            rect_negative_width,
            Err(PixelRectError::InvalidSize { width: -101, height: 11 })
        );
        assert_eq!(
            rect_negative_height,
            Err(PixelRectError::InvalidSize { width: 101, height: -11 })
        );
    }

    #[test]
    fn test_pixel_rect_must_be_at_least_two_pixels_wide_and_tall() {
        let one_pixel_tall = PixelRect::new(Point { x: 0, y: 0 }, Point { x: 10, y: 0 });
        let two_pixels_square = PixelRect::new(Point { x: 0, y: 0 }, Point { x: 1, y: 1 });

        assert_eq!(
            one_pixel_tall,
            Err(PixelRectError::InvalidSize { width: 11, height: 1 })
        );
        assert!(two_pixels_square.is_ok());
    }

    #[test]
    fn test_from_size() {
        let rect = PixelRect::from_size(720, 480).unwrap();

        assert_eq!(rect.top_left(), Point { x: 0, y: 0 });
        assert_eq!(rect.bottom_right(), Point { x: 719, y: 479 });
        assert_eq!(rect.size(), 720 * 480);
    }

    #[test]
    fn test_from_size_rejects_degenerate_and_oversized() {
        assert_eq!(
            PixelRect::from_size(1, 10),
            Err(PixelRectError::InvalidSize { width: 1, height: 10 })
        );
        assert!(PixelRect::from_size(u32::MAX, 10).is_err());
    }

    #[test]
    fn test_pixel_rect_contains_point() {
        let rect = PixelRect::new(Point { x: -50, y: -50 }, Point { x: 100, y: 100 }).unwrap();

        assert!(rect.contains_point(Point { x: 50, y: 50 }));
        assert!(rect.contains_point(Point { x: -50, y: -50 }));
        assert!(rect.contains_point(Point { x: 100, y: 100 }));
        assert!(!rect.contains_point(Point { x: 101, y: 50 }));
        assert!(!rect.contains_point(Point { x: 50, y: -51 }));
    }

    #[test]
    fn test_index_of() {
        let rect = PixelRect::new(Point { x: 10, y: 20 }, Point { x: 12, y: 22 }).unwrap();

        assert_eq!(rect.index_of(Point { x: 10, y: 20 }), Some(0));
        assert_eq!(rect.index_of(Point { x: 11, y: 21 }), Some(4));
        assert_eq!(rect.index_of(Point { x: 12, y: 22 }), Some(8));
        assert_eq!(rect.index_of(Point { x: 13, y: 22 }), None);
    }
}
