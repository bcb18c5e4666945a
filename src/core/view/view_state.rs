use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::math::matrix4::Matrix4;
use crate::core::math::vector3h::Vector3h;
use crate::core::view::errors::ViewError;

pub const DEFAULT_WIDTH: u32 = 720;
pub const DEFAULT_HEIGHT: u32 = 480;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Whether a zoom operation moved the view and the frame must be redrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum ZoomOutcome {
    Changed,
    Unchanged,
}

impl ZoomOutcome {
    pub fn needs_render(self) -> bool {
        self == Self::Changed
    }
}

/// The pixel to complex-plane transform and the zoom that produced it.
///
/// The model matrix maps the unzoomed viewport onto `[-2, 1] x [-1, 1]`
/// (y flipped). The view matrix scales by `2^-(zoom_level - 1)` and
/// translates so the zoom target lands on the viewport midpoint. The
/// combined matrix is `model * view` and is recomputed on every zoom.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pixel_rect: PixelRect,
    zoom_level: u32,
    model: Matrix4,
    reverse_model: Matrix4,
    view: Matrix4,
    combined: Matrix4,
    center: Complex,
}

impl ViewState {
    pub fn new(width: u32, height: u32) -> Result<Self, ViewError> {
        let pixel_rect = PixelRect::from_size(width, height)?;
        let w = f64::from(width);
        let h = f64::from(height);

        let model = Matrix4::new([
            [3.0 / w, 0.0, 0.0, -2.0],
            [0.0, -2.0 / h, 0.0, 1.0],
            [0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let reverse_model = Matrix4::new([
            [w / 3.0, 0.0, 0.0, 2.0 * w / 3.0],
            [0.0, h / -2.0, 0.0, h / 2.0],
            [0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);

        let mut state = Self {
            pixel_rect,
            zoom_level: 1,
            model,
            reverse_model,
            view: Matrix4::identity(),
            combined: model,
            center: Complex::ZERO,
        };
        state.sync();

        Ok(state)
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    #[must_use]
    pub fn zoom_level(&self) -> u32 {
        self.zoom_level
    }

    #[must_use]
    pub fn center(&self) -> Complex {
        self.center
    }

    #[must_use]
    pub fn model_matrix(&self) -> Matrix4 {
        self.model
    }

    #[must_use]
    pub fn view_matrix(&self) -> Matrix4 {
        self.view
    }

    #[must_use]
    pub fn combined_matrix(&self) -> Matrix4 {
        self.combined
    }

    /// `2^(zoom_level - 1)`.
    #[must_use]
    pub fn magnification(&self) -> f64 {
        scale_for(self.zoom_level)
    }

    #[must_use]
    pub fn magnification_text(&self) -> String {
        if self.zoom_level == 1 {
            "Full size".to_string()
        } else {
            format!("Zoomed in by {:.0}", self.magnification())
        }
    }

    /// Zooms one level in or out around a viewport pixel.
    ///
    /// Pixels outside the viewport and zooming out of the full-size view
    /// leave the state untouched.
    pub fn relative_zoom(&mut self, pixel: Point, direction: ZoomDirection) -> ZoomOutcome {
        if !self.pixel_rect.contains_point(pixel) {
            tracing::debug!(x = pixel.x, y = pixel.y, "zoom requested outside viewport");
            return ZoomOutcome::Unchanged;
        }

        let level = match direction {
            ZoomDirection::In => self.zoom_level.saturating_add(1),
            ZoomDirection::Out if self.zoom_level > 1 => self.zoom_level - 1,
            ZoomDirection::Out => return ZoomOutcome::Unchanged,
        };

        let target = self.view * Vector3h::new(f64::from(pixel.x), f64::from(pixel.y), 0.0);
        self.recentre(target, level);

        tracing::info!(level, center = ?self.center, "relative zoom");
        ZoomOutcome::Changed
    }

    /// Centres the view on `(x, y)` at the largest power-of-two magnification
    /// not exceeding `zoom_amount`.
    pub fn absolute_zoom(&mut self, x: f64, y: f64, zoom_amount: u64) -> Result<ZoomOutcome, ViewError> {
        if zoom_amount == 0 {
            return Err(ViewError::InvalidZoomAmount {
                amount: zoom_amount,
            });
        }

        let level = zoom_amount.ilog2() + 1;
        Ok(self.zoom_to_level(x, y, i64::from(level)))
    }

    /// Centres the view on `(x, y)` at an explicit zoom level. Levels below 1
    /// are clamped.
    pub fn zoom_to_level(&mut self, x: f64, y: f64, level: i64) -> ZoomOutcome {
        let level = if level < 1 {
            tracing::warn!(level, "zoom level below 1, clamping");
            1
        } else {
            u32::try_from(level).unwrap_or(u32::MAX)
        };

        let target = self.reverse_model * Vector3h::new(x, y, 0.0);
        self.recentre(target, level);

        tracing::info!(level, center = ?self.center, "absolute zoom");
        ZoomOutcome::Changed
    }

    pub fn reset(&mut self) -> ZoomOutcome {
        if self.zoom_level == 1 && self.view == Matrix4::identity() {
            return ZoomOutcome::Unchanged;
        }

        self.zoom_level = 1;
        self.view = Matrix4::identity();
        self.sync();

        ZoomOutcome::Changed
    }

    /// Complex-plane coordinate under a (possibly fractional) pixel position.
    #[must_use]
    pub fn pixel_to_complex(&self, px: f64, py: f64) -> Complex {
        let v = self.combined * Vector3h::new(px, py, 0.0);
        Complex::new(v.x, v.y)
    }

    /// Pixel position that [`Self::pixel_to_complex`] maps onto `c`.
    #[must_use]
    pub fn complex_to_pixel(&self, c: Complex) -> (f64, f64) {
        let world = self.reverse_model * Vector3h::new(c.real, c.imag, 0.0);
        let scale = self.view.get(0, 0);

        (
            (world.x - self.view.get(0, 3)) / scale,
            (world.y - self.view.get(1, 3)) / self.view.get(1, 1),
        )
    }

    fn recentre(&mut self, target: Vector3h, level: u32) {
        let scale = scale_for(level);
        let half_width = f64::from(self.pixel_rect.width()) / (2.0 * scale);
        let half_height = f64::from(self.pixel_rect.height()) / (2.0 * scale);

        let mut view = Matrix4::identity();
        view.set(0, 0, 1.0 / scale);
        view.set(1, 1, 1.0 / scale);
        view.set(0, 3, target.x - half_width);
        view.set(1, 3, target.y - half_height);

        self.zoom_level = level;
        self.view = view;
        self.sync();
    }

    fn sync(&mut self) {
        self.combined = self.model * self.view;

        let mid_x = f64::from(self.pixel_rect.width()) / 2.0;
        let mid_y = f64::from(self.pixel_rect.height()) / 2.0;
        self.center = self.pixel_to_complex(mid_x, mid_y);
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT).expect("default viewport is valid")
    }
}

fn scale_for(level: u32) -> f64 {
    2f64.powf(f64::from(level) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: Complex, expected: Complex) {
        assert!(
            (actual.real - expected.real).abs() < EPSILON
                && (actual.imag - expected.imag).abs() < EPSILON,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_initial_view_covers_default_region() {
        let view = ViewState::default();

        assert_eq!(view.zoom_level(), 1);
        assert_close(view.center(), Complex::new(-0.5, 0.0));
        assert_close(view.pixel_to_complex(0.0, 0.0), Complex::new(-2.0, 1.0));
        assert_close(view.pixel_to_complex(720.0, 480.0), Complex::new(1.0, -1.0));
        assert_eq!(view.magnification_text(), "Full size");
    }

    #[test]
    fn test_rejects_degenerate_viewport() {
        assert!(matches!(ViewState::new(1, 480), Err(ViewError::Viewport(_))));
    }

    #[test]
    fn test_relative_zoom_in_recentres_on_clicked_pixel() {
        let mut view = ViewState::default();

        let outcome = view.relative_zoom(Point { x: 0, y: 0 }, ZoomDirection::In);

        assert!(outcome.needs_render());
        assert_eq!(view.zoom_level(), 2);
        assert_close(view.center(), Complex::new(-2.0, 1.0));
        assert_close(view.pixel_to_complex(0.0, 0.0), Complex::new(-2.75, 1.5));
        assert_eq!(view.magnification_text(), "Zoomed in by 2");
    }

    #[test]
    fn test_relative_zoom_composes_through_current_view() {
        let mut view = ViewState::default();
        let _ = view.relative_zoom(Point { x: 0, y: 0 }, ZoomDirection::In);
        let expected = view.pixel_to_complex(100.0, 50.0);

        let _ = view.relative_zoom(Point { x: 100, y: 50 }, ZoomDirection::In);

        assert_eq!(view.zoom_level(), 3);
        assert_close(view.center(), expected);
    }

    #[test]
    fn test_zoom_out_at_full_size_is_noop() {
        let mut view = ViewState::default();
        let before = view.clone();

        let outcome = view.relative_zoom(Point { x: 10, y: 10 }, ZoomDirection::Out);

        assert_eq!(outcome, ZoomOutcome::Unchanged);
        assert_eq!(view, before);
    }

    #[test]
    fn test_zoom_level_never_drops_below_one() {
        let mut view = ViewState::default();
        let pixel = Point { x: 360, y: 240 };

        let _ = view.relative_zoom(pixel, ZoomDirection::In);
        for _ in 0..5 {
            let _ = view.relative_zoom(pixel, ZoomDirection::Out);
            assert!(view.zoom_level() >= 1);
        }

        assert_eq!(view.zoom_level(), 1);
    }

    #[test]
    fn test_relative_zoom_outside_viewport_is_ignored() {
        let mut view = ViewState::default();

        let outcome = view.relative_zoom(Point { x: 720, y: 10 }, ZoomDirection::In);

        assert_eq!(outcome, ZoomOutcome::Unchanged);
        assert_eq!(view.zoom_level(), 1);
    }

    #[test]
    fn test_absolute_zoom_amount_one_is_full_size() {
        let mut view = ViewState::default();

        let outcome = view.absolute_zoom(-0.5, 0.0, 1).unwrap();

        assert!(outcome.needs_render());
        assert_eq!(view.zoom_level(), 1);
        assert_close(view.center(), Complex::new(-0.5, 0.0));
    }

    #[test]
    fn test_absolute_zoom_uses_power_of_two_floor() {
        let mut view = ViewState::default();

        let _ = view.absolute_zoom(0.25, 0.5, 8).unwrap();
        assert_eq!(view.zoom_level(), 4);
        assert_close(view.center(), Complex::new(0.25, 0.5));

        let _ = view.absolute_zoom(0.25, 0.5, 15).unwrap();
        assert_eq!(view.zoom_level(), 4);

        let _ = view.absolute_zoom(0.25, 0.5, 16).unwrap();
        assert_eq!(view.zoom_level(), 5);
        assert_eq!(view.magnification_text(), "Zoomed in by 16");
    }

    #[test]
    fn test_absolute_zoom_rejects_zero_and_keeps_state() {
        let mut view = ViewState::default();
        let _ = view.absolute_zoom(0.1, 0.1, 4).unwrap();
        let before = view.clone();

        assert_eq!(
            view.absolute_zoom(1.0, 1.0, 0),
            Err(ViewError::InvalidZoomAmount { amount: 0 })
        );
        assert_eq!(view, before);
    }

    #[test]
    fn test_zoom_to_level_clamps_low_levels() {
        let mut view = ViewState::default();

        let _ = view.zoom_to_level(-1.0, 0.0, -3);

        assert_eq!(view.zoom_level(), 1);
        assert_close(view.center(), Complex::new(-1.0, 0.0));
    }

    #[test]
    fn test_center_tracks_combined_matrix() {
        let mut view = ViewState::default();
        let _ = view.absolute_zoom(-0.7436, 0.1318, 1 << 20).unwrap();

        let mid = view.combined_matrix() * Vector3h::new(360.0, 240.0, 0.0);

        assert_eq!(view.center(), Complex::new(mid.x, mid.y));
        assert_eq!(view.combined_matrix(), view.model_matrix() * view.view_matrix());
    }

    #[test]
    fn test_pixel_complex_round_trip() {
        let mut view = ViewState::default();
        let _ = view.absolute_zoom(-0.75, 0.1, 64).unwrap();

        for (px, py) in [(0.0, 0.0), (123.0, 456.0), (719.0, 1.0), (360.5, 240.25)] {
            let c = view.pixel_to_complex(px, py);
            let (rx, ry) = view.complex_to_pixel(c);

            assert!((rx - px).abs() < 1e-6, "x: {px} -> {rx}");
            assert!((ry - py).abs() < 1e-6, "y: {py} -> {ry}");
        }
    }

    #[test]
    fn test_reset_returns_to_full_size() {
        let mut view = ViewState::default();
        let initial = view.clone();
        let _ = view.absolute_zoom(0.3, 0.2, 32).unwrap();

        assert!(view.reset().needs_render());
        assert_eq!(view, initial);
        assert_eq!(view.reset(), ZoomOutcome::Unchanged);
    }

    #[test]
    fn test_custom_viewport_keeps_region() {
        let view = ViewState::new(300, 200).unwrap();

        assert_close(view.pixel_to_complex(0.0, 0.0), Complex::new(-2.0, 1.0));
        assert_close(view.center(), Complex::new(-0.5, 0.0));
    }
}
