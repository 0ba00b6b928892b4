use std::f64::consts::{FRAC_PI_2, PI};

use crate::render::{Color, CornerRadii, FontSpec, StrokeStyle, TextStyle};

/// Minimal 2D drawing contract the chart strategies draw through.
///
/// The model follows an immediate-mode canvas: path building calls accumulate
/// a current path that `fill`/`stroke` consume. Implementations must accept
/// any finite coordinates and never panic; they report nothing back except
/// text measurements.
pub trait DrawingSurface {
    /// Clears the whole surface to `background` and resets transforms.
    fn clear(&mut self, width: f64, height: f64, background: Color);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    /// Clockwise arc in radians; `0` points right and `-π/2` points up.
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn close_path(&mut self);
    fn fill(&mut self, color: Color);
    fn stroke(&mut self, style: StrokeStyle);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle);
    /// Advance width of `text` in pixels.
    fn measure_text(&mut self, text: &str, font: FontSpec) -> f64;

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    fn rotate(&mut self, radians: f64);

    /// Appends a rounded rectangle sub-path. Radii are clamped to half the
    /// shorter side; zero radii produce square corners.
    fn round_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radii: CornerRadii) {
        let radii = radii.clamped_to(width, height);
        let right = x + width;
        let bottom = y + height;

        self.move_to(x + radii.top_left, y);
        self.line_to(right - radii.top_right, y);
        if radii.top_right > 0.0 {
            self.arc(
                right - radii.top_right,
                y + radii.top_right,
                radii.top_right,
                -FRAC_PI_2,
                0.0,
            );
        }
        self.line_to(right, bottom - radii.bottom_right);
        if radii.bottom_right > 0.0 {
            self.arc(
                right - radii.bottom_right,
                bottom - radii.bottom_right,
                radii.bottom_right,
                0.0,
                FRAC_PI_2,
            );
        }
        self.line_to(x + radii.bottom_left, bottom);
        if radii.bottom_left > 0.0 {
            self.arc(
                x + radii.bottom_left,
                bottom - radii.bottom_left,
                radii.bottom_left,
                FRAC_PI_2,
                PI,
            );
        }
        self.line_to(x, y + radii.top_left);
        if radii.top_left > 0.0 {
            self.arc(
                x + radii.top_left,
                y + radii.top_left,
                radii.top_left,
                PI,
                PI + FRAC_PI_2,
            );
        }
        self.close_path();
    }
}
