use cairo::{Context, Format, ImageSurface, LineCap};
use pango::FontDescription;
use tracing::warn;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, DrawingSurface, FontSpec, LineJoin, StrokeStyle, TextBaseline, TextHAlign, TextStyle,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoSurfaceStats {
    pub fills: usize,
    pub strokes: usize,
    pub rects: usize,
    pub texts: usize,
    /// Cairo calls that reported an error and were skipped.
    pub backend_errors: usize,
}

/// Cairo + Pango + PangoCairo drawing surface.
///
/// Either owns an offscreen ARGB image surface (`new`) or draws onto an
/// external context such as a GTK draw callback (`for_context`). Cairo errors
/// are logged and counted; drawing continues with the next call.
#[derive(Debug)]
pub struct CairoSurface {
    context: Context,
    image: Option<ImageSurface>,
    stats: CairoSurfaceStats,
}

impl CairoSurface {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let image = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&image)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        Ok(Self {
            context,
            image: Some(image),
            stats: CairoSurfaceStats::default(),
        })
    }

    #[must_use]
    pub fn for_context(context: Context) -> Self {
        Self {
            context,
            image: None,
            stats: CairoSurfaceStats::default(),
        }
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageSurface> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn stats(&self) -> CairoSurfaceStats {
        self.stats
    }

    fn check(&mut self, operation: &'static str, result: Result<(), cairo::Error>) {
        if let Err(err) = result {
            self.stats.backend_errors += 1;
            warn!(operation, error = %err, "cairo call failed");
        }
    }

    fn layout(&self, text: &str, font: FontSpec) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(&self.context);
        let weight = if font.bold { "Bold " } else { "" };
        let description = FontDescription::from_string(&format!("Sans {weight}{}px", font.size_px));
        layout.set_font_description(Some(&description));
        layout.set_text(text);
        layout
    }
}

impl DrawingSurface for CairoSurface {
    fn clear(&mut self, _width: f64, _height: f64, background: Color) {
        self.context.identity_matrix();
        self.context.new_path();
        apply_color(&self.context, background);
        let result = self.context.paint();
        self.check("paint", result);
    }

    fn begin_path(&mut self) {
        self.context.new_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.context.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.context.line_to(x, y);
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.context.arc(cx, cy, radius.max(0.0), start_angle, end_angle);
    }

    fn close_path(&mut self) {
        self.context.close_path();
    }

    fn fill(&mut self, color: Color) {
        apply_color(&self.context, color);
        let result = self.context.fill();
        self.check("fill", result);
        self.stats.fills += 1;
    }

    fn stroke(&mut self, style: StrokeStyle) {
        apply_color(&self.context, style.color);
        self.context.set_line_width(style.width);
        match style.join {
            LineJoin::Round => {
                self.context.set_line_join(cairo::LineJoin::Round);
                self.context.set_line_cap(LineCap::Round);
            }
            LineJoin::Miter => {
                self.context.set_line_join(cairo::LineJoin::Miter);
                self.context.set_line_cap(LineCap::Butt);
            }
        }
        let result = self.context.stroke();
        self.check("stroke", result);
        self.stats.strokes += 1;
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.context.new_path();
        self.context.rectangle(x, y, width, height);
        apply_color(&self.context, color);
        let result = self.context.fill();
        self.check("fill_rect", result);
        self.stats.rects += 1;
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        if text.is_empty() {
            return;
        }
        let layout = self.layout(text, style.font);
        let (text_width, text_height) = layout.pixel_size();
        let left = match style.align {
            TextHAlign::Left => x,
            TextHAlign::Center => x - f64::from(text_width) / 2.0,
            TextHAlign::Right => x - f64::from(text_width),
        };
        let top = match style.baseline {
            TextBaseline::Top => y,
            TextBaseline::Middle => y - f64::from(text_height) / 2.0,
            TextBaseline::Alphabetic => y - f64::from(layout.baseline()) / f64::from(pango::SCALE),
            TextBaseline::Bottom => y - f64::from(text_height),
        };

        self.context.new_path();
        apply_color(&self.context, style.color);
        self.context.move_to(left, top);
        pangocairo::functions::show_layout(&self.context, &layout);
        self.context.new_path();
        self.stats.texts += 1;
    }

    fn measure_text(&mut self, text: &str, font: FontSpec) -> f64 {
        let (width, _height) = self.layout(text, font).pixel_size();
        f64::from(width)
    }

    fn save(&mut self) {
        let result = self.context.save();
        self.check("save", result);
    }

    fn restore(&mut self) {
        let result = self.context.restore();
        self.check("restore", result);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.context.translate(dx, dy);
    }

    fn rotate(&mut self, radians: f64) {
        self.context.rotate(radians);
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
