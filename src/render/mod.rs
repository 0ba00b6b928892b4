mod primitives;
mod recording_surface;
mod surface;

pub use primitives::{
    Color, CornerRadii, FontSpec, LineJoin, StrokeStyle, TextBaseline, TextHAlign, TextStyle,
};
pub use recording_surface::{DrawCommand, RecordingSurface};
pub use surface::DrawingSurface;

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoSurface, CairoSurfaceStats};
