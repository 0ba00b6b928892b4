use serde::{Deserialize, Serialize};

use crate::render::{Color, DrawingSurface, FontSpec, StrokeStyle, TextStyle};

/// Approximate glyph advance relative to font size for headless measurement.
const REGULAR_ADVANCE_RATIO: f64 = 0.6;
const BOLD_ADVANCE_RATIO: f64 = 0.65;

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
        background: Color,
    },
    BeginPath,
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    Arc {
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    ClosePath,
    Fill {
        color: Color,
    },
    Stroke {
        style: StrokeStyle,
    },
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
        style: TextStyle,
    },
    Save,
    Restore,
    Translate {
        dx: f64,
        dy: f64,
    },
    Rotate {
        radians: f64,
    },
}

/// Headless surface used by tests, benches and tooling.
///
/// It records every call and measures text with a fixed advance ratio so
/// layouts are deterministic across machines. Non-finite coordinates are
/// counted so tests can assert that no `NaN` geometry reached the backend.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    non_finite_calls: usize,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[must_use]
    pub fn non_finite_calls(&self) -> usize {
        self.non_finite_calls
    }

    /// Drawing calls after the last `clear`, excluding the clear itself.
    #[must_use]
    pub fn drawing_commands(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|command| matches!(command, DrawCommand::Clear { .. }))
            .map_or(0, |index| index + 1);
        &self.commands[start..]
    }

    /// Text strings drawn since the last `clear`, in draw order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.drawing_commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn count(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.drawing_commands()
            .iter()
            .filter(|command| predicate(command))
            .count()
    }

    pub fn reset(&mut self) {
        self.commands.clear();
        self.non_finite_calls = 0;
    }

    fn record(&mut self, command: DrawCommand, coordinates: &[f64]) {
        if coordinates.iter().any(|value| !value.is_finite()) {
            self.non_finite_calls += 1;
        }
        self.commands.push(command);
    }
}

impl DrawingSurface for RecordingSurface {
    fn clear(&mut self, width: f64, height: f64, background: Color) {
        self.record(
            DrawCommand::Clear {
                width,
                height,
                background,
            },
            &[width, height],
        );
    }

    fn begin_path(&mut self) {
        self.record(DrawCommand::BeginPath, &[]);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.record(DrawCommand::MoveTo { x, y }, &[x, y]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.record(DrawCommand::LineTo { x, y }, &[x, y]);
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.record(
            DrawCommand::Arc {
                cx,
                cy,
                radius,
                start_angle,
                end_angle,
            },
            &[cx, cy, radius, start_angle, end_angle],
        );
    }

    fn close_path(&mut self) {
        self.record(DrawCommand::ClosePath, &[]);
    }

    fn fill(&mut self, color: Color) {
        self.record(DrawCommand::Fill { color }, &[]);
    }

    fn stroke(&mut self, style: StrokeStyle) {
        self.record(DrawCommand::Stroke { style }, &[style.width]);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.record(
            DrawCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
            },
            &[x, y, width, height],
        );
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.record(
            DrawCommand::FillText {
                text: text.to_owned(),
                x,
                y,
                style: *style,
            },
            &[x, y],
        );
    }

    fn measure_text(&mut self, text: &str, font: FontSpec) -> f64 {
        let ratio = if font.bold {
            BOLD_ADVANCE_RATIO
        } else {
            REGULAR_ADVANCE_RATIO
        };
        text.chars().count() as f64 * font.size_px * ratio
    }

    fn save(&mut self) {
        self.record(DrawCommand::Save, &[]);
    }

    fn restore(&mut self) {
        self.record(DrawCommand::Restore, &[]);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.record(DrawCommand::Translate { dx, dy }, &[dx, dy]);
    }

    fn rotate(&mut self, radians: f64) {
        self.record(DrawCommand::Rotate { radians }, &[radians]);
    }
}
