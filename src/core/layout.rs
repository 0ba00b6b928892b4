use crate::core::{ChartType, Padding, PlotRect, Viewport};

/// Extra top padding reserved for a chart title.
pub const TITLE_BAND_PX: f64 = 30.0;

/// Bar-to-slot ratio for vertical bars (`0.65` bar, `0.35` gap).
pub const VERTICAL_BAR_RATIO: f64 = 0.65;
/// Bar-to-slot ratio for horizontal bars.
pub const HORIZONTAL_BAR_RATIO: f64 = 0.7;
/// Share of a category slot used by the bars of a cluster.
pub const CLUSTER_GROUP_RATIO: f64 = 0.8;

const MIN_DYNAMIC_LEFT_PX: f64 = 60.0;
const MAX_DYNAMIC_LEFT_RATIO: f64 = 0.4;
const LABEL_GUTTER_PX: f64 = 16.0;

/// Base padding profile per chart type, with the title band applied.
#[must_use]
pub fn padding_profile(chart_type: ChartType, has_title: bool) -> Padding {
    let base = match chart_type {
        ChartType::HorizontalBar => Padding::new(20.0, 60.0, 20.0, MIN_DYNAMIC_LEFT_PX),
        ChartType::VerticalBar | ChartType::StackedBar => Padding::new(30.0, 20.0, 70.0, 60.0),
        ChartType::Line | ChartType::Area => Padding::new(30.0, 30.0, 50.0, 60.0),
        ChartType::Pareto => Padding::new(30.0, 60.0, 70.0, 60.0),
        ChartType::Pie => Padding::new(20.0, 20.0, 20.0, 20.0),
        ChartType::ClusteredBar => Padding::new(30.0, 20.0, 90.0, 60.0),
        ChartType::Funnel => Padding::new(20.0, 40.0, 20.0, 40.0),
    };
    with_title_band(base, has_title)
}

#[must_use]
pub fn with_title_band(mut padding: Padding, has_title: bool) -> Padding {
    if has_title {
        padding.top += TITLE_BAND_PX;
    }
    padding
}

/// Left padding wide enough for the longest measured label, bounded to
/// `[60px, 40% of the canvas width]`.
#[must_use]
pub fn dynamic_left_padding(longest_label_px: f64, viewport: Viewport) -> f64 {
    let upper = (viewport.width_px() * MAX_DYNAMIC_LEFT_RATIO).max(MIN_DYNAMIC_LEFT_PX);
    let wanted = if longest_label_px.is_finite() {
        longest_label_px + LABEL_GUTTER_PX
    } else {
        MIN_DYNAMIC_LEFT_PX
    };
    wanted.clamp(MIN_DYNAMIC_LEFT_PX, upper)
}

/// Plot rectangle for `chart_type` on `viewport`.
#[must_use]
pub fn plot_rect(chart_type: ChartType, viewport: Viewport, has_title: bool) -> PlotRect {
    PlotRect::from_padding(viewport, padding_profile(chart_type, has_title))
}

/// Evenly spaced category slots along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandLayout {
    pub start: f64,
    pub slot: f64,
    pub count: usize,
}

impl BandLayout {
    #[must_use]
    pub fn new(start: f64, length: f64, count: usize) -> Self {
        let slot = if count == 0 {
            0.0
        } else {
            length.max(0.0) / count as f64
        };
        Self { start, slot, count }
    }

    #[must_use]
    pub fn slot_start(self, index: usize) -> f64 {
        self.start + index as f64 * self.slot
    }

    #[must_use]
    pub fn slot_center(self, index: usize) -> f64 {
        self.slot_start(index) + self.slot / 2.0
    }

    /// Width of a bar occupying `ratio` of its slot.
    #[must_use]
    pub fn bar_width(self, ratio: f64) -> f64 {
        self.slot * ratio
    }

    /// Start of a bar of `ratio` centered within slot `index`.
    #[must_use]
    pub fn bar_start(self, index: usize, ratio: f64) -> f64 {
        self.slot_start(index) + self.slot * (1.0 - ratio) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_enlarges_top_padding() {
        let plain = padding_profile(ChartType::Line, false);
        let titled = padding_profile(ChartType::Line, true);
        assert_eq!(titled.top - plain.top, TITLE_BAND_PX);
        assert_eq!(titled.bottom, plain.bottom);
    }

    #[test]
    fn dynamic_left_is_bounded() {
        let viewport = Viewport::new(500, 300);
        assert_eq!(dynamic_left_padding(10.0, viewport), 60.0);
        assert_eq!(dynamic_left_padding(100.0, viewport), 116.0);
        assert_eq!(dynamic_left_padding(1_000.0, viewport), 200.0);
    }

    #[test]
    fn band_layout_centers_bars() {
        let bands = BandLayout::new(100.0, 400.0, 4);
        assert_eq!(bands.slot, 100.0);
        assert!((bands.bar_start(1, 0.65) - 217.5).abs() < 1e-9);
        assert!((bands.bar_width(0.65) - 65.0).abs() < 1e-9);
        assert_eq!(bands.slot_center(3), 450.0);
    }
}
