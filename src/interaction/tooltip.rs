use serde::{Deserialize, Serialize};

use super::hit_test::{DEFAULT_POINT_TOLERANCE_PX, HitTestElement, locate};

/// Public tooltip state exposed to host applications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub formatted_value: String,
}

impl TooltipState {
    #[must_use]
    pub fn hidden() -> Self {
        Self::default()
    }

    fn anchored_at(element: &HitTestElement) -> Self {
        let (x, y) = element.shape.anchor();
        Self {
            visible: true,
            x,
            y,
            label: element.label.clone(),
            formatted_value: element.formatted_value.clone(),
        }
    }
}

/// Per-chart owner of the last drawn hit-test list and the tooltip derived
/// from it. Each chart instance holds its own controller.
#[derive(Debug, Clone)]
pub struct TooltipController {
    elements: Vec<HitTestElement>,
    tooltip: TooltipState,
    point_tolerance_px: f64,
}

impl Default for TooltipController {
    fn default() -> Self {
        Self::new(DEFAULT_POINT_TOLERANCE_PX)
    }
}

impl TooltipController {
    #[must_use]
    pub fn new(point_tolerance_px: f64) -> Self {
        Self {
            elements: Vec::new(),
            tooltip: TooltipState::hidden(),
            point_tolerance_px,
        }
    }

    #[must_use]
    pub fn elements(&self) -> &[HitTestElement] {
        &self.elements
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    #[must_use]
    pub fn point_tolerance_px(&self) -> f64 {
        self.point_tolerance_px
    }

    pub fn set_point_tolerance_px(&mut self, tolerance: f64) {
        self.point_tolerance_px = tolerance;
    }

    /// Replaces the hit-test list after a redraw.
    pub fn replace_elements(&mut self, elements: Vec<HitTestElement>, clear_tooltip: bool) {
        self.elements = elements;
        if clear_tooltip {
            self.tooltip = TooltipState::hidden();
        }
    }

    #[must_use]
    pub fn element_at(&self, x: f64, y: f64) -> Option<&HitTestElement> {
        locate(x, y, &self.elements, self.point_tolerance_px)
    }

    /// Overwrites the tooltip from the element under the pointer, hiding it
    /// when nothing matches.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> &TooltipState {
        self.tooltip = match locate(x, y, &self.elements, self.point_tolerance_px) {
            Some(element) => TooltipState::anchored_at(element),
            None => TooltipState::hidden(),
        };
        &self.tooltip
    }

    pub fn on_pointer_leave(&mut self) -> &TooltipState {
        self.tooltip = TooltipState::hidden();
        &self.tooltip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> TooltipController {
        let mut controller = TooltipController::default();
        controller.replace_elements(
            vec![
                HitTestElement::bar(10.0, 50.0, 20.0, 100.0, "North", "1K"),
                HitTestElement::point(200.0, 80.0, "March", "42"),
            ],
            true,
        );
        controller
    }

    #[test]
    fn bar_tooltip_anchors_at_top_center() {
        let mut controller = controller();
        let tooltip = controller.on_pointer_move(15.0, 120.0).clone();
        assert!(tooltip.visible);
        assert_eq!((tooltip.x, tooltip.y), (20.0, 50.0));
        assert_eq!(tooltip.label, "North");
        assert_eq!(tooltip.formatted_value, "1K");
    }

    #[test]
    fn point_tooltip_anchors_at_point() {
        let mut controller = controller();
        let tooltip = controller.on_pointer_move(190.0, 90.0).clone();
        assert_eq!((tooltip.x, tooltip.y), (200.0, 80.0));
    }

    #[test]
    fn miss_and_leave_hide_tooltip() {
        let mut controller = controller();
        controller.on_pointer_move(15.0, 120.0);
        assert!(!controller.on_pointer_move(500.0, 500.0).visible);
        controller.on_pointer_move(15.0, 120.0);
        assert!(!controller.on_pointer_leave().visible);
    }
}
