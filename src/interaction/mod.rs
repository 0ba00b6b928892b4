//! Pointer hit-testing against drawn shapes and the tooltip state it drives.

mod tooltip;

pub use hit_test::{DEFAULT_POINT_TOLERANCE_PX, HitKind, HitShape, HitTestElement, locate};
pub use tooltip::{TooltipController, TooltipState};
