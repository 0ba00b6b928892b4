pub mod columns;
pub mod config;
pub mod format;
pub mod layout;
pub mod row;
pub mod scale;
pub mod types;

pub use columns::{ResolvedColumns, resolve_columns};
pub use config::{ChartConfig, ChartType, ColumnSelection};
pub use format::{
    format_currency, format_percentage, format_value, truncate_label, vertical_bar_label_budget,
};
pub use layout::BandLayout;
pub use row::{Dataset, Row, cell_number, cell_text, dataset_from_json};
pub use scale::{LinearScale, clamp_denominator, line_domain, value_axis_max};
pub use types::{Padding, PlotRect, Viewport};
