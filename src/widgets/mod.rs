//! Specialized dashboard widgets built on the chart primitives.
//!
//! Both add a data-shaping pass before layout: the cash-flow widget corrects
//! month labels and filters by time window, the aging widget aggregates rows
//! into buckets.

pub mod aging;
pub mod cash_flow;

pub use aging::{AgingBucket, AgingColumns, AgingWidget, aggregate_buckets, strip_ordinal_prefix};
pub use cash_flow::{
    CashFlowColumns, CashFlowMonth, CashFlowWidget, TimeWindow, apply_time_window,
    cash_flow_months, correct_month_label, parse_month_label,
};
