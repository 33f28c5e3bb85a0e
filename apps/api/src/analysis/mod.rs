// Student analysis: bloom-tier classification, share summary, chart and resource matching.
// Everything here is pure apart from the handler, which runs the chart off the async runtime.

pub mod chart;
pub mod handlers;
pub mod summary;
pub mod tier;

pub use chart::{ChartRenderer, PieChartRenderer};
