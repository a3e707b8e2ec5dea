pub mod metrics;

pub use metrics::{ClassificationMetrics, MetricsCalculator};
