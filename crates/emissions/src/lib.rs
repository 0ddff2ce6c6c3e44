//! # tokenflow emissions aggregator
//!
//! Sums a project's allocation schedules into project-level series: monthly
//! emissions, cumulative supply, month-over-month inflation, and the discrete cliff
//! unlock events worth surfacing on a timeline.

pub mod aggregator;

pub use aggregator::EmissionsAggregator;
