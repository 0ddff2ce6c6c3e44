//! # tokenflow comparison engine
//!
//! Read models over many simultaneously tracked projects: a sortable ranking table,
//! annualized multi-year emission inflation, and the market-wide unlock value per month.
//!
//! Every projection is a pure function of the `ProjectReport`s passed in. Sorting
//! order and direction are chosen by the caller per call.

pub mod engine;
pub mod report;
pub mod rows;

pub use engine::{ComparisonEngine, annualize_monthly_rate};
pub use report::ProjectReport;
pub use rows::{ComparisonRow, InflationPeriodRow, MarketEmissionsRow, RankField, SortDirection};
