//! # tokenflow schedule calculator
//!
//! Converts the sparse vesting terms of a single allocation (TGE percent, cliff,
//! vesting duration, vesting type) into a month-by-month release series over a
//! fixed analysis window.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** A pure logic crate that depends only on `core-types`.
//! - **Stateless Calculation:** `ScheduleCalculator` holds no state; the same input
//!   always yields the same series.
//! - **Never fails:** degenerate terms (zero tokens, cliffs beyond the window) degrade
//!   to zero releases instead of errors.

pub mod calculator;

pub use calculator::ScheduleCalculator;
