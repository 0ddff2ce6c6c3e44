//! # tokenflow Analytics Engine
//!
//! This crate derives the single-project metrics shown next to an emission chart:
//! how much dollar value unlocks each month, how much of the supply is still locked,
//! and whether future unlocks arrive as cliffs or as linear streams.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0). Prices and supplies arrive already resolved.
//! - **Stateless Calculation:** The `AnalyticsEngine` is a stateless calculator. It takes
//!   a project's `ProjectEmissions` and a `MarketSnapshot` and produces a `ProjectAnalytics`.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: The main struct that contains the calculation logic.
//! - `ProjectAnalytics`: The standardized struct that holds the derived metrics.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use report::{PeakUnlock, ProjectAnalytics};
