//! # tokenflow input normalizer
//!
//! The single boundary where loosely shaped external allocation data becomes the
//! canonical `AllocationInput`. It reconciles camelCase and snake_case keys,
//! numeric strings, percent-of-supply allocations, and unknown vesting types, so
//! that the calculation stages never see anything but clean values.
//!
//! Field-level problems never fail: they degrade to zero or to a linear schedule.
//! Only document-level problems (invalid JSON, wrong top-level shape) return a
//! `NormalizeError`.

pub mod allocation;
mod coerce;
pub mod document;
pub mod error;
pub mod group;

pub use allocation::{normalize_allocation, normalize_project};
pub use document::{ProjectDocument, parse_project, project_from_value};
pub use error::NormalizeError;
pub use group::infer_standard_group;
