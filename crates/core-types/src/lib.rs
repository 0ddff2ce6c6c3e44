//! # tokenflow core types
//!
//! Layer 0 of the workspace: the data model shared by every stage of the emission
//! engine. It holds no logic beyond small helpers that several stages need to agree on
//! (token rounding, running sums, month labels).
//!
//! Amounts may be raw base units (e.g. 1e27 for a billion 18-decimal tokens), so
//! products and sums of amounts go through the saturating helpers here and clamp
//! at `Decimal::MAX` instead of panicking.

pub mod enums;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{StandardGroup, UnlockBucket, VestingType};
pub use structs::{
    AllocationInput, AllocationSchedule, CliffEvent, MarketSnapshot, ProjectEmissions,
};

use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

pub const HUNDRED: Decimal = dec!(100);

/// Rounds a token amount to a whole token, halves away from zero.
pub fn round_tokens(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Running sum of a series; `out[i] = values[0] + ... + values[i]`, saturating.
pub fn running_sum(values: &[Decimal]) -> Vec<Decimal> {
    values
        .iter()
        .scan(Decimal::ZERO, |acc, v| {
            *acc = acc.saturating_add(*v);
            Some(*acc)
        })
        .collect()
}

/// Sum of a series that saturates instead of overflowing.
pub fn saturating_sum<'a>(values: impl IntoIterator<Item = &'a Decimal>) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(*v))
}

/// `part / whole * 100`, or zero when `whole` is not positive.
///
/// A quotient too large to represent saturates at `Decimal::MAX`.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .map(|ratio| ratio.saturating_mul(HUNDRED))
        .unwrap_or(Decimal::MAX)
}

/// Display label for a month index: `YYYY-MM` when the TGE date is known, `M<index>` otherwise.
pub fn month_label(tge_date: Option<NaiveDate>, month_index: usize) -> String {
    tge_date
        .and_then(|date| {
            let offset = u32::try_from(month_index).ok()?;
            date.checked_add_months(Months::new(offset))
        })
        .map(|date| date.format("%Y-%m").to_string())
        .unwrap_or_else(|| format!("M{}", month_index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_tokens_rounds_halves_up_for_positive_values() {
        assert_eq!(round_tokens(dec!(2.5)), dec!(3));
        assert_eq!(round_tokens(dec!(3.5)), dec!(4));
        assert_eq!(round_tokens(dec!(833.333)), dec!(833));
    }

    #[test]
    fn running_sum_accumulates() {
        assert_eq!(
            running_sum(&[dec!(1), dec!(0), dec!(4)]),
            vec![dec!(1), dec!(1), dec!(5)]
        );
        assert!(running_sum(&[]).is_empty());
    }

    #[test]
    fn running_sum_saturates_at_max() {
        assert_eq!(
            running_sum(&[Decimal::MAX, dec!(1)]),
            vec![Decimal::MAX, Decimal::MAX]
        );
        assert_eq!(saturating_sum(&[Decimal::MAX, Decimal::MAX]), Decimal::MAX);
    }

    #[test]
    fn percent_of_handles_degenerate_wholes() {
        assert_eq!(percent_of(dec!(25), dec!(200)), dec!(12.5));
        assert_eq!(percent_of(dec!(5), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(percent_of(Decimal::MAX, dec!(0.001)), Decimal::MAX);
        assert_eq!(percent_of(Decimal::MAX, dec!(1)), Decimal::MAX);
    }

    #[test]
    fn month_label_uses_calendar_months_when_dated() {
        let tge = NaiveDate::from_ymd_opt(2024, 11, 30);
        assert_eq!(month_label(tge, 0), "2024-11");
        assert_eq!(month_label(tge, 3), "2025-02");
        assert_eq!(month_label(None, 7), "M7");
    }
}
