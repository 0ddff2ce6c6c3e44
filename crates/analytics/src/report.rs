use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The month with the largest unlock value in the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakUnlock {
    pub month_index: usize,
    pub value: Decimal,
}

/// A standardized report of a single project's unlock and supply metrics.
///
/// This struct is the output of the `AnalyticsEngine` and the per-project input of the
/// comparison read models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAnalytics {
    // I. Unlock Value
    /// `total_monthly_emissions[m] * price` for every month of the window.
    pub unlock_value_per_month: Vec<Decimal>,
    pub total_unlock_value: Decimal,
    pub next_12_months_unlock_value: Decimal,
    pub peak_unlock: Option<PeakUnlock>, // None when nothing unlocks in the window

    // II. Cliff vs Linear Split (post-TGE tokens, as a share of total supply)
    pub cliff_tokens: Decimal,
    pub linear_tokens: Decimal,
    pub cliff_pct: Decimal,
    pub linear_pct: Decimal,

    // III. Supply Ratios
    pub circulation_ratio: Decimal,
    pub locked_pct: Decimal,
    /// Locked supply relative to circulating supply, in percent. A "maximum future
    /// dilution" figure, distinct from the emissions' month-over-month rate.
    pub inflation_rate: Decimal,
    /// Tokens emitted over the window as a share of total supply.
    pub unlocked_pct_of_supply_at_end: Decimal,
}

impl ProjectAnalytics {
    /// Creates a new, zeroed-out report.
    pub fn new() -> Self {
        Self {
            unlock_value_per_month: Vec::new(),
            total_unlock_value: Decimal::ZERO,
            next_12_months_unlock_value: Decimal::ZERO,
            peak_unlock: None,
            cliff_tokens: Decimal::ZERO,
            linear_tokens: Decimal::ZERO,
            cliff_pct: Decimal::ZERO,
            linear_pct: Decimal::ZERO,
            circulation_ratio: Decimal::ZERO,
            locked_pct: Decimal::ZERO,
            inflation_rate: Decimal::ZERO,
            unlocked_pct_of_supply_at_end: Decimal::ZERO,
        }
    }
}

impl Default for ProjectAnalytics {
    fn default() -> Self {
        Self::new()
    }
}
