use crate::enums::{StandardGroup, UnlockBucket, VestingType};
use crate::{HUNDRED, round_tokens};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One token-holder category of a project (e.g. "Team", "Investors") and its vesting terms.
///
/// Values are expected to be already normalized: non-negative amounts, `tge_percent`
/// within 0-100. The `normalizer` crate is the boundary that guarantees this.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationInput {
    pub category: String,
    pub standard_group: Option<StandardGroup>,
    /// Absolute number of tokens in this allocation.
    pub total_tokens: Decimal,
    /// Share of the allocation unlocked at month 0, in percent.
    pub tge_percent: Decimal,
    pub cliff_months: u32,
    pub vesting_months: u32,
    pub vesting_type: VestingType,
    /// Share of the total project supply, in percent. Informational only.
    pub percentage: Option<Decimal>,
}

impl AllocationInput {
    /// Tokens released at the TGE, rounded to a whole token.
    ///
    /// Divides before multiplying so the intermediate never exceeds `total_tokens`.
    pub fn tge_tokens(&self) -> Decimal {
        round_tokens((self.total_tokens / HUNDRED).saturating_mul(self.tge_percent))
    }

    /// Tokens left to release after the TGE portion.
    pub fn remaining_after_tge(&self) -> Decimal {
        (self.total_tokens - self.tge_tokens()).max(Decimal::ZERO)
    }

    /// Classifies the post-TGE remainder for cliff-vs-linear analytics.
    ///
    /// A cliff rule is checked first, so a cliff-type allocation that also declares
    /// vesting months is counted as cliff.
    pub fn unlock_bucket(&self) -> UnlockBucket {
        let is_cliff = self.vesting_type == VestingType::Cliff
            || (self.cliff_months > 0 && self.vesting_type != VestingType::Linear);
        let is_linear = self.vesting_type == VestingType::Linear || self.vesting_months > 0;

        if is_cliff {
            UnlockBucket::Cliff
        } else if is_linear {
            UnlockBucket::Linear
        } else {
            UnlockBucket::Unclassified
        }
    }
}

/// An allocation together with its computed month-by-month release series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSchedule {
    #[serde(flatten)]
    pub allocation: AllocationInput,
    /// Whole tokens released in each month of the analysis window.
    pub monthly_emissions: Vec<Decimal>,
    /// Running sum of `monthly_emissions`.
    pub cumulative_supply: Vec<Decimal>,
}

impl AllocationSchedule {
    /// Tokens this allocation releases inside the window.
    pub fn total_emitted(&self) -> Decimal {
        self.cumulative_supply.last().copied().unwrap_or(Decimal::ZERO)
    }
}

/// A discrete lump unlock produced by a cliff-type allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliffEvent {
    pub month_index: usize,
    pub label: String,
    pub category: String,
    pub amount: Decimal,
}

/// The aggregate emission picture of one project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEmissions {
    pub total_monthly_emissions: Vec<Decimal>,
    pub total_cumulative_supply: Vec<Decimal>,
    /// Month-over-month growth of cumulative supply, in percent.
    ///
    /// Not to be confused with the locked/circulating dilution figure in project analytics.
    pub monthly_inflation_rate: Vec<Decimal>,
    pub cliff_events: Vec<CliffEvent>,
    pub allocations: Vec<AllocationSchedule>,
}

impl ProjectEmissions {
    pub fn window_months(&self) -> usize {
        self.total_monthly_emissions.len()
    }

    /// Tokens released across the whole window.
    pub fn total_emitted(&self) -> Decimal {
        self.total_cumulative_supply.last().copied().unwrap_or(Decimal::ZERO)
    }

    /// Cliff events falling in `[from_month, from_month + horizon)`.
    pub fn upcoming_cliff_events(&self, from_month: usize, horizon: usize) -> Vec<&CliffEvent> {
        let until = from_month.saturating_add(horizon);
        self.cliff_events
            .iter()
            .filter(|e| e.month_index >= from_month && e.month_index < until)
            .collect()
    }
}

/// Live market figures for a token, resolved by an external data provider.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub price: Decimal,
    pub circulating_supply: Decimal,
    pub total_supply: Decimal,
    #[serde(default)]
    pub market_cap: Option<Decimal>,
    #[serde(default)]
    pub fdv: Option<Decimal>,
}

impl MarketSnapshot {
    /// The provider's market cap, or `price * circulating_supply` when it was not supplied.
    pub fn market_cap_or_derived(&self) -> Decimal {
        self.market_cap
            .unwrap_or_else(|| self.price.saturating_mul(self.circulating_supply))
    }

    /// The provider's FDV, or `price * total_supply` when it was not supplied.
    pub fn fdv_or_derived(&self) -> Decimal {
        self.fdv
            .unwrap_or_else(|| self.price.saturating_mul(self.total_supply))
    }
}
