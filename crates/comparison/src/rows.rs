use crate::report::ProjectReport;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Numeric columns a ranking can be sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "camelCase")]
pub enum RankField {
    Price,
    MarketCap,
    Fdv,
    TotalUnlockValue,
    NextTwelveMonthsUnlockValue,
    UnlockToMarketCap,
    CirculationRatio,
    LockedPct,
    InflationRate,
    CliffPct,
    LinearPct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// One project's line in a cross-project ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub name: String,
    pub symbol: String,
    pub price: Decimal,
    pub market_cap: Decimal,
    pub fdv: Decimal,
    pub total_unlock_value: Decimal,
    pub next_12_months_unlock_value: Decimal,
    /// Next-12-month unlock value as a share of market cap. None when the cap is zero.
    pub unlock_to_market_cap_pct: Option<Decimal>,
    pub circulation_ratio: Decimal,
    pub locked_pct: Decimal,
    pub inflation_rate: Decimal,
    pub cliff_pct: Decimal,
    pub linear_pct: Decimal,
    pub next_cliff_month: Option<usize>,
    pub next_cliff_label: Option<String>,
}

impl ComparisonRow {
    pub fn from_report(project: &ProjectReport) -> Self {
        let analytics = &project.analytics;
        let market_cap = project.market.market_cap_or_derived();
        let unlock_to_market_cap_pct = (market_cap > Decimal::ZERO)
            .then(|| core_types::percent_of(analytics.next_12_months_unlock_value, market_cap));
        let next_cliff = project.emissions.cliff_events.first();

        Self {
            name: project.name.clone(),
            symbol: project.symbol.clone(),
            price: project.market.price,
            market_cap,
            fdv: project.market.fdv_or_derived(),
            total_unlock_value: analytics.total_unlock_value,
            next_12_months_unlock_value: analytics.next_12_months_unlock_value,
            unlock_to_market_cap_pct,
            circulation_ratio: analytics.circulation_ratio,
            locked_pct: analytics.locked_pct,
            inflation_rate: analytics.inflation_rate,
            cliff_pct: analytics.cliff_pct,
            linear_pct: analytics.linear_pct,
            next_cliff_month: next_cliff.map(|e| e.month_index),
            next_cliff_label: next_cliff.map(|e| e.label.clone()),
        }
    }

    /// The value of a sortable column, `None` when the metric is undefined for this row.
    pub fn value(&self, field: RankField) -> Option<Decimal> {
        match field {
            RankField::Price => Some(self.price),
            RankField::MarketCap => Some(self.market_cap),
            RankField::Fdv => Some(self.fdv),
            RankField::TotalUnlockValue => Some(self.total_unlock_value),
            RankField::NextTwelveMonthsUnlockValue => Some(self.next_12_months_unlock_value),
            RankField::UnlockToMarketCap => self.unlock_to_market_cap_pct,
            RankField::CirculationRatio => Some(self.circulation_ratio),
            RankField::LockedPct => Some(self.locked_pct),
            RankField::InflationRate => Some(self.inflation_rate),
            RankField::CliffPct => Some(self.cliff_pct),
            RankField::LinearPct => Some(self.linear_pct),
        }
    }
}

/// Annualized emission inflation of one project over consecutive 12-month windows.
///
/// Year values are `None` when the window does not reach that year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InflationPeriodRow {
    pub name: String,
    pub symbol: String,
    pub year_one: Option<Decimal>,
    pub year_two: Option<Decimal>,
    pub year_three: Option<Decimal>,
    /// The last month's rate, annualized. Not an average.
    pub current: Option<Decimal>,
}

/// Market-wide unlock value released in one month, summed across projects.
///
/// `cliff_value` and `linear_value` cover post-TGE releases only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketEmissionsRow {
    pub month_index: usize,
    pub cliff_value: Decimal,
    pub linear_value: Decimal,
    /// All releases, including TGE-only and immediate allocations.
    pub total_value: Decimal,
    pub projects_unlocking: usize,
}
