use crate::report::{PeakUnlock, ProjectAnalytics};
use core_types::{HUNDRED, MarketSnapshot, ProjectEmissions, UnlockBucket, percent_of, saturating_sum};
use rust_decimal::Decimal;

/// Months covered by the "next 12 months" unlock value.
const NEXT_UNLOCK_HORIZON: usize = 12;

/// A stateless calculator for deriving unlock and supply metrics from a project's emissions.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating project analytics.
    ///
    /// # Arguments
    ///
    /// * `emissions` - The aggregated emission series of the project.
    /// * `market` - Current price and supply figures from a market-data provider.
    ///
    /// # Returns
    ///
    /// A `ProjectAnalytics` report. Degenerate market figures (zero supply) produce
    /// zeroed ratios rather than errors.
    pub fn calculate(&self, emissions: &ProjectEmissions, market: &MarketSnapshot) -> ProjectAnalytics {
        let mut report = ProjectAnalytics::new();

        self.calculate_unlock_values(emissions, market.price, &mut report);
        self.calculate_unlock_split(emissions, market.total_supply, &mut report);
        self.calculate_supply_ratios(emissions, market, &mut report);

        tracing::debug!(
            total_unlock_value = %report.total_unlock_value,
            circulation_ratio = %report.circulation_ratio,
            "Calculated project analytics."
        );

        report
    }

    /// Prices every month's emissions and derives the value totals.
    fn calculate_unlock_values(
        &self,
        emissions: &ProjectEmissions,
        price: Decimal,
        report: &mut ProjectAnalytics,
    ) {
        report.unlock_value_per_month = emissions
            .total_monthly_emissions
            .iter()
            .map(|tokens| tokens.saturating_mul(price))
            .collect();

        report.total_unlock_value = saturating_sum(&report.unlock_value_per_month);
        report.next_12_months_unlock_value =
            saturating_sum(report.unlock_value_per_month.iter().take(NEXT_UNLOCK_HORIZON));

        // First month wins on ties.
        report.peak_unlock = report
            .unlock_value_per_month
            .iter()
            .enumerate()
            .filter(|(_, value)| **value > Decimal::ZERO)
            .fold(None, |peak: Option<PeakUnlock>, (month_index, value)| match peak {
                Some(p) if p.value >= *value => Some(p),
                _ => Some(PeakUnlock {
                    month_index,
                    value: *value,
                }),
            });
    }

    /// Splits the post-TGE tokens of every allocation into cliff and linear buckets.
    fn calculate_unlock_split(
        &self,
        emissions: &ProjectEmissions,
        total_supply: Decimal,
        report: &mut ProjectAnalytics,
    ) {
        for schedule in &emissions.allocations {
            let allocation = &schedule.allocation;
            let bucket = match allocation.unlock_bucket() {
                UnlockBucket::Cliff => &mut report.cliff_tokens,
                UnlockBucket::Linear => &mut report.linear_tokens,
                UnlockBucket::Unclassified => continue,
            };
            *bucket = bucket.saturating_add(allocation.remaining_after_tge());
        }

        // Shares of the whole project supply, not of each allocation.
        report.cliff_pct = percent_of(report.cliff_tokens, total_supply);
        report.linear_pct = percent_of(report.linear_tokens, total_supply);
    }

    /// Calculates circulation, locked share, and the locked/circulating dilution.
    fn calculate_supply_ratios(
        &self,
        emissions: &ProjectEmissions,
        market: &MarketSnapshot,
        report: &mut ProjectAnalytics,
    ) {
        if market.total_supply > Decimal::ZERO {
            report.circulation_ratio = percent_of(market.circulating_supply, market.total_supply);
            report.locked_pct = HUNDRED - report.circulation_ratio;
            report.unlocked_pct_of_supply_at_end =
                percent_of(emissions.total_emitted(), market.total_supply);
        }

        if market.circulating_supply > Decimal::ZERO {
            report.inflation_rate =
                percent_of(market.total_supply - market.circulating_supply, market.circulating_supply);
        }
    }
}
