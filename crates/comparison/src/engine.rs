use crate::report::ProjectReport;
use crate::rows::{ComparisonRow, InflationPeriodRow, MarketEmissionsRow, RankField, SortDirection};
use core_types::{HUNDRED, UnlockBucket, saturating_sum};
use rust_decimal::Decimal;
use std::cmp::Ordering;

const MONTHS_PER_YEAR: usize = 12;

/// Cross-project read models over a set of tracked projects.
///
/// Each method is an independent pure projection; none of them retain the projects.
#[derive(Debug, Default)]
pub struct ComparisonEngine {}

impl ComparisonEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds one row per project and sorts them on `field`.
    ///
    /// The sort is stable, so ties keep the input order. Rows with an undefined value
    /// for `field` go last in either direction.
    pub fn rank(
        &self,
        projects: &[ProjectReport],
        field: RankField,
        direction: SortDirection,
    ) -> Vec<ComparisonRow> {
        let mut rows: Vec<ComparisonRow> = projects.iter().map(ComparisonRow::from_report).collect();

        rows.sort_by(|a, b| match (a.value(field), b.value(field)) {
            (Some(x), Some(y)) => match direction {
                SortDirection::Ascending => x.cmp(&y),
                SortDirection::Descending => y.cmp(&x),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        tracing::debug!(projects = rows.len(), ?field, ?direction, "Ranked projects.");
        rows
    }

    /// Annualized emission inflation per project for years one to three, plus the
    /// latest month's rate.
    pub fn inflation_periods(&self, projects: &[ProjectReport]) -> Vec<InflationPeriodRow> {
        projects
            .iter()
            .map(|p| {
                let rates = &p.emissions.monthly_inflation_rate;
                InflationPeriodRow {
                    name: p.name.clone(),
                    symbol: p.symbol.clone(),
                    year_one: annualized_year(rates, 0),
                    year_two: annualized_year(rates, 1),
                    year_three: annualized_year(rates, 2),
                    current: rates.last().map(|rate| annualize_monthly_rate(*rate)),
                }
            })
            .collect()
    }

    /// Market-wide unlock value per month, one row for every month of the longest window.
    pub fn market_emissions(&self, projects: &[ProjectReport]) -> Vec<MarketEmissionsRow> {
        let months = projects
            .iter()
            .map(|p| p.emissions.window_months())
            .max()
            .unwrap_or(0);

        (0..months)
            .map(|month| self.market_emissions_at(projects, month))
            .collect()
    }

    /// Market-wide unlock value released in `month_index`, split by unlock bucket.
    ///
    /// Only post-TGE tokens are bucketed. The TGE portion released in month 0 counts
    /// toward `total_value` alone, matching the cliff/linear split of project analytics.
    pub fn market_emissions_at(
        &self,
        projects: &[ProjectReport],
        month_index: usize,
    ) -> MarketEmissionsRow {
        let mut row = MarketEmissionsRow {
            month_index,
            cliff_value: Decimal::ZERO,
            linear_value: Decimal::ZERO,
            total_value: Decimal::ZERO,
            projects_unlocking: 0,
        };

        for project in projects {
            let price = project.market.price;
            let mut unlocking = false;

            for schedule in &project.emissions.allocations {
                let tokens = schedule
                    .monthly_emissions
                    .get(month_index)
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                if tokens.is_zero() {
                    continue;
                }
                unlocking = true;

                let allocation = &schedule.allocation;
                let post_tge_tokens = if month_index == 0 {
                    (tokens - allocation.tge_tokens()).max(Decimal::ZERO)
                } else {
                    tokens
                };
                let post_tge_value = post_tge_tokens.saturating_mul(price);

                match allocation.unlock_bucket() {
                    UnlockBucket::Cliff => {
                        row.cliff_value = row.cliff_value.saturating_add(post_tge_value)
                    }
                    UnlockBucket::Linear => {
                        row.linear_value = row.linear_value.saturating_add(post_tge_value)
                    }
                    UnlockBucket::Unclassified => {}
                }
                row.total_value = row.total_value.saturating_add(tokens.saturating_mul(price));
            }

            if unlocking {
                row.projects_unlocking += 1;
            }
        }

        row
    }
}

/// Converts an average monthly rate (percent) into a compounded annual rate (percent):
/// `((1 + r/100)^12 - 1) * 100`. Saturates at `Decimal::MAX` instead of overflowing.
pub fn annualize_monthly_rate(monthly_rate: Decimal) -> Decimal {
    let growth = Decimal::ONE + monthly_rate / HUNDRED;
    (0..MONTHS_PER_YEAR)
        .try_fold(Decimal::ONE, |acc, _| acc.checked_mul(growth))
        .and_then(|compounded| (compounded - Decimal::ONE).checked_mul(HUNDRED))
        .unwrap_or(Decimal::MAX)
}

/// Annualized average of the rates in year `year` (months `12*year .. 12*year+11`).
fn annualized_year(rates: &[Decimal], year: usize) -> Option<Decimal> {
    let start = year * MONTHS_PER_YEAR;
    if start >= rates.len() {
        return None;
    }
    let end = (start + MONTHS_PER_YEAR).min(rates.len());
    let window = &rates[start..end];

    let average = saturating_sum(window) / Decimal::from(window.len());
    Some(annualize_monthly_rate(average))
}
