use core_types::{
    AllocationInput, AllocationSchedule, CliffEvent, ProjectEmissions, VestingType, percent_of,
    running_sum,
};
use rust_decimal::Decimal;
use schedule::ScheduleCalculator;

/// Sums the schedules of a project's allocations into a project-level emission picture.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmissionsAggregator {
    calculator: ScheduleCalculator,
}

impl EmissionsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point: computes every allocation's schedule and aggregates them.
    pub fn aggregate(&self, allocations: &[AllocationInput], window_months: usize) -> ProjectEmissions {
        let schedules = self.calculator.calculate_all(allocations, window_months);
        self.aggregate_schedules(schedules, window_months)
    }

    /// Aggregates schedules that were already computed over `window_months`.
    pub fn aggregate_schedules(
        &self,
        schedules: Vec<AllocationSchedule>,
        window_months: usize,
    ) -> ProjectEmissions {
        let mut total_monthly_emissions = vec![Decimal::ZERO; window_months];
        for schedule in &schedules {
            for (total, monthly) in total_monthly_emissions
                .iter_mut()
                .zip(&schedule.monthly_emissions)
            {
                *total = total.saturating_add(*monthly);
            }
        }

        let total_cumulative_supply = running_sum(&total_monthly_emissions);
        let monthly_inflation_rate =
            monthly_inflation_rate(&total_monthly_emissions, &total_cumulative_supply);
        let cliff_events = cliff_events(&schedules, window_months);

        tracing::debug!(
            allocations = schedules.len(),
            window_months,
            cliff_events = cliff_events.len(),
            "Aggregated project emissions."
        );

        ProjectEmissions {
            total_monthly_emissions,
            total_cumulative_supply,
            monthly_inflation_rate,
            cliff_events,
            allocations: schedules,
        }
    }
}

/// Month-over-month growth of cumulative supply, in percent. Month 0 has no base and is 0.
fn monthly_inflation_rate(monthly: &[Decimal], cumulative: &[Decimal]) -> Vec<Decimal> {
    monthly
        .iter()
        .enumerate()
        .map(|(month, emitted)| {
            let prior = month
                .checked_sub(1)
                .map(|m| cumulative[m])
                .unwrap_or(Decimal::ZERO);
            percent_of(*emitted, prior)
        })
        .collect()
}

/// One event per cliff-type allocation whose cliff lands inside `[1, window)` with a
/// non-zero release. Sorted by month; ties keep allocation order.
fn cliff_events(schedules: &[AllocationSchedule], window_months: usize) -> Vec<CliffEvent> {
    let mut events: Vec<CliffEvent> = schedules
        .iter()
        .filter(|s| s.allocation.vesting_type == VestingType::Cliff)
        .filter_map(|s| {
            let month = s.allocation.cliff_months as usize;
            if month == 0 || month >= window_months {
                return None;
            }
            let amount = s.monthly_emissions[month];
            (amount > Decimal::ZERO).then(|| CliffEvent {
                month_index: month,
                label: format!("{} Cliff Unlock", s.allocation.category),
                category: s.allocation.category.clone(),
                amount,
            })
        })
        .collect();

    events.sort_by_key(|e| e.month_index);
    events
}
