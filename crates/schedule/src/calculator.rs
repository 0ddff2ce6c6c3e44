use core_types::{AllocationInput, AllocationSchedule, VestingType, round_tokens, running_sum};
use rust_decimal::Decimal;

/// A stateless calculator that turns one allocation's vesting terms into a monthly
/// release series.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScheduleCalculator {}

impl ScheduleCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the release series of one allocation over `window_months` months.
    ///
    /// # Arguments
    ///
    /// * `allocation` - The normalized vesting terms of one token-holder category.
    /// * `window_months` - Length of the analysis window. Releases scheduled at or
    ///   beyond it are dropped.
    ///
    /// # Returns
    ///
    /// An `AllocationSchedule` whose `monthly_emissions` are whole tokens and whose
    /// `cumulative_supply` is their running sum.
    pub fn calculate(&self, allocation: &AllocationInput, window_months: usize) -> AllocationSchedule {
        let mut raw = vec![Decimal::ZERO; window_months];

        if window_months > 0 && allocation.total_tokens > Decimal::ZERO {
            self.distribute(allocation, &mut raw);
        }

        // Each month is rounded on its own; sums across allocations may drift by a token.
        let monthly_emissions: Vec<Decimal> = raw.into_iter().map(round_tokens).collect();
        let cumulative_supply = running_sum(&monthly_emissions);

        tracing::trace!(
            category = %allocation.category,
            window_months,
            emitted = %cumulative_supply.last().copied().unwrap_or_default(),
            "Computed allocation schedule."
        );

        AllocationSchedule {
            allocation: allocation.clone(),
            monthly_emissions,
            cumulative_supply,
        }
    }

    /// Computes schedules for a list of allocations, preserving input order.
    pub fn calculate_all(
        &self,
        allocations: &[AllocationInput],
        window_months: usize,
    ) -> Vec<AllocationSchedule> {
        allocations
            .iter()
            .map(|a| self.calculate(a, window_months))
            .collect()
    }

    /// Places the unrounded token amounts into `raw`. `raw` is non-empty.
    fn distribute(&self, allocation: &AllocationInput, raw: &mut [Decimal]) {
        let cliff = allocation.cliff_months as usize;
        let vesting = allocation.vesting_months as usize;

        match allocation.vesting_type {
            VestingType::Immediate => raw[0] += allocation.total_tokens,
            _ if cliff == 0 && vesting == 0 => raw[0] += allocation.total_tokens,
            VestingType::Cliff => {
                raw[0] += allocation.tge_tokens();
                release_lump(raw, cliff, allocation.remaining_after_tge());
            }
            VestingType::Linear if vesting == 0 => {
                raw[0] += allocation.tge_tokens();
                release_lump(raw, cliff, allocation.remaining_after_tge());
            }
            VestingType::Linear => {
                raw[0] += allocation.tge_tokens();
                let installment = allocation.remaining_after_tge() / Decimal::from(vesting);
                // An installment landing on month 0 adds to the TGE amount.
                for slot in raw.iter_mut().skip(cliff).take(vesting) {
                    *slot += installment;
                }
            }
        }
    }
}

/// Adds a single lump at `month`, or drops it when the month is outside the window.
fn release_lump(raw: &mut [Decimal], month: usize, amount: Decimal) {
    match raw.get_mut(month) {
        Some(slot) => *slot += amount,
        None => tracing::trace!(month, %amount, "Lump release falls outside the window; dropped."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn allocation(
        total_tokens: Decimal,
        tge_percent: Decimal,
        cliff_months: u32,
        vesting_months: u32,
        vesting_type: VestingType,
    ) -> AllocationInput {
        AllocationInput {
            category: "Team".to_string(),
            total_tokens,
            tge_percent,
            cliff_months,
            vesting_months,
            vesting_type,
            ..Default::default()
        }
    }

    #[test]
    fn linear_after_cliff() {
        let a = allocation(dec!(12000), dec!(0), 6, 12, VestingType::Linear);
        let s = ScheduleCalculator::new().calculate(&a, 24);

        assert_eq!(s.monthly_emissions.len(), 24);
        assert_eq!(s.monthly_emissions[5], dec!(0));
        assert_eq!(s.monthly_emissions[6], dec!(1000));
        assert_eq!(s.monthly_emissions[17], dec!(1000));
        assert_eq!(s.monthly_emissions[18], dec!(0));
        assert_eq!(s.cumulative_supply[17], dec!(12000));
        assert_eq!(s.cumulative_supply[23], dec!(12000));
    }

    #[test]
    fn cliff_lump_with_tge() {
        let a = allocation(dec!(10000), dec!(10), 12, 0, VestingType::Cliff);
        let s = ScheduleCalculator::new().calculate(&a, 24);

        assert_eq!(s.monthly_emissions[0], dec!(1000));
        assert_eq!(s.monthly_emissions[12], dec!(9000));
        assert_eq!(s.cumulative_supply[11], dec!(1000));
        assert_eq!(s.cumulative_supply[12], dec!(10000));
    }

    #[test]
    fn immediate_releases_everything_at_month_zero() {
        let a = allocation(dec!(5000), dec!(0), 0, 0, VestingType::Immediate);
        let s = ScheduleCalculator::new().calculate(&a, 12);

        assert_eq!(s.monthly_emissions[0], dec!(5000));
        assert!(s.monthly_emissions[1..].iter().all(|m| m.is_zero()));
    }

    #[test]
    fn immediate_ignores_tge_and_cliff() {
        let a = allocation(dec!(5000), dec!(20), 6, 12, VestingType::Immediate);
        let s = ScheduleCalculator::new().calculate(&a, 12);
        assert_eq!(s.monthly_emissions[0], dec!(5000));
        assert_eq!(s.total_emitted(), dec!(5000));
    }

    #[test]
    fn no_cliff_and_no_vesting_collapses_to_immediate() {
        let a = allocation(dec!(800), dec!(25), 0, 0, VestingType::Linear);
        let s = ScheduleCalculator::new().calculate(&a, 6);
        assert_eq!(s.monthly_emissions[0], dec!(800));
    }

    #[test]
    fn cliff_type_without_cliff_months_releases_remainder_at_month_zero() {
        let a = allocation(dec!(1000), dec!(10), 0, 12, VestingType::Cliff);
        let s = ScheduleCalculator::new().calculate(&a, 12);
        assert_eq!(s.monthly_emissions[0], dec!(1000));
        assert_eq!(s.total_emitted(), dec!(1000));
    }

    #[test]
    fn linear_without_vesting_months_is_a_lump_at_the_cliff() {
        let a = allocation(dec!(1000), dec!(0), 4, 0, VestingType::Linear);
        let s = ScheduleCalculator::new().calculate(&a, 12);
        assert_eq!(s.monthly_emissions[4], dec!(1000));
        assert_eq!(s.cumulative_supply[3], dec!(0));
    }

    #[test]
    fn linear_installment_on_month_zero_adds_to_tge() {
        let a = allocation(dec!(1200), dec!(50), 0, 6, VestingType::Linear);
        let s = ScheduleCalculator::new().calculate(&a, 12);

        assert_eq!(s.monthly_emissions[0], dec!(700));
        assert_eq!(s.monthly_emissions[1], dec!(100));
        assert_eq!(s.monthly_emissions[5], dec!(100));
        assert_eq!(s.monthly_emissions[6], dec!(0));
        assert_eq!(s.total_emitted(), dec!(1200));
    }

    #[test]
    fn linear_vesting_truncated_by_window() {
        let a = allocation(dec!(1000), dec!(0), 2, 10, VestingType::Linear);
        let s = ScheduleCalculator::new().calculate(&a, 6);
        assert_eq!(s.total_emitted(), dec!(400));
    }

    #[rstest]
    #[case(VestingType::Linear, 12, 6)]
    #[case(VestingType::Linear, 24, 0)]
    #[case(VestingType::Cliff, 12, 0)]
    #[case(VestingType::Cliff, 30, 12)]
    fn cliff_beyond_window_emits_nothing(
        #[case] vesting_type: VestingType,
        #[case] cliff: u32,
        #[case] vesting: u32,
    ) {
        let a = allocation(dec!(10000), dec!(0), cliff, vesting, vesting_type);
        let s = ScheduleCalculator::new().calculate(&a, 12);
        assert!(s.monthly_emissions.iter().all(|m| m.is_zero()));
        assert!(s.cumulative_supply.iter().all(|c| c.is_zero()));
    }

    #[test]
    fn cliff_beyond_window_still_pays_tge() {
        let a = allocation(dec!(10000), dec!(5), 36, 0, VestingType::Cliff);
        let s = ScheduleCalculator::new().calculate(&a, 24);
        assert_eq!(s.monthly_emissions[0], dec!(500));
        assert_eq!(s.total_emitted(), dec!(500));
    }

    #[rstest]
    #[case(VestingType::Linear, dec!(0), 3, 7)]
    #[case(VestingType::Linear, dec!(15), 0, 9)]
    #[case(VestingType::Cliff, dec!(20), 5, 0)]
    #[case(VestingType::Immediate, dec!(0), 0, 0)]
    fn zero_tokens_yield_all_zero_series(
        #[case] vesting_type: VestingType,
        #[case] tge: Decimal,
        #[case] cliff: u32,
        #[case] vesting: u32,
    ) {
        let a = allocation(Decimal::ZERO, tge, cliff, vesting, vesting_type);
        let s = ScheduleCalculator::new().calculate(&a, 24);
        assert_eq!(s.monthly_emissions, vec![Decimal::ZERO; 24]);
        assert_eq!(s.cumulative_supply, vec![Decimal::ZERO; 24]);
    }

    #[rstest]
    #[case(VestingType::Linear, dec!(7.5), 3, 7)]
    #[case(VestingType::Linear, dec!(0), 0, 36)]
    #[case(VestingType::Cliff, dec!(33), 9, 0)]
    #[case(VestingType::Immediate, dec!(0), 0, 0)]
    fn cumulative_supply_is_monotonic_and_non_negative(
        #[case] vesting_type: VestingType,
        #[case] tge: Decimal,
        #[case] cliff: u32,
        #[case] vesting: u32,
    ) {
        let a = allocation(dec!(987654), tge, cliff, vesting, vesting_type);
        let s = ScheduleCalculator::new().calculate(&a, 48);

        assert!(s.monthly_emissions.iter().all(|m| *m >= Decimal::ZERO));
        assert!(s.cumulative_supply.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn conservation_within_rounding_drift() {
        let a = allocation(dec!(10000), dec!(0), 2, 3, VestingType::Linear);
        let s = ScheduleCalculator::new().calculate(&a, 12);

        // 3333.33.. per month rounds down to 3333 three times.
        assert_eq!(s.monthly_emissions[2], dec!(3333));
        let drift = (dec!(10000) - s.cumulative_supply[4]).abs();
        assert!(drift <= Decimal::from(3));
    }

    #[test]
    fn calculation_is_deterministic() {
        let calculator = ScheduleCalculator::new();
        let a = allocation(dec!(77777), dec!(12), 5, 17, VestingType::Linear);
        assert_eq!(calculator.calculate(&a, 36), calculator.calculate(&a, 36));
    }

    #[test]
    fn empty_window_yields_empty_series() {
        let a = allocation(dec!(1000), dec!(10), 0, 12, VestingType::Linear);
        let s = ScheduleCalculator::new().calculate(&a, 0);
        assert!(s.monthly_emissions.is_empty());
        assert!(s.cumulative_supply.is_empty());
    }
}
