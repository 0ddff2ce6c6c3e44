use crate::coerce::{amount, decimal, field, months, percent, text};
use crate::group::infer_standard_group;
use core_types::{AllocationInput, HUNDRED, StandardGroup, VestingType, round_tokens};
use rust_decimal::Decimal;
use serde_json::Value;

// Accepted spellings for each allocation field, in lookup order.
const CATEGORY: &[&str] = &["category", "name", "label"];
const STANDARD_GROUP: &[&str] = &["standardGroup", "standard_group", "group"];
const TOTAL_TOKENS: &[&str] = &["totalTokens", "total_tokens", "tokens", "amount"];
const TGE_PERCENT: &[&str] = &["tgePercent", "tge_percent", "tgeUnlock", "tge_unlock", "tge"];
const CLIFF_MONTHS: &[&str] = &["cliffMonths", "cliff_months", "cliff"];
const VESTING_MONTHS: &[&str] = &["vestingMonths", "vesting_months", "vesting", "duration"];
const VESTING_TYPE: &[&str] = &["vestingType", "vesting_type", "type"];
const PERCENTAGE: &[&str] = &["percentage", "percent", "percentOfSupply", "percent_of_supply"];

const UNNAMED: &str = "Unnamed";

/// Adapts one externally shaped allocation into the canonical record.
///
/// # Arguments
///
/// * `value` - A JSON object using camelCase or snake_case keys.
/// * `total_supply` - The project's total supply, used to resolve allocations given
///   only as a percentage of supply.
///
/// # Returns
///
/// `None` when `value` is not an object. Every field-level problem is coerced to a safe
/// default instead: zero for numbers, linear for the vesting type.
pub fn normalize_allocation(value: &Value, total_supply: Option<Decimal>) -> Option<AllocationInput> {
    let object = value.as_object()?;

    let category = text(field(object, CATEGORY)).unwrap_or_else(|| UNNAMED.to_string());
    let percentage = decimal(field(object, PERCENTAGE)).filter(|p| p.is_sign_positive());

    let mut total_tokens = amount(field(object, TOTAL_TOKENS));
    if total_tokens.is_zero() {
        if let (Some(pct), Some(supply)) = (percentage, total_supply) {
            let share = pct.min(HUNDRED) / HUNDRED;
            total_tokens = round_tokens(share.saturating_mul(supply.max(Decimal::ZERO)));
            tracing::debug!(%category, %pct, %total_tokens, "Resolved allocation from percent of supply.");
        }
    }

    let vesting_type = match text(field(object, VESTING_TYPE)) {
        Some(raw) => VestingType::parse(&raw).unwrap_or_else(|| {
            tracing::debug!(%category, vesting_type = %raw, "Unknown vesting type; using linear.");
            VestingType::Linear
        }),
        None => VestingType::Linear,
    };

    let standard_group = text(field(object, STANDARD_GROUP))
        .and_then(|raw| StandardGroup::parse(&raw))
        .or_else(|| infer_standard_group(&category));

    Some(AllocationInput {
        category,
        standard_group,
        total_tokens,
        tge_percent: percent(field(object, TGE_PERCENT)),
        cliff_months: months(field(object, CLIFF_MONTHS)),
        vesting_months: months(field(object, VESTING_MONTHS)),
        vesting_type,
        percentage,
    })
}

/// Adapts a JSON array of allocations, skipping entries that are not objects.
///
/// A document that is not an array yields no allocations.
pub fn normalize_project(value: &Value, total_supply: Option<Decimal>) -> Vec<AllocationInput> {
    let Some(entries) = value.as_array() else {
        tracing::warn!("Allocation list is not an array; treating the project as empty.");
        return Vec::new();
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let allocation = normalize_allocation(entry, total_supply);
            if allocation.is_none() {
                tracing::warn!(index, "Skipping allocation entry that is not an object.");
            }
            allocation
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn normalizes_camel_case_input() {
        let value = json!({
            "category": "Team",
            "totalTokens": 6000,
            "tgePercent": 0,
            "cliffMonths": 6,
            "vestingMonths": 6,
            "vestingType": "linear"
        });
        let a = normalize_allocation(&value, None).unwrap();

        assert_eq!(a.category, "Team");
        assert_eq!(a.standard_group, Some(StandardGroup::Team));
        assert_eq!(a.total_tokens, dec!(6000));
        assert_eq!(a.cliff_months, 6);
        assert_eq!(a.vesting_months, 6);
        assert_eq!(a.vesting_type, VestingType::Linear);
        assert_eq!(a.percentage, None);
    }

    #[rstest]
    #[case(json!({ "name": "Seed", "total_tokens": "4000", "tge_percent": "25", "cliff_months": 3, "vesting_type": "CLIFF" }))]
    #[case(json!({ "label": "Seed", "tokens": 4000, "tge": 25.0, "cliff": "3", "type": "Cliff" }))]
    #[case(json!({ "category": "Seed", "amount": "4,000", "tgeUnlock": "25%", "cliffMonths": 3.4, "vestingType": "cliff" }))]
    fn accepts_alternative_spellings(#[case] value: Value) {
        let a = normalize_allocation(&value, None).unwrap();

        assert_eq!(a.category, "Seed");
        assert_eq!(a.standard_group, Some(StandardGroup::Investors));
        assert_eq!(a.total_tokens, dec!(4000));
        assert_eq!(a.tge_percent, dec!(25));
        assert_eq!(a.cliff_months, 3);
        assert_eq!(a.vesting_months, 0);
        assert_eq!(a.vesting_type, VestingType::Cliff);
    }

    #[test]
    fn degenerate_fields_fall_back_to_defaults() {
        let value = json!({
            "totalTokens": "lots",
            "tgePercent": 250,
            "cliffMonths": -4,
            "vestingMonths": null,
            "vestingType": "quarterly"
        });
        let a = normalize_allocation(&value, None).unwrap();

        assert_eq!(a.category, "Unnamed");
        assert_eq!(a.standard_group, None);
        assert_eq!(a.total_tokens, Decimal::ZERO);
        assert_eq!(a.tge_percent, dec!(100));
        assert_eq!(a.cliff_months, 0);
        assert_eq!(a.vesting_months, 0);
        assert_eq!(a.vesting_type, VestingType::Linear);
    }

    #[test]
    fn resolves_percent_of_supply() {
        let value = json!({ "category": "Ecosystem", "percentage": 12.5, "vestingMonths": 24 });
        let a = normalize_allocation(&value, Some(dec!(1000000))).unwrap();

        assert_eq!(a.total_tokens, dec!(125000));
        assert_eq!(a.percentage, Some(dec!(12.5)));
    }

    #[test]
    fn absolute_tokens_win_over_percent() {
        let value = json!({ "category": "Team", "totalTokens": 10, "percentage": 50 });
        let a = normalize_allocation(&value, Some(dec!(1000))).unwrap();
        assert_eq!(a.total_tokens, dec!(10));
    }

    #[test]
    fn percent_without_supply_stays_zero() {
        let value = json!({ "category": "Team", "percentage": 20 });
        let a = normalize_allocation(&value, None).unwrap();
        assert_eq!(a.total_tokens, Decimal::ZERO);
    }

    #[test]
    fn explicit_group_tag_wins_over_inference() {
        let value = json!({ "category": "Team", "standardGroup": "treasury" });
        let a = normalize_allocation(&value, None).unwrap();
        assert_eq!(a.standard_group, Some(StandardGroup::Treasury));
    }

    #[test]
    fn normalize_project_skips_non_objects() {
        let value = json!([
            { "category": "Team", "totalTokens": 1 },
            42,
            "junk",
            { "category": "Advisors", "totalTokens": 2 }
        ]);
        let allocations = normalize_project(&value, None);

        let names: Vec<&str> = allocations.iter().map(|a| a.category.as_str()).collect();
        assert_eq!(names, vec!["Team", "Advisors"]);
    }

    #[test]
    fn normalize_project_of_non_array_is_empty() {
        assert!(normalize_project(&json!({ "category": "Team" }), None).is_empty());
    }
}
