use crate::allocation::normalize_project;
use crate::coerce::{amount, decimal, field, text};
use crate::error::NormalizeError;
use chrono::NaiveDate;
use core_types::{AllocationInput, MarketSnapshot};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

/// A project as handed to the engine: identity, market figures, and normalized allocations.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDocument {
    pub name: String,
    pub symbol: String,
    pub tge_date: Option<NaiveDate>,
    pub market: MarketSnapshot,
    pub allocations: Vec<AllocationInput>,
}

/// Parses a project document from JSON text.
///
/// Only syntax errors and a non-object top level are reported; every field inside is
/// coerced leniently.
pub fn parse_project(json: &str) -> Result<ProjectDocument, NormalizeError> {
    let value: Value = serde_json::from_str(json)?;
    project_from_value(&value)
}

/// Builds a `ProjectDocument` from an already parsed JSON value.
pub fn project_from_value(value: &Value) -> Result<ProjectDocument, NormalizeError> {
    let object = value.as_object().ok_or_else(|| {
        NormalizeError::InvalidDocument("expected a JSON object at the top level".to_string())
    })?;

    let market = object
        .get("market")
        .and_then(Value::as_object)
        .map(market_from_object)
        .unwrap_or_default();

    let total_supply = (market.total_supply > Decimal::ZERO).then_some(market.total_supply);
    let allocations = object
        .get("allocations")
        .map(|list| normalize_project(list, total_supply))
        .unwrap_or_default();

    let name = text(field(object, &["name", "projectName", "project_name"]))
        .unwrap_or_else(|| "Unnamed".to_string());
    let symbol = text(field(object, &["symbol", "ticker"])).unwrap_or_default();

    let tge_date = text(field(object, &["tgeDate", "tge_date"])).and_then(|raw| {
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .inspect_err(|e| tracing::debug!(%name, tge_date = %raw, error = %e, "Ignoring unparsable TGE date."))
            .ok()
    });

    Ok(ProjectDocument {
        name,
        symbol,
        tge_date,
        market,
        allocations,
    })
}

fn market_from_object(object: &Map<String, Value>) -> MarketSnapshot {
    MarketSnapshot {
        price: amount(field(object, &["price", "currentPrice", "current_price"])),
        circulating_supply: amount(field(
            object,
            &["circulatingSupply", "circulating_supply", "circulating"],
        )),
        total_supply: amount(field(
            object,
            &["totalSupply", "total_supply", "maxSupply", "max_supply"],
        )),
        market_cap: decimal(field(object, &["marketCap", "market_cap"])).filter(|d| d.is_sign_positive()),
        fdv: decimal(field(object, &["fdv", "fullyDilutedValuation", "fully_diluted_valuation"]))
            .filter(|d| d.is_sign_positive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_a_full_document() {
        let doc = parse_project(
            r#"{
                "name": "Example",
                "symbol": "EXM",
                "tgeDate": "2024-03-01",
                "market": { "price": "0.5", "circulatingSupply": 50000, "total_supply": "100000" },
                "allocations": [
                    { "category": "Team", "percentage": 6, "cliffMonths": 6, "vestingMonths": 6 },
                    { "category": "Investors", "totalTokens": 4000, "tgePercent": 25, "cliffMonths": 3, "vestingType": "cliff" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.name, "Example");
        assert_eq!(doc.symbol, "EXM");
        assert_eq!(doc.tge_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(doc.market.price, dec!(0.5));
        assert_eq!(doc.market.total_supply, dec!(100000));
        assert_eq!(doc.market.market_cap, None);
        assert_eq!(doc.allocations.len(), 2);
        assert_eq!(doc.allocations[0].total_tokens, dec!(6000));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let doc = parse_project(r#"{ "tgeDate": "soon" }"#).unwrap();
        assert_eq!(doc.name, "Unnamed");
        assert_eq!(doc.symbol, "");
        assert_eq!(doc.tge_date, None);
        assert_eq!(doc.market, MarketSnapshot::default());
        assert!(doc.allocations.is_empty());
    }

    #[test]
    fn rejects_invalid_json_and_non_objects() {
        assert!(matches!(parse_project("{ nope"), Err(NormalizeError::Json(_))));
        assert!(matches!(
            parse_project("[1, 2]"),
            Err(NormalizeError::InvalidDocument(_))
        ));
    }
}
