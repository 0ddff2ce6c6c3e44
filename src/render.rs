//! Terminal tables for the command handlers.

use crate::loader::MissingProject;
use chrono::NaiveDate;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use comparison::{ComparisonRow, InflationPeriodRow, MarketEmissionsRow, ProjectReport};
use core_types::{ProjectEmissions, month_label};
use rust_decimal::{Decimal, RoundingStrategy};

fn new_table(header: Vec<String>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header);
    table
}

fn number(value: Decimal) -> Cell {
    Cell::new(display(value)).set_alignment(CellAlignment::Right)
}

fn display(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

fn optional(value: Option<Decimal>) -> Cell {
    match value {
        Some(v) => number(v),
        None => Cell::new("-").set_alignment(CellAlignment::Right),
    }
}

/// One row per month: each allocation's release, the total, the running supply, and the MoM rate.
pub fn schedule_table(emissions: &ProjectEmissions, tge_date: Option<NaiveDate>) -> Table {
    let mut header = vec!["Month".to_string()];
    header.extend(emissions.allocations.iter().map(|s| s.allocation.category.clone()));
    header.extend(["Total".to_string(), "Cumulative".to_string(), "Inflation %".to_string()]);

    let mut table = new_table(header);
    for month in 0..emissions.window_months() {
        let mut row = vec![Cell::new(month_label(tge_date, month))];
        row.extend(
            emissions
                .allocations
                .iter()
                .map(|s| number(s.monthly_emissions[month])),
        );
        row.push(number(emissions.total_monthly_emissions[month]));
        row.push(number(emissions.total_cumulative_supply[month]));
        row.push(number(emissions.monthly_inflation_rate[month]));
        table.add_row(row);
    }
    table
}

pub fn cliff_events_table(emissions: &ProjectEmissions, tge_date: Option<NaiveDate>) -> Table {
    let mut table = new_table(vec!["Month".into(), "Category".into(), "Amount".into()]);
    for event in &emissions.cliff_events {
        table.add_row(vec![
            Cell::new(month_label(tge_date, event.month_index)),
            Cell::new(&event.category),
            number(event.amount),
        ]);
    }
    table
}

/// Key/value summary of one project's analytics.
pub fn analytics_table(report: &ProjectReport, tge_date: Option<NaiveDate>) -> Table {
    let analytics = &report.analytics;
    let peak = analytics
        .peak_unlock
        .as_ref()
        .map(|p| format!("{} ({})", display(p.value), month_label(tge_date, p.month_index)))
        .unwrap_or_else(|| "-".to_string());

    let mut table = new_table(vec!["Metric".into(), "Value".into()]);
    let rows: Vec<(&str, Cell)> = vec![
        ("Price", number(report.market.price)),
        ("Market cap", number(report.market.market_cap_or_derived())),
        ("FDV", number(report.market.fdv_or_derived())),
        ("Total unlock value", number(analytics.total_unlock_value)),
        ("Next 12 months unlock value", number(analytics.next_12_months_unlock_value)),
        ("Peak unlock", Cell::new(peak)),
        ("Cliff tokens", number(analytics.cliff_tokens)),
        ("Linear tokens", number(analytics.linear_tokens)),
        ("Cliff % of supply", number(analytics.cliff_pct)),
        ("Linear % of supply", number(analytics.linear_pct)),
        ("Circulation ratio %", number(analytics.circulation_ratio)),
        ("Locked %", number(analytics.locked_pct)),
        ("Inflation rate %", number(analytics.inflation_rate)),
        ("Unlocked % of supply at end", number(analytics.unlocked_pct_of_supply_at_end)),
    ];
    for (metric, value) in rows {
        table.add_row(vec![Cell::new(metric), value]);
    }
    table
}

pub fn ranking_table(rows: &[ComparisonRow]) -> Table {
    let mut table = new_table(
        [
            "#", "Project", "Price", "Market cap", "FDV", "Unlock value", "Next 12m",
            "Next 12m / MC %", "Circulating %", "Locked %", "Inflation %", "Cliff %",
            "Linear %", "Next cliff",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
    );
    for (rank, row) in rows.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(format!("{} ({})", row.name, row.symbol)),
            number(row.price),
            number(row.market_cap),
            number(row.fdv),
            number(row.total_unlock_value),
            number(row.next_12_months_unlock_value),
            optional(row.unlock_to_market_cap_pct),
            number(row.circulation_ratio),
            number(row.locked_pct),
            number(row.inflation_rate),
            number(row.cliff_pct),
            number(row.linear_pct),
            Cell::new(row.next_cliff_label.as_deref().unwrap_or("-")),
        ]);
    }
    table
}

pub fn inflation_table(rows: &[InflationPeriodRow]) -> Table {
    let mut table = new_table(
        ["Project", "Year 1", "Year 2", "Year 3", "Current"]
            .into_iter()
            .map(String::from)
            .collect(),
    );
    for row in rows {
        table.add_row(vec![
            Cell::new(format!("{} ({})", row.name, row.symbol)),
            optional(row.year_one),
            optional(row.year_two),
            optional(row.year_three),
            optional(row.current),
        ]);
    }
    table
}

pub fn market_table(rows: &[MarketEmissionsRow]) -> Table {
    let mut table = new_table(
        ["Month", "Cliff", "Linear", "Total", "Projects"]
            .into_iter()
            .map(String::from)
            .collect(),
    );
    for row in rows {
        table.add_row(vec![
            Cell::new(month_label(None, row.month_index)),
            number(row.cliff_value),
            number(row.linear_value),
            number(row.total_value),
            Cell::new(row.projects_unlocking).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn missing_table(missing: &[MissingProject]) -> Table {
    let mut table = new_table(vec!["Path".into(), "Reason".into()]);
    for project in missing {
        table.add_row(vec![
            Cell::new(project.path.display()),
            Cell::new(&project.reason),
        ]);
    }
    table
}
