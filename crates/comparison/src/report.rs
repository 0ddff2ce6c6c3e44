use analytics::{AnalyticsEngine, ProjectAnalytics};
use core_types::{AllocationInput, MarketSnapshot, ProjectEmissions};
use emissions::EmissionsAggregator;
use serde::Serialize;

/// Everything the comparison read models know about one tracked project.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReport {
    pub name: String,
    pub symbol: String,
    pub market: MarketSnapshot,
    pub emissions: ProjectEmissions,
    pub analytics: ProjectAnalytics,
}

impl ProjectReport {
    /// Runs the aggregation and analytics stages for one project.
    pub fn from_allocations(
        name: impl Into<String>,
        symbol: impl Into<String>,
        market: MarketSnapshot,
        allocations: &[AllocationInput],
        window_months: usize,
    ) -> Self {
        let emissions = EmissionsAggregator::new().aggregate(allocations, window_months);
        let analytics = AnalyticsEngine::new().calculate(&emissions, &market);

        Self {
            name: name.into(),
            symbol: symbol.into(),
            market,
            emissions,
            analytics,
        }
    }
}
