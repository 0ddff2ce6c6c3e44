use serde::{Deserialize, Serialize};

/// How the post-TGE remainder of an allocation is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VestingType {
    /// Equal monthly installments after the cliff.
    #[default]
    Linear,
    /// A single lump release at the cliff month.
    Cliff,
    /// Everything released at month 0.
    Immediate,
}

impl VestingType {
    /// Parses a vesting type name case-insensitively.
    ///
    /// Returns `None` for anything unrecognised so the caller can decide on a fallback.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "linear" => Some(VestingType::Linear),
            "cliff" => Some(VestingType::Cliff),
            "immediate" | "unlocked" | "none" => Some(VestingType::Immediate),
            _ => None,
        }
    }
}

/// The standard token-holder groups used to compare allocations across projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StandardGroup {
    Team,
    Advisors,
    Investors,
    PublicSale,
    Community,
    Ecosystem,
    Treasury,
    Liquidity,
    Other,
}

impl StandardGroup {
    /// Parses an explicit group tag such as `"investors"` or `"public_sale"`.
    pub fn parse(value: &str) -> Option<Self> {
        let key: String = value
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "team" => Some(StandardGroup::Team),
            "advisors" | "advisor" => Some(StandardGroup::Advisors),
            "investors" | "investor" => Some(StandardGroup::Investors),
            "publicsale" | "public" => Some(StandardGroup::PublicSale),
            "community" => Some(StandardGroup::Community),
            "ecosystem" => Some(StandardGroup::Ecosystem),
            "treasury" => Some(StandardGroup::Treasury),
            "liquidity" => Some(StandardGroup::Liquidity),
            "other" => Some(StandardGroup::Other),
            _ => None,
        }
    }
}

/// The bucket an allocation's post-TGE remainder is counted in for unlock analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnlockBucket {
    Cliff,
    Linear,
    /// Neither rule matched; the allocation only contributes to totals.
    Unclassified,
}
