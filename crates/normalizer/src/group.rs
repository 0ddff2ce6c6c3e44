use core_types::StandardGroup;

/// Word prefixes that identify a standard group, checked in order.
const GROUP_KEYWORDS: &[(StandardGroup, &[&str])] = &[
    (StandardGroup::Team, &["team", "founder", "core", "employee", "contributor"]),
    (StandardGroup::Advisors, &["advisor", "adviser"]),
    (
        StandardGroup::Investors,
        &["investor", "seed", "private", "strategic", "backer", "vc"],
    ),
    (
        StandardGroup::PublicSale,
        &["public", "ido", "ico", "ieo", "sale", "launchpad"],
    ),
    (
        StandardGroup::Community,
        &["community", "airdrop", "reward", "incentive", "staking"],
    ),
    (
        StandardGroup::Ecosystem,
        &["ecosystem", "develop", "grant", "marketing", "partner"],
    ),
    (StandardGroup::Treasury, &["treasury", "foundation", "reserve", "dao"]),
    (StandardGroup::Liquidity, &["liquidity", "market", "exchange", "cex", "dex"]),
];

/// Infers the standard group of an allocation from its category name.
///
/// Matching is by word prefix, so "Seed Round" and "Investors" both map to investors
/// while "Scoreboard" does not match "core".
pub fn infer_standard_group(category: &str) -> Option<StandardGroup> {
    let lowered = category.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    GROUP_KEYWORDS
        .iter()
        .find(|(_, keywords)| {
            words
                .iter()
                .any(|word| keywords.iter().any(|keyword| word.starts_with(keyword)))
        })
        .map(|(group, _)| *group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Team", Some(StandardGroup::Team))]
    #[case("Core Contributors", Some(StandardGroup::Team))]
    #[case("Team & Advisors", Some(StandardGroup::Team))]
    #[case("Advisors", Some(StandardGroup::Advisors))]
    #[case("Seed Round", Some(StandardGroup::Investors))]
    #[case("Private Sale", Some(StandardGroup::Investors))]
    #[case("Public Sale (IDO)", Some(StandardGroup::PublicSale))]
    #[case("Community Airdrop", Some(StandardGroup::Community))]
    #[case("Ecosystem Fund", Some(StandardGroup::Ecosystem))]
    #[case("Marketing", Some(StandardGroup::Ecosystem))]
    #[case("Foundation Treasury", Some(StandardGroup::Treasury))]
    #[case("Liquidity & Market Making", Some(StandardGroup::Liquidity))]
    #[case("Scoreboard", None)]
    #[case("", None)]
    fn infers_groups_from_category(#[case] category: &str, #[case] expected: Option<StandardGroup>) {
        assert_eq!(infer_standard_group(category), expected);
    }
}
