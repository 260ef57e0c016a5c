//! Normalizes per-provider outcomes into one merged payload.

use shophound_core::types::{ProviderOutcome, SearchPayload, UnifiedResult};

/// Maximum number of results in a merged payload.
pub const MAX_MERGED_RESULTS: usize = 30;

/// Merges provider outcomes into a single payload.
///
/// Results are concatenated in the order the provider calls were issued and
/// truncated to [`MAX_MERGED_RESULTS`] after concatenation, so later
/// providers may be truncated out when earlier ones fill the cap. There is
/// no cross-provider deduplication: a genuinely different listing from each
/// retailer is a genuinely different result.
///
/// `has_more` is true if any contributing provider reported more pages, even
/// one whose results were truncated out. Intentionally optimistic: callers
/// treat an empty next page as the end-of-results signal.
pub fn merge_outcomes(outcomes: Vec<ProviderOutcome>) -> SearchPayload {
    let has_more = outcomes.iter().any(|outcome| outcome.has_more);

    let mut results: Vec<UnifiedResult> = outcomes
        .into_iter()
        .flat_map(|outcome| outcome.results)
        .collect();
    results.truncate(MAX_MERGED_RESULTS);

    SearchPayload { results, has_more }
}

#[cfg(test)]
mod tests {
    use shophound_core::types::ProviderTag;

    use super::*;

    fn results(tag: ProviderTag, count: usize) -> Vec<UnifiedResult> {
        (0..count)
            .map(|i| UnifiedResult {
                source: tag,
                title: format!("{tag} item {i}"),
                price: None,
                link: format!("https://example.com/{tag}/{i}"),
                thumbnail: None,
                rating: None,
                reviews: None,
            })
            .collect()
    }

    #[test]
    fn concatenates_in_call_order() {
        let merged = merge_outcomes(vec![
            ProviderOutcome::new(results(ProviderTag::Amazon, 2), false),
            ProviderOutcome::new(results(ProviderTag::BestBuy, 2), false),
        ]);

        let sources: Vec<ProviderTag> = merged.results.iter().map(|r| r.source).collect();
        assert_eq!(
            sources,
            vec![
                ProviderTag::Amazon,
                ProviderTag::Amazon,
                ProviderTag::BestBuy,
                ProviderTag::BestBuy
            ]
        );
    }

    #[test]
    fn caps_at_thirty_after_concatenation() {
        let merged = merge_outcomes(vec![
            ProviderOutcome::new(results(ProviderTag::Amazon, 25), false),
            ProviderOutcome::new(results(ProviderTag::BestBuy, 25), false),
        ]);

        assert_eq!(merged.results.len(), MAX_MERGED_RESULTS);
        // Earlier providers win the cap; Best Buy loses 20 of its 25.
        assert_eq!(
            merged
                .results
                .iter()
                .filter(|r| r.source == ProviderTag::Amazon)
                .count(),
            25
        );
        assert_eq!(
            merged
                .results
                .iter()
                .filter(|r| r.source == ProviderTag::BestBuy)
                .count(),
            5
        );
    }

    #[test]
    fn has_more_survives_truncation() {
        // The second provider's results are fully truncated out, but its
        // pagination signal still counts.
        let merged = merge_outcomes(vec![
            ProviderOutcome::new(results(ProviderTag::Amazon, 30), false),
            ProviderOutcome::new(results(ProviderTag::BestBuy, 10), true),
        ]);

        assert_eq!(merged.results.len(), 30);
        assert!(merged.results.iter().all(|r| r.source == ProviderTag::Amazon));
        assert!(merged.has_more);
    }

    #[test]
    fn empty_outcomes_merge_to_empty_payload() {
        let merged = merge_outcomes(vec![ProviderOutcome::empty(), ProviderOutcome::empty()]);
        assert!(merged.results.is_empty());
        assert!(!merged.has_more);
    }

    #[test]
    fn no_deduplication_across_providers() {
        let mut amazon = results(ProviderTag::Amazon, 1);
        amazon[0].title = "Same Listing".to_string();
        let mut bestbuy = results(ProviderTag::BestBuy, 1);
        bestbuy[0].title = "Same Listing".to_string();

        let merged = merge_outcomes(vec![
            ProviderOutcome::new(amazon, false),
            ProviderOutcome::new(bestbuy, false),
        ]);

        assert_eq!(merged.results.len(), 2);
    }
}
