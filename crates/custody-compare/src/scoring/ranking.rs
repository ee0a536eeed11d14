use serde::Serialize;

use super::criteria::CriterionWeights;
use super::engine::calculate_score;
use crate::dataset::Provider;

/// A provider with its computed Custody Score and 1-based position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedProvider<'a> {
    #[serde(flatten)]
    pub provider: &'a Provider,
    pub custody_score: f64,
    pub rank: usize,
}

/// Orders providers by Custody Score, highest first.
///
/// The sort is stable, so equal scores keep their input order and still receive distinct
/// consecutive ranks (1, 2, 3 rather than 1, 1, 3).
pub fn rank<'a, I>(providers: I, weights: &CriterionWeights) -> Vec<RankedProvider<'a>>
where
    I: IntoIterator<Item = &'a Provider>,
{
    let mut scored: Vec<(&'a Provider, f64)> = providers
        .into_iter()
        .map(|provider| (provider, calculate_score(&provider.scores, weights)))
        .collect();

    scored.sort_by(|(_, left), (_, right)| right.total_cmp(left));

    scored
        .into_iter()
        .enumerate()
        .map(|(index, (provider, custody_score))| RankedProvider {
            provider,
            custody_score,
            rank: index + 1,
        })
        .collect()
}
