//! Custody Score engine: weighted scoring, ranking, and canonical pairwise comparisons.

mod comparisons;
mod criteria;
mod engine;
mod ranking;

pub use comparisons::{
    canonical_order, canonical_slug, pair_count, split_pair_slug, ComparisonIndex,
    ComparisonPair, HeadToHead, PairResolution,
};
pub use criteria::{Criterion, CriterionWeights, ProviderScores};
pub use engine::{
    breakdown, calculate_score, highest_category, lowest_category, round_one_decimal,
    score_color, score_color_class, score_label, CriterionContribution, ScoreBand,
};
pub use ranking::{rank, RankedProvider};
