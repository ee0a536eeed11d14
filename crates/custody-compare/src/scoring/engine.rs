use serde::Serialize;

use super::criteria::{Criterion, CriterionWeights, ProviderScores};

/// Weighted Custody Score rounded half-up to one decimal place.
pub fn calculate_score(scores: &ProviderScores, weights: &CriterionWeights) -> f64 {
    let weighted: f64 = Criterion::ordered()
        .into_iter()
        .map(|criterion| scores.get(criterion) * weights.get(criterion))
        .sum();
    round_one_decimal(weighted)
}

/// Rounds half-up (toward positive infinity) at the first decimal.
pub fn round_one_decimal(raw: f64) -> f64 {
    (raw * 10.0 + 0.5).floor() / 10.0
}

/// Five ordered score bands. Label, color, and class tokens all derive from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    VeryGood,
    Good,
    Fair,
    BelowAverage,
}

impl ScoreBand {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Excellent,
            Self::VeryGood,
            Self::Good,
            Self::Fair,
            Self::BelowAverage,
        ]
    }

    pub fn from_score(score: f64) -> Self {
        if score >= 9.0 {
            Self::Excellent
        } else if score >= 8.0 {
            Self::VeryGood
        } else if score >= 7.0 {
            Self::Good
        } else if score >= 6.0 {
            Self::Fair
        } else {
            Self::BelowAverage
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::BelowAverage => "Below Average",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Excellent => "#059669",
            Self::VeryGood => "#0284C7",
            Self::Good => "#D97706",
            Self::Fair => "#EA580C",
            Self::BelowAverage => "#DC2626",
        }
    }

    pub const fn color_class(self) -> &'static str {
        match self {
            Self::Excellent => "bg-score-green text-white",
            Self::VeryGood => "bg-score-blue text-white",
            Self::Good => "bg-score-yellow text-black",
            Self::Fair => "bg-score-orange text-white",
            Self::BelowAverage => "bg-score-red text-white",
        }
    }
}

pub fn score_label(score: f64) -> &'static str {
    ScoreBand::from_score(score).label()
}

pub fn score_color(score: f64) -> &'static str {
    ScoreBand::from_score(score).color()
}

pub fn score_color_class(score: f64) -> &'static str {
    ScoreBand::from_score(score).color_class()
}

/// First criterion holding the strict maximum, scanning in criteria order from 0.
pub fn highest_category(scores: &ProviderScores) -> Option<Criterion> {
    let mut max = 0.0;
    let mut best = None;
    for (criterion, value) in scores.iter() {
        if value > max {
            max = value;
            best = Some(criterion);
        }
    }
    best
}

/// First criterion holding the strict minimum, scanning in criteria order from 11.
pub fn lowest_category(scores: &ProviderScores) -> Option<Criterion> {
    let mut min = 11.0;
    let mut worst = None;
    for (criterion, value) in scores.iter() {
        if value < min {
            min = value;
            worst = Some(criterion);
        }
    }
    worst
}

/// One row of a score breakdown table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionContribution {
    pub criterion: Criterion,
    pub label: &'static str,
    pub score: f64,
    pub weight: f64,
    pub weighted: f64,
}

pub fn breakdown(
    scores: &ProviderScores,
    weights: &CriterionWeights,
) -> Vec<CriterionContribution> {
    scores
        .iter()
        .map(|(criterion, score)| {
            let weight = weights.get(criterion);
            CriterionContribution {
                criterion,
                label: criterion.label(),
                score,
                weight,
                weighted: score * weight,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights() -> CriterionWeights {
        CriterionWeights {
            security: 0.2,
            insurance: 0.15,
            regulatory: 0.15,
            fee_transparency: 0.1,
            track_record: 0.1,
            withdrawal_flexibility: 0.1,
            reporting_audit: 0.1,
            counterparty_diversification: 0.1,
        }
    }

    #[test]
    fn perfect_and_zero_scores_hit_the_bounds() {
        assert_eq!(calculate_score(&ProviderScores::uniform(10.0), &weights()), 10.0);
        assert_eq!(calculate_score(&ProviderScores::uniform(0.0), &weights()), 0.0);
        assert_eq!(
            calculate_score(&ProviderScores::uniform(10.0), &CriterionWeights::equal()),
            10.0
        );
    }

    #[test]
    fn weighted_sum_uses_every_criterion() {
        let scores = ProviderScores {
            security: 9.0,
            insurance: 8.0,
            regulatory: 8.0,
            fee_transparency: 6.0,
            track_record: 5.0,
            withdrawal_flexibility: 4.0,
            reporting_audit: 3.0,
            counterparty_diversification: 2.0,
        };
        // 1.8 + 1.2 + 1.2 + 0.6 + 0.5 + 0.4 + 0.3 + 0.2
        assert_eq!(calculate_score(&scores, &weights()), 6.2);
    }

    #[test]
    fn rounds_half_up_at_one_decimal() {
        assert_eq!(round_one_decimal(7.849999), 7.8);
        assert_eq!(round_one_decimal(7.85), 7.9);
        assert_eq!(round_one_decimal(7.0), 7.0);
        assert_eq!(round_one_decimal(-0.05), 0.0);
    }

    #[test]
    fn label_thresholds_are_inclusive_lower_bounds() {
        assert_eq!(score_label(9.0), "Excellent");
        assert_eq!(score_label(8.99), "Very Good");
        assert_eq!(score_label(8.0), "Very Good");
        assert_eq!(score_label(7.0), "Good");
        assert_eq!(score_label(6.0), "Fair");
        assert_eq!(score_label(5.99), "Below Average");
        assert_eq!(score_label(0.0), "Below Average");
        assert_eq!(score_label(-3.0), "Below Average");
    }

    #[test]
    fn label_and_color_share_bands() {
        for step in 10..=100 {
            let score = f64::from(step) / 10.0;
            let band = ScoreBand::from_score(score);
            let label_index = ScoreBand::ordered()
                .iter()
                .position(|candidate| candidate.label() == score_label(score))
                .expect("label maps to a band");
            let color_index = ScoreBand::ordered()
                .iter()
                .position(|candidate| candidate.color() == score_color(score))
                .expect("color maps to a band");
            assert_eq!(label_index, color_index, "band mismatch at {score}");
            assert_eq!(ScoreBand::ordered()[label_index], band);
            assert_eq!(score_color_class(score), band.color_class());
        }
    }

    #[test]
    fn highest_and_lowest_keep_first_occurrence() {
        let scores = ProviderScores {
            security: 9.0,
            insurance: 9.0,
            regulatory: 5.0,
            fee_transparency: 1.0,
            track_record: 1.0,
            withdrawal_flexibility: 1.0,
            reporting_audit: 1.0,
            counterparty_diversification: 1.0,
        };
        assert_eq!(highest_category(&scores), Some(Criterion::Security));
        assert_eq!(lowest_category(&scores), Some(Criterion::FeeTransparency));
        assert_eq!(
            lowest_category(&scores).map(Criterion::label),
            Some("Fee Transparency")
        );
    }

    #[test]
    fn sentinels_yield_none_outside_valid_range() {
        assert_eq!(highest_category(&ProviderScores::uniform(0.0)), None);
        assert_eq!(lowest_category(&ProviderScores::uniform(11.0)), None);
        assert_eq!(
            highest_category(&ProviderScores::uniform(4.0)),
            Some(Criterion::Security)
        );
    }

    #[test]
    fn breakdown_sums_to_unrounded_score() {
        let rows = breakdown(&ProviderScores::uniform(7.0), &weights());
        assert_eq!(rows.len(), Criterion::COUNT);
        assert_eq!(rows[3].criterion, Criterion::FeeTransparency);
        let total: f64 = rows.iter().map(|row| row.weighted).sum();
        assert!((total - 7.0).abs() < 1e-9);
    }
}
