use std::collections::BTreeSet;

use serde::Serialize;

use super::ToolError;
use crate::dataset::{Provider, ProviderSource};
use crate::scoring::{calculate_score, score_color, score_label, Criterion};

pub const MIN_SELECTION: usize = 2;
pub const MAX_SELECTION: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparedProvider<'a> {
    pub slug: &'a str,
    pub name: &'a str,
    pub custody_type_label: &'a str,
    pub custody_score: f64,
    pub score_label: &'static str,
    pub score_color: &'static str,
}

/// One criterion across every selected provider, in selection order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionRow {
    pub criterion: Criterion,
    pub label: &'static str,
    pub weight: f64,
    pub scores: Vec<f64>,
    pub best: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureRow<'a> {
    pub feature: &'a str,
    pub present: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparator<'a> {
    pub providers: Vec<ComparedProvider<'a>>,
    pub criteria: Vec<CriterionRow>,
    pub features: Vec<FeatureRow<'a>>,
}

/// Splits a comma-separated `providers` query value.
pub fn parse_selection(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|slug| !slug.is_empty())
        .collect()
}

pub fn compare<'a, S>(source: &'a S, slugs: &[&str]) -> Result<Comparator<'a>, ToolError>
where
    S: ProviderSource + ?Sized,
{
    if !(MIN_SELECTION..=MAX_SELECTION).contains(&slugs.len()) {
        return Err(ToolError::SelectionSize(slugs.len()));
    }

    let mut selected: Vec<&'a Provider> = Vec::with_capacity(slugs.len());
    for slug in slugs {
        if selected.iter().any(|provider| provider.slug == *slug) {
            return Err(ToolError::DuplicateSelection(slug.to_string()));
        }
        let provider = source
            .provider(slug)
            .ok_or_else(|| ToolError::UnknownProvider(slug.to_string()))?;
        selected.push(provider);
    }

    let weights = source.list_weights();
    let providers = selected
        .iter()
        .copied()
        .map(|provider| {
            let custody_score = calculate_score(&provider.scores, weights);
            ComparedProvider {
                slug: &provider.slug,
                name: &provider.name,
                custody_type_label: &provider.custody_type_label,
                custody_score,
                score_label: score_label(custody_score),
                score_color: score_color(custody_score),
            }
        })
        .collect();

    let criteria = Criterion::ordered()
        .into_iter()
        .map(|criterion| {
            let scores: Vec<f64> = selected
                .iter()
                .map(|provider| provider.scores.get(criterion))
                .collect();
            let best = scores.iter().copied().fold(f64::MIN, f64::max);
            CriterionRow {
                criterion,
                label: criterion.label(),
                weight: weights.get(criterion),
                scores,
                best,
            }
        })
        .collect();

    let all_features: BTreeSet<&'a str> = selected
        .iter()
        .copied()
        .flat_map(|provider| provider.features.iter().map(String::as_str))
        .collect();
    let features = all_features
        .into_iter()
        .map(|feature| FeatureRow {
            feature,
            present: selected
                .iter()
                .map(|provider| provider.features.iter().any(|owned| owned == feature))
                .collect(),
        })
        .collect();

    Ok(Comparator {
        providers,
        criteria,
        features,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::{document, provider};
    use crate::dataset::StaticDataset;
    use crate::scoring::ProviderScores;

    fn dataset() -> StaticDataset {
        let mut alpha = provider("alpha", 8.0);
        alpha.features = vec!["Multisig".to_string(), "Cold storage".to_string()];
        alpha.scores = ProviderScores {
            security: 10.0,
            ..ProviderScores::uniform(8.0)
        };
        let mut beta = provider("beta", 6.0);
        beta.features = vec!["Insurance".to_string(), "Cold storage".to_string()];
        let gamma = provider("gamma", 7.0);
        StaticDataset::from_document(document(vec![alpha, beta, gamma])).expect("valid")
    }

    #[test]
    fn builds_rows_in_selection_order() {
        let dataset = dataset();
        let view = compare(&dataset, &["beta", "alpha"]).expect("two providers");

        let slugs: Vec<_> = view.providers.iter().map(|entry| entry.slug).collect();
        assert_eq!(slugs, vec!["beta", "alpha"]);

        let security = &view.criteria[0];
        assert_eq!(security.criterion, Criterion::Security);
        assert_eq!(security.scores, vec![6.0, 10.0]);
        assert_eq!(security.best, 10.0);
        assert_eq!(view.criteria.len(), Criterion::COUNT);
    }

    #[test]
    fn feature_union_is_sorted_with_presence_flags() {
        let dataset = dataset();
        let view = compare(&dataset, &["alpha", "beta"]).expect("two providers");
        let rows: Vec<_> = view
            .features
            .iter()
            .map(|row| (row.feature, row.present.clone()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Cold storage", vec![true, true]),
                ("Insurance", vec![false, true]),
                ("Multisig", vec![true, false]),
            ]
        );
    }

    #[test]
    fn enforces_selection_rules() {
        let dataset = dataset();
        assert!(matches!(compare(&dataset, &["alpha"]), Err(ToolError::SelectionSize(1))));
        assert!(matches!(
            compare(&dataset, &["alpha", "beta", "gamma", "alpha", "beta"]),
            Err(ToolError::SelectionSize(5))
        ));
        assert!(matches!(
            compare(&dataset, &["alpha", "alpha"]),
            Err(ToolError::DuplicateSelection(_))
        ));
        assert!(matches!(
            compare(&dataset, &["alpha", "ghost"]),
            Err(ToolError::UnknownProvider(slug)) if slug == "ghost"
        ));
    }

    #[test]
    fn parses_comma_separated_selection() {
        assert_eq!(parse_selection("alpha, beta,,gamma "), vec!["alpha", "beta", "gamma"]);
        assert!(parse_selection("").is_empty());
    }
}
