use custody_compare::dataset::{Provider, ProviderSource, StaticDataset};
use custody_compare::scoring::{
    calculate_score, canonical_order, canonical_slug, pair_count, rank, ComparisonIndex,
    CriterionWeights, PairResolution, ProviderScores,
};
use proptest::prelude::*;

fn bundled() -> StaticDataset {
    StaticDataset::bundled().expect("bundled dataset is valid")
}

fn rating() -> impl Strategy<Value = f64> {
    (2u8..=20).prop_map(|half_points| f64::from(half_points) / 2.0)
}

fn scores() -> impl Strategy<Value = ProviderScores> {
    prop::array::uniform8(rating()).prop_map(|values| ProviderScores {
        security: values[0],
        insurance: values[1],
        regulatory: values[2],
        fee_transparency: values[3],
        track_record: values[4],
        withdrawal_flexibility: values[5],
        reporting_audit: values[6],
        counterparty_diversification: values[7],
    })
}

/// Providers cloned from a real record with unique slugs and generated ratings.
fn providers(max: usize) -> impl Strategy<Value = Vec<Provider>> {
    prop::collection::vec(scores(), 0..max).prop_map(|all_scores| {
        let template = bundled().list_providers()[0].clone();
        all_scores
            .into_iter()
            .enumerate()
            .map(|(index, scores)| Provider {
                id: format!("id-{index}"),
                slug: format!("provider-{index}"),
                name: format!("Provider {index}"),
                scores,
                ..template.clone()
            })
            .collect()
    })
}

fn weights() -> CriterionWeights {
    *bundled().list_weights()
}

proptest! {
    #[test]
    fn custody_score_stays_on_rating_scale(scores in scores()) {
        let score = calculate_score(&scores, &weights());
        prop_assert!((1.0..=10.0).contains(&score));
        prop_assert_eq!((score * 10.0).round() / 10.0, score);
    }

    #[test]
    fn canonical_order_ignores_argument_order(providers in providers(6)) {
        let weights = weights();
        for a in &providers {
            for b in &providers {
                let forward = canonical_order(a, b, &weights);
                let backward = canonical_order(b, a, &weights);
                prop_assert_eq!(forward.0.slug.as_str(), backward.0.slug.as_str());
                prop_assert_eq!(forward.1.slug.as_str(), backward.1.slug.as_str());
                prop_assert_eq!(
                    canonical_slug(a, b, &weights),
                    canonical_slug(b, a, &weights)
                );
            }
        }
    }

    #[test]
    fn ranking_is_a_sorted_permutation(providers in providers(12)) {
        let weights = weights();
        let ranked = rank(&providers, &weights);

        prop_assert_eq!(ranked.len(), providers.len());
        let mut ranked_slugs: Vec<_> =
            ranked.iter().map(|entry| entry.provider.slug.clone()).collect();
        let mut input_slugs: Vec<_> =
            providers.iter().map(|provider| provider.slug.clone()).collect();
        ranked_slugs.sort();
        input_slugs.sort();
        prop_assert_eq!(ranked_slugs, input_slugs);

        for (index, entry) in ranked.iter().enumerate() {
            prop_assert_eq!(entry.rank, index + 1);
        }
        for window in ranked.windows(2) {
            prop_assert!(window[0].custody_score >= window[1].custody_score);
        }
    }

    #[test]
    fn ranking_keeps_input_order_for_ties(providers in providers(12)) {
        let weights = weights();
        let position = |slug: &str| {
            providers
                .iter()
                .position(|provider| provider.slug == slug)
                .unwrap_or(usize::MAX)
        };
        let ranked = rank(&providers, &weights);
        for window in ranked.windows(2) {
            if window[0].custody_score == window[1].custody_score {
                prop_assert!(
                    position(&window[0].provider.slug) < position(&window[1].provider.slug)
                );
            }
        }
        prop_assert_eq!(rank(&providers, &weights), ranked);
    }

    #[test]
    fn every_pair_resolves_in_both_directions(providers in providers(8)) {
        let weights = weights();
        let index = ComparisonIndex::new(&providers, &weights);
        let pairs = index.all_pairs();
        prop_assert_eq!(pairs.len(), pair_count(providers.len()));

        for pair in &pairs {
            prop_assert!(pair.score_a >= pair.score_b);
            prop_assert!(matches!(index.resolve(&pair.slug), PairResolution::Found(_)));

            let reversed = format!("{}-vs-{}", pair.provider_b.slug, pair.provider_a.slug);
            prop_assert_eq!(
                index.resolve(&reversed),
                PairResolution::Redirect(pair.slug.clone())
            );
        }
    }
}
