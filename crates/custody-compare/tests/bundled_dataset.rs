use custody_compare::dataset::{CustodyTypeId, DatasetError, ProviderSource, StaticDataset};
use custody_compare::scoring::{calculate_score, pair_count, ComparisonIndex, PairResolution};
use custody_compare::site::{guides, pages, views::ComparisonView, Seo};
use custody_compare::tools::{decision_tree, fees};

fn bundled() -> StaticDataset {
    StaticDataset::bundled().expect("bundled dataset is valid")
}

#[test]
fn bundled_dataset_covers_every_custody_type() {
    let dataset = bundled();
    assert_eq!(
        dataset.meta().total_providers,
        dataset.list_providers().len()
    );
    for id in CustodyTypeId::ordered() {
        assert!(dataset.custody_type(id).is_some(), "missing descriptor for {id}");
        assert!(
            !dataset.providers_by_type(id).is_empty(),
            "no providers for {id}"
        );
    }
}

#[test]
fn bundled_scores_are_on_rating_scale() {
    let dataset = bundled();
    for provider in dataset.list_providers() {
        let score = calculate_score(&provider.scores, dataset.list_weights());
        assert!((1.0..=10.0).contains(&score), "{} scored {score}", provider.slug);
    }
}

#[test]
fn every_provider_and_pair_renders() {
    let dataset = bundled();
    let seo = Seo::default();
    for provider in dataset.list_providers() {
        assert!(pages::provider(&dataset, &seo, &provider.slug).is_some());
    }

    let index = ComparisonIndex::new(dataset.list_providers(), dataset.list_weights());
    let pairs = index.all_pairs();
    assert_eq!(pairs.len(), pair_count(dataset.list_providers().len()));
    for pair in &pairs {
        assert!(matches!(
            pages::comparison(&dataset, &seo, &pair.slug),
            ComparisonView::Page(_)
        ));
        let reversed = format!("{}-vs-{}", pair.provider_b.slug, pair.provider_a.slug);
        assert_eq!(
            index.resolve(&reversed),
            PairResolution::Redirect(pair.slug.clone())
        );
    }
}

#[test]
fn every_guide_and_tree_result_renders() {
    let dataset = bundled();
    let seo = Seo::default();
    for guide in guides::all() {
        assert!(pages::guide(&dataset, &seo, guide.slug).is_some());
    }
    for result in decision_tree::result_nodes() {
        assert!(decision_tree::node(&dataset, result.id).is_ok());
    }
}

#[test]
fn fee_comparison_prices_every_provider() {
    let dataset = bundled();
    let comparison =
        fees::compare_fees(&dataset, fees::DEFAULT_AUM).expect("default AUM is valid");
    assert_eq!(comparison.results.len(), dataset.list_providers().len());
}

#[test]
fn malformed_documents_are_rejected() {
    let err = StaticDataset::from_json_str("{\"meta\": {}}").expect_err("incomplete document");
    assert!(matches!(err, DatasetError::Json(_)));

    let missing = StaticDataset::from_path("does/not/exist.json").expect_err("missing file");
    assert!(matches!(missing, DatasetError::Io { .. }));
}
