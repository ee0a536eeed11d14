use std::collections::BTreeSet;

use super::guides;
use super::seo::{Crumb, Faq, Seo};
use super::views::{
    CategoryHighlight, ComparisonPage, ComparisonView, CriterionMatchup, CustodyTypeEntry,
    CustodyTypePage, GuidePage, HomePage, PairLink, ProviderPage, ScoreSummary,
};
use crate::dataset::{CustodyTypeId, Provider, ProviderSource};
use crate::scoring::{
    breakdown, calculate_score, canonical_order, canonical_slug, highest_category,
    lowest_category, pair_count, rank, score_color, score_color_class, score_label, Criterion,
    CriterionWeights, ComparisonIndex, PairResolution,
};

pub const HOME_TOP_PROVIDERS: usize = 10;
pub const PROVIDER_ALTERNATIVES: usize = 5;
pub const OTHER_PAIRS: usize = 3;
pub const GUIDE_PROVIDERS: usize = 3;
pub const OTHER_GUIDES: usize = 4;

pub fn score_summary(custody_score: f64) -> ScoreSummary {
    ScoreSummary {
        custody_score,
        label: score_label(custody_score),
        color: score_color(custody_score),
        color_class: score_color_class(custody_score),
    }
}

pub fn home<'a, S>(source: &'a S, seo: &Seo) -> HomePage<'a>
where
    S: ProviderSource + ?Sized,
{
    let providers = source.list_providers();
    let mut top_providers = rank(providers, source.list_weights());
    top_providers.truncate(HOME_TOP_PROVIDERS);

    let custody_types = source
        .list_custody_types()
        .iter()
        .map(|custody_type| CustodyTypeEntry {
            custody_type,
            provider_count: source.providers_by_type(custody_type.id).len(),
        })
        .collect();

    HomePage {
        page_meta: seo.home_meta(),
        meta: source.meta(),
        top_providers,
        custody_types,
        comparison_count: pair_count(providers.len()),
        guides: guides::all(),
        json_ld: vec![seo.website()],
    }
}

pub fn provider<'a, S>(source: &'a S, seo: &Seo, slug: &str) -> Option<ProviderPage<'a>>
where
    S: ProviderSource + ?Sized,
{
    let provider = source.provider(slug)?;
    let weights = source.list_weights();
    let custody_score = calculate_score(&provider.scores, weights);
    let score = score_summary(custody_score);

    let same_type = rank(source.providers_by_type(provider.custody_type), weights);
    let type_count = same_type.len();
    let type_rank = same_type
        .iter()
        .find(|entry| entry.provider.slug == provider.slug)
        .map_or(type_count, |entry| entry.rank);
    let alternatives: Vec<_> = same_type
        .into_iter()
        .filter(|entry| entry.provider.slug != provider.slug)
        .take(PROVIDER_ALTERNATIVES)
        .collect();
    let comparisons = alternatives
        .iter()
        .map(|entry| pair_link(provider, entry.provider, weights))
        .collect();

    let strongest =
        highest_category(&provider.scores).map(|criterion| highlight(provider, criterion));
    let weakest =
        lowest_category(&provider.scores).map(|criterion| highlight(provider, criterion));
    let faqs = provider_faqs(provider, &score, strongest, weakest);

    let json_ld = vec![
        seo.review(provider, custody_score),
        seo.breadcrumbs(&[
            Crumb::new("Home", "/"),
            Crumb::new(
                provider.custody_type_label.clone(),
                format!("/custody-type/{}", provider.custody_type),
            ),
            Crumb::new(provider.name.clone(), format!("/custodian/{}", provider.slug)),
        ]),
        seo.faq_page(&faqs),
    ];

    Some(ProviderPage {
        page_meta: seo.provider_meta(provider, custody_score),
        provider,
        score,
        strongest,
        weakest,
        breakdown: breakdown(&provider.scores, weights),
        type_rank,
        type_count,
        alternatives,
        comparisons,
        faqs,
        json_ld,
    })
}

fn highlight(provider: &Provider, criterion: Criterion) -> CategoryHighlight {
    CategoryHighlight {
        criterion,
        label: criterion.label(),
        score: provider.scores.get(criterion),
    }
}

fn provider_faqs(
    provider: &Provider,
    score: &ScoreSummary,
    strongest: Option<CategoryHighlight>,
    weakest: Option<CategoryHighlight>,
) -> Vec<Faq> {
    let name = &provider.name;
    let licenses = provider.regulatory.licenses.join(", ");

    let mut faqs = vec![
        Faq::new(
            format!("Is {name} safe for Bitcoin custody?"),
            format!(
                "{name} has a Custody Score of {:.1}/10 ({}). It uses {} key management with {} cold storage and holds {} compliance.",
                score.custody_score,
                score.label,
                provider.security.key_management_type,
                provider.security.cold_storage_percent,
                provider.security.soc_compliance,
            ),
        ),
        Faq::new(
            format!("What are {name} custody fees?"),
            sentences(&[
                format!(
                    "{name} charges {} annual custody fee with {} per transaction.",
                    provider.fees.custody_annual, provider.fees.transaction
                ),
                format!("Setup fee is {}.", provider.fees.setup),
                provider.fees.notes.clone(),
            ]),
        ),
        Faq::new(
            format!("Is {name} a qualified custodian?"),
            if provider.regulatory.qualified_custodian {
                format!(
                    "Yes, {name} is a qualified custodian regulated in {} with licenses including {licenses}.",
                    provider.regulatory.jurisdiction
                )
            } else {
                format!(
                    "{name} is not classified as a qualified custodian. It operates under {} jurisdiction with {licenses}.",
                    provider.regulatory.jurisdiction
                )
            },
        ),
        Faq::new(
            format!("What insurance does {name} provide?"),
            sentences(&[
                format!(
                    "{name} offers {} in insurance coverage through {}.",
                    provider.insurance.coverage, provider.insurance.carrier
                ),
                provider.insurance.details.clone(),
            ]),
        ),
    ];

    if let (Some(strongest), Some(weakest)) = (strongest, weakest) {
        faqs.push(Faq::new(
            format!("How does {name} compare to other custodians?"),
            format!(
                "With a Custody Score of {:.1}/10, {name} is rated {}. Its strongest area is {} and its weakest is {}.",
                score.custody_score, score.label, strongest.label, weakest.label
            ),
        ));
    }

    faqs
}

/// Joins non-empty sentences with single spaces.
fn sentences(parts: &[String]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn pair_link<'a>(a: &'a Provider, b: &'a Provider, weights: &CriterionWeights) -> PairLink<'a> {
    let (first, second) = canonical_order(a, b, weights);
    PairLink {
        slug: canonical_slug(first, second, weights),
        name_a: &first.name,
        name_b: &second.name,
    }
}

/// `None` when the segment is not a known custody type id.
pub fn custody_type<'a, S>(source: &'a S, seo: &Seo, raw: &str) -> Option<CustodyTypePage<'a>>
where
    S: ProviderSource + ?Sized,
{
    let id = CustodyTypeId::parse(raw)?;
    let custody_type = source.custody_type(id)?;

    Some(CustodyTypePage {
        page_meta: seo.custody_type_meta(custody_type),
        custody_type,
        providers: rank(source.providers_by_type(id), source.list_weights()),
        related_guides: guides::related_to(id),
        json_ld: vec![seo.breadcrumbs(&[
            Crumb::new("Home", "/"),
            Crumb::new(custody_type.name.clone(), format!("/custody-type/{id}")),
        ])],
    })
}

pub fn comparison<'a, S>(source: &'a S, seo: &Seo, slug: &str) -> ComparisonView<'a>
where
    S: ProviderSource + ?Sized,
{
    let weights = source.list_weights();
    let index = ComparisonIndex::new(source.list_providers(), weights);
    let pair = match index.resolve(slug) {
        PairResolution::Found(pair) => pair,
        PairResolution::Redirect(canonical) => return ComparisonView::Redirect(canonical),
        PairResolution::NotFound => return ComparisonView::NotFound,
    };

    let (a, b) = (pair.provider_a, pair.provider_b);
    let head_to_head = pair.head_to_head();
    let winner = pair.winner();

    let criteria = Criterion::ordered()
        .into_iter()
        .map(|criterion| CriterionMatchup {
            criterion,
            label: criterion.label(),
            weight: weights.get(criterion),
            score_a: a.scores.get(criterion),
            score_b: b.scores.get(criterion),
        })
        .collect();

    let features: BTreeSet<&'a str> = a
        .features
        .iter()
        .chain(b.features.iter())
        .map(String::as_str)
        .collect();

    let other_pairs = index
        .all_pairs()
        .into_iter()
        .filter(|other| other.slug != pair.slug)
        .take(OTHER_PAIRS)
        .map(|other| PairLink {
            slug: other.slug,
            name_a: &other.provider_a.name,
            name_b: &other.provider_b.name,
        })
        .collect();

    let faqs = comparison_faqs(
        a,
        b,
        pair.score_a,
        pair.score_b,
        head_to_head.wins_a,
        head_to_head.wins_b,
    );
    let json_ld = vec![seo.comparison(a, b, &pair.slug), seo.faq_page(&faqs)];

    ComparisonView::Page(Box::new(ComparisonPage {
        page_meta: seo.comparison_meta(a, b, &pair.slug),
        slug: pair.slug.clone(),
        provider_a: a,
        provider_b: b,
        score_a: score_summary(pair.score_a),
        score_b: score_summary(pair.score_b),
        head_to_head,
        winner: &winner.slug,
        criteria,
        features: features.into_iter().collect(),
        faqs,
        other_pairs,
        json_ld,
    }))
}

fn comparison_faqs(
    a: &Provider,
    b: &Provider,
    score_a: f64,
    score_b: f64,
    wins_a: usize,
    wins_b: usize,
) -> Vec<Faq> {
    let (winner, winner_score, loser_score, winner_wins) = if score_a >= score_b {
        (a, score_a, score_b, wins_a)
    } else {
        (b, score_b, score_a, wins_b)
    };
    let audience = |provider: &Provider| {
        provider
            .target_audience
            .iter()
            .take(2)
            .cloned()
            .collect::<Vec<_>>()
            .join(" and ")
    };
    let strongest = |provider: &Provider| {
        highest_category(&provider.scores).map_or("no single category", Criterion::label)
    };
    let (name_a, name_b) = (&a.name, &b.name);

    vec![
        Faq::new(
            format!("Is {name_a} or {name_b} better for Bitcoin custody?"),
            format!(
                "{} scores {winner_score:.1} vs {loser_score:.1} in the weighted Custody Score and leads in {winner_wins} of {} scoring categories. The best choice depends on your needs: {name_a} is best for {}, while {name_b} suits {}.",
                winner.name,
                Criterion::COUNT,
                audience(a),
                audience(b),
            ),
        ),
        Faq::new(
            format!("What is the difference between {name_a} and {name_b}?"),
            format!(
                "{name_a} is a {} provider, while {name_b} is a {} provider. {name_a} excels in {}, whereas {name_b} is strongest in {}.",
                a.custody_type_label.to_lowercase(),
                b.custody_type_label.to_lowercase(),
                strongest(a),
                strongest(b),
            ),
        ),
        Faq::new(
            format!("How do {name_a} and {name_b} fees compare?"),
            format!(
                "{name_a} charges {} annual custody fees with {} transaction fees. {name_b} charges {} annual custody fees with {} transaction fees.",
                a.fees.custody_annual,
                a.fees.transaction,
                b.fees.custody_annual,
                b.fees.transaction,
            ),
        ),
        Faq::new(
            format!("Which is more secure, {name_a} or {name_b}?"),
            format!(
                "{name_a} scores {:.1}/10 for security while {name_b} scores {:.1}/10. {name_a} uses {} key management, and {name_b} uses {}.",
                a.scores.security,
                b.scores.security,
                a.security.key_management_type,
                b.security.key_management_type,
            ),
        ),
    ]
}

pub fn guide<'a, S>(source: &'a S, seo: &Seo, slug: &str) -> Option<GuidePage<'a>>
where
    S: ProviderSource + ?Sized,
{
    let guide = guides::find(slug)?;
    let related = source
        .list_providers()
        .iter()
        .filter(|provider| guide.related_types.contains(&provider.custody_type));
    let mut providers = rank(related, source.list_weights());
    providers.truncate(GUIDE_PROVIDERS);

    Some(GuidePage {
        page_meta: seo.guide_meta(guide),
        guide,
        sections: guide.sections(),
        providers,
        other_guides: guides::others(slug, OTHER_GUIDES),
        json_ld: vec![seo.breadcrumbs(&[
            Crumb::new("Home", "/"),
            Crumb::new("Guides", "/guides/what-is-bitcoin-custody"),
            Crumb::new(guide.title, format!("/guides/{}", guide.slug)),
        ])],
    })
}
