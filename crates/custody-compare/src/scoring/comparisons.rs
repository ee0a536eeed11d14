use serde::Serialize;
use tracing::debug;

use super::criteria::{Criterion, CriterionWeights};
use super::engine::calculate_score;
use crate::dataset::{Provider, PAIR_SEPARATOR};

/// Two providers in canonical order, keyed by their canonical comparison slug.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonPair<'a> {
    pub slug: String,
    pub provider_a: &'a Provider,
    pub provider_b: &'a Provider,
    pub score_a: f64,
    pub score_b: f64,
}

impl<'a> ComparisonPair<'a> {
    fn new(a: &'a Provider, b: &'a Provider, weights: &CriterionWeights) -> Self {
        let (first, second) = canonical_order(a, b, weights);
        Self {
            slug: pair_slug(first, second),
            provider_a: first,
            provider_b: second,
            score_a: calculate_score(&first.scores, weights),
            score_b: calculate_score(&second.scores, weights),
        }
    }

    /// Per-criterion wins for each side.
    pub fn head_to_head(&self) -> HeadToHead {
        let mut summary = HeadToHead::default();
        for criterion in Criterion::ordered() {
            let left = self.provider_a.scores.get(criterion);
            let right = self.provider_b.scores.get(criterion);
            if left > right {
                summary.wins_a += 1;
            } else if right > left {
                summary.wins_b += 1;
            } else {
                summary.ties += 1;
            }
        }
        summary
    }

    /// The first provider wins whenever its score is at least the second's.
    pub fn winner(&self) -> &'a Provider {
        if self.score_a >= self.score_b {
            self.provider_a
        } else {
            self.provider_b
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHead {
    pub wins_a: usize,
    pub wins_b: usize,
    pub ties: usize,
}

/// Higher score first; equal scores fall back to the lexicographically smaller slug.
pub fn canonical_order<'a>(
    a: &'a Provider,
    b: &'a Provider,
    weights: &CriterionWeights,
) -> (&'a Provider, &'a Provider) {
    let score_a = calculate_score(&a.scores, weights);
    let score_b = calculate_score(&b.scores, weights);
    if score_a != score_b {
        return if score_a > score_b { (a, b) } else { (b, a) };
    }
    if a.slug <= b.slug {
        (a, b)
    } else {
        (b, a)
    }
}

pub fn canonical_slug(a: &Provider, b: &Provider, weights: &CriterionWeights) -> String {
    let (first, second) = canonical_order(a, b, weights);
    pair_slug(first, second)
}

fn pair_slug(first: &Provider, second: &Provider) -> String {
    format!("{}{PAIR_SEPARATOR}{}", first.slug, second.slug)
}

/// Splits `a-vs-b` into its two halves. Anything other than exactly two parts is rejected.
pub fn split_pair_slug(slug: &str) -> Option<(&str, &str)> {
    let mut parts = slug.split(PAIR_SEPARATOR);
    let first = parts.next()?;
    let second = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((first, second))
}

/// Outcome of resolving a comparison slug requested by a client.
#[derive(Debug, Clone, PartialEq)]
pub enum PairResolution<'a> {
    Found(ComparisonPair<'a>),
    /// The slug names a valid pair in non-canonical order.
    Redirect(String),
    NotFound,
}

/// Every unordered provider pair, borrowed from one provider list.
///
/// Pairs are rebuilt on every call; the list is small and the scoring function is cheap.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonIndex<'a> {
    providers: &'a [Provider],
    weights: &'a CriterionWeights,
}

impl<'a> ComparisonIndex<'a> {
    pub fn new(providers: &'a [Provider], weights: &'a CriterionWeights) -> Self {
        Self { providers, weights }
    }

    /// One pair for each `i < j` in declaration order: n(n-1)/2 in total.
    pub fn all_pairs(&self) -> Vec<ComparisonPair<'a>> {
        let providers = self.providers;
        let mut pairs = Vec::with_capacity(pair_count(providers.len()));
        for (i, first) in providers.iter().enumerate() {
            for second in &providers[i + 1..] {
                pairs.push(ComparisonPair::new(first, second, self.weights));
            }
        }
        pairs
    }

    /// Exact canonical match only. A reversed slug is not found here.
    pub fn lookup(&self, slug: &str) -> Option<ComparisonPair<'a>> {
        split_pair_slug(slug)?;
        self.all_pairs().into_iter().find(|pair| pair.slug == slug)
    }

    /// Canonical slug for two raw provider slugs, if both are known and distinct.
    pub fn canonical_slug_for(&self, slug_a: &str, slug_b: &str) -> Option<String> {
        if slug_a == slug_b {
            return None;
        }
        let a = self.find(slug_a)?;
        let b = self.find(slug_b)?;
        Some(canonical_slug(a, b, self.weights))
    }

    /// Page-level resolution: canonical hits, reversed hits to redirect, everything else missing.
    pub fn resolve(&self, slug: &str) -> PairResolution<'a> {
        let Some((first, second)) = split_pair_slug(slug) else {
            debug!(slug = %slug, "malformed comparison slug");
            return PairResolution::NotFound;
        };

        if let Some(pair) = self.lookup(slug) {
            return PairResolution::Found(pair);
        }

        let reversed = format!("{second}{PAIR_SEPARATOR}{first}");
        if self.lookup(&reversed).is_some() {
            debug!(requested = slug, canonical = %reversed, "redirecting to canonical comparison");
            return PairResolution::Redirect(reversed);
        }

        debug!(slug = %slug, "unknown comparison");
        PairResolution::NotFound
    }

    fn find(&self, slug: &str) -> Option<&'a Provider> {
        self.providers.iter().find(|provider| provider.slug == slug)
    }
}

pub const fn pair_count(providers: usize) -> usize {
    providers * providers.saturating_sub(1) / 2
}
