use serde::Serialize;
use serde_json::Value;

use super::guides::{Guide, Section};
use super::seo::{Faq, PageMeta};
use crate::dataset::{CustodyType, DatasetMeta, Provider};
use crate::scoring::{Criterion, CriterionContribution, HeadToHead, RankedProvider};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub custody_score: f64,
    pub label: &'static str,
    pub color: &'static str,
    pub color_class: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryHighlight {
    pub criterion: Criterion,
    pub label: &'static str,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustodyTypeEntry<'a> {
    #[serde(flatten)]
    pub custody_type: &'a CustodyType,
    pub provider_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairLink<'a> {
    pub slug: String,
    pub name_a: &'a str,
    pub name_b: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage<'a> {
    pub page_meta: PageMeta,
    pub meta: &'a DatasetMeta,
    pub top_providers: Vec<RankedProvider<'a>>,
    pub custody_types: Vec<CustodyTypeEntry<'a>>,
    pub comparison_count: usize,
    pub guides: &'static [Guide],
    pub json_ld: Vec<Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderPage<'a> {
    pub page_meta: PageMeta,
    pub provider: &'a Provider,
    pub score: ScoreSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strongest: Option<CategoryHighlight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weakest: Option<CategoryHighlight>,
    pub breakdown: Vec<CriterionContribution>,
    /// 1-based position among providers of the same custody type.
    pub type_rank: usize,
    pub type_count: usize,
    pub alternatives: Vec<RankedProvider<'a>>,
    pub comparisons: Vec<PairLink<'a>>,
    pub faqs: Vec<Faq>,
    pub json_ld: Vec<Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustodyTypePage<'a> {
    pub page_meta: PageMeta,
    pub custody_type: &'a CustodyType,
    pub providers: Vec<RankedProvider<'a>>,
    pub related_guides: Vec<&'static Guide>,
    pub json_ld: Vec<Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionMatchup {
    pub criterion: Criterion,
    pub label: &'static str,
    pub weight: f64,
    pub score_a: f64,
    pub score_b: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonPage<'a> {
    pub page_meta: PageMeta,
    pub slug: String,
    pub provider_a: &'a Provider,
    pub provider_b: &'a Provider,
    pub score_a: ScoreSummary,
    pub score_b: ScoreSummary,
    pub head_to_head: HeadToHead,
    pub winner: &'a str,
    pub criteria: Vec<CriterionMatchup>,
    pub features: Vec<&'a str>,
    pub faqs: Vec<Faq>,
    pub other_pairs: Vec<PairLink<'a>>,
    pub json_ld: Vec<Value>,
}

/// What a comparison slug resolves to.
#[derive(Debug, Clone)]
pub enum ComparisonView<'a> {
    Page(Box<ComparisonPage<'a>>),
    /// Canonical slug to redirect to.
    Redirect(String),
    NotFound,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidePage<'a> {
    pub page_meta: PageMeta,
    pub guide: &'static Guide,
    pub sections: Vec<Section>,
    pub providers: Vec<RankedProvider<'a>>,
    pub other_guides: Vec<&'static Guide>,
    pub json_ld: Vec<Value>,
}
