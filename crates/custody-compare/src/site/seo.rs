use serde::Serialize;
use serde_json::{json, Value};

use super::guides::Guide;
use crate::config::SiteConfig;
use crate::dataset::{CustodyType, Provider};

const SCHEMA_CONTEXT: &str = "https://schema.org";
const REVIEW_YEAR: u16 = 2026;
const DESCRIPTION_LIMIT: usize = 160;
const DEFAULT_TITLE: &str = "Bitcoin Custody Comparison — Independent Reviews & Scores";
const DEFAULT_DESCRIPTION: &str = "Compare every Bitcoin custody solution. Independent reviews, transparent Custody Scores, and head-to-head comparisons across 30+ providers.";

pub const PROVIDER_NOT_FOUND: &str = "Provider Not Found";
pub const GUIDE_NOT_FOUND: &str = "Guide Not Found";

/// Document head for one page: title, description, canonical link and Open Graph tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    pub open_graph: OpenGraph,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub site_name: String,
    pub locale: &'static str,
}

/// Cuts at a character boundary, never inside a multi-byte character.
fn truncate_description(description: &str) -> String {
    description.chars().take(DESCRIPTION_LIMIT).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

impl Faq {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// A breadcrumb entry with a site-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub name: String,
    pub path: String,
}

impl Crumb {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// JSON-LD builders bound to one public site identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seo {
    base_url: String,
    name: String,
}

impl Seo {
    pub fn new(site: &SiteConfig) -> Self {
        Self {
            base_url: site.base_url.trim_end_matches('/').to_string(),
            name: site.name.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn page_meta(
        &self,
        path: &str,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> PageMeta {
        let title = title.into();
        let description = truncate_description(&description.into());
        let canonical_url = self.absolute_url(path);
        PageMeta {
            open_graph: OpenGraph {
                title: title.clone(),
                description: description.clone(),
                url: canonical_url.clone(),
                kind: "website",
                site_name: self.name.clone(),
                locale: "en_US",
            },
            title,
            description,
            canonical_url,
        }
    }

    pub fn home_meta(&self) -> PageMeta {
        self.page_meta("/", DEFAULT_TITLE, DEFAULT_DESCRIPTION)
    }

    pub fn provider_meta(&self, provider: &Provider, custody_score: f64) -> PageMeta {
        let name = &provider.name;
        self.page_meta(
            &format!("/custodian/{}", provider.slug),
            format!("{name} Review {REVIEW_YEAR} — Fees, Security & Custody Score"),
            format!(
                "Independent {name} custody review. Custody Score {custody_score}/10 across security, fees, insurance & more."
            ),
        )
    }

    pub fn custody_type_meta(&self, custody_type: &CustodyType) -> PageMeta {
        let name = &custody_type.name;
        self.page_meta(
            &format!("/custody-type/{}", custody_type.id),
            format!("{name} Bitcoin Custody — Reviews & Rankings"),
            format!(
                "Compare the best {} Bitcoin custody providers. Independent reviews, Custody Scores, pros & cons, and side-by-side rankings.",
                name.to_lowercase()
            ),
        )
    }

    pub fn comparison_meta(&self, first: &Provider, second: &Provider, slug: &str) -> PageMeta {
        let (a, b) = (&first.name, &second.name);
        self.page_meta(
            &format!("/compare/{slug}"),
            format!("{a} vs {b} — Bitcoin Custody Comparison {REVIEW_YEAR}"),
            format!(
                "Compare {a} and {b} head-to-head across security, insurance, fees, and 5 more custody criteria."
            ),
        )
    }

    pub fn guide_meta(&self, guide: &Guide) -> PageMeta {
        self.page_meta(
            &format!("/guides/{}", guide.slug),
            guide.title,
            guide.description,
        )
    }

    pub fn website(&self) -> Value {
        json!({
            "@context": SCHEMA_CONTEXT,
            "@type": "WebSite",
            "name": self.name,
            "url": self.base_url,
            "description": "Independent Bitcoin custody comparison with transparent scoring.",
            "potentialAction": {
                "@type": "SearchAction",
                "target": self.absolute_url("/tools/compare?q={search_term_string}"),
                "query-input": "required name=search_term_string",
            },
        })
    }

    pub fn review(&self, provider: &Provider, custody_score: f64) -> Value {
        json!({
            "@context": SCHEMA_CONTEXT,
            "@type": "Review",
            "itemReviewed": {
                "@type": "FinancialProduct",
                "name": format!("{} Bitcoin Custody", provider.name),
                "provider": {
                    "@type": "Organization",
                    "name": provider.name,
                    "url": provider.website,
                },
            },
            "reviewRating": {
                "@type": "Rating",
                "ratingValue": custody_score,
                "bestRating": 10,
                "worstRating": 1,
            },
            "author": {
                "@type": "Organization",
                "name": self.name,
                "url": self.base_url,
            },
        })
    }

    /// Comparison page for a canonical pair; `slug` is the canonical comparison slug.
    pub fn comparison(&self, first: &Provider, second: &Provider, slug: &str) -> Value {
        let title = format!("{} vs {}", first.name, second.name);
        json!({
            "@context": SCHEMA_CONTEXT,
            "@type": "WebPage",
            "name": format!("{title}: Bitcoin Custody Comparison"),
            "description": format!(
                "Head-to-head comparison of {} and {} Bitcoin custody solutions.",
                first.name, second.name
            ),
            "breadcrumb": self.breadcrumbs(&[
                Crumb::new("Home", "/"),
                Crumb::new("Compare", "/tools/compare"),
                Crumb::new(title, format!("/compare/{slug}")),
            ]),
        })
    }

    pub fn breadcrumbs(&self, crumbs: &[Crumb]) -> Value {
        let items: Vec<Value> = crumbs
            .iter()
            .enumerate()
            .map(|(index, crumb)| {
                json!({
                    "@type": "ListItem",
                    "position": index + 1,
                    "name": crumb.name,
                    "item": self.absolute_url(&crumb.path),
                })
            })
            .collect();
        json!({
            "@context": SCHEMA_CONTEXT,
            "@type": "BreadcrumbList",
            "itemListElement": items,
        })
    }

    pub fn faq_page(&self, faqs: &[Faq]) -> Value {
        let entities: Vec<Value> = faqs
            .iter()
            .map(|faq| {
                json!({
                    "@type": "Question",
                    "name": faq.question,
                    "acceptedAnswer": {
                        "@type": "Answer",
                        "text": faq.answer,
                    },
                })
            })
            .collect();
        json!({
            "@context": SCHEMA_CONTEXT,
            "@type": "FAQPage",
            "mainEntity": entities,
        })
    }
}

impl Default for Seo {
    fn default() -> Self {
        Self::new(&SiteConfig::default())
    }
}
