use std::fmt::Write as _;

use chrono::{DateTime, SecondsFormat, Utc};

use super::guides;
use super::seo::Seo;
use crate::dataset::ProviderSource;
use crate::scoring::ComparisonIndex;

/// Tool pages under `/tools/`.
pub const TOOL_SLUGS: [&str; 4] = ["fee-calculator", "risk-score", "compare", "decision-tree"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// Every public page: home, custody types, providers, tools, guides, then each canonical pair.
pub fn entries<S>(source: &S, seo: &Seo, generated_at: DateTime<Utc>) -> Vec<SitemapEntry>
where
    S: ProviderSource + ?Sized,
{
    let entry = |path: String, change_frequency, priority| SitemapEntry {
        url: seo.absolute_url(&path),
        last_modified: generated_at,
        change_frequency,
        priority,
    };
    let monthly = ChangeFrequency::Monthly;

    let mut entries = vec![entry("/".to_string(), ChangeFrequency::Weekly, 1.0)];
    entries.extend(
        source
            .list_custody_types()
            .iter()
            .map(|kind| entry(format!("/custody-type/{}", kind.id), monthly, 0.9)),
    );
    entries.extend(
        source
            .list_providers()
            .iter()
            .map(|provider| entry(format!("/custodian/{}", provider.slug), monthly, 0.8)),
    );
    entries.extend(
        TOOL_SLUGS
            .iter()
            .map(|tool| entry(format!("/tools/{tool}"), monthly, 0.8)),
    );
    entries.extend(
        guides::all()
            .iter()
            .map(|guide| entry(format!("/guides/{}", guide.slug), monthly, 0.7)),
    );
    entries.extend(
        ComparisonIndex::new(source.list_providers(), source.list_weights())
            .all_pairs()
            .into_iter()
            .map(|pair| entry(format!("/compare/{}", pair.slug), monthly, 0.6)),
    );
    entries
}

/// sitemaps.org `urlset` document.
pub fn render(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(entries.len() * 192 + 128);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");
    for entry in entries {
        // Writing into a String cannot fail.
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
            escape(&entry.url),
            entry.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true),
            entry.change_frequency.as_str(),
            entry.priority,
        );
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::{document, provider};
    use crate::dataset::{CustodyTypeId, StaticDataset};
    use crate::scoring::pair_count;
    use chrono::TimeZone;

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn dataset() -> StaticDataset {
        StaticDataset::from_document(document(vec![
            provider("alpha", 9.0),
            provider("beta", 7.0),
            provider("gamma", 8.0),
        ]))
        .expect("valid")
    }

    #[test]
    fn lists_pages_in_priority_order() {
        let dataset = dataset();
        let entries = entries(&dataset, &Seo::default(), generated_at());

        let expected_len = 1
            + CustodyTypeId::ordered().len()
            + 3
            + TOOL_SLUGS.len()
            + guides::all().len()
            + pair_count(3);
        assert_eq!(entries.len(), expected_len);

        assert_eq!(entries[0].url, "https://custodycompare.com/");
        assert_eq!(entries[0].priority, 1.0);
        assert_eq!(entries[0].change_frequency, ChangeFrequency::Weekly);
        assert!(entries
            .windows(2)
            .all(|pair| pair[0].priority >= pair[1].priority));
        assert!(entries[1..]
            .iter()
            .all(|entry| entry.change_frequency == ChangeFrequency::Monthly));
    }

    #[test]
    fn includes_every_canonical_comparison() {
        let dataset = dataset();
        let urls: Vec<_> = entries(&dataset, &Seo::default(), generated_at())
            .into_iter()
            .filter(|entry| entry.url.contains("/compare/"))
            .map(|entry| entry.url)
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://custodycompare.com/compare/alpha-vs-beta",
                "https://custodycompare.com/compare/alpha-vs-gamma",
                "https://custodycompare.com/compare/gamma-vs-beta",
            ]
        );
    }

    #[test]
    fn renders_sitemaps_xml() {
        let xml = render(&[SitemapEntry {
            url: "https://custodycompare.com/?a=1&b=2".to_string(),
            last_modified: generated_at(),
            change_frequency: ChangeFrequency::Weekly,
            priority: 1.0,
        }]);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<loc>https://custodycompare.com/?a=1&amp;b=2</loc>"));
        assert!(xml.contains("<lastmod>2026-03-01T12:00:00Z</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }
}
