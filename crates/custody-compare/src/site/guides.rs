use serde::Serialize;

use crate::dataset::CustodyTypeId;
use CustodyTypeId::*;

/// An editorial guide and the custody types it recommends.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Guide {
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Markdown-lite source: blank-line separated blocks, `## ` headings, `- ` and `1. ` lists.
    #[serde(skip)]
    pub body: &'static str,
    pub related_types: &'static [CustodyTypeId],
}

impl Guide {
    pub fn sections(&self) -> Vec<Section> {
        parse_body(self.body)
    }
}

/// One rendered block of a guide body. Inline `**bold**` markers are left in the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Section {
    Heading { text: String },
    Paragraph { text: String },
    BulletList { items: Vec<String> },
    NumberedList { items: Vec<String> },
}

enum Line<'a> {
    Text(&'a str),
    Bullet(&'a str),
    Numbered(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    if let Some(item) = line.strip_prefix("- ") {
        return Line::Bullet(item.trim());
    }
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        if let Some(item) = line[digits..].strip_prefix('.') {
            return Line::Numbered(item.trim());
        }
    }
    Line::Text(line)
}

/// Splits a guide body into sections.
///
/// Blocks are separated by blank lines. Inside a block, consecutive lines of the same kind
/// merge: text lines join into one paragraph and list lines collect into one list, so a
/// lead-in sentence followed directly by bullets yields a paragraph and then a list.
pub fn parse_body(body: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    for block in body.split("\n\n").map(str::trim).filter(|block| !block.is_empty()) {
        if let Some(heading) = block.strip_prefix("## ") {
            sections.push(Section::Heading {
                text: heading.trim().to_string(),
            });
            continue;
        }

        let block_start = sections.len();
        for line in block.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let line = classify(line);
            let extended = sections.len() > block_start
                && match (sections.last_mut(), &line) {
                    (Some(Section::Paragraph { text }), Line::Text(more)) => {
                        text.push(' ');
                        text.push_str(more);
                        true
                    }
                    (Some(Section::BulletList { items }), Line::Bullet(item))
                    | (Some(Section::NumberedList { items }), Line::Numbered(item)) => {
                        items.push((*item).to_string());
                        true
                    }
                    _ => false,
                };
            if !extended {
                sections.push(match line {
                    Line::Text(text) => Section::Paragraph {
                        text: text.to_string(),
                    },
                    Line::Bullet(item) => Section::BulletList {
                        items: vec![item.to_string()],
                    },
                    Line::Numbered(item) => Section::NumberedList {
                        items: vec![item.to_string()],
                    },
                });
            }
        }
    }
    sections
}

static GUIDES: [Guide; 12] = [
    Guide {
        slug: "what-is-bitcoin-custody",
        title: "What is Bitcoin Custody?",
        description: "How Bitcoin is secured, from self-custody to institutional solutions.",
        body: include_str!("../../data/guides/what-is-bitcoin-custody.md"),
        related_types: &[MultiInstitution, SelfCustody, QualifiedCustodian],
    },
    Guide {
        slug: "how-to-choose-a-custodian",
        title: "How to Choose a Bitcoin Custodian",
        description: "A framework for weighing security, insurance, fees, and regulatory standing.",
        body: include_str!("../../data/guides/how-to-choose-a-custodian.md"),
        related_types: &[QualifiedCustodian, MultiInstitution],
    },
    Guide {
        slug: "multi-institution-custody-explained",
        title: "Multi-Institution Custody Explained",
        description: "Why spreading keys across independent custodians removes single points of failure.",
        body: include_str!("../../data/guides/multi-institution-custody-explained.md"),
        related_types: &[MultiInstitution],
    },
    Guide {
        slug: "custody-after-ftx-celsius-lessons",
        title: "Custody After FTX and Celsius",
        description: "What the FTX and Celsius collapses teach about counterparty risk.",
        body: include_str!("../../data/guides/custody-after-ftx-celsius-lessons.md"),
        related_types: &[MultiInstitution, SelfCustody, CollaborativeCustody],
    },
    Guide {
        slug: "self-custody-vs-third-party",
        title: "Self-Custody vs Third-Party Custody",
        description: "Trade-offs between holding your own keys and hiring a professional custodian.",
        body: include_str!("../../data/guides/self-custody-vs-third-party.md"),
        related_types: &[SelfCustody, CollaborativeCustody, QualifiedCustodian],
    },
    Guide {
        slug: "custody-for-family-offices",
        title: "Bitcoin Custody for Family Offices",
        description: "Balancing security, compliance, and generational planning for family offices.",
        body: include_str!("../../data/guides/custody-for-family-offices.md"),
        related_types: &[MultiInstitution, QualifiedCustodian],
    },
    Guide {
        slug: "custody-for-rias-and-advisors",
        title: "Bitcoin Custody for RIAs and Financial Advisors",
        description: "Regulatory requirements for advisors holding Bitcoin on behalf of clients.",
        body: include_str!("../../data/guides/custody-for-rias-and-advisors.md"),
        related_types: &[QualifiedCustodian, MultiInstitution],
    },
    Guide {
        slug: "bitcoin-custody-insurance-explained",
        title: "Bitcoin Custody Insurance Explained",
        description: "What custody insurance covers and why coverage limits matter.",
        body: include_str!("../../data/guides/bitcoin-custody-insurance-explained.md"),
        related_types: &[QualifiedCustodian, MultiInstitution],
    },
    Guide {
        slug: "hardware-wallets-vs-institutional-custody",
        title: "Hardware Wallets vs Institutional Custody",
        description: "When a hardware wallet is enough and when to move to institutional custody.",
        body: include_str!("../../data/guides/hardware-wallets-vs-institutional-custody.md"),
        related_types: &[ColdStorage, SelfCustody, QualifiedCustodian],
    },
    Guide {
        slug: "bitcoin-inheritance-planning",
        title: "Bitcoin Inheritance Planning",
        description: "Passing Bitcoin to heirs without losing access to the keys.",
        body: include_str!("../../data/guides/bitcoin-inheritance-planning.md"),
        related_types: &[CollaborativeCustody, SelfCustody, QualifiedCustodian],
    },
    Guide {
        slug: "qualified-custodian-requirements",
        title: "Qualified Custodian Requirements for Bitcoin",
        description: "What makes a custodian qualified under SEC rules and why institutions care.",
        body: include_str!("../../data/guides/qualified-custodian-requirements.md"),
        related_types: &[QualifiedCustodian, MultiInstitution],
    },
    Guide {
        slug: "bitcoin-custody-fees-explained",
        title: "Bitcoin Custody Fees Explained",
        description: "Annual fees, setup costs, transaction charges, and the costs nobody advertises.",
        body: include_str!("../../data/guides/bitcoin-custody-fees-explained.md"),
        related_types: &[QualifiedCustodian, CollaborativeCustody],
    },
];

const WHAT_IS: &str = "what-is-bitcoin-custody";
const HOW_TO_CHOOSE: &str = "how-to-choose-a-custodian";
const MULTI_EXPLAINED: &str = "multi-institution-custody-explained";

const DEFAULT_RELATED: [&str; 3] = [WHAT_IS, HOW_TO_CHOOSE, MULTI_EXPLAINED];

pub fn all() -> &'static [Guide] {
    &GUIDES
}

pub fn find(slug: &str) -> Option<&'static Guide> {
    GUIDES.iter().find(|guide| guide.slug == slug)
}

/// Guides linked from a custody type page, in display order.
pub fn related_to(custody_type: CustodyTypeId) -> Vec<&'static Guide> {
    let slugs: [&str; 3] = match custody_type {
        MultiInstitution | CollaborativeCustody => [MULTI_EXPLAINED, HOW_TO_CHOOSE, WHAT_IS],
        QualifiedCustodian => [HOW_TO_CHOOSE, MULTI_EXPLAINED, WHAT_IS],
        SelfCustody | ExchangeCustody | ColdStorage | TrustCompany | CustodialIra => {
            DEFAULT_RELATED
        }
    };
    slugs.into_iter().filter_map(find).collect()
}

/// Up to `limit` guides other than `slug`, in catalogue order.
pub fn others(slug: &str, limit: usize) -> Vec<&'static Guide> {
    GUIDES
        .iter()
        .filter(|guide| guide.slug != slug)
        .take(limit)
        .collect()
}
