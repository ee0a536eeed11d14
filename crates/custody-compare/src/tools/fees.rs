use std::cmp::Ordering;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::ToolError;
use crate::dataset::{Fees, ProviderSource};
use crate::scoring::calculate_score;

pub const MIN_AUM: u64 = 10_000;
pub const MAX_AUM: u64 = 100_000_000;
pub const DEFAULT_AUM: u64 = 1_000_000;

const CONTACT_FOR_PRICING: &str = "Contact for pricing";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AumPreset {
    pub label: &'static str,
    pub value: u64,
}

pub const AUM_PRESETS: [AumPreset; 5] = [
    AumPreset { label: "$50K", value: 50_000 },
    AumPreset { label: "$250K", value: 250_000 },
    AumPreset { label: "$1M", value: 1_000_000 },
    AumPreset { label: "$10M", value: 10_000_000 },
    AumPreset { label: "$50M", value: 50_000_000 },
];

/// How a provider prices annual custody, as read from its free-text fee string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FeeSchedule {
    /// Fraction of assets under custody, e.g. `0.004` for 0.40%.
    Percentage { rate: f64 },
    Monthly { amount: f64 },
    Flat { amount: f64 },
    ContactForPricing,
}

/// Compiled fee patterns.
pub struct FeeParser {
    percent: Regex,
    monthly: Regex,
    flat: Regex,
}

impl FeeParser {
    pub fn new() -> Self {
        Self {
            percent: Regex::new(r"([\d.]+)%").expect("static percent pattern"),
            monthly: Regex::new(r"\$([\d,]+)/month").expect("static monthly pattern"),
            flat: Regex::new(r"\$([\d,]+)").expect("static flat pattern"),
        }
    }

    /// Process-wide parser, compiled on first use.
    pub fn shared() -> &'static Self {
        static PARSER: OnceLock<FeeParser> = OnceLock::new();
        PARSER.get_or_init(Self::new)
    }

    pub fn percent(&self, raw: &str) -> Option<f64> {
        capture_amount(&self.percent, raw).map(|percent| percent / 100.0)
    }

    pub fn monthly(&self, raw: &str) -> Option<f64> {
        capture_amount(&self.monthly, raw)
    }

    pub fn flat(&self, raw: &str) -> Option<f64> {
        capture_amount(&self.flat, raw)
    }

    /// Monthly pricing is checked before flat pricing since the flat pattern also matches it.
    pub fn schedule(&self, raw: &str) -> FeeSchedule {
        if let Some(rate) = self.percent(raw) {
            FeeSchedule::Percentage { rate }
        } else if let Some(amount) = self.monthly(raw) {
            FeeSchedule::Monthly { amount }
        } else if let Some(amount) = self.flat(raw) {
            FeeSchedule::Flat { amount }
        } else {
            FeeSchedule::ContactForPricing
        }
    }
}

impl Default for FeeParser {
    fn default() -> Self {
        Self::new()
    }
}

fn capture_amount(pattern: &Regex, raw: &str) -> Option<f64> {
    let captures = pattern.captures(raw)?;
    captures.get(1)?.as_str().replace(',', "").parse().ok()
}

/// Year-one cost of holding `aum` dollars with one provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeEstimate {
    pub schedule: FeeSchedule,
    pub annual: Option<f64>,
    pub setup: f64,
    /// `None` when the provider does not publish pricing.
    pub total: Option<f64>,
    pub annual_display: String,
    pub setup_display: String,
    pub total_display: String,
    /// Monthly pricing extrapolated to a year.
    pub is_estimate: bool,
}

pub fn estimate_annual_cost(fees: &Fees, aum: u64) -> FeeEstimate {
    let parser = FeeParser::shared();
    let schedule = parser.schedule(&fees.custody_annual);
    let setup = parser.flat(&fees.setup).unwrap_or(0.0);

    let annual = match schedule {
        FeeSchedule::Percentage { rate } => Some(aum as f64 * rate),
        FeeSchedule::Monthly { amount } => Some(amount * 12.0),
        FeeSchedule::Flat { amount } => Some(amount),
        FeeSchedule::ContactForPricing => None,
    };
    let total = annual.map(|annual| annual + setup);

    let setup_display = if setup > 0.0 {
        format_usd(setup)
    } else if matches!(schedule, FeeSchedule::Percentage { .. }) {
        "Free".to_string()
    } else {
        fees.setup.clone()
    };

    FeeEstimate {
        schedule,
        annual,
        setup,
        total,
        annual_display: annual.map_or_else(|| CONTACT_FOR_PRICING.to_string(), format_usd),
        setup_display,
        total_display: total.map_or_else(|| CONTACT_FOR_PRICING.to_string(), format_usd),
        is_estimate: matches!(schedule, FeeSchedule::Monthly { .. }),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCost<'a> {
    pub slug: &'a str,
    pub name: &'a str,
    pub custody_score: f64,
    #[serde(flatten)]
    pub estimate: FeeEstimate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeComparison<'a> {
    pub aum: u64,
    pub aum_display: String,
    pub presets: &'static [AumPreset],
    pub results: Vec<ProviderCost<'a>>,
}

pub fn validate_aum(aum: u64) -> Result<u64, ToolError> {
    if (MIN_AUM..=MAX_AUM).contains(&aum) {
        Ok(aum)
    } else {
        Err(ToolError::AumOutOfRange(aum))
    }
}

/// Every provider's year-one cost, cheapest first. Providers without published pricing go last.
pub fn compare_fees<S>(source: &S, aum: u64) -> Result<FeeComparison<'_>, ToolError>
where
    S: ProviderSource + ?Sized,
{
    let aum = validate_aum(aum)?;
    let weights = source.list_weights();

    let mut results: Vec<ProviderCost<'_>> = source
        .list_providers()
        .iter()
        .map(|provider| ProviderCost {
            slug: &provider.slug,
            name: &provider.name,
            custody_score: calculate_score(&provider.scores, weights),
            estimate: estimate_annual_cost(&provider.fees, aum),
        })
        .collect();

    results.sort_by(|left, right| match (left.estimate.total, right.estimate.total) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    Ok(FeeComparison {
        aum,
        aum_display: format_usd(aum as f64),
        presets: &AUM_PRESETS,
        results,
    })
}

/// Whole US dollars with thousands separators.
pub fn format_usd(amount: f64) -> String {
    let digits = (amount.round().max(0.0) as u64).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    grouped.push('$');
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
