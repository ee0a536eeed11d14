use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scoring::{CriterionWeights, ProviderScores};

/// Closed set of custody models a provider can be classified under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CustodyTypeId {
    QualifiedCustodian,
    MultiInstitution,
    CollaborativeCustody,
    SelfCustody,
    ColdStorage,
    ExchangeCustody,
    TrustCompany,
    CustodialIra,
}

impl CustodyTypeId {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::QualifiedCustodian,
            Self::MultiInstitution,
            Self::CollaborativeCustody,
            Self::SelfCustody,
            Self::ColdStorage,
            Self::ExchangeCustody,
            Self::TrustCompany,
            Self::CustodialIra,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::QualifiedCustodian => "qualified-custodian",
            Self::MultiInstitution => "multi-institution",
            Self::CollaborativeCustody => "collaborative-custody",
            Self::SelfCustody => "self-custody",
            Self::ColdStorage => "cold-storage",
            Self::ExchangeCustody => "exchange-custody",
            Self::TrustCompany => "trust-company",
            Self::CustodialIra => "custodial-ira",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|candidate| candidate.as_str() == value)
    }
}

impl fmt::Display for CustodyTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fees {
    pub setup: String,
    pub custody_annual: String,
    pub transaction: String,
    pub withdrawal: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insurance {
    pub coverage: String,
    pub carrier: String,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Regulatory {
    #[serde(default)]
    pub licenses: Vec<String>,
    pub qualified_custodian: bool,
    pub jurisdiction: String,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Security {
    pub key_management_type: String,
    pub cold_storage_percent: String,
    pub soc_compliance: String,
    pub penetration_testing: bool,
    pub incident_history: String,
}

fn not_disclosed() -> String {
    "Not disclosed".to_string()
}

fn contact_provider() -> String {
    "Contact provider".to_string()
}

/// A custody provider as authored in the dataset. Immutable once loaded.
///
/// Legacy field names from earlier dataset revisions are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub logo: String,
    pub website: String,
    pub founded: u16,
    pub headquarters: String,
    pub custody_type: CustodyTypeId,
    pub custody_type_label: String,
    pub description: String,
    #[serde(default, alias = "bestFor")]
    pub target_audience: Vec<String>,
    #[serde(default = "not_disclosed", alias = "assetsUnderCustody")]
    pub aum: String,
    #[serde(default = "contact_provider", alias = "minimumInvestment")]
    pub min_account: String,
    #[serde(default)]
    pub supported_assets: Vec<String>,
    /// Empty when the record omits it; the loader backfills from `security`.
    #[serde(default, alias = "custodyModel")]
    pub key_management: String,
    pub fees: Fees,
    pub insurance: Insurance,
    pub regulatory: Regulatory,
    pub security: Security,
    #[serde(default)]
    pub features: Vec<String>,
    pub scores: ProviderScores,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitor_comparisons: Option<BTreeMap<String, String>>,
}

/// Descriptor for a custody category page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustodyType {
    pub id: CustodyTypeId,
    pub name: String,
    pub short_description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub best_for: Vec<String>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetMeta {
    pub version: String,
    pub last_updated: String,
    pub scoring_version: String,
    pub total_providers: usize,
    #[serde(default)]
    pub notes: String,
}

/// On-disk document layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetDocument {
    pub meta: DatasetMeta,
    pub scoring_weights: CriterionWeights,
    #[serde(default)]
    pub custody_types: Vec<CustodyType>,
    pub providers: Vec<Provider>,
}
