use super::domain::{
    CustodyType, CustodyTypeId, DatasetDocument, DatasetMeta, Fees, Insurance, Provider,
    Regulatory, Security,
};
use crate::scoring::{CriterionWeights, ProviderScores};

pub(crate) fn weights() -> CriterionWeights {
    CriterionWeights {
        security: 0.2,
        insurance: 0.15,
        regulatory: 0.15,
        fee_transparency: 0.1,
        track_record: 0.1,
        withdrawal_flexibility: 0.1,
        reporting_audit: 0.1,
        counterparty_diversification: 0.1,
    }
}

/// Provider whose every criterion is rated `score`, so its Custody Score is `score`.
pub(crate) fn provider(slug: &str, score: f64) -> Provider {
    typed_provider(slug, score, CustodyTypeId::QualifiedCustodian)
}

pub(crate) fn typed_provider(slug: &str, score: f64, custody_type: CustodyTypeId) -> Provider {
    Provider {
        id: slug.to_string(),
        name: title_case(slug),
        slug: slug.to_string(),
        logo: format!("/logos/{slug}.svg"),
        website: format!("https://{slug}.example"),
        founded: 2018,
        headquarters: "New York, NY".to_string(),
        custody_type,
        custody_type_label: custody_type.as_str().to_string(),
        description: format!("{slug} custody"),
        target_audience: vec!["Institutions".to_string(), "Family offices".to_string()],
        aum: "Not disclosed".to_string(),
        min_account: "$0".to_string(),
        supported_assets: vec!["BTC".to_string()],
        key_management: "HSM custody".to_string(),
        fees: Fees {
            setup: "$0".to_string(),
            custody_annual: "0.50% per year".to_string(),
            transaction: "$0".to_string(),
            withdrawal: "$25".to_string(),
            notes: String::new(),
        },
        insurance: Insurance {
            coverage: "$100M".to_string(),
            carrier: "Lloyd's".to_string(),
            details: String::new(),
        },
        regulatory: Regulatory {
            licenses: vec!["NY trust charter".to_string()],
            qualified_custodian: true,
            jurisdiction: "United States".to_string(),
            details: String::new(),
        },
        security: Security {
            key_management_type: "HSM".to_string(),
            cold_storage_percent: "100%".to_string(),
            soc_compliance: "SOC 2 Type II".to_string(),
            penetration_testing: true,
            incident_history: "None".to_string(),
        },
        features: vec!["Cold storage".to_string()],
        scores: ProviderScores::uniform(score),
        pros: vec!["Regulated".to_string()],
        cons: vec!["Fees".to_string()],
        competitor_comparisons: None,
    }
}

pub(crate) fn document(providers: Vec<Provider>) -> DatasetDocument {
    DatasetDocument {
        meta: DatasetMeta {
            version: "test".to_string(),
            last_updated: "2026-01-01".to_string(),
            scoring_version: "test".to_string(),
            total_providers: providers.len(),
            notes: String::new(),
        },
        scoring_weights: weights(),
        custody_types: CustodyTypeId::ordered()
            .into_iter()
            .map(|id| CustodyType {
                id,
                name: title_case(id.as_str()),
                short_description: String::new(),
                long_description: String::new(),
                best_for: Vec::new(),
                pros: Vec::new(),
                cons: Vec::new(),
            })
            .collect(),
        providers,
    }
}

fn title_case(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
