use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::domain::{DatasetDocument, Provider};
use crate::scoring::{Criterion, CriterionWeights};

/// Accepted drift between the authored weight total and 1.0.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;
pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;

/// Separator joining two provider slugs in a comparison slug.
pub const PAIR_SEPARATOR: &str = "-vs-";

/// Fatal problems found while loading the provider dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("scoring weight for {criterion} must be non-negative, got {value}")]
    NegativeWeight { criterion: &'static str, value: f64 },
    #[error("scoring weights must sum to 1.0, got {total}")]
    WeightsNotNormalized { total: f64 },
    #[error("provider '{slug}' has {criterion} score {value} outside [1, 10]")]
    ScoreOutOfRange {
        slug: String,
        criterion: &'static str,
        value: f64,
    },
    #[error("duplicate provider slug '{0}'")]
    DuplicateSlug(String),
    #[error("duplicate provider id '{0}'")]
    DuplicateId(String),
    #[error("provider slug '{slug}' is not usable in URLs: {reason}")]
    InvalidSlug { slug: String, reason: &'static str },
}

pub(crate) fn read_document(path: &Path) -> Result<DatasetDocument, DatasetError> {
    let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&raw)
}

pub(crate) fn parse_document(raw: &str) -> Result<DatasetDocument, DatasetError> {
    Ok(serde_json::from_str(raw)?)
}

/// Fills fields older dataset revisions left empty.
pub(crate) fn normalize(document: &mut DatasetDocument) {
    for provider in &mut document.providers {
        if provider.key_management.trim().is_empty() {
            warn!(provider = %provider.id, "no keyManagement; using security.keyManagementType");
            provider.key_management = if provider.security.key_management_type.is_empty() {
                "Not specified".to_string()
            } else {
                provider.security.key_management_type.clone()
            };
        }
        if provider.target_audience.is_empty() {
            warn!(provider = %provider.id, "no targetAudience");
        }
    }

    if document.meta.total_providers != document.providers.len() {
        warn!(
            declared = document.meta.total_providers,
            actual = document.providers.len(),
            "meta.totalProviders disagrees with provider list"
        );
        document.meta.total_providers = document.providers.len();
    }
}

pub(crate) fn validate(document: &DatasetDocument) -> Result<(), DatasetError> {
    validate_weights(&document.scoring_weights)?;

    let mut slugs = HashSet::new();
    let mut ids = HashSet::new();
    for provider in &document.providers {
        validate_slug(&provider.slug)?;
        if !slugs.insert(provider.slug.as_str()) {
            return Err(DatasetError::DuplicateSlug(provider.slug.clone()));
        }
        if !ids.insert(provider.id.as_str()) {
            return Err(DatasetError::DuplicateId(provider.id.clone()));
        }
        validate_scores(provider)?;
    }

    Ok(())
}

pub fn validate_weights(weights: &CriterionWeights) -> Result<(), DatasetError> {
    for (criterion, value) in weights.iter() {
        if value.is_nan() || value < 0.0 {
            return Err(DatasetError::NegativeWeight {
                criterion: criterion.key(),
                value,
            });
        }
    }

    let total = weights.total();
    if (total - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(DatasetError::WeightsNotNormalized { total });
    }
    Ok(())
}

fn validate_scores(provider: &Provider) -> Result<(), DatasetError> {
    for criterion in Criterion::ordered() {
        let value = provider.scores.get(criterion);
        if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
            return Err(DatasetError::ScoreOutOfRange {
                slug: provider.slug.clone(),
                criterion: criterion.key(),
                value,
            });
        }
    }
    Ok(())
}

fn validate_slug(slug: &str) -> Result<(), DatasetError> {
    let invalid = |reason| DatasetError::InvalidSlug {
        slug: slug.to_string(),
        reason,
    };

    if slug.is_empty() {
        return Err(invalid("slug is empty"));
    }
    if !slug
        .bytes()
        .all(|byte| byte.is_ascii_lowercase() || byte.is_ascii_digit() || byte == b'-')
    {
        return Err(invalid("only lowercase ASCII letters, digits, and '-' are allowed"));
    }
    if slug.contains(PAIR_SEPARATOR) {
        return Err(invalid("contains the comparison separator '-vs-'"));
    }
    Ok(())
}
