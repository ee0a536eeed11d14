use std::path::Path;

use tracing::info;

use super::domain::{CustodyType, CustodyTypeId, DatasetDocument, DatasetMeta, Provider};
use super::loader::{self, DatasetError};
use crate::scoring::CriterionWeights;

const BUNDLED_DATASET: &str = include_str!("../../data/providers.json");

/// Read-only access to the provider dataset.
///
/// Scoring, ranking, and page assembly only ever see data through this trait so they can
/// run against synthetic fixtures as easily as the bundled file.
pub trait ProviderSource: Send + Sync {
    /// Providers in dataset declaration order.
    fn list_providers(&self) -> &[Provider];
    fn list_weights(&self) -> &CriterionWeights;
    fn list_custody_types(&self) -> &[CustodyType];
    fn meta(&self) -> &DatasetMeta;

    fn provider(&self, slug: &str) -> Option<&Provider> {
        self.list_providers()
            .iter()
            .find(|provider| provider.slug == slug)
    }

    fn custody_type(&self, id: CustodyTypeId) -> Option<&CustodyType> {
        self.list_custody_types().iter().find(|kind| kind.id == id)
    }

    /// Providers of one custody type, declaration order preserved.
    fn providers_by_type(&self, id: CustodyTypeId) -> Vec<&Provider> {
        self.list_providers()
            .iter()
            .filter(|provider| provider.custody_type == id)
            .collect()
    }
}

/// Validated, immutable snapshot of the dataset held in memory for the process lifetime.
#[derive(Debug, Clone)]
pub struct StaticDataset {
    meta: DatasetMeta,
    weights: CriterionWeights,
    custody_types: Vec<CustodyType>,
    providers: Vec<Provider>,
}

impl StaticDataset {
    /// The dataset compiled into this crate.
    pub fn bundled() -> Result<Self, DatasetError> {
        Self::from_json_str(BUNDLED_DATASET)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let document = loader::read_document(path.as_ref())?;
        Self::from_document(document)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, DatasetError> {
        let document = loader::parse_document(raw)?;
        Self::from_document(document)
    }

    /// Normalizes legacy gaps, then rejects the document outright if any invariant fails.
    pub fn from_document(mut document: DatasetDocument) -> Result<Self, DatasetError> {
        loader::normalize(&mut document);
        loader::validate(&document)?;

        info!(
            providers = document.providers.len(),
            custody_types = document.custody_types.len(),
            version = %document.meta.version,
            "provider dataset loaded"
        );

        Ok(Self {
            meta: document.meta,
            weights: document.scoring_weights,
            custody_types: document.custody_types,
            providers: document.providers,
        })
    }
}

impl ProviderSource for StaticDataset {
    fn list_providers(&self) -> &[Provider] {
        &self.providers
    }

    fn list_weights(&self) -> &CriterionWeights {
        &self.weights
    }

    fn list_custody_types(&self) -> &[CustodyType] {
        &self.custody_types
    }

    fn meta(&self) -> &DatasetMeta {
        &self.meta
    }
}
