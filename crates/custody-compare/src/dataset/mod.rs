//! Provider dataset: on-disk schema, load-time validation, and the read-only source trait.

pub mod domain;
mod loader;
mod source;

#[cfg(test)]
pub(crate) mod fixtures;

pub use domain::{
    CustodyType, CustodyTypeId, DatasetDocument, DatasetMeta, Fees, Insurance, Provider,
    Regulatory, Security,
};
pub use loader::{
    validate_weights, DatasetError, MAX_SCORE, MIN_SCORE, PAIR_SEPARATOR, WEIGHT_TOLERANCE,
};
pub use source::{ProviderSource, StaticDataset};
