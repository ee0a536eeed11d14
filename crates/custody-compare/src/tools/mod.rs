//! Interactive helpers: fee calculator, risk quiz, decision tree, and side-by-side comparator.

pub mod comparator;
pub mod decision_tree;
pub mod fees;
pub mod quiz;

use crate::dataset::{CustodyTypeId, ProviderSource};
use crate::scoring::{rank, RankedProvider};

/// How many providers a recommendation surfaces.
pub const RECOMMENDATION_LIMIT: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("assets under custody must be between $10,000 and $100,000,000, got ${0}")]
    AumOutOfRange(u64),
    #[error("select between 2 and 4 providers, got {0}")]
    SelectionSize(usize),
    #[error("provider '{0}' selected more than once")]
    DuplicateSelection(String),
    #[error("unknown provider '{0}'")]
    UnknownProvider(String),
    #[error("unknown decision tree node '{0}'")]
    UnknownNode(String),
    #[error("node '{node}' has no option {option}")]
    UnknownOption { node: String, option: usize },
    #[error("'{value}' is not a valid answer to '{question}'")]
    InvalidAnswer {
        question: &'static str,
        value: String,
    },
}

/// Highest-ranked providers of one custody type.
pub fn top_of_type<S>(
    source: &S,
    custody_type: CustodyTypeId,
    limit: usize,
) -> Vec<RankedProvider<'_>>
where
    S: ProviderSource + ?Sized,
{
    let mut ranked = rank(source.providers_by_type(custody_type), source.list_weights());
    ranked.truncate(limit);
    ranked
}
