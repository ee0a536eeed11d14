use custody_compare::config::SiteConfig;
use custody_compare::dataset::{CustodyTypeId, DatasetError, StaticDataset};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// The configured dataset file when one is set, otherwise the bundled snapshot.
pub(crate) fn load_dataset(site: &SiteConfig) -> Result<StaticDataset, DatasetError> {
    match &site.data_path {
        Some(path) => {
            info!(path = %path.display(), "loading provider dataset from disk");
            StaticDataset::from_path(path)
        }
        None => StaticDataset::bundled(),
    }
}

pub(crate) fn parse_custody_type(raw: &str) -> Result<CustodyTypeId, String> {
    CustodyTypeId::parse(raw.trim()).ok_or_else(|| {
        let known: Vec<_> = CustodyTypeId::ordered()
            .iter()
            .map(|id| id.as_str())
            .collect();
        format!("unknown custody type '{raw}' (expected one of: {})", known.join(", "))
    })
}
