use crate::cli::ServeArgs;
use crate::infra::{load_dataset, AppState};
use crate::routes::with_site_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use custody_compare::config::AppConfig;
use custody_compare::error::AppError;
use custody_compare::site::SiteState;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut config: AppConfig, mut args: ServeArgs) -> Result<(), AppError> {
    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    // A dataset that fails validation stops startup before the listener binds.
    let dataset = load_dataset(&config.site)?;
    let site_state = Arc::new(SiteState::new(dataset, &config.site));

    let app = with_site_routes(site_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        site = %config.site.base_url,
        "custody comparison site ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
