use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::debug;

use super::pages;
use super::seo::{Seo, GUIDE_NOT_FOUND, PROVIDER_NOT_FOUND};
use super::sitemap;
use super::views::ComparisonView;
use crate::config::SiteConfig;
use crate::dataset::ProviderSource;
use crate::error::AppError;
use crate::scoring::{rank, ComparisonIndex};
use crate::tools::{comparator, decision_tree, fees, quiz};

/// Immutable per-process state shared by every request.
pub struct SiteState<S> {
    source: S,
    seo: Seo,
}

impl<S: ProviderSource> SiteState<S> {
    pub fn new(source: S, site: &SiteConfig) -> Self {
        Self {
            source,
            seo: Seo::new(site),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn seo(&self) -> &Seo {
        &self.seo
    }
}

type Shared<S> = State<Arc<SiteState<S>>>;

/// Page, tool, and catalogue endpoints over one dataset.
pub fn site_router<S>(state: Arc<SiteState<S>>) -> Router
where
    S: ProviderSource + 'static,
{
    Router::new()
        .route("/", get(home_handler::<S>))
        .route("/custodian/:slug", get(provider_handler::<S>))
        .route("/custody-type/:custody_type", get(custody_type_handler::<S>))
        .route("/compare/:slugs", get(comparison_handler::<S>))
        .route("/guides/:slug", get(guide_handler::<S>))
        .route("/tools/fee-calculator", get(fee_calculator_handler::<S>))
        .route(
            "/tools/risk-score",
            get(quiz_questions_handler).post(risk_score_handler::<S>),
        )
        .route("/tools/decision-tree", get(decision_start_handler::<S>))
        .route("/tools/decision-tree/:node", get(decision_node_handler::<S>))
        .route("/tools/compare", get(comparator_handler::<S>))
        .route("/api/v1/providers", get(providers_handler::<S>))
        .route("/api/v1/comparisons", get(comparisons_handler::<S>))
        .route("/sitemap.xml", get(sitemap_handler::<S>))
        .with_state(state)
}

pub(crate) async fn home_handler<S>(State(state): Shared<S>) -> Response
where
    S: ProviderSource + 'static,
{
    Json(pages::home(state.source(), state.seo())).into_response()
}

pub(crate) async fn provider_handler<S>(
    State(state): Shared<S>,
    Path(slug): Path<String>,
) -> Result<Response, AppError>
where
    S: ProviderSource + 'static,
{
    let page = pages::provider(state.source(), state.seo(), &slug)
        .ok_or_else(|| {
            AppError::page_not_found(format!("custodian '{slug}'"), PROVIDER_NOT_FOUND)
        })?;
    Ok(Json(page).into_response())
}

pub(crate) async fn custody_type_handler<S>(
    State(state): Shared<S>,
    Path(custody_type): Path<String>,
) -> Result<Response, AppError>
where
    S: ProviderSource + 'static,
{
    let page = pages::custody_type(state.source(), state.seo(), &custody_type)
        .ok_or_else(|| AppError::not_found(format!("custody type '{custody_type}'")))?;
    Ok(Json(page).into_response())
}

pub(crate) async fn comparison_handler<S>(
    State(state): Shared<S>,
    Path(slugs): Path<String>,
) -> Result<Response, AppError>
where
    S: ProviderSource + 'static,
{
    match pages::comparison(state.source(), state.seo(), &slugs) {
        ComparisonView::Page(page) => Ok(Json(page).into_response()),
        ComparisonView::Redirect(canonical) => {
            Ok(Redirect::permanent(&format!("/compare/{canonical}")).into_response())
        }
        ComparisonView::NotFound => Err(AppError::not_found(format!("comparison '{slugs}'"))),
    }
}

pub(crate) async fn guide_handler<S>(
    State(state): Shared<S>,
    Path(slug): Path<String>,
) -> Result<Response, AppError>
where
    S: ProviderSource + 'static,
{
    let page = pages::guide(state.source(), state.seo(), &slug)
        .ok_or_else(|| AppError::page_not_found(format!("guide '{slug}'"), GUIDE_NOT_FOUND))?;
    Ok(Json(page).into_response())
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FeeQuery {
    pub(crate) aum: Option<u64>,
}

pub(crate) async fn fee_calculator_handler<S>(
    State(state): Shared<S>,
    query: Result<Query<FeeQuery>, QueryRejection>,
) -> Result<Response, AppError>
where
    S: ProviderSource + 'static,
{
    let Query(query) = query?;
    let aum = query.aum.unwrap_or(fees::DEFAULT_AUM);
    let comparison = fees::compare_fees(state.source(), aum)?;
    Ok(Json(comparison).into_response())
}

pub(crate) async fn quiz_questions_handler() -> Response {
    Json(quiz::questions()).into_response()
}

pub(crate) async fn risk_score_handler<S>(
    State(state): Shared<S>,
    raw: Result<Json<quiz::RawAnswers>, JsonRejection>,
) -> Result<Response, AppError>
where
    S: ProviderSource + 'static,
{
    let Json(raw) = raw?;
    let answers = quiz::QuizAnswers::try_from(raw)?;
    let result = quiz::evaluate(state.source(), answers);
    debug!(custody_type = %result.recommendation.custody_type, "risk quiz evaluated");
    Ok(Json(result).into_response())
}

pub(crate) async fn decision_start_handler<S>(State(state): Shared<S>) -> Result<Response, AppError>
where
    S: ProviderSource + 'static,
{
    let node = decision_tree::node(state.source(), decision_tree::START_NODE)?;
    Ok(Json(node).into_response())
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DecisionQuery {
    /// 0-based option picked at the node in the path.
    pub(crate) choice: Option<usize>,
}

pub(crate) async fn decision_node_handler<S>(
    State(state): Shared<S>,
    Path(node): Path<String>,
    query: Result<Query<DecisionQuery>, QueryRejection>,
) -> Result<Response, AppError>
where
    S: ProviderSource + 'static,
{
    let Query(query) = query?;
    let target = match query.choice {
        Some(choice) => decision_tree::step(&node, choice)?,
        None => node.as_str(),
    };
    let view = decision_tree::node(state.source(), target)?;
    Ok(Json(view).into_response())
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ComparatorQuery {
    #[serde(default)]
    pub(crate) providers: String,
}

pub(crate) async fn comparator_handler<S>(
    State(state): Shared<S>,
    query: Result<Query<ComparatorQuery>, QueryRejection>,
) -> Result<Response, AppError>
where
    S: ProviderSource + 'static,
{
    let Query(query) = query?;
    let selection = comparator::parse_selection(&query.providers);
    let view = comparator::compare(state.source(), &selection)?;
    Ok(Json(view).into_response())
}

pub(crate) async fn providers_handler<S>(State(state): Shared<S>) -> Response
where
    S: ProviderSource + 'static,
{
    let source = state.source();
    Json(rank(source.list_providers(), source.list_weights())).into_response()
}

pub(crate) async fn comparisons_handler<S>(State(state): Shared<S>) -> Response
where
    S: ProviderSource + 'static,
{
    let source = state.source();
    let pairs = ComparisonIndex::new(source.list_providers(), source.list_weights()).all_pairs();
    Json(pairs).into_response()
}

pub(crate) async fn sitemap_handler<S>(State(state): Shared<S>) -> Response
where
    S: ProviderSource + 'static,
{
    let entries = sitemap::entries(state.source(), state.seo(), Utc::now());
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime::TEXT_XML.as_ref())],
        sitemap::render(&entries),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::{document, provider, typed_provider};
    use crate::dataset::{CustodyTypeId, StaticDataset};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn router() -> Router {
        let dataset = StaticDataset::from_document(document(vec![
            provider("alpha", 9.0),
            provider("beta", 7.0),
            typed_provider("keys", 6.0, CustodyTypeId::SelfCustody),
        ]))
        .expect("valid");
        site_router(Arc::new(SiteState::new(dataset, &SiteConfig::default())))
    }

    async fn get(router: Router, uri: &str) -> Response {
        router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("route executes")
    }

    async fn read_json_body(response: Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn serves_provider_pages_and_missing_custodians() {
        let response = get(router(), "/custodian/alpha").await;
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["provider"]["slug"], "alpha");
        assert_eq!(payload["score"]["custodyScore"], 9.0);

        let response = get(router(), "/custodian/ghost").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let payload = read_json_body(response).await;
        assert_eq!(payload["error"], "custodian 'ghost' not found");
        assert_eq!(payload["title"], "Provider Not Found");
        assert_eq!(
            read_json_body(get(router(), "/guides/missing").await).await["title"],
            "Guide Not Found"
        );
    }

    #[tokio::test]
    async fn reversed_comparison_redirects_permanently() {
        let response = get(router(), "/compare/beta-vs-alpha").await;
        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).and_then(|value| value.to_str().ok()),
            Some("/compare/alpha-vs-beta")
        );

        let response = get(router(), "/compare/alpha-vs-beta").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get(router(), "/compare/alpha-vs-alpha").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn fee_calculator_validates_aum() {
        let response = get(router(), "/tools/fee-calculator?aum=250000").await;
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["aum"], 250_000);
        assert_eq!(payload["results"].as_array().map(Vec::len), Some(3));

        let response = get(router(), "/tools/fee-calculator?aum=5").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn risk_score_recommends_custody_type() {
        let body = serde_json::json!({
            "amount": "small",
            "technical": "high",
            "decentralization": "critical",
            "regulation": "none",
            "frequency": "weekly",
        });
        let response = router()
            .oneshot(
                Request::post("/tools/risk-score")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&body).expect("json")))
                    .expect("request"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["custodyType"], "self-custody");
        assert_eq!(payload["providers"][0]["slug"], "keys");
    }

    #[tokio::test]
    async fn decision_tree_steps_by_choice() {
        let response = get(router(), "/tools/decision-tree/start?choice=2").await;
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["id"], "institution-reg");

        let response = get(router(), "/tools/decision-tree/start?choice=9").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_tool_input_is_a_json_bad_request() {
        for uri in [
            "/tools/fee-calculator?aum=abc",
            "/tools/fee-calculator?aum=-5",
            "/tools/decision-tree/start?choice=x",
        ] {
            let response = get(router(), uri).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            let payload = read_json_body(response).await;
            assert!(payload["error"].is_string(), "{uri}");
        }

        let response = router()
            .oneshot(
                Request::post("/tools/risk-score")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{\"amount\": "))
                    .expect("request"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = read_json_body(response).await;
        assert!(payload["error"]
            .as_str()
            .is_some_and(|message| message.starts_with("invalid request")));
    }

    #[tokio::test]
    async fn comparator_requires_two_providers() {
        let response = get(router(), "/tools/compare?providers=alpha,keys").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get(router(), "/tools/compare?providers=alpha").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn api_lists_ranked_providers_and_pairs() {
        let payload = read_json_body(get(router(), "/api/v1/providers").await).await;
        let slugs: Vec<_> = payload
            .as_array()
            .expect("array")
            .iter()
            .map(|entry| entry["slug"].as_str().unwrap_or_default().to_string())
            .collect();
        assert_eq!(slugs, vec!["alpha", "beta", "keys"]);

        let payload = read_json_body(get(router(), "/api/v1/comparisons").await).await;
        assert_eq!(payload.as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn sitemap_is_served_as_xml() {
        let response = get(router(), "/sitemap.xml").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("text/xml")
        );
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        let xml = String::from_utf8(body.to_vec()).expect("utf-8");
        assert!(xml.contains("<loc>https://custodycompare.com/compare/alpha-vs-beta</loc>"));
    }
}
