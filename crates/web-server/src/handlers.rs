use crate::{error::AppError, AppState};
use analytics::{MetricsEngine, MetricsReport};
use api_client::{fetch_ticker, FetchResult};
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use chrono::Utc;
use dashboard::format::UNRESOLVED_MESSAGE;
use dashboard::ViewModel;
use serde::Deserialize;
use std::sync::Arc;

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub ticker: String,
}

/// # GET /
/// The single-page dashboard. It calls `/api/dashboard` and draws the result.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// # GET /api/dashboard?ticker=AAPL
/// Runs a full dashboard cycle. Prompt and unresolved outcomes are regular
/// view models, so this always answers 200.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Json<ViewModel> {
    let as_of = Utc::now().date_naive();
    let view = dashboard::render(state.provider.as_ref(), &query.ticker, as_of, &state.settings).await;
    Json(view)
}

/// # GET /api/metrics/:ticker
/// The raw metrics report, without any presentation.
pub async fn get_metrics(
    Path(ticker): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<MetricsReport>, AppError> {
    let as_of = Utc::now().date_naive();
    let settings = &state.settings;

    match fetch_ticker(state.provider.as_ref(), &ticker, as_of, settings.history_years).await {
        FetchResult::Valid { series, .. } => {
            let engine = MetricsEngine::new(settings.std_dev, settings.histogram_bins)?;
            Ok(Json(engine.analyze(&series)?))
        }
        FetchResult::Invalid(_) => Err(AppError::NotFound(UNRESOLVED_MESSAGE.to_string())),
    }
}
