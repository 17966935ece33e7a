//! HTTP request handlers.

use super::AppState;
use crate::model::{Entity, Period};
use crate::orchestrator::Snapshot;
use crate::query::{apply, Facets, Filters, Selection, SortDirection, SortKey, SortParseError, SortSpec, Stats};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};

// ============================================================================
// API: Dashboard
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
}

impl DashboardQuery {
    pub fn filters(&self) -> Filters {
        Filters {
            service: Selection::parse(self.service.as_deref()),
            provider: Selection::parse(self.provider.as_deref()),
            channel: Selection::parse(self.channel.as_deref()),
            category: Selection::parse(self.category.as_deref()),
        }
    }

    /// Sort requested by the client. `sort=none` keeps canonical order.
    pub fn sort_spec(&self) -> Result<SortSpec, SortParseError> {
        let default = SortSpec::default();

        let direction = match self.direction.as_deref() {
            Some(d) => d.parse::<SortDirection>()?,
            None => default.direction,
        };

        let key = match self.sort.as_deref().map(str::trim) {
            None | Some("") => default.key,
            Some("none") => None,
            Some(k) => Some(k.parse::<SortKey>()?),
        };

        Ok(SortSpec { key, direction })
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse<'a> {
    pub state: &'a Snapshot,
    pub stats: Stats,
    pub facets: Facets,
    pub data: Vec<&'a Entity>,
}

pub async fn handle_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    let sort = match query.sort_spec() {
        Ok(s) => s,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let snapshot = state.orchestrator.snapshot();
    let result = apply(&snapshot.entities, &query.filters(), sort);

    Json(DashboardResponse {
        state: &snapshot,
        stats: result.stats,
        facets: result.facets,
        data: result.data,
    })
    .into_response()
}

pub async fn handle_get_entity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let snapshot = state.orchestrator.snapshot();

    match snapshot.entities.iter().find(|e| e.id == id) {
        Some(entity) => Json(entity).into_response(),
        None => (StatusCode::NOT_FOUND, "Entity not found").into_response(),
    }
}

// ============================================================================
// API: Refresh control
// ============================================================================

pub async fn handle_refresh(State(state): State<AppState>) -> impl IntoResponse {
    state.orchestrator.refresh().await;
    StatusCode::ACCEPTED
}

#[derive(Debug, Deserialize)]
pub struct PeriodRequest {
    pub period: String,
}

#[derive(Debug, Serialize)]
pub struct PeriodResponse {
    pub period: Period,
    pub refetching: bool,
}

pub async fn handle_set_period(
    State(state): State<AppState>,
    Json(req): Json<PeriodRequest>,
) -> impl IntoResponse {
    let period: Period = match req.period.parse() {
        Ok(p) => p,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let refetching = state.orchestrator.set_period(period).await.is_some();
    (StatusCode::ACCEPTED, Json(PeriodResponse { period, refetching })).into_response()
}

pub async fn handle_health() -> impl IntoResponse {
    "ok"
}
