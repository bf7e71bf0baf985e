use crate::calendar::parse_day;
use crate::errors::AppError;
use crate::models::{DashboardSnapshot, DateRange, RangeQuery};
use crate::state::AppState;
use crate::stats::build_dashboard;
use crate::storage::read_dataset;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use chrono::NaiveDate;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(state.initial_range, state.picker_range))
}

pub async fn get_dataset(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let body = read_dataset(&state.dataset_path).await?;
    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], body))
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<DashboardSnapshot>, AppError> {
    let range = resolve_range(&query, state.initial_range)?;
    Ok(Json(build_dashboard(&state.records, range)))
}

fn resolve_range(query: &RangeQuery, fallback: DateRange) -> Result<DateRange, AppError> {
    let start = resolve_bound("start", query.start.as_deref(), fallback.start)?;
    let end = resolve_bound("end", query.end.as_deref(), fallback.end)?;
    Ok(DateRange::new(start, end))
}

fn resolve_bound(
    name: &str,
    value: Option<&str>,
    fallback: NaiveDate,
) -> Result<NaiveDate, AppError> {
    match value {
        None => Ok(fallback),
        Some(value) => parse_day(value)
            .ok_or_else(|| AppError::bad_request(format!("{name} must be a YYYY-MM-DD date"))),
    }
}
