//! Visit log, guest record and owner visit handlers.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use blog_core::error::CoreError;
use blog_core::pagination::validate_stats_days;
use blog_db::models::visit::{CreateGuestRecord, CreateVisitLog, DEFAULT_VISIT_CONTENT};
use blog_db::repositories::{GuestRecordRepo, OwnerVisitRepo, VisitLogRepo};
use blog_db::DbPool;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;
use crate::query::PageParams;
use crate::response::{created, ApiResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OwnerStatsParams {
    pub days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct TodayVisits {
    pub date: NaiveDate,
    pub today_visits: i32,
}

/// POST /visits
///
/// Inserts the row, then asks the retention worker to trim the table. The
/// response does not wait for the trim.
pub async fn create_visit(
    State(state): State<AppState>,
    Json(input): Json<CreateVisitLog>,
) -> AppResult<impl IntoResponse> {
    let visit_time = input.visit_time.ok_or_else(|| {
        AppError::Core(CoreError::Validation("visit_time is required".into()))
    })?;
    let content = match input.content.trim() {
        "" => DEFAULT_VISIT_CONTENT,
        c => c,
    };

    let log = VisitLogRepo::create(
        &state.pool,
        input.user_nickname.trim(),
        visit_time,
        content,
    )
    .await?;

    // Coalesced and stopped requests are logged by the handle.
    state.retention.request();
    tracing::debug!(visit_id = log.id, "Visit logged");

    Ok(created(log))
}

/// GET /visits?page=&page_size=
pub async fn list_visits(
    State(state): State<AppState>,
    Query(paging): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let page = paging.to_page()?;
    let (logs, total) = VisitLogRepo::list(&state.pool, page).await?;
    Ok(ApiResponse::paged(logs, total, page.page))
}

/// POST /guest
pub async fn create_guest_record(
    State(state): State<AppState>,
    Json(input): Json<CreateGuestRecord>,
) -> AppResult<impl IntoResponse> {
    let entry_time = input.entry_time.ok_or_else(|| {
        AppError::Core(CoreError::Validation("entry_time is required".into()))
    })?;
    let content = input.content.trim();
    if content.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "content is required".into(),
        )));
    }

    let record = GuestRecordRepo::create(&state.pool, entry_time, content).await?;
    tracing::info!(guest_record_id = record.id, "Guest record created");
    Ok(created(record))
}

/// GET /owner/visits?days=
///
/// Per-day owner visit counts for the last `days` days including today. A
/// request carrying an owner token also counts as a visit.
pub async fn owner_visit_stats(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
    Query(params): Query<OwnerStatsParams>,
) -> AppResult<impl IntoResponse> {
    let days = validate_stats_days(params.days)?;

    if user.as_ref().is_some_and(|u| u.is_owner()) {
        record_owner_visit_detached(&state.pool);
    }

    let stats = OwnerVisitRepo::stats(&state.pool, today(), days).await?;
    Ok(ApiResponse::success(stats))
}

/// GET /owner/today-visits
pub async fn today_owner_visits(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let date = today();
    let today_visits = OwnerVisitRepo::today_visits(&state.pool, date).await?;
    Ok(ApiResponse::success(TodayVisits { date, today_visits }))
}

/// Bump today's owner visit counter without blocking the caller.
///
/// Failures are logged and dropped.
pub(crate) fn record_owner_visit_detached(pool: &DbPool) {
    let pool = pool.clone();
    tokio::spawn(async move {
        if let Err(e) = OwnerVisitRepo::record_visit(&pool, today()).await {
            tracing::error!(error = %e, "Failed to record owner visit");
        }
    });
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
