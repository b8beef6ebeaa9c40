//! Route definitions for visit analytics.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::visits;
use crate::state::AppState;

/// ```text
/// GET  /visits                -> list_visits
/// POST /visits                -> create_visit
/// POST /guest                 -> create_guest_record
/// GET  /owner/visits          -> owner_visit_stats
/// GET  /owner/today-visits    -> today_owner_visits
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/visits",
            get(visits::list_visits).post(visits::create_visit),
        )
        .route("/guest", post(visits::create_guest_record))
        .route("/owner/visits", get(visits::owner_visit_stats))
        .route("/owner/today-visits", get(visits::today_owner_visits))
}
