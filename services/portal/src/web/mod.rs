pub mod campus;
pub mod docs;
pub mod faculty;
pub mod hod;
pub mod middleware;
pub mod settings;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

use axum::{
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post, put},
    Json, Router,
};
use campus_core::filter::Searchable;
use campus_core::ports::{DataSource, PortError};
use campus_core::validate::Draft;
use campus_core::view::{ViewController, ViewError, ViewSnapshot};
use campus_core::ViewFilter;
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

use state::AppState;

/// The error half of every handler result.
pub type Failure = (StatusCode, String);

//=========================================================================================
// Error Mapping
//=========================================================================================

pub fn status_for(err: &ViewError) -> StatusCode {
    match err {
        ViewError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ViewError::Port(PortError::NotFound(_)) => StatusCode::NOT_FOUND,
        ViewError::Port(PortError::Unauthorized) => StatusCode::UNAUTHORIZED,
        ViewError::Port(_) | ViewError::PartialBatch { .. } => StatusCode::BAD_GATEWAY,
    }
}

/// Logs the detail and answers with the message a page would show.
pub fn failure(err: impl Into<ViewError>) -> Failure {
    let err = err.into();
    error!("Request failed: {:?}", err);
    (status_for(&err), err.user_message())
}

//=========================================================================================
// View Lifecycle Helpers
//=========================================================================================

/// Loads a page once and renders it through `filter`. A failed load still
/// renders: the snapshot carries the error slot for the retry affordance.
pub async fn render_view<S>(
    mut controller: ViewController<S>,
    filter: &ViewFilter,
) -> (StatusCode, Json<ViewSnapshot<S::Item>>)
where
    S: DataSource,
    S::Item: Searchable + Serialize,
{
    let status = match controller.load().await {
        Ok(()) => StatusCode::OK,
        Err(e) => status_for(&e),
    };
    (status, Json(controller.render(filter)))
}

/// Opens the form, submits the draft and renders the reloaded page, answering
/// `success` when both the submit and the reload went through.
pub async fn submit_view<S>(
    mut controller: ViewController<S>,
    draft: &S::Draft,
    success: StatusCode,
) -> (StatusCode, Json<ViewSnapshot<S::Item>>)
where
    S: DataSource,
    S::Item: Searchable + Serialize,
    S::Draft: Draft,
{
    controller.open_modal();
    let status = match controller.submit(draft).await {
        Ok(()) => success,
        Err(e) => status_for(&e),
    };
    (status, Json(controller.render(&ViewFilter::all())))
}

//=========================================================================================
// Router
//=========================================================================================

/// Builds every API route over the shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let faculty_routes = Router::new()
        .route("/dashboard", get(faculty::dashboard_view))
        .route(
            "/assignments",
            get(faculty::assignments_view).post(faculty::create_assignment),
        )
        .route("/assignments/{id}", put(faculty::update_assignment))
        .route(
            "/assignments/{id}/submissions",
            get(faculty::submissions_view),
        )
        .route("/assignments/{id}/grades", post(faculty::grade_submissions))
        .route(
            "/attendance",
            get(faculty::attendance_catalog).post(faculty::record_attendance),
        )
        .route("/students", get(faculty::roster_view))
        .route("/exams", get(faculty::exam_catalog))
        .route("/marks", post(faculty::enter_marks))
        .route(
            "/achievements",
            get(faculty::achievements_view).post(faculty::create_achievement),
        )
        .route(
            "/profile",
            get(faculty::profile_view).put(faculty::update_profile),
        )
        .route("/payroll", get(faculty::payroll_view))
        .route("/timetable", get(faculty::timetable_view));

    let hod_routes = Router::new()
        .route("/leaves", get(hod::leaves_view))
        .route("/leaves/{id}/decision", post(hod::decide_leave))
        .route("/gate-passes", get(hod::gate_passes_view))
        .route("/gate-passes/{id}/decision", post(hod::decide_gate_pass));

    Router::new()
        .nest("/views/faculty", faculty_routes)
        .nest("/views/hod", hod_routes)
        .route(
            "/views/club/members",
            get(campus::club_members_view).post(campus::add_club_member),
        )
        .route("/views/student/certificates", get(campus::certificates_view))
        .route("/settings", get(settings::all_settings))
        .route(
            "/settings/{key}",
            get(settings::get_settings).put(settings::save_settings),
        )
        .layer(axum_middleware::from_fn(middleware::log_requests))
        .with_state(state)
}
