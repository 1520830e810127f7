//! services/portal/src/web/hod.rs
//!
//! Handlers for the head-of-department approval queues: faculty leave and
//! student gate passes. Each queue lists its requests with status counts and
//! takes one approve/reject decision at a time.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use campus_core::aggregate::{request_tally, RequestTally};
use campus_core::domain::{GatePassRequest, LeaveRequest, RequestStatus};
use campus_core::ports::DataSource;
use campus_core::sources::{GatePassesSource, LeaveRequestsSource};
use campus_core::validate::{Decision, DecisionDraft};
use campus_core::view::{ViewController, ViewSnapshot};
use campus_core::{Searchable, ViewFilter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::state::AppState;
use super::{status_for, submit_view};

const NO_LEAVES: &str = "No leave requests found";
const NO_GATE_PASSES: &str = "No gate pass requests found";

/// A queue page: the filtered requests plus counts over the whole queue.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalQueue<T> {
    #[serde(flatten)]
    pub page: ViewSnapshot<T>,
    pub tally: RequestTally,
}

/// The body of a decision; the request id comes from the path.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DecisionBody {
    pub decision: Decision,
    /// Optional when approving; the reason shown to the applicant when rejecting.
    #[serde(default)]
    pub remarks: String,
}

impl DecisionBody {
    fn for_request(self, request_id: String) -> DecisionDraft {
        DecisionDraft {
            request_id,
            decision: self.decision,
            remarks: self.remarks,
        }
    }
}

/// Loads a queue once and counts it before filtering.
async fn queue_view<S>(
    mut controller: ViewController<S>,
    filter: &ViewFilter,
    status_of: fn(&S::Item) -> RequestStatus,
) -> (StatusCode, Json<ApprovalQueue<S::Item>>)
where
    S: DataSource,
    S::Item: Searchable + Serialize,
{
    let status = match controller.load().await {
        Ok(()) => StatusCode::OK,
        Err(e) => status_for(&e),
    };
    let tally = request_tally(controller.dataset().iter().map(status_of));
    (
        status,
        Json(ApprovalQueue {
            page: controller.render(filter),
            tally,
        }),
    )
}

//=========================================================================================
// Faculty Leave
//=========================================================================================

#[utoipa::path(
    get,
    path = "/views/hod/leaves",
    params(
        ("q" = Option<String>, Query, description = "Search by faculty name, leave type or reason"),
        ("category" = Option<String>, Query, description = "`pending`, `approved`, `rejected` or `all`")
    ),
    responses(
        (status = 200, description = "The leave queue with status counts", body = ApprovalQueue<LeaveRequest>),
        (status = 502, description = "Page rendered with its error slot filled")
    )
)]
pub async fn leaves_view(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ViewFilter>,
) -> (StatusCode, Json<ApprovalQueue<LeaveRequest>>) {
    let source = LeaveRequestsSource::new(state.hod.clone());
    queue_view(ViewController::new(source, NO_LEAVES), &filter, |r| r.status).await
}

#[utoipa::path(
    post,
    path = "/views/hod/leaves/{id}/decision",
    params(("id" = String, Path, description = "The leave request id")),
    request_body = DecisionBody,
    responses(
        (status = 200, description = "Decision recorded; the reloaded queue is returned", body = ViewSnapshot<LeaveRequest>),
        (status = 404, description = "No such request"),
        (status = 422, description = "A rejection without remarks")
    )
)]
pub async fn decide_leave(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<DecisionBody>,
) -> (StatusCode, Json<ViewSnapshot<LeaveRequest>>) {
    let source = LeaveRequestsSource::new(state.hod.clone());
    submit_view(
        ViewController::new(source, NO_LEAVES),
        &body.for_request(id),
        StatusCode::OK,
    )
    .await
}

//=========================================================================================
// Student Gate Passes
//=========================================================================================

#[utoipa::path(
    get,
    path = "/views/hod/gate-passes",
    params(
        ("q" = Option<String>, Query, description = "Search by student, roll number, class or reason"),
        ("category" = Option<String>, Query, description = "`pending`, `approved`, `rejected` or `all`")
    ),
    responses(
        (status = 200, description = "The gate-pass queue with status counts", body = ApprovalQueue<GatePassRequest>),
        (status = 502, description = "Page rendered with its error slot filled")
    )
)]
pub async fn gate_passes_view(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ViewFilter>,
) -> (StatusCode, Json<ApprovalQueue<GatePassRequest>>) {
    let source = GatePassesSource::new(state.hod.clone());
    queue_view(ViewController::new(source, NO_GATE_PASSES), &filter, |r| r.status).await
}

#[utoipa::path(
    post,
    path = "/views/hod/gate-passes/{id}/decision",
    params(("id" = String, Path, description = "The gate-pass request id")),
    request_body = DecisionBody,
    responses(
        (status = 200, description = "Decision recorded; the reloaded queue is returned", body = ViewSnapshot<GatePassRequest>),
        (status = 404, description = "No such request"),
        (status = 422, description = "A rejection without remarks")
    )
)]
pub async fn decide_gate_pass(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<DecisionBody>,
) -> (StatusCode, Json<ViewSnapshot<GatePassRequest>>) {
    let source = GatePassesSource::new(state.hod.clone());
    submit_view(
        ViewController::new(source, NO_GATE_PASSES),
        &body.for_request(id),
        StatusCode::OK,
    )
    .await
}
