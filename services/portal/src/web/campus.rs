//! services/portal/src/web/campus.rs
//!
//! Handlers for the pages backed by static datasets: the club member
//! directory and the student certificate requests.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use campus_core::domain::{CertificateRequest, ClubMember};
use campus_core::view::{ViewController, ViewSnapshot};
use campus_core::ViewFilter;
use std::sync::Arc;

use super::state::AppState;
use super::{render_view, submit_view};

const NO_MEMBERS: &str = "No members found";
const NO_CERTIFICATES: &str = "No certificate requests found";

#[utoipa::path(
    get,
    path = "/views/club/members",
    params(
        ("q" = Option<String>, Query, description = "Search by name, roll number or email"),
        ("category" = Option<String>, Query, description = "Club department, or `all`")
    ),
    responses((status = 200, description = "The club member directory", body = ViewSnapshot<ClubMember>))
)]
pub async fn club_members_view(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ViewFilter>,
) -> (StatusCode, Json<ViewSnapshot<ClubMember>>) {
    let source = state.campus.club_members.clone();
    render_view(ViewController::new(source, NO_MEMBERS), &filter).await
}

/// Adds a member; the directory assigns the next free id on insert.
#[utoipa::path(
    post,
    path = "/views/club/members",
    request_body(content_type = "application/json", description = "The new member."),
    responses(
        (status = 201, description = "Member added; the reloaded directory is returned", body = ViewSnapshot<ClubMember>),
        (status = 422, description = "A required field is blank")
    )
)]
pub async fn add_club_member(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<ClubMember>,
) -> (StatusCode, Json<ViewSnapshot<ClubMember>>) {
    let source = state.campus.club_members.clone();
    submit_view(
        ViewController::new(source, NO_MEMBERS),
        &draft,
        StatusCode::CREATED,
    )
    .await
}

#[utoipa::path(
    get,
    path = "/views/student/certificates",
    params(
        ("q" = Option<String>, Query, description = "Search by certificate type or purpose"),
        ("category" = Option<String>, Query, description = "Request status, or `all`")
    ),
    responses((status = 200, description = "The student's certificate requests", body = ViewSnapshot<CertificateRequest>))
)]
pub async fn certificates_view(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ViewFilter>,
) -> (StatusCode, Json<ViewSnapshot<CertificateRequest>>) {
    let source = state.campus.certificates.clone();
    render_view(ViewController::new(source, NO_CERTIFICATES), &filter).await
}
