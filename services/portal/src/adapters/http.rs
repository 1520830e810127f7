//! services/portal/src/adapters/http.rs
//!
//! This module contains the REST transport shared by the campus backend
//! adapters, and the concrete implementation of the `FacultyService` port
//! over the backend's `/faculty` endpoints.

use async_trait::async_trait;
use campus_core::domain::{
    Achievement, Assignment, AttendanceMark, AttendanceSession, DashboardStats, ExamCatalog,
    FacultyProfile, Grade, MarksSheet, NewAttendanceSession, PayrollOverview, SessionCatalog,
    Student, Submission, TimetableSlot,
};
use campus_core::ports::{FacultyService, PortError, PortResult};
use campus_core::validate::{AchievementDraft, AssignmentDraft, ProfileDraft};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

//=========================================================================================
// Response Envelope
//=========================================================================================

/// Every backend response body wraps its payload as `{ "data": ... }`.
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Parses a response body and returns the payload inside the envelope.
pub fn unwrap_envelope<T: DeserializeOwned>(body: &[u8]) -> PortResult<T> {
    serde_json::from_slice::<Envelope<T>>(body)
        .map(|envelope| envelope.data)
        .map_err(|e| PortError::Unexpected(format!("Malformed response envelope: {}", e)))
}

/// Achievements are served as part of the students listing.
#[derive(Deserialize)]
struct StudentsWithAchievements {
    #[serde(default)]
    achievements: Vec<Achievement>,
}

/// The students endpoint sometimes nests the list under `students`.
#[derive(Deserialize)]
#[serde(untagged)]
enum StudentList {
    Wrapped { students: Vec<Student> },
    Bare(Vec<Student>),
}

#[derive(Serialize)]
struct AttendancePayload<'a> {
    attendance: &'a [AttendanceMark],
}

//=========================================================================================
// Shared Backend Client
//=========================================================================================

/// The transport shared by every campus backend adapter: one base URL, an
/// optional bearer token, and the status and envelope handling.
///
/// Each call is a single attempt with no timeout; failures are mapped onto the
/// flat `PortError` taxonomy.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl BackendClient {
    pub fn new(client: Client, base_url: &str, token: Option<String>) -> PortResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| PortError::Unexpected(format!("Invalid backend URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(PortError::Unexpected(format!(
                "Backend URL '{}' cannot carry a path",
                base_url
            )));
        }
        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Appends `segments` to the base URL, percent-encoding each one, so an id
    /// such as `../profile` stays a single segment instead of rewriting the path.
    pub fn endpoint(&self, segments: &[&str]) -> PortResult<Url> {
        // `Url` drops "." and ".." segments instead of encoding them.
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(PortError::NotFound(format!("invalid path segment '{}'", bad)));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PortError::Unexpected(format!("{} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn request(&self, method: Method, segments: &[&str]) -> PortResult<RequestBuilder> {
        let builder = self.client.request(method, self.endpoint(segments)?);
        Ok(match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Sends a request and decodes the enveloped payload.
    pub async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> PortResult<T> {
        let response = builder
            .send()
            .await
            .map_err(|e| PortError::Network(e.to_string()))?;

        let status = response.status();
        let url = response.url().to_string();
        debug!("{} <- {}", status, url);

        let body = response
            .bytes()
            .await
            .map_err(|e| PortError::Network(e.to_string()))?;

        match status {
            s if s.is_success() => unwrap_envelope(&body),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(PortError::Unauthorized),
            StatusCode::NOT_FOUND => Err(PortError::NotFound(url)),
            s => Err(PortError::Network(format!("{} returned {}", url, s))),
        }
    }

    /// Like `send`, but for mutations whose payload the pages ignore.
    pub async fn send_ignoring_body(&self, builder: RequestBuilder) -> PortResult<()> {
        self.send::<serde_json::Value>(builder).await.map(drop)
    }

    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> PortResult<T> {
        self.send(self.request(Method::GET, segments)?).await
    }
}

//=========================================================================================
// The Faculty Adapter
//=========================================================================================

/// An adapter that implements the `FacultyService` port over HTTP, rooted at
/// the backend's `/faculty` prefix.
#[derive(Clone)]
pub struct HttpFacultyAdapter {
    backend: BackendClient,
}

impl HttpFacultyAdapter {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    fn url(&self, segments: &[&str]) -> PortResult<Url> {
        self.backend.endpoint(&with_prefix(segments))
    }

    fn request(&self, method: Method, segments: &[&str]) -> PortResult<RequestBuilder> {
        self.backend.request(method, &with_prefix(segments))
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> PortResult<T> {
        self.backend.get(&with_prefix(segments)).await
    }
}

fn with_prefix<'a>(segments: &[&'a str]) -> Vec<&'a str> {
    std::iter::once("faculty")
        .chain(segments.iter().copied())
        .collect()
}

//=========================================================================================
// `FacultyService` Trait Implementation
//=========================================================================================

#[async_trait]
impl FacultyService for HttpFacultyAdapter {
    async fn get_dashboard(&self) -> PortResult<DashboardStats> {
        self.get(&["dashboard"]).await
    }

    async fn get_timetable(&self) -> PortResult<Vec<TimetableSlot>> {
        self.get(&["timetable"]).await
    }

    async fn get_assignments(&self) -> PortResult<Vec<Assignment>> {
        self.get(&["assignments"]).await
    }

    async fn create_assignment(&self, draft: &AssignmentDraft) -> PortResult<Assignment> {
        let builder = self.request(Method::POST, &["assignments"])?.json(draft);
        self.backend.send(builder).await
    }

    async fn update_assignment(
        &self,
        assignment_id: &str,
        draft: &AssignmentDraft,
    ) -> PortResult<Assignment> {
        let builder = self
            .request(Method::PUT, &["assignments", assignment_id])?
            .json(draft);
        self.backend.send(builder).await
    }

    async fn get_assignment_submissions(
        &self,
        assignment_id: &str,
    ) -> PortResult<Vec<Submission>> {
        self.get(&["assignments", assignment_id, "submissions"])
            .await
    }

    async fn grade_submission(&self, submission_id: &str, grade: &Grade) -> PortResult<()> {
        let builder = self
            .request(Method::POST, &["submissions", submission_id, "grade"])?
            .json(grade);
        self.backend.send_ignoring_body(builder).await
    }

    async fn get_sessions(&self) -> PortResult<SessionCatalog> {
        self.get(&["sessions"]).await
    }

    async fn create_session(
        &self,
        session: &NewAttendanceSession,
    ) -> PortResult<AttendanceSession> {
        let builder = self.request(Method::POST, &["sessions"])?.json(session);
        self.backend.send(builder).await
    }

    async fn mark_attendance(&self, session_id: &str, marks: &[AttendanceMark]) -> PortResult<()> {
        let payload = AttendancePayload { attendance: marks };
        let builder = self
            .request(Method::POST, &["sessions", session_id, "attendance"])?
            .json(&payload);
        self.backend.send_ignoring_body(builder).await
    }

    async fn get_exams(&self) -> PortResult<ExamCatalog> {
        self.get(&["exams"]).await
    }

    async fn enter_marks(&self, exam_id: &str, sheet: &MarksSheet) -> PortResult<()> {
        let builder = self
            .request(Method::POST, &["exams", exam_id, "marks"])?
            .json(sheet);
        self.backend.send_ignoring_body(builder).await
    }

    async fn get_students(&self, class: Option<&str>) -> PortResult<Vec<Student>> {
        let mut builder = self.request(Method::GET, &["students"])?;
        if let Some(class) = class {
            builder = builder.query(&[("class", class)]);
        }
        let list: StudentList = self.backend.send(builder).await?;
        Ok(match list {
            StudentList::Wrapped { students } => students,
            StudentList::Bare(students) => students,
        })
    }

    async fn get_achievements(&self) -> PortResult<Vec<Achievement>> {
        let builder = self
            .request(Method::GET, &["students"])?
            .query(&[("includeAchievements", "true")]);
        let payload: StudentsWithAchievements = self.backend.send(builder).await?;
        Ok(payload.achievements)
    }

    async fn create_achievement(&self, draft: &AchievementDraft) -> PortResult<Achievement> {
        let builder = self.request(Method::POST, &["achievements"])?.json(draft);
        self.backend.send(builder).await
    }

    async fn get_profile(&self) -> PortResult<FacultyProfile> {
        self.get(&["profile"]).await
    }

    async fn update_profile(&self, draft: &ProfileDraft) -> PortResult<FacultyProfile> {
        let builder = self.request(Method::PUT, &["profile"])?.json(draft);
        self.backend.send(builder).await
    }

    /// Older deployments only expose `/payslips`, so a missing `/payroll`
    /// falls through to it once.
    async fn get_payroll(&self) -> PortResult<PayrollOverview> {
        match self.get(&["payroll"]).await {
            Err(PortError::NotFound(url)) => {
                warn!("{} not found, trying {}", url, self.url(&["payslips"])?);
                self.get(&["payslips"]).await
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_payload_is_extracted() {
        let stats: DashboardStats = unwrap_envelope(
            br#"{"success":true,"data":{"classesToday":4,"pendingEvaluations":25}}"#,
        )
        .unwrap();
        assert_eq!(stats.classes_today, 4);
        assert_eq!(stats.pending_evaluations, 25);
        assert_eq!(stats.leave_balance, 0);
    }

    #[test]
    fn body_without_envelope_is_rejected() {
        let result: PortResult<DashboardStats> = unwrap_envelope(br#"{"classesToday":4}"#);
        assert!(matches!(result, Err(PortError::Unexpected(_))));
    }

    #[test]
    fn student_list_accepts_both_shapes() {
        let wrapped: StudentList = unwrap_envelope(
            br#"{"data":{"students":[{"rollNumber":"CSE01","name":"Asha"}]}}"#,
        )
        .unwrap();
        let bare: StudentList =
            unwrap_envelope(br#"{"data":[{"rollNo":"CSE01","studentName":"Asha"}]}"#).unwrap();

        for list in [wrapped, bare] {
            let students = match list {
                StudentList::Wrapped { students } => students,
                StudentList::Bare(students) => students,
            };
            assert_eq!(students[0].roll_no, "CSE01");
            assert_eq!(students[0].name, "Asha");
        }
    }

    fn faculty(base_url: &str) -> HttpFacultyAdapter {
        HttpFacultyAdapter::new(BackendClient::new(Client::new(), base_url, None).unwrap())
    }

    #[test]
    fn urls_are_rooted_under_faculty() {
        let adapter = faculty("http://campus.test/api/");
        assert_eq!(
            adapter.url(&["assignments", "7", "submissions"]).unwrap().as_str(),
            "http://campus.test/api/faculty/assignments/7/submissions"
        );
    }

    #[test]
    fn ids_stay_inside_their_own_segment() {
        let adapter = faculty("http://campus.test/api");
        assert_eq!(
            adapter.url(&["assignments", "../profile"]).unwrap().as_str(),
            "http://campus.test/api/faculty/assignments/..%2Fprofile"
        );
        assert_eq!(
            adapter.url(&["submissions", "a b?c#d", "grade"]).unwrap().as_str(),
            "http://campus.test/api/faculty/submissions/a%20b%3Fc%23d/grade"
        );
        for id in ["", ".", ".."] {
            assert!(matches!(
                adapter.url(&["assignments", id]),
                Err(PortError::NotFound(_))
            ));
        }
    }

    #[test]
    fn unusable_base_urls_are_rejected() {
        assert!(BackendClient::new(Client::new(), "not a url", None).is_err());
        assert!(BackendClient::new(Client::new(), "mailto:hod@campus.test", None).is_err());
    }

    //=====================================================================================
    // Against a local backend
    //=====================================================================================

    use axum::{
        extract::Path,
        http::{HeaderMap, StatusCode as AxumStatus},
        routing::{get, put},
        Json, Router,
    };
    use serde_json::{json, Value};

    /// Serves `router` on an ephemeral port and returns its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/api", addr)
    }

    async fn update_echo(
        Path(id): Path<String>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (AxumStatus, Json<Value>) {
        if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer t0ken") {
            return (AxumStatus::UNAUTHORIZED, Json(json!({ "success": false })));
        }
        (
            AxumStatus::OK,
            Json(json!({ "success": true, "data": {
                "_id": id,
                "title": body["title"],
                "subject": body["subject"],
                "class": body["class"],
                "dueDate": body["dueDate"],
                "maxMarks": body["maxMarks"],
                "status": "active"
            }})),
        )
    }

    fn backend() -> Router {
        Router::new()
            .route("/api/faculty/dashboard", get(|| async { AxumStatus::UNAUTHORIZED }))
            .route("/api/faculty/profile", get(|| async { AxumStatus::FORBIDDEN }))
            .route(
                "/api/faculty/timetable",
                get(|| async { AxumStatus::INTERNAL_SERVER_ERROR }),
            )
            .route(
                "/api/faculty/payslips",
                get(|| async {
                    Json(json!({ "data": { "payslips": [{
                        "month": "Oct 2025",
                        "grossSalary": 95000,
                        "netSalary": 80000,
                        "status": "paid"
                    }]}}))
                }),
            )
            .route("/api/faculty/assignments/{id}", put(update_echo))
    }

    fn connected(base_url: &str, token: Option<&str>) -> HttpFacultyAdapter {
        HttpFacultyAdapter::new(
            BackendClient::new(Client::new(), base_url, token.map(str::to_string)).unwrap(),
        )
    }

    #[tokio::test]
    async fn statuses_map_onto_port_errors() {
        let adapter = connected(&serve(backend()).await, None);

        assert!(matches!(adapter.get_dashboard().await, Err(PortError::Unauthorized)));
        assert!(matches!(adapter.get_profile().await, Err(PortError::Unauthorized)));
        assert!(matches!(adapter.get_timetable().await, Err(PortError::Network(_))));
        assert!(matches!(
            adapter.get_assignments().await,
            Err(PortError::NotFound(ref url)) if url.ends_with("/api/faculty/assignments")
        ));
    }

    #[tokio::test]
    async fn unreachable_backends_are_network_errors() {
        let adapter = connected("http://127.0.0.1:1/api", None);
        assert!(matches!(adapter.get_exams().await, Err(PortError::Network(_))));
    }

    #[tokio::test]
    async fn missing_payroll_falls_back_to_payslips() {
        let adapter = connected(&serve(backend()).await, None);
        let overview = adapter.get_payroll().await.unwrap();
        assert_eq!(overview.salary_history.len(), 1);
        assert_eq!(overview.salary_history[0].gross_salary, 95000.0);
    }

    #[tokio::test]
    async fn updates_carry_the_token_and_an_encoded_id() {
        let base_url = serve(backend()).await;
        let draft = AssignmentDraft {
            title: "Graph Algorithms".to_string(),
            subject: "Data Structures".to_string(),
            class: "CSE-3A".to_string(),
            due_date: "2025-12-10".to_string(),
            max_marks: 20,
            ..Default::default()
        };

        let anonymous = connected(&base_url, None);
        assert!(matches!(
            anonymous.update_assignment("7", &draft).await,
            Err(PortError::Unauthorized)
        ));

        let adapter = connected(&base_url, Some("t0ken"));
        let updated = adapter.update_assignment("7", &draft).await.unwrap();
        assert_eq!(updated.id, "7");
        assert_eq!(updated.title, "Graph Algorithms");
        assert_eq!(updated.max_marks, 20);

        // Decoded back to one path parameter by the backend.
        let odd = adapter.update_assignment("a/b", &draft).await.unwrap();
        assert_eq!(odd.id, "a/b");
    }
}
