//! services/portal/src/adapters/hod_http.rs
//!
//! The REST implementation of the `HodService` port. The approval queues live
//! at the backend root (`/leaves`, `/gate-passes`), not under `/faculty`.

use async_trait::async_trait;
use campus_core::domain::{GatePassRequest, LeaveRequest};
use campus_core::ports::{HodService, PortResult};
use reqwest::Method;
use serde::Serialize;
use tracing::info;

use super::http::BackendClient;

#[derive(Serialize)]
struct ApprovePayload<'a> {
    remarks: &'a str,
}

#[derive(Serialize)]
struct RejectPayload<'a> {
    reason: &'a str,
}

#[derive(Clone)]
pub struct HttpHodAdapter {
    backend: BackendClient,
    /// Restricts both queues to one department when set.
    department: Option<String>,
}

impl HttpHodAdapter {
    pub fn new(backend: BackendClient, department: Option<String>) -> Self {
        Self {
            backend,
            department,
        }
    }

    async fn list<T: serde::de::DeserializeOwned>(&self, queue: &str) -> PortResult<T> {
        let mut builder = self.backend.request(Method::GET, &[queue])?;
        if let Some(department) = &self.department {
            builder = builder.query(&[("department", department)]);
        }
        self.backend.send(builder).await
    }

    async fn decide<P: Serialize + Sync>(
        &self,
        queue: &str,
        id: &str,
        action: &str,
        payload: &P,
    ) -> PortResult<()> {
        let builder = self
            .backend
            .request(Method::PUT, &[queue, id, action])?
            .json(payload);
        self.backend.send_ignoring_body(builder).await?;
        info!("{} {} {}", action, queue, id);
        Ok(())
    }
}

#[async_trait]
impl HodService for HttpHodAdapter {
    async fn get_leaves(&self) -> PortResult<Vec<LeaveRequest>> {
        self.list("leaves").await
    }

    async fn approve_leave(&self, leave_id: &str, remarks: &str) -> PortResult<()> {
        self.decide("leaves", leave_id, "approve", &ApprovePayload { remarks })
            .await
    }

    async fn reject_leave(&self, leave_id: &str, reason: &str) -> PortResult<()> {
        self.decide("leaves", leave_id, "reject", &RejectPayload { reason })
            .await
    }

    async fn get_gate_passes(&self) -> PortResult<Vec<GatePassRequest>> {
        self.list("gate-passes").await
    }

    async fn approve_gate_pass(&self, pass_id: &str, remarks: &str) -> PortResult<()> {
        self.decide("gate-passes", pass_id, "approve", &ApprovePayload { remarks })
            .await
    }

    async fn reject_gate_pass(&self, pass_id: &str, reason: &str) -> PortResult<()> {
        self.decide("gate-passes", pass_id, "reject", &RejectPayload { reason })
            .await
    }
}
