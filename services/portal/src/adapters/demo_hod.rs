//! services/portal/src/adapters/demo_hod.rs
//!
//! An in-memory `HodService` seeded from `fixtures/hod.json`, used alongside
//! the demo faculty backend.

use async_trait::async_trait;
use campus_core::domain::{GatePassRequest, LeaveRequest, RequestStatus};
use campus_core::ports::{HodService, PortError, PortResult};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::info;

const HOD_FIXTURE: &str = include_str!("../../fixtures/hod.json");

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HodState {
    leaves: Vec<LeaveRequest>,
    gate_passes: Vec<GatePassRequest>,
}

/// The fields a decision touches, shared by both queues.
trait Decidable {
    fn id(&self) -> &str;
    fn status_mut(&mut self) -> &mut RequestStatus;
    fn remarks_mut(&mut self) -> &mut Option<String>;
    fn rejection_reason_mut(&mut self) -> &mut Option<String>;
}

impl Decidable for LeaveRequest {
    fn id(&self) -> &str {
        &self.id
    }
    fn status_mut(&mut self) -> &mut RequestStatus {
        &mut self.status
    }
    fn remarks_mut(&mut self) -> &mut Option<String> {
        &mut self.remarks
    }
    fn rejection_reason_mut(&mut self) -> &mut Option<String> {
        &mut self.rejection_reason
    }
}

impl Decidable for GatePassRequest {
    fn id(&self) -> &str {
        &self.id
    }
    fn status_mut(&mut self) -> &mut RequestStatus {
        &mut self.status
    }
    fn remarks_mut(&mut self) -> &mut Option<String> {
        &mut self.remarks
    }
    fn rejection_reason_mut(&mut self) -> &mut Option<String> {
        &mut self.rejection_reason
    }
}

/// Moves one pending request to `outcome`. Decided requests stay as they are.
fn decide<T: Decidable>(
    queue: &mut [T],
    id: &str,
    outcome: RequestStatus,
    text: &str,
) -> PortResult<()> {
    let request = queue
        .iter_mut()
        .find(|r| r.id() == id)
        .ok_or_else(|| PortError::NotFound(format!("request {}", id)))?;

    if *request.status_mut() != RequestStatus::Pending {
        return Err(PortError::Unexpected(format!(
            "Request {} is already {}",
            id,
            request.status_mut().as_str()
        )));
    }

    *request.status_mut() = outcome;
    let text = (!text.trim().is_empty()).then(|| text.to_string());
    match outcome {
        RequestStatus::Rejected => *request.rejection_reason_mut() = text,
        _ => *request.remarks_mut() = text,
    }
    info!("Request {} is now {}", id, outcome.as_str());
    Ok(())
}

pub struct DemoHodAdapter {
    state: RwLock<HodState>,
}

impl DemoHodAdapter {
    pub fn seeded() -> PortResult<Self> {
        Self::from_json(HOD_FIXTURE)
    }

    pub fn from_json(json: &str) -> PortResult<Self> {
        let state: HodState = serde_json::from_str(json)
            .map_err(|e| PortError::Unexpected(format!("Invalid HoD fixture: {}", e)))?;
        info!(
            "Demo HoD queues seeded with {} leave and {} gate-pass requests",
            state.leaves.len(),
            state.gate_passes.len()
        );
        Ok(Self {
            state: RwLock::new(state),
        })
    }
}

#[async_trait]
impl HodService for DemoHodAdapter {
    async fn get_leaves(&self) -> PortResult<Vec<LeaveRequest>> {
        Ok(self.state.read().await.leaves.clone())
    }

    async fn approve_leave(&self, leave_id: &str, remarks: &str) -> PortResult<()> {
        let mut state = self.state.write().await;
        decide(&mut state.leaves, leave_id, RequestStatus::Approved, remarks)
    }

    async fn reject_leave(&self, leave_id: &str, reason: &str) -> PortResult<()> {
        let mut state = self.state.write().await;
        decide(&mut state.leaves, leave_id, RequestStatus::Rejected, reason)
    }

    async fn get_gate_passes(&self) -> PortResult<Vec<GatePassRequest>> {
        Ok(self.state.read().await.gate_passes.clone())
    }

    async fn approve_gate_pass(&self, pass_id: &str, remarks: &str) -> PortResult<()> {
        let mut state = self.state.write().await;
        decide(&mut state.gate_passes, pass_id, RequestStatus::Approved, remarks)
    }

    async fn reject_gate_pass(&self, pass_id: &str, reason: &str) -> PortResult<()> {
        let mut state = self.state.write().await;
        decide(&mut state.gate_passes, pass_id, RequestStatus::Rejected, reason)
    }
}
