//! services/portal/src/adapters/static_data.rs
//!
//! Seeds the hardcoded collections for the pages that have no backend
//! endpoint: club members and student certificate requests.

use campus_core::dataset::StaticDataset;
use campus_core::domain::{CertificateRequest, ClubMember};
use campus_core::ports::{PortError, PortResult};
use serde::Deserialize;
use std::sync::Arc;

const CAMPUS_FIXTURE: &str = include_str!("../../fixtures/campus.json");

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CampusSeed {
    club_members: Vec<ClubMember>,
    certificate_requests: Vec<CertificateRequest>,
}

/// New members take the id after the highest one in use.
fn next_member_id(existing: &[ClubMember], member: &mut ClubMember) {
    member.id = existing.iter().map(|m| m.id).max().unwrap_or(0) + 1;
}

/// The static datasets shared by every request.
#[derive(Clone)]
pub struct CampusDatasets {
    pub club_members: Arc<StaticDataset<ClubMember>>,
    pub certificates: Arc<StaticDataset<CertificateRequest>>,
}

impl CampusDatasets {
    pub fn seeded() -> PortResult<Self> {
        let seed: CampusSeed = serde_json::from_str(CAMPUS_FIXTURE)
            .map_err(|e| PortError::Unexpected(format!("Invalid campus fixture: {}", e)))?;
        Ok(Self {
            club_members: Arc::new(StaticDataset::with_assigner(
                seed.club_members,
                next_member_id,
            )),
            certificates: Arc::new(StaticDataset::new(seed.certificate_requests)),
        })
    }
}
