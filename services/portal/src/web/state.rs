//! services/portal/src/web/state.rs
//!
//! Defines the application state shared by every request.

use crate::adapters::CampusDatasets;
use campus_core::ports::{FacultyService, HodService, SettingsStore};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub faculty: Arc<dyn FacultyService>,
    pub hod: Arc<dyn HodService>,
    pub settings: Arc<dyn SettingsStore>,
    pub campus: CampusDatasets,
}
