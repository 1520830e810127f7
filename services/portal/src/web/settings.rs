//! services/portal/src/web/settings.rs
//!
//! Handlers for the admin settings sections. Each section is stored as one
//! JSON blob; a section that was never saved reads as its defaults.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use campus_core::settings::{load_value_or_default, SettingsKey};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

use super::state::AppState;
use super::{failure, Failure};

fn parse_key(raw: &str) -> Result<SettingsKey, Failure> {
    raw.parse::<SettingsKey>()
        .map_err(|e| (StatusCode::NOT_FOUND, e.to_string()))
}

#[utoipa::path(
    get,
    path = "/settings",
    responses((status = 200, description = "Every settings section keyed by its storage name"))
)]
pub async fn all_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Map<String, Value>>, Failure> {
    let mut sections = Map::new();
    for key in SettingsKey::ALL {
        let value = load_value_or_default(state.settings.as_ref(), key)
            .await
            .map_err(failure)?;
        sections.insert(key.as_str().to_string(), value);
    }
    Ok(Json(sections))
}

#[utoipa::path(
    get,
    path = "/settings/{key}",
    params(("key" = String, Path, description = "e.g. `academicSettings`")),
    responses(
        (status = 200, description = "The stored section, or its defaults"),
        (status = 404, description = "Unknown settings key")
    )
)]
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<Value>, Failure> {
    let key = parse_key(&key)?;
    let value = load_value_or_default(state.settings.as_ref(), key)
        .await
        .map_err(failure)?;
    Ok(Json(value))
}

/// Replaces a whole section. The blob must have the section's shape.
#[utoipa::path(
    put,
    path = "/settings/{key}",
    params(("key" = String, Path, description = "e.g. `academicSettings`")),
    request_body(content_type = "application/json", description = "The full section."),
    responses(
        (status = 200, description = "The saved section"),
        (status = 404, description = "Unknown settings key"),
        (status = 422, description = "The blob does not match the section")
    )
)]
pub async fn save_settings(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Json(value): Json<Value>,
) -> Result<Json<Value>, Failure> {
    let key = parse_key(&key)?;
    key.check_shape(&value)
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;
    state.settings.save(key, &value).await.map_err(failure)?;
    info!("{} updated", key);
    Ok(Json(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::testing::demo_state;
    use campus_core::settings::AcademicSettings;
    use serde_json::json;

    #[tokio::test]
    async fn unsaved_sections_read_as_defaults() {
        let (state, _dir) = demo_state();
        let Json(sections) = all_settings(State(state)).await.unwrap();
        assert_eq!(sections.len(), 4);
        assert_eq!(
            sections["academicSettings"],
            SettingsKey::Academic.default_value()
        );
    }

    #[tokio::test]
    async fn saved_section_is_served_back() {
        let (state, _dir) = demo_state();
        let mut academic = AcademicSettings::default();
        academic.minimum_attendance = 80;
        let value = serde_json::to_value(&academic).unwrap();

        let Json(saved) = save_settings(
            State(state.clone()),
            Path("academicSettings".to_string()),
            Json(value.clone()),
        )
        .await
        .unwrap();
        assert_eq!(saved, value);

        let Json(read) = get_settings(State(state), Path("academicSettings".to_string()))
            .await
            .unwrap();
        assert_eq!(read, value);
    }

    #[tokio::test]
    async fn unknown_keys_and_bad_shapes_are_rejected() {
        let (state, _dir) = demo_state();
        let (status, _) = get_settings(State(state.clone()), Path("themeSettings".to_string()))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = save_settings(
            State(state),
            Path("securitySettings".to_string()),
            Json(json!({ "passwordMinLength": "eight" })),
        )
        .await
        .unwrap_err();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
