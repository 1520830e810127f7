//! crates/campus_core/src/settings.rs
//!
//! Admin preference blobs. Each section is stored as one JSON document under
//! a fixed key; there is no versioning, so anything that fails to parse is
//! replaced by the section defaults.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::ports::{PortResult, SettingsStore};

/// The fixed storage keys, one per settings section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsKey {
    Institution,
    Academic,
    Notification,
    Security,
}

impl SettingsKey {
    pub const ALL: [SettingsKey; 4] = [
        SettingsKey::Institution,
        SettingsKey::Academic,
        SettingsKey::Notification,
        SettingsKey::Security,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Institution => "institutionSettings",
            Self::Academic => "academicSettings",
            Self::Notification => "notificationSettings",
            Self::Security => "securitySettings",
        }
    }

    /// The default blob for this section, as JSON.
    pub fn default_value(&self) -> serde_json::Value {
        let value = match self {
            Self::Institution => serde_json::to_value(InstitutionSettings::default()),
            Self::Academic => serde_json::to_value(AcademicSettings::default()),
            Self::Notification => serde_json::to_value(NotificationSettings::default()),
            Self::Security => serde_json::to_value(SecuritySettings::default()),
        };
        // Plain structs of strings, numbers and bools always serialise.
        value.unwrap_or(serde_json::Value::Null)
    }

    /// Checks that a blob has the shape of this section before it is stored.
    pub fn check_shape(&self, value: &serde_json::Value) -> Result<(), serde_json::Error> {
        match self {
            Self::Institution => serde_json::from_value::<InstitutionSettings>(value.clone()).map(drop),
            Self::Academic => serde_json::from_value::<AcademicSettings>(value.clone()).map(drop),
            Self::Notification => {
                serde_json::from_value::<NotificationSettings>(value.clone()).map(drop)
            }
            Self::Security => serde_json::from_value::<SecuritySettings>(value.clone()).map(drop),
        }
    }
}

impl fmt::Display for SettingsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown settings key: {0}")]
pub struct UnknownSettingsKey(pub String);

impl FromStr for SettingsKey {
    type Err = UnknownSettingsKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingsKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownSettingsKey(s.to_string()))
    }
}

//=========================================================================================
// Section Shapes
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionSettings {
    pub name: String,
    pub short_name: String,
    pub logo: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub established_year: String,
    pub affiliated_to: String,
    pub accreditation: String,
}

impl Default for InstitutionSettings {
    fn default() -> Self {
        Self {
            name: "ABC University of Technology".to_string(),
            short_name: "ABCUT".to_string(),
            logo: "/logo.png".to_string(),
            address: "123 University Road, Tech Park, City - 500001".to_string(),
            email: "info@abcut.edu.in".to_string(),
            phone: "+91 40 1234 5678".to_string(),
            website: "www.abcut.edu.in".to_string(),
            established_year: "1995".to_string(),
            affiliated_to: "State University".to_string(),
            accreditation: "NAAC A++".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicSettings {
    pub grading_system: String,
    pub passing_grade: String,
    pub minimum_attendance: u32,
    pub semester_duration: u32,
    pub max_backlogs: u32,
    pub grace_marks: u32,
    pub internal_external: String,
    pub revaluation_allowed: bool,
    pub supplementary_exam: bool,
}

impl Default for AcademicSettings {
    fn default() -> Self {
        Self {
            grading_system: "10-point".to_string(),
            passing_grade: "D".to_string(),
            minimum_attendance: 75,
            semester_duration: 6,
            max_backlogs: 8,
            grace_marks: 5,
            internal_external: "40-60".to_string(),
            revaluation_allowed: true,
            supplementary_exam: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub push_notifications: bool,
    pub fee_reminders: bool,
    pub attendance_alerts: bool,
    pub exam_schedule: bool,
    pub result_published: bool,
    pub event_announcements: bool,
    pub placement_updates: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            sms_notifications: false,
            push_notifications: true,
            fee_reminders: true,
            attendance_alerts: true,
            exam_schedule: true,
            result_published: true,
            event_announcements: true,
            placement_updates: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySettings {
    pub session_timeout: u32,
    pub password_min_length: u32,
    pub require_special_char: bool,
    pub require_number: bool,
    pub require_uppercase: bool,
    pub password_expiry: u32,
    pub max_login_attempts: u32,
    pub two_factor_auth: bool,
    pub ip_whitelist: bool,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            session_timeout: 30,
            password_min_length: 8,
            require_special_char: true,
            require_number: true,
            require_uppercase: true,
            password_expiry: 90,
            max_login_attempts: 5,
            two_factor_auth: false,
            ip_whitelist: false,
        }
    }
}

//=========================================================================================
// Loading
//=========================================================================================

/// Reads one section from the store, using its defaults when the blob is
/// missing or no longer parses.
pub async fn load_or_default<T>(store: &dyn SettingsStore, key: SettingsKey) -> PortResult<T>
where
    T: DeserializeOwned + Default,
{
    match store.load(key).await? {
        Some(value) => Ok(serde_json::from_value(value).unwrap_or_else(|e| {
            warn!("Discarding unparsable {} blob: {}", key, e);
            T::default()
        })),
        None => Ok(T::default()),
    }
}

/// Reads one section as raw JSON, falling back to the section defaults.
pub async fn load_value_or_default(
    store: &dyn SettingsStore,
    key: SettingsKey,
) -> PortResult<serde_json::Value> {
    match store.load(key).await? {
        Some(value) if key.check_shape(&value).is_ok() => Ok(value),
        Some(_) => {
            warn!("Discarding unparsable {} blob", key);
            Ok(key.default_value())
        }
        None => Ok(key.default_value()),
    }
}
