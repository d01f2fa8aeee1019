//! Phases: child projects listed under `/projects/<id>/phases`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{is_false, lenient, ProjectID, Writable};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Phase {
    // Caller-writable.
    #[serde(deserialize_with = "lenient::flag")]
    pub archived: bool,
    pub phase_name: Option<String>,
    #[serde(deserialize_with = "lenient::date")]
    pub ends_at: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient::date")]
    pub starts_at: Option<NaiveDate>,

    // Server-assigned.
    pub id: ProjectID,
    #[serde(deserialize_with = "lenient::datetime")]
    pub archived_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub guid: Option<String>,
    /// Name of the parent project.
    pub name: Option<String>,
    pub parent_id: Option<ProjectID>,
    pub project_code: Option<String>,
    #[serde(rename = "secureurl")]
    pub secure_url: Option<String>,
    #[serde(rename = "secureurl_expiration")]
    pub secure_url_expiration: Option<String>,
    pub settings: Option<serde_json::Value>,
    pub timeentry_lockout: Option<serde_json::Value>,
    #[serde(deserialize_with = "lenient::datetime")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::datetime")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::flag")]
    pub use_parent_bill_rates: bool,
    pub thumbnail: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub has_pending_updates: bool,
    pub client: Option<String>,
    pub project_state: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PhaseWrite {
    #[serde(skip_serializing_if = "is_false")]
    pub archived: bool,
    pub phase_name: Option<String>,
    pub ends_at: Option<NaiveDate>,
    pub starts_at: Option<NaiveDate>,
}

impl Writable for Phase {
    type Write = PhaseWrite;

    fn write_view(&self) -> PhaseWrite {
        PhaseWrite {
            archived: self.archived,
            phase_name: self.phase_name.clone(),
            ends_at: self.ends_at,
            starts_at: self.starts_at,
        }
    }
}
