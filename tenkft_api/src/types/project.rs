//! Projects: the `/projects` resource.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{is_false, lenient, Assignment, Collection, Tag, Writable};

/// Numeric identifier for a project (also used by phases, which are child projects).
pub type ProjectID = i64;

/// Full project record returned by `/projects`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    // Caller-writable.
    /// Archived projects are hidden from schedules. Setting this is how a project is deleted.
    #[serde(deserialize_with = "lenient::flag")]
    pub archived: bool,
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::date")]
    pub starts_at: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient::date")]
    pub ends_at: Option<NaiveDate>,
    pub description: Option<String>,
    pub client: Option<String>,
    /// Lifecycle state, e.g. `Internal`, `Tentative`, `Confirmed`.
    pub project_state: Option<String>,
    pub phase_name: Option<String>,
    pub project_code: Option<String>,

    // Server-assigned.
    pub id: ProjectID,
    #[serde(deserialize_with = "lenient::datetime")]
    pub archived_at: Option<DateTime<Utc>>,
    pub guid: Option<String>,
    pub parent_id: Option<ProjectID>,
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
    /// Only populated when requested with `fields=tags`.
    pub tags: Collection<Tag>,
    /// Only populated when requested with `fields=assignments`.
    pub assignments: Collection<Assignment>,
    #[serde(deserialize_with = "lenient::date")]
    pub bounding_startdate: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient::date")]
    pub bounding_enddate: Option<NaiveDate>,

    // Aggregates, only populated when requested with `fields=summary`.
    pub confirmed_hours: Option<f64>,
    pub confirmed_dollars: Option<f64>,
    pub approved_hours: Option<f64>,
    pub approved_dollars: Option<f64>,
    pub unconfirmed_hours: Option<f64>,
    pub unconfirmed_dollars: Option<f64>,
    pub scheduled_hours: Option<f64>,
    pub scheduled_dollars: Option<f64>,
    pub future_hours: Option<f64>,
    pub future_dollars: Option<f64>,
}

/// Fields sent on project create and update. Unset fields are left out.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProjectWrite {
    #[serde(skip_serializing_if = "is_false")]
    pub archived: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_code: Option<String>,
}

impl Writable for Project {
    type Write = ProjectWrite;

    fn write_view(&self) -> ProjectWrite {
        ProjectWrite {
            archived: self.archived,
            name: self.name.clone(),
            ends_at: self.ends_at,
            starts_at: self.starts_at,
            description: self.description.clone(),
            client: self.client.clone(),
            project_state: self.project_state.clone(),
            phase_name: self.phase_name.clone(),
            project_code: self.project_code.clone(),
        }
    }
}

impl Project {
    /// A new, unsaved project with the given name.
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }
}

impl Collection<Project> {
    /// Project with the given ID, if it is in this collection.
    pub fn get_by_id(&self, id: ProjectID) -> Option<&Project> {
        self.find(|p| p.id == id)
    }
}
