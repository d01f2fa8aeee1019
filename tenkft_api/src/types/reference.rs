//! Read-only reference data: leave types, roles, bill rates and placeholders.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{lenient, Collection, ProjectID, UserID};

/// A kind of time off (vacation, sick leave, ...) that users can be assigned to.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaveType {
    pub id: i64,
    pub description: Option<String>,
    pub guid: Option<String>,
    pub name: String,
    #[serde(deserialize_with = "lenient::datetime")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::datetime")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl Collection<LeaveType> {
    /// Leave type with exactly this name.
    pub fn find_by_name(&self, name: &str) -> Option<&LeaveType> {
        self.find(|lt| lt.name == name)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
    pub id: i64,
    pub value: String,
}

/// Hourly rate applying to a project, optionally narrowed to a role, discipline or user.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillRate {
    pub id: i64,
    pub rate: f64,
    pub assignable_id: Option<ProjectID>,
    pub discipline_id: Option<i64>,
    pub role_id: Option<i64>,
    pub user_id: Option<UserID>,
    #[serde(deserialize_with = "lenient::date")]
    pub starts_at: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient::date")]
    pub ends_at: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient::datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::datetime")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::date")]
    pub startdate: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient::date")]
    pub enddate: Option<NaiveDate>,
}

/// Unnamed resource used to plan demand before a person is staffed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderResource {
    pub id: i64,
    pub title: Option<String>,
    pub user_type_id: Option<i64>,
    pub guid: Option<String>,
    pub role: Option<String>,
    pub discipline: Option<String>,
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient::datetime")]
    pub created_at: Option<DateTime<Utc>>,
    pub billrate: Option<f64>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub thumbnail: Option<String>,
    pub abbreviation: Option<String>,
    pub color: Option<String>,
}
