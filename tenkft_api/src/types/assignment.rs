//! Assignments: a user scheduled onto a project or leave type for a date range.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{lenient, ProjectID, UserID, Writable};

pub type AssignmentID = i64;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assignment {
    // Caller-writable.
    /// One of `percent`, `hours_per_day` or `fixed`.
    pub allocation_mode: Option<String>,
    /// Project, phase or leave type being assigned.
    pub assignable_id: Option<ProjectID>,
    #[serde(deserialize_with = "lenient::date")]
    pub ends_at: Option<NaiveDate>,
    pub fixed_hours: Option<f64>,
    pub hours_per_day: Option<f64>,
    pub percent: Option<f64>,
    #[serde(deserialize_with = "lenient::date")]
    pub starts_at: Option<NaiveDate>,

    // Server-assigned.
    pub id: AssignmentID,
    #[serde(deserialize_with = "lenient::flag")]
    pub all_day_assignment: bool,
    pub bill_rate: Option<f64>,
    pub bill_rate_id: Option<i64>,
    #[serde(deserialize_with = "lenient::datetime")]
    pub created_at: Option<DateTime<Utc>>,
    pub repetition_id: Option<i64>,
    pub resource_request_id: Option<i64>,
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::datetime")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Owner of the assignment. Also selects the endpoint on create.
    pub user_id: UserID,
}

/// Fields sent on assignment create. The allocation amounts are only sent when set.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AssignmentWrite {
    pub allocation_mode: Option<String>,
    pub assignable_id: Option<ProjectID>,
    pub ends_at: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_per_day: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
    pub starts_at: Option<NaiveDate>,
}

impl Writable for Assignment {
    type Write = AssignmentWrite;

    fn write_view(&self) -> AssignmentWrite {
        AssignmentWrite {
            allocation_mode: self.allocation_mode.clone(),
            assignable_id: self.assignable_id,
            ends_at: self.ends_at,
            fixed_hours: self.fixed_hours,
            hours_per_day: self.hours_per_day,
            percent: self.percent,
            starts_at: self.starts_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn write_view_sends_only_the_set_allocation() {
        let assignment = Assignment {
            user_id: 7,
            assignable_id: Some(300),
            allocation_mode: Some("percent".to_string()),
            percent: Some(0.5),
            starts_at: NaiveDate::from_ymd_opt(2024, 3, 4),
            ends_at: NaiveDate::from_ymd_opt(2024, 3, 8),
            ..Assignment::default()
        };
        let body = serde_json::to_value(assignment.write_view()).unwrap();
        assert_eq!(
            body,
            json!({
                "allocation_mode": "percent",
                "assignable_id": 300,
                "ends_at": "2024-03-08",
                "percent": 0.5,
                "starts_at": "2024-03-04"
            })
        );
    }
}
