//! Users: the `/users` resource.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{is_false, lenient, Assignment, Collection, Tag, Writable};

/// Numeric identifier for a user.
pub type UserID = i64;

/// Full user record returned by `/users`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    // Caller-writable.
    #[serde(deserialize_with = "lenient::flag")]
    pub archived: bool,
    pub discipline: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    #[serde(deserialize_with = "lenient::date")]
    pub hire_date: Option<NaiveDate>,
    pub last_name: Option<String>,
    pub location: Option<String>,
    pub mobile_phone: Option<String>,
    pub role: Option<String>,
    /// Target billable utilisation, in percent.
    pub billability_target: Option<f64>,

    // Server-assigned.
    pub id: UserID,
    #[serde(deserialize_with = "lenient::flag")]
    pub account_owner: bool,
    #[serde(deserialize_with = "lenient::datetime")]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::flag")]
    pub billable: bool,
    pub billrate: Option<f64>,
    #[serde(deserialize_with = "lenient::datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::flag")]
    pub deleted: bool,
    #[serde(deserialize_with = "lenient::datetime")]
    pub deleted_at: Option<DateTime<Utc>>,
    pub display_name: Option<String>,
    pub employee_number: Option<serde_json::Value>,
    pub guid: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub has_login: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub invitation_pending: bool,
    pub login_type: Option<String>,
    pub office_phone: Option<String>,
    #[serde(deserialize_with = "lenient::date")]
    pub termination_date: Option<NaiveDate>,
    pub thumbnail: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub user_settings: Option<serde_json::Value>,
    pub user_type_id: Option<i64>,
    pub tags: Collection<Tag>,
    pub assignments: Collection<Assignment>,
}

/// Fields sent on user create and update.
///
/// Every field is sent, as `null` when unset, except `archived` which is
/// only sent when true.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UserWrite {
    #[serde(skip_serializing_if = "is_false")]
    pub archived: bool,
    pub discipline: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub last_name: Option<String>,
    pub location: Option<String>,
    pub mobile_phone: Option<String>,
    pub role: Option<String>,
    pub billability_target: Option<f64>,
}

impl Writable for User {
    type Write = UserWrite;

    fn write_view(&self) -> UserWrite {
        UserWrite {
            archived: self.archived,
            discipline: self.discipline.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            hire_date: self.hire_date,
            last_name: self.last_name.clone(),
            location: self.location.clone(),
            mobile_phone: self.mobile_phone.clone(),
            role: self.role.clone(),
            billability_target: self.billability_target,
        }
    }
}

impl Collection<User> {
    /// Number of users who are not the account owner.
    pub fn non_owner_count(&self) -> usize {
        self.iter().filter(|u| !u.account_owner).count()
    }
}
