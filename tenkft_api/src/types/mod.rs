//! Wire types for 10,000ft resources.
//!
//! Each writable resource has a full read type (everything the API returns)
//! and a `*Write` view holding only the fields a caller may send on create or
//! update. Which write fields are always sent and which are left out when
//! unset is declared on the view's serde attributes.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::Error;

mod lenient;

mod meta;
pub use self::meta::{Collection, Paging};

mod project;
pub use self::project::{Project, ProjectID, ProjectWrite};

mod user;
pub use self::user::{User, UserID, UserWrite};

mod tag;
pub use self::tag::{Tag, TagID, TagWrite};

mod assignment;
pub use self::assignment::{Assignment, AssignmentID, AssignmentWrite};

mod phase;
pub use self::phase::{Phase, PhaseWrite};

mod reference;
pub use self::reference::{BillRate, LeaveType, PlaceholderResource, Role};

/// A resource that can be sent on create or update.
pub trait Writable {
    type Write: Serialize;

    /// The caller-writable subset of this resource.
    fn write_view(&self) -> Self::Write;
}

/// Merges a server echo into `target`.
///
/// Top-level keys present in `echoed` overwrite; keys it lacks keep their
/// current value.
pub(crate) fn absorb<T>(target: &mut T, echoed: Value) -> Result<(), Error>
where
    T: Serialize + DeserializeOwned,
{
    let mut current = serde_json::to_value(&*target).map_err(Error::Encode)?;
    match (&mut current, echoed) {
        (Value::Object(fields), Value::Object(echoed)) => {
            for (key, value) in echoed {
                fields.insert(key, value);
            }
        }
        (current, echoed) => *current = echoed,
    }
    *target = serde_json::from_value(current).map_err(Error::Decode)?;
    Ok(())
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}
