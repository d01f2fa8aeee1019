use serde::{Deserialize, Serialize};

use super::Writable;

pub type TagID = i64;

/// A free-form label attached to a user or project.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub id: TagID,
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TagWrite {
    pub value: String,
}

impl Writable for Tag {
    type Write = TagWrite;

    fn write_view(&self) -> TagWrite {
        TagWrite {
            value: self.value.clone(),
        }
    }
}

impl Tag {
    pub fn new(value: &str) -> Self {
        Self {
            id: 0,
            value: value.to_string(),
        }
    }
}
