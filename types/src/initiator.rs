use serde::{Deserialize, Serialize};

/// Who started a recording workflow: a stable opaque identifier plus the
/// display name snapshotted onto the record at commit time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initiator {
    pub id: String,
    pub name: String,
}

impl Initiator {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
