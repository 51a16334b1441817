use serde::{Deserialize, Serialize};

/// A server-managed environment as returned by `GET /environments`.
///
/// Both fields are assigned by the external service. Any other fields the
/// service includes in its response are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentRecord {
    pub id: String,
    pub url: String,
}

impl EnvironmentRecord {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}
