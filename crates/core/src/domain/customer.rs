use serde::{Deserialize, Serialize};

/// Textual form of the storage-assigned row id. Non-empty whenever it refers
/// to a persisted row; the insert path never supplies one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub String);

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CustomerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    /// Optional contact phone. `None` and the empty string are both treated
    /// as "not provided".
    pub phone: Option<String>,
}

/// Insert payload for a customer that does not exist yet. The store assigns
/// the id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl Customer {
    pub fn from_draft(id: CustomerId, draft: CustomerDraft) -> Self {
        Self { id, name: draft.name, email: draft.email, phone: draft.phone }
    }
}
