//! Operation value object - the fixed vocabulary of module pages

use serde::{Deserialize, Serialize};

/// A standardized page a module can expose
///
/// The declaration order is the canonical order: bindings, artifacts and
/// routes are always enumerated in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Dashboard,
    List,
    Create,
    Detail,
    Update,
    Delete,
    Reports,
}

impl Operation {
    /// Every operation, in canonical order
    pub const ALL: [Operation; 7] = [
        Operation::Dashboard,
        Operation::List,
        Operation::Create,
        Operation::Detail,
        Operation::Update,
        Operation::Delete,
        Operation::Reports,
    ];

    /// Template role name, used as the artifact file stem
    pub fn role(&self) -> &'static str {
        match self {
            Operation::Dashboard => "dashboard",
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Detail => "detail",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Reports => "reports",
        }
    }

    /// URL path suffix relative to the module prefix (`/<key>/`)
    pub fn url_path_suffix(&self) -> &'static str {
        match self {
            Operation::Dashboard => "",
            Operation::List => "list/",
            Operation::Create => "create/",
            Operation::Detail => "detail/",
            Operation::Update => "update/",
            Operation::Delete => "delete/",
            Operation::Reports => "reports/",
        }
    }

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            Operation::Dashboard => "Dashboard",
            Operation::List => "List",
            Operation::Create => "Create",
            Operation::Detail => "Detail",
            Operation::Update => "Update",
            Operation::Delete => "Delete",
            Operation::Reports => "Reports",
        }
    }

    /// Parse a role name (`"dashboard"`, `"list"`, ...)
    pub fn from_role(role: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.role() == role)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.role())
    }
}
