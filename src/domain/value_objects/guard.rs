//! Guard value object - the access requirement recorded on a binding

use serde::{Deserialize, Serialize};

/// Access guard a router must enforce before dispatching an operation
///
/// The generator only records the requirement; the check itself belongs to
/// the surrounding web framework's authentication layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Guard {
    /// The request must carry an authenticated identity
    #[default]
    AuthenticationRequired,
}

impl std::fmt::Display for Guard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Guard::AuthenticationRequired => write!(f, "authentication_required"),
        }
    }
}
