//! Actor (permission subject) model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a permission subject.
pub type ActorId = Uuid;

/// The subject of a permission check: a CMS member or service principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Stable global ID.
    pub uuid: ActorId,
    /// Superuser override honored by base permission policies.
    pub is_admin: bool,
}

impl Actor {
    /// Creates a regular (non-admin) actor with a generated ID.
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            is_admin: false,
        }
    }

    /// Creates an admin actor with a generated ID.
    pub fn admin() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            is_admin: true,
        }
    }
}

impl Default for Actor {
    fn default() -> Self {
        Self::new()
    }
}
