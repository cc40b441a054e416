//! Actor model
//!
//! The credential layer outside the core verifies identity and hands the
//! lifecycle an [`Actor`]; the core itself only distinguishes standard
//! from elevated roles.

use serde::{Deserialize, Serialize};

/// Actor role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorRole {
    /// Regular buyer - may only operate on their own orders
    #[default]
    Standard,
    /// Operator/admin - may operate on any order
    Elevated,
}

/// Verified actor identity plus role
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actor {
    /// Actor ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Role
    pub role: ActorRole,
}

impl Actor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: ActorRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
        }
    }

    /// Whether this actor holds the elevated role
    pub fn is_elevated(&self) -> bool {
        self.role == ActorRole::Elevated
    }

    /// Owner or elevated role may operate on an order
    pub fn may_manage(&self, owner_id: &str) -> bool {
        self.is_elevated() || self.id == owner_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_may_manage() {
        let buyer = Actor::new("u1", "Buyer", ActorRole::Standard);
        let admin = Actor::new("u2", "Admin", ActorRole::Elevated);

        assert!(buyer.may_manage("u1"));
        assert!(!buyer.may_manage("u9"));
        assert!(admin.may_manage("u1"));
        assert!(admin.may_manage("u2"));
    }
}
