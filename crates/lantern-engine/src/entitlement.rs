//! Entitlement checks for premium tools.
//!
//! The coordinator consults an [`EntitlementCheck`] before accepting a
//! submission for a tool flagged `requires_premium`. A rejected check
//! never creates a ledger record.

use std::collections::HashSet;

/// Decides whether a user may run premium tools.
pub trait EntitlementCheck: Send + Sync {
    /// Returns `true` if `user_id` holds a premium entitlement.
    fn is_entitled(&self, user_id: &str) -> bool;
}

/// Grants every user access to premium tools.
///
/// Useful for single-user deployments and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl EntitlementCheck for AllowAll {
    fn is_entitled(&self, _user_id: &str) -> bool {
        true
    }
}

/// Grants access to a fixed set of user IDs.
#[derive(Debug, Clone, Default)]
pub struct StaticEntitlements {
    users: HashSet<String>,
}

impl StaticEntitlements {
    /// Creates a check that entitles exactly the given users.
    pub fn new<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            users: users.into_iter().map(Into::into).collect(),
        }
    }
}

impl EntitlementCheck for StaticEntitlements {
    fn is_entitled(&self, user_id: &str) -> bool {
        self.users.contains(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_all_entitles_everyone() {
        assert!(AllowAll.is_entitled("anyone"));
        assert!(AllowAll.is_entitled(""));
    }

    #[test]
    fn static_set_entitles_only_members() {
        let check = StaticEntitlements::new(["alice", "bob"]);
        assert!(check.is_entitled("alice"));
        assert!(check.is_entitled("bob"));
        assert!(!check.is_entitled("mallory"));
    }

    #[test]
    fn empty_static_set_entitles_no_one() {
        let check = StaticEntitlements::default();
        assert!(!check.is_entitled("alice"));
    }
}
