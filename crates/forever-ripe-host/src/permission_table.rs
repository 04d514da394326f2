//! In-memory permission system with user and group grants.
//!
//! Every user is implicitly a member of [`DEFAULT_GROUP`], so granting a
//! permission to that group grants it to everyone.

use std::collections::{BTreeMap, BTreeSet};

use forever_ripe_core::{PermissionError, PermissionService, permissions};
use tracing::debug;

use crate::error::HostError;

/// Group every user belongs to.
pub const DEFAULT_GROUP: &str = "default";

/// Registered permissions and the grants made against them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionTable {
    /// Permission name to owning plugin.
    registered: BTreeMap<String, String>,
    /// User id to directly granted permissions.
    user_grants: BTreeMap<String, BTreeSet<String>>,
    /// Group name to granted permissions.
    group_grants: BTreeMap<String, BTreeSet<String>>,
    /// User id to explicit group memberships.
    memberships: BTreeMap<String, BTreeSet<String>>,
    /// Simulates the permission backend being unreachable.
    available: bool,
}

impl Default for PermissionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionTable {
    /// An empty, available permission table.
    pub const fn new() -> Self {
        Self {
            registered: BTreeMap::new(),
            user_grants: BTreeMap::new(),
            group_grants: BTreeMap::new(),
            memberships: BTreeMap::new(),
            available: true,
        }
    }

    /// Whether `name` has been registered by some plugin.
    pub fn is_registered(&self, name: &str) -> bool {
        self.registered.contains_key(name)
    }

    /// Grant a registered permission to a user.
    pub fn grant_user(&mut self, user_id: &str, name: &str) -> Result<(), HostError> {
        self.require_registered(name)?;
        self.user_grants
            .entry(user_id.to_owned())
            .or_default()
            .insert(name.to_owned());
        Ok(())
    }

    /// Revoke a user's direct grant. Group grants are unaffected.
    pub fn revoke_user(&mut self, user_id: &str, name: &str) -> bool {
        self.user_grants
            .get_mut(user_id)
            .is_some_and(|grants| grants.remove(name))
    }

    /// Grant a registered permission to every member of `group`.
    pub fn grant_group(&mut self, group: &str, name: &str) -> Result<(), HostError> {
        self.require_registered(name)?;
        self.group_grants
            .entry(group.to_owned())
            .or_default()
            .insert(name.to_owned());
        Ok(())
    }

    /// Add a user to a group.
    pub fn add_to_group(&mut self, user_id: &str, group: &str) {
        self.memberships
            .entry(user_id.to_owned())
            .or_default()
            .insert(group.to_owned());
    }

    /// Mark the backend reachable or unreachable.
    pub const fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    fn require_registered(&self, name: &str) -> Result<(), HostError> {
        if self.is_registered(name) {
            Ok(())
        } else {
            Err(HostError::UnknownPermission(name.to_owned()))
        }
    }

    fn group_has(&self, group: &str, name: &str) -> bool {
        self.group_grants
            .get(group)
            .is_some_and(|grants| grants.contains(name))
    }
}

impl PermissionService for PermissionTable {
    fn register_permission(&mut self, name: &str, owner: &str) -> Result<(), PermissionError> {
        if !self.available {
            return Err(PermissionError::Unavailable {
                message: "permission backend offline".to_owned(),
            });
        }
        permissions::validate_name(name)?;
        self.registered.insert(name.to_owned(), owner.to_owned());
        debug!(permission = name, owner, "Registered permission");
        Ok(())
    }

    fn user_has_permission(&self, user_id: &str, name: &str) -> Result<bool, PermissionError> {
        if !self.available {
            return Err(PermissionError::Unavailable {
                message: "permission backend offline".to_owned(),
            });
        }
        if !self.is_registered(name) {
            return Ok(false);
        }

        let direct = self
            .user_grants
            .get(user_id)
            .is_some_and(|grants| grants.contains(name));
        let via_group = self.group_has(DEFAULT_GROUP, name)
            || self
                .memberships
                .get(user_id)
                .is_some_and(|groups| groups.iter().any(|group| self.group_has(group, name)));

        Ok(direct || via_group)
    }
}
