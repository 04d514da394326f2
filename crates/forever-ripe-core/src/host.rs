//! Ports onto the game host.
//!
//! The ripeness rule only ever sees the host through these traits, so it can
//! be driven by the live server adapter or by an in-memory host in tests.
//! None of the methods block; the host calls the rule inline on its
//! simulation tick.

use forever_ripe_types::{Health, PlantState, PlayerHandle, PlayerId};

use crate::error::PermissionError;

/// A host-managed plant that moves through [`PlantState`]s.
pub trait GrowableEntity {
    /// Whether the plant sits in a planter (a tended crop) rather than
    /// growing wild.
    fn has_planter(&self) -> bool;

    /// Account that planted the crop. Zero means no owner.
    fn owner_id(&self) -> PlayerId;

    /// Short prefab name identifying the plant type, e.g. `corn.entity`.
    fn prefab_name(&self) -> &str;

    /// Number of times the plant has been harvested.
    fn harvests(&self) -> u32;

    /// Harvest limit from the plant type's properties.
    fn max_harvests(&self) -> u32;

    /// Move the plant into `state`. With `reset_age` false the plant keeps
    /// its accumulated age.
    fn change_state(&mut self, state: PlantState, reset_age: bool);

    /// Replace the plant's health pool.
    fn initialize_health(&mut self, health: Health);
}

/// Resolves account identifiers to live players.
pub trait PlayerDirectory {
    /// Look up a player the host currently knows about.
    fn find_by_id(&self, id: PlayerId) -> Option<PlayerHandle>;
}

/// The host's permission system.
pub trait PermissionService {
    /// Declare a capability grant owned by `owner` (the plugin name).
    fn register_permission(&mut self, name: &str, owner: &str) -> Result<(), PermissionError>;

    /// Whether `user_id` holds `name`, directly or through a group.
    fn user_has_permission(&self, user_id: &str, name: &str) -> Result<bool, PermissionError>;
}
