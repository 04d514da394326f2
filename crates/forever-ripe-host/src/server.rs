//! A minimal game server that owns the plugin and every host-side port.
//!
//! Startup mirrors a real plugin host: permissions are registered first,
//! then the configuration is resolved and persisted, and only after that are
//! simulation ticks dispatched.

use forever_ripe_core::{ConfigStore, ForeverRipe, PluginError, ResolutionKind};
use forever_ripe_types::{PlantId, PlantState};
use tracing::info;

use crate::error::HostError;
use crate::garden::{Garden, GrowthSchedule, Plant, TickReport};
use crate::permission_table::PermissionTable;
use crate::roster::PlayerRoster;

/// An in-memory server hosting the plugin.
#[derive(Debug)]
pub struct Server<S> {
    /// The hosted plugin.
    pub plugin: ForeverRipe,
    /// Simulated plants.
    pub garden: Garden,
    /// Known players.
    pub roster: PlayerRoster,
    /// Permission system.
    pub permissions: PermissionTable,
    /// Backing store for the plugin configuration.
    pub store: S,
    tick: u64,
}

impl<S: ConfigStore> Server<S> {
    /// A server with no plugin loaded yet.
    pub const fn new(store: S, schedule: GrowthSchedule) -> Self {
        Self {
            plugin: ForeverRipe::new(),
            garden: Garden::new(schedule),
            roster: PlayerRoster::new(),
            permissions: PermissionTable::new(),
            store,
            tick: 0,
        }
    }

    /// Initialize the plugin and load its configuration.
    ///
    /// Grants are registered on the first boot only; a reboot after
    /// [`shutdown`](Self::shutdown) just reloads the configuration.
    pub fn boot(&mut self) -> Result<ResolutionKind, PluginError> {
        if !self.plugin.is_initialized() {
            self.plugin.init(&mut self.permissions)?;
        }
        let kind = self.plugin.load_config(&mut self.store)?;
        info!(?kind, "Plugin loaded");
        Ok(kind)
    }

    /// Unload the plugin.
    pub fn shutdown(&mut self) {
        self.plugin.unload();
    }

    /// Plant something in the garden.
    pub fn plant(&mut self, plant: Plant) -> Result<PlantId, HostError> {
        self.garden.insert(plant)
    }

    /// Current state of a plant, if it is still alive.
    pub fn state_of(&self, id: PlantId) -> Option<PlantState> {
        self.garden.get(id).map(|plant| plant.state)
    }

    /// Ticks run so far.
    pub const fn ticks(&self) -> u64 {
        self.tick
    }

    /// Run one simulation tick.
    pub fn tick(&mut self) -> Result<TickReport, HostError> {
        self.tick = self.tick.saturating_add(1);
        self.garden
            .tick(&self.plugin, &self.roster, &self.permissions)
    }

    /// Harvest a ripe plant.
    pub fn harvest(&mut self, id: PlantId) -> Result<u32, HostError> {
        self.garden
            .harvest(id, &self.plugin, &self.roster, &self.permissions)
    }

    /// Ask the host to move a plant, routing the request through the plugin.
    pub fn request_transition(
        &mut self,
        id: PlantId,
        requested: PlantState,
    ) -> Result<bool, HostError> {
        self.garden
            .request_transition(id, requested, &self.plugin, &self.roster, &self.permissions)
    }
}
