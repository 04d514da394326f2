//! Growable plants and the host's per-tick lifecycle driver.
//!
//! Each [`Garden::tick`] ages every plant and, once a plant has spent long
//! enough in its current state, asks to move it on:
//!
//! - growth stages advance one by one up to `Ripe`
//! - `Ripe` plants that are left alone request `Dying`
//! - `Dying` plants lose health and finally request `Dead`
//!
//! Every requested transition goes through the plugin hook first. When the
//! hook reports the event handled, the host leaves the plant as the plugin
//! set it.

use std::collections::BTreeMap;

use forever_ripe_core::{ForeverRipe, GrowableEntity, PermissionService, PlayerDirectory};
use forever_ripe_types::{Health, PlantId, PlantState, PlayerId};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::HostError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Health a freshly planted crop starts with.
pub const SEED_HEALTH: Health = Health::new(10.0, 10.0);

// ---------------------------------------------------------------------------
// Plant
// ---------------------------------------------------------------------------

/// A single growable plant entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    /// Network id.
    pub id: PlantId,
    /// Prefab short name, e.g. `corn.entity`.
    pub prefab: String,
    /// Account that planted it; zero for wild plants.
    pub owner: PlayerId,
    /// Whether it sits in a planter.
    pub in_planter: bool,
    /// Harvests taken so far.
    pub harvests: u32,
    /// Harvest limit from the plant type.
    pub max_harvests: u32,
    /// Current lifecycle state.
    pub state: PlantState,
    /// Ticks since planting (or since the last age reset).
    pub age_ticks: u32,
    /// Ticks spent in the current state.
    pub ticks_in_state: u32,
    /// Health pool.
    pub health: Health,
}

impl Plant {
    /// A seed planted in a planter by `owner`.
    pub fn tended(
        id: PlantId,
        prefab: impl Into<String>,
        owner: PlayerId,
        max_harvests: u32,
    ) -> Self {
        Self {
            id,
            prefab: prefab.into(),
            owner,
            in_planter: true,
            harvests: 0,
            max_harvests,
            state: PlantState::Seed,
            age_ticks: 0,
            ticks_in_state: 0,
            health: SEED_HEALTH,
        }
    }

    /// A plant growing wild, with no planter and no owner.
    pub fn wild(id: PlantId, prefab: impl Into<String>, max_harvests: u32) -> Self {
        Self {
            in_planter: false,
            ..Self::tended(id, prefab, PlayerId::new(0), max_harvests)
        }
    }

    /// Start the plant in `state` instead of as a seed.
    #[must_use]
    pub const fn in_state(mut self, state: PlantState) -> Self {
        self.state = state;
        self
    }
}

impl GrowableEntity for Plant {
    fn has_planter(&self) -> bool {
        self.in_planter
    }

    fn owner_id(&self) -> PlayerId {
        self.owner
    }

    fn prefab_name(&self) -> &str {
        &self.prefab
    }

    fn harvests(&self) -> u32 {
        self.harvests
    }

    fn max_harvests(&self) -> u32 {
        self.max_harvests
    }

    fn change_state(&mut self, state: PlantState, reset_age: bool) {
        self.state = state;
        self.ticks_in_state = 0;
        if reset_age {
            self.age_ticks = 0;
        }
    }

    fn initialize_health(&mut self, health: Health) {
        self.health = health;
    }
}

// ---------------------------------------------------------------------------
// GrowthSchedule
// ---------------------------------------------------------------------------

/// How long plants linger in each phase before the host moves them on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthSchedule {
    /// Ticks per pre-ripe growth stage.
    pub ticks_per_stage: u32,
    /// Ticks a plant stays ripe before it starts dying.
    pub ripe_ticks: u32,
    /// Ticks a plant spends dying before it is dead.
    pub dying_ticks: u32,
    /// Health lost per tick while dying.
    pub dying_damage: f32,
}

impl Default for GrowthSchedule {
    fn default() -> Self {
        Self {
            ticks_per_stage: 1,
            ripe_ticks: 2,
            dying_ticks: 2,
            dying_damage: 25.0,
        }
    }
}

impl GrowthSchedule {
    /// The state the host wants to move a plant into, if any.
    fn next_request(&self, plant: &Plant) -> Option<PlantState> {
        let due = |limit: u32| plant.ticks_in_state >= limit;
        match plant.state {
            PlantState::Seed if due(self.ticks_per_stage) => Some(PlantState::Seedling),
            PlantState::Seedling if due(self.ticks_per_stage) => Some(PlantState::Sapling),
            PlantState::Sapling if due(self.ticks_per_stage) => Some(PlantState::Crossbreed),
            PlantState::Crossbreed if due(self.ticks_per_stage) => Some(PlantState::Mature),
            PlantState::Mature if due(self.ticks_per_stage) => Some(PlantState::Fruiting),
            PlantState::Fruiting if due(self.ticks_per_stage) => Some(PlantState::Ripe),
            PlantState::Ripe if due(self.ripe_ticks) => Some(PlantState::Dying),
            PlantState::Dying if due(self.dying_ticks) => Some(PlantState::Dead),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// TickReport
// ---------------------------------------------------------------------------

/// What happened during one [`Garden::tick`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Transitions the host applied, in plant id order.
    pub applied: Vec<(PlantId, PlantState)>,
    /// Plants whose requested transition the plugin handled.
    pub overridden: Vec<PlantId>,
    /// Plants that died and were removed.
    pub removed: Vec<PlantId>,
}

// ---------------------------------------------------------------------------
// Garden
// ---------------------------------------------------------------------------

/// Every growable plant the host is simulating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Garden {
    plants: BTreeMap<PlantId, Plant>,
    schedule: GrowthSchedule,
}

impl Garden {
    /// An empty garden with the given schedule.
    pub const fn new(schedule: GrowthSchedule) -> Self {
        Self {
            plants: BTreeMap::new(),
            schedule,
        }
    }

    /// Add a plant.
    pub fn insert(&mut self, plant: Plant) -> Result<PlantId, HostError> {
        let id = plant.id;
        if self.plants.contains_key(&id) {
            return Err(HostError::DuplicatePlant(id));
        }
        self.plants.insert(id, plant);
        Ok(id)
    }

    /// Look up a plant.
    pub fn get(&self, id: PlantId) -> Option<&Plant> {
        self.plants.get(&id)
    }

    /// Number of living plants.
    pub fn len(&self) -> usize {
        self.plants.len()
    }

    /// Whether the garden is empty.
    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    /// Ask to move a plant into `requested`, giving the plugin the chance to
    /// handle it first.
    ///
    /// Returns `true` if the plugin handled the event. Dead plants are
    /// removed.
    pub fn request_transition<D, P>(
        &mut self,
        id: PlantId,
        requested: PlantState,
        plugin: &ForeverRipe,
        directory: &D,
        permission_service: &P,
    ) -> Result<bool, HostError>
    where
        D: PlayerDirectory + ?Sized,
        P: PermissionService + ?Sized,
    {
        let plant = self
            .plants
            .get_mut(&id)
            .ok_or(HostError::PlantNotFound(id))?;

        let handled = plugin
            .on_growable_state_change(Some(plant), requested, directory, permission_service)
            .unwrap_or(false);
        if handled {
            trace!(%id, %requested, "Transition handled by plugin");
            return Ok(true);
        }

        let plant = self
            .plants
            .get_mut(&id)
            .ok_or(HostError::PlantNotFound(id))?;
        plant.change_state(requested, true);
        if requested == PlantState::Dead {
            self.plants.remove(&id);
            debug!(%id, "Plant died");
        }
        Ok(false)
    }

    /// Harvest a ripe plant.
    ///
    /// A plant with harvests left goes back to fruiting; one that has given
    /// its last harvest is asked to start dying.
    pub fn harvest<D, P>(
        &mut self,
        id: PlantId,
        plugin: &ForeverRipe,
        directory: &D,
        permission_service: &P,
    ) -> Result<u32, HostError>
    where
        D: PlayerDirectory + ?Sized,
        P: PermissionService + ?Sized,
    {
        let plant = self
            .plants
            .get_mut(&id)
            .ok_or(HostError::PlantNotFound(id))?;
        if !plant.state.is_harvestable() {
            return Err(HostError::NotHarvestable {
                plant: id,
                state: plant.state,
            });
        }
        plant.harvests = plant
            .harvests
            .checked_add(1)
            .ok_or(HostError::ArithmeticOverflow)?;
        let harvests = plant.harvests;
        let next = if harvests < plant.max_harvests {
            PlantState::Fruiting
        } else {
            PlantState::Dying
        };

        self.request_transition(id, next, plugin, directory, permission_service)?;
        Ok(harvests)
    }

    /// Advance every plant by one simulation tick.
    pub fn tick<D, P>(
        &mut self,
        plugin: &ForeverRipe,
        directory: &D,
        permission_service: &P,
    ) -> Result<TickReport, HostError>
    where
        D: PlayerDirectory + ?Sized,
        P: PermissionService + ?Sized,
    {
        let mut report = TickReport::default();
        let schedule = self.schedule;

        let ids: Vec<PlantId> = self.plants.keys().copied().collect();
        for id in ids {
            let Some(plant) = self.plants.get_mut(&id) else {
                continue;
            };
            plant.age_ticks = plant.age_ticks.saturating_add(1);
            plant.ticks_in_state = plant.ticks_in_state.saturating_add(1);
            if plant.state == PlantState::Dying {
                plant.health.current = (plant.health.current - schedule.dying_damage).max(0.0);
            }

            let Some(requested) = schedule.next_request(plant) else {
                continue;
            };

            if self.request_transition(id, requested, plugin, directory, permission_service)? {
                report.overridden.push(id);
            } else {
                report.applied.push((id, requested));
                if requested == PlantState::Dead {
                    report.removed.push(id);
                }
            }
        }

        Ok(report)
    }
}
