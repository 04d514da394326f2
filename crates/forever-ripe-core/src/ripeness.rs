//! The keep-ripe rule for growable plant entities.
//!
//! When the host is about to move a tended crop into
//! [`PlantState::Dying`], the rule may veto that transition and put the
//! plant back into [`PlantState::Ripe`] at full health instead. The host
//! retries `Dying` on later decay ticks and the rule re-evaluates each time,
//! so a plant that keeps passing every gate cycles Ripe -> Dying -> Ripe and
//! never reaches `Dead`.
//!
//! Gates, checked in order, the first failure declining:
//!
//! 1. the event carries an entity, and that entity is in a planter
//! 2. the requested state is exactly `Dying`
//! 3. `harvests < max_harvests` (a plant on its final harvest dies normally)
//! 4. the prefab name passes the configured [`AllowList`]
//! 5. the owner resolves to a known player
//! 6. the owner holds [`permissions::USE`]
//!
//! [`AllowList`]: crate::config::AllowList

use forever_ripe_types::{Health, PlantState, PlayerHandle, PlayerId};
use tracing::{debug, trace, warn};

use crate::config::RipenessConfig;
use crate::host::{GrowableEntity, PermissionService, PlayerDirectory};
use crate::permissions;

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Outcome of evaluating one state-change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Let the host apply its own transition.
    NoOpinion,
    /// The rule has already moved the plant; the host must not apply its
    /// requested transition.
    Override,
}

impl Decision {
    /// Map onto the host hook's return contract: `None` passes through,
    /// `Some(true)` marks the event handled.
    pub const fn into_hook_result(self) -> Option<bool> {
        match self {
            Self::NoOpinion => None,
            Self::Override => Some(true),
        }
    }

    /// Whether the host's transition is vetoed.
    pub const fn is_override(self) -> bool {
        matches!(self, Self::Override)
    }
}

/// Why the rule declined to act.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclineReason {
    /// The notification carried no entity.
    MissingEntity,
    /// The plant grows wild rather than in a planter.
    NotPlanted,
    /// The host requested something other than `Dying`.
    NotDying {
        /// The requested state.
        requested: PlantState,
    },
    /// The plant has used up its harvests.
    HarvestsExhausted {
        /// Harvests taken so far.
        harvests: u32,
        /// Harvest limit.
        max_harvests: u32,
    },
    /// The plant type is not on the allow-list.
    NotAllowListed {
        /// Prefab short name of the plant.
        prefab_name: String,
    },
    /// The owner is not a player the host knows about.
    OwnerNotFound {
        /// The unresolved owner.
        owner: PlayerId,
    },
    /// The owner lacks the `use` grant.
    PermissionDenied {
        /// The owner.
        owner: PlayerId,
    },
    /// The permission system could not be queried.
    PermissionUnavailable {
        /// The owner.
        owner: PlayerId,
    },
}

impl core::fmt::Display for DeclineReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingEntity => write!(f, "no entity"),
            Self::NotPlanted => write!(f, "not in a planter"),
            Self::NotDying { requested } => write!(f, "requested state is {requested}"),
            Self::HarvestsExhausted {
                harvests,
                max_harvests,
            } => write!(f, "harvests exhausted ({harvests}/{max_harvests})"),
            Self::NotAllowListed { prefab_name } => {
                write!(f, "{prefab_name} is not on the allow-list")
            }
            Self::OwnerNotFound { owner } => write!(f, "owner {owner} not found"),
            Self::PermissionDenied { owner } => write!(f, "owner {owner} lacks permission"),
            Self::PermissionUnavailable { owner } => {
                write!(f, "permission check for owner {owner} unavailable")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Gates
// ---------------------------------------------------------------------------

/// Run the six gates without touching the entity.
///
/// Returns the resolved owner when every gate passes.
pub fn check_gates<E, D, P>(
    entity: Option<&E>,
    requested: PlantState,
    config: &RipenessConfig,
    directory: &D,
    permission_service: &P,
) -> Result<PlayerHandle, DeclineReason>
where
    E: GrowableEntity + ?Sized,
    D: PlayerDirectory + ?Sized,
    P: PermissionService + ?Sized,
{
    let entity = entity.ok_or(DeclineReason::MissingEntity)?;
    if !entity.has_planter() {
        return Err(DeclineReason::NotPlanted);
    }

    if requested != PlantState::Dying {
        return Err(DeclineReason::NotDying { requested });
    }

    let harvests = entity.harvests();
    let max_harvests = entity.max_harvests();
    if harvests >= max_harvests {
        return Err(DeclineReason::HarvestsExhausted {
            harvests,
            max_harvests,
        });
    }

    let prefab_name = entity.prefab_name();
    if !config.allow_list.permits(prefab_name) {
        return Err(DeclineReason::NotAllowListed {
            prefab_name: prefab_name.to_owned(),
        });
    }

    let owner = entity.owner_id();
    let player = directory
        .find_by_id(owner)
        .ok_or(DeclineReason::OwnerNotFound { owner })?;

    match permissions::has_permission(permission_service, &player, permissions::USE) {
        Ok(true) => Ok(player),
        Ok(false) => Err(DeclineReason::PermissionDenied { owner }),
        Err(err) => {
            warn!(%owner, %err, "Permission check failed, leaving plant alone");
            Err(DeclineReason::PermissionUnavailable { owner })
        }
    }
}

/// Evaluate a state-change notification and apply the override if every
/// gate passes.
///
/// On [`Decision::Override`] the plant has been moved to `Ripe` without an
/// age reset and its health restored to [`Health::FULL`].
pub fn evaluate<E, D, P>(
    entity: Option<&mut E>,
    requested: PlantState,
    config: &RipenessConfig,
    directory: &D,
    permission_service: &P,
) -> Decision
where
    E: GrowableEntity + ?Sized,
    D: PlayerDirectory + ?Sized,
    P: PermissionService + ?Sized,
{
    let Some(entity) = entity else {
        trace!(reason = %DeclineReason::MissingEntity, "Ripeness rule declined");
        return Decision::NoOpinion;
    };

    match check_gates(Some(&*entity), requested, config, directory, permission_service) {
        Ok(owner) => {
            entity.change_state(PlantState::Ripe, false);
            entity.initialize_health(Health::FULL);
            debug!(
                prefab = entity.prefab_name(),
                owner = %owner.id,
                owner_name = %owner.display_name,
                harvests = entity.harvests(),
                "Kept plant ripe"
            );
            Decision::Override
        }
        Err(reason) => {
            trace!(prefab = entity.prefab_name(), %reason, "Ripeness rule declined");
            Decision::NoOpinion
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use super::*;
    use crate::config::AllowList;
    use crate::error::PermissionError;

    const OWNER: PlayerId = PlayerId::new(76_561_198_000_000_001);

    #[derive(Debug)]
    struct TestPlant {
        planter: bool,
        owner: PlayerId,
        prefab: String,
        harvests: u32,
        max_harvests: u32,
        state: PlantState,
        age_resets: u32,
        health: Health,
    }

    impl TestPlant {
        fn corn() -> Self {
            Self {
                planter: true,
                owner: OWNER,
                prefab: "corn.entity".to_owned(),
                harvests: 0,
                max_harvests: 3,
                state: PlantState::Ripe,
                age_resets: 0,
                health: Health::new(120.0, 1000.0),
            }
        }
    }

    impl GrowableEntity for TestPlant {
        fn has_planter(&self) -> bool {
            self.planter
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
            if reset_age {
                self.age_resets = self.age_resets.saturating_add(1);
            }
        }
        fn initialize_health(&mut self, health: Health) {
            self.health = health;
        }
    }

    #[derive(Default)]
    struct Players(BTreeMap<PlayerId, PlayerHandle>);

    impl Players {
        fn with_owner() -> Self {
            let mut players = Self::default();
            players.0.insert(OWNER, PlayerHandle::new(OWNER, "Farmer"));
            players
        }
    }

    impl PlayerDirectory for Players {
        fn find_by_id(&self, id: PlayerId) -> Option<PlayerHandle> {
            self.0.get(&id).cloned()
        }
    }

    #[derive(Default)]
    struct Grants {
        granted: BTreeSet<String>,
        offline: bool,
    }

    impl Grants {
        fn owner_can_use() -> Self {
            let mut grants = Self::default();
            grants.granted.insert(OWNER.to_string());
            grants
        }
    }

    impl PermissionService for Grants {
        fn register_permission(&mut self, _name: &str, _owner: &str) -> Result<(), PermissionError> {
            Ok(())
        }
        fn user_has_permission(&self, user_id: &str, name: &str) -> Result<bool, PermissionError> {
            if self.offline {
                return Err(PermissionError::Unavailable {
                    message: "offline".to_owned(),
                });
            }
            Ok(name == permissions::USE && self.granted.contains(user_id))
        }
    }

    fn run(plant: &mut TestPlant, requested: PlantState, config: &RipenessConfig) -> Decision {
        evaluate(
            Some(plant),
            requested,
            config,
            &Players::with_owner(),
            &Grants::owner_can_use(),
        )
    }

    #[test]
    fn dying_crop_is_kept_ripe_at_full_health() {
        let mut plant = TestPlant::corn();
        let decision = run(&mut plant, PlantState::Dying, &RipenessConfig::default());

        assert_eq!(decision, Decision::Override);
        assert_eq!(decision.into_hook_result(), Some(true));
        assert_eq!(plant.state, PlantState::Ripe);
        assert_eq!(plant.health, Health::FULL);
        assert_eq!(plant.age_resets, 0);
    }

    #[test]
    fn final_harvest_dies_normally() {
        let mut plant = TestPlant::corn();
        plant.harvests = 3;
        let decision = run(&mut plant, PlantState::Dying, &RipenessConfig::default());

        assert_eq!(decision, Decision::NoOpinion);
        assert_eq!(decision.into_hook_result(), None);
        assert_eq!(plant.state, PlantState::Ripe);
        assert_eq!(plant.health, Health::new(120.0, 1000.0));
    }

    #[test]
    fn one_harvest_left_still_passes() {
        let mut plant = TestPlant::corn();
        plant.harvests = 2;
        assert_eq!(
            run(&mut plant, PlantState::Dying, &RipenessConfig::default()),
            Decision::Override
        );
    }

    #[test]
    fn only_dying_is_intercepted() {
        for requested in [
            PlantState::Seed,
            PlantState::Fruiting,
            PlantState::Ripe,
            PlantState::Dead,
        ] {
            let mut plant = TestPlant::corn();
            assert_eq!(
                run(&mut plant, requested, &RipenessConfig::default()),
                Decision::NoOpinion
            );
        }
    }

    #[test]
    fn wild_plants_are_ignored() {
        let mut plant = TestPlant::corn();
        plant.planter = false;
        let gates = check_gates(
            Some(&plant),
            PlantState::Dying,
            &RipenessConfig::default(),
            &Players::with_owner(),
            &Grants::owner_can_use(),
        );
        assert_eq!(gates, Err(DeclineReason::NotPlanted));
    }

    #[test]
    fn missing_entity_has_no_opinion() {
        let decision = evaluate::<TestPlant, _, _>(
            None,
            PlantState::Dying,
            &RipenessConfig::default(),
            &Players::with_owner(),
            &Grants::owner_can_use(),
        );
        assert_eq!(decision, Decision::NoOpinion);
    }

    #[test]
    fn allow_list_excludes_other_plants() {
        let config = RipenessConfig {
            allow_list: AllowList::from_names(["corn.entity"]),
            ..RipenessConfig::default()
        };
        let mut plant = TestPlant::corn();
        plant.prefab = "pumpkin.entity".to_owned();

        let gates = check_gates(
            Some(&plant),
            PlantState::Dying,
            &config,
            &Players::with_owner(),
            &Grants::owner_can_use(),
        );
        assert_eq!(
            gates,
            Err(DeclineReason::NotAllowListed {
                prefab_name: "pumpkin.entity".to_owned()
            })
        );
        assert_eq!(run(&mut plant, PlantState::Dying, &config), Decision::NoOpinion);
    }

    #[test]
    fn allow_list_admits_listed_plant() {
        let config = RipenessConfig {
            allow_list: AllowList::from_names(["corn.entity"]),
            ..RipenessConfig::default()
        };
        let mut plant = TestPlant::corn();
        assert_eq!(run(&mut plant, PlantState::Dying, &config), Decision::Override);
    }

    #[test]
    fn unknown_owner_has_no_opinion() {
        let plant = TestPlant::corn();
        let gates = check_gates(
            Some(&plant),
            PlantState::Dying,
            &RipenessConfig::default(),
            &Players::default(),
            &Grants::owner_can_use(),
        );
        assert_eq!(gates, Err(DeclineReason::OwnerNotFound { owner: OWNER }));
    }

    #[test]
    fn owner_without_grant_has_no_opinion() {
        let mut plant = TestPlant::corn();
        let decision = evaluate(
            Some(&mut plant),
            PlantState::Dying,
            &RipenessConfig::default(),
            &Players::with_owner(),
            &Grants::default(),
        );
        assert_eq!(decision, Decision::NoOpinion);
        assert_eq!(plant.health, Health::new(120.0, 1000.0));
    }

    #[test]
    fn unavailable_permissions_fail_closed() {
        let plant = TestPlant::corn();
        let grants = Grants {
            offline: true,
            ..Grants::owner_can_use()
        };
        let gates = check_gates(
            Some(&plant),
            PlantState::Dying,
            &RipenessConfig::default(),
            &Players::with_owner(),
            &grants,
        );
        assert_eq!(gates, Err(DeclineReason::PermissionUnavailable { owner: OWNER }));
    }

    #[test]
    fn gates_short_circuit_in_order() {
        let mut plant = TestPlant::corn();
        plant.harvests = 5;
        plant.prefab = "pumpkin.entity".to_owned();
        let config = RipenessConfig {
            allow_list: AllowList::from_names(["corn.entity"]),
            ..RipenessConfig::default()
        };
        let gates = check_gates(
            Some(&plant),
            PlantState::Sapling,
            &config,
            &Players::default(),
            &Grants::default(),
        );
        assert!(matches!(gates, Err(DeclineReason::NotDying { .. })));

        let gates = check_gates(
            Some(&plant),
            PlantState::Dying,
            &config,
            &Players::default(),
            &Grants::default(),
        );
        assert!(matches!(gates, Err(DeclineReason::HarvestsExhausted { .. })));
    }
}
