//! Plugin context: the single object a host adapter holds.
//!
//! The host drives the lifecycle in this order:
//!
//! 1. [`ForeverRipe::init`] registers the capability grants
//! 2. [`ForeverRipe::load_config`] resolves and persists the configuration
//! 3. [`ForeverRipe::on_growable_state_change`] for every plant transition
//! 4. [`ForeverRipe::unload`] drops the configuration snapshot
//!
//! The snapshot is only replaced during load and unload, never while events
//! are being handled.

use forever_ripe_types::PlantState;
use tracing::info;

use crate::config::{self, ResolutionKind, RipenessConfig};
use crate::error::PluginError;
use crate::host::{GrowableEntity, PermissionService, PlayerDirectory};
use crate::permissions;
use crate::ripeness::{self, Decision};
use crate::store::ConfigStore;
use crate::version::PLUGIN_VERSION;

/// Name the plugin registers its grants under.
pub const PLUGIN_NAME: &str = "ForeverRipe";

/// Human-readable plugin title.
pub const PLUGIN_TITLE: &str = "Forever Ripe";

/// Plugin author.
pub const PLUGIN_AUTHOR: &str = "VisEntities";

/// One-line plugin description.
pub const PLUGIN_DESCRIPTION: &str =
    "Stops plants from dying by keeping them in a ripe state all the time.";

/// Runtime state of the plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForeverRipe {
    config: Option<RipenessConfig>,
    permissions_registered: bool,
}

impl ForeverRipe {
    /// A plugin with no configuration loaded.
    pub const fn new() -> Self {
        Self {
            config: None,
            permissions_registered: false,
        }
    }

    /// A plugin with an already-resolved configuration installed.
    pub const fn with_config(config: RipenessConfig) -> Self {
        Self {
            config: Some(config),
            permissions_registered: false,
        }
    }

    /// Register the plugin's capability grants with the host.
    pub fn init<P: PermissionService + ?Sized>(
        &mut self,
        permission_service: &mut P,
    ) -> Result<(), PluginError> {
        permissions::register_all(permission_service, PLUGIN_NAME)?;
        self.permissions_registered = true;
        info!(
            plugin = PLUGIN_TITLE,
            version = PLUGIN_VERSION,
            author = PLUGIN_AUTHOR,
            description = PLUGIN_DESCRIPTION,
            "Plugin initialized"
        );
        Ok(())
    }

    /// Resolve the stored configuration, persist it, and install it.
    ///
    /// Returns which migration path was taken.
    pub fn load_config<S: ConfigStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> Result<ResolutionKind, PluginError> {
        let resolution = config::load_config(store)?;
        self.config = Some(resolution.config);
        Ok(resolution.kind)
    }

    /// Drop the configuration snapshot. Later events are passed through.
    pub fn unload(&mut self) {
        self.config = None;
        info!(plugin = PLUGIN_TITLE, "Plugin unloaded");
    }

    /// The installed configuration, if loaded.
    pub const fn config(&self) -> Option<&RipenessConfig> {
        self.config.as_ref()
    }

    /// Whether [`init`](Self::init) has registered the grants.
    pub const fn is_initialized(&self) -> bool {
        self.permissions_registered
    }

    /// Whether a configuration is installed.
    pub const fn is_loaded(&self) -> bool {
        self.config.is_some()
    }

    /// Evaluate a plant state change against the installed configuration.
    ///
    /// Without a loaded configuration this is always [`Decision::NoOpinion`].
    pub fn evaluate<E, D, P>(
        &self,
        entity: Option<&mut E>,
        requested: PlantState,
        directory: &D,
        permission_service: &P,
    ) -> Decision
    where
        E: GrowableEntity + ?Sized,
        D: PlayerDirectory + ?Sized,
        P: PermissionService + ?Sized,
    {
        self.config.as_ref().map_or(Decision::NoOpinion, |config| {
            ripeness::evaluate(entity, requested, config, directory, permission_service)
        })
    }

    /// Host hook for a plant state change.
    ///
    /// Returns `None` to let the host proceed, `Some(true)` when the plant
    /// has been kept ripe and the host must skip its own transition.
    pub fn on_growable_state_change<E, D, P>(
        &self,
        entity: Option<&mut E>,
        requested: PlantState,
        directory: &D,
        permission_service: &P,
    ) -> Option<bool>
    where
        E: GrowableEntity + ?Sized,
        D: PlayerDirectory + ?Sized,
        P: PermissionService + ?Sized,
    {
        self.evaluate(entity, requested, directory, permission_service)
            .into_hook_result()
    }
}
