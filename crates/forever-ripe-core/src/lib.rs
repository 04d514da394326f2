//! Keep tended crops ripe instead of letting them die.
//!
//! The host notifies the plugin whenever a growable plant is about to change
//! lifecycle state. If a planted crop owned by a permitted player is about to
//! start dying before it has given all of its harvests, the plugin vetoes the
//! transition, puts the plant back into the ripe state, and restores its
//! health.
//!
//! # Modules
//!
//! - [`config`] -- Persisted configuration schema, version migration, and
//!   the allow-list of plant types.
//! - [`error`] -- Error types for configuration and permission failures.
//! - [`host`] -- Traits the host implements: growable entities, the player
//!   directory, and the permission system.
//! - [`permissions`] -- Capability grants declared by the plugin.
//! - [`plugin`] -- [`ForeverRipe`], the context object the host drives.
//! - [`ripeness`] -- The gate sequence and the keep-ripe override.
//! - [`store`] -- Where the configuration document is read from and written to.
//! - [`version`] -- Schema revisions and numeric version comparison.
//!
//! [`ForeverRipe`]: plugin::ForeverRipe

pub mod config;
pub mod error;
pub mod host;
pub mod permissions;
pub mod plugin;
pub mod ripeness;
pub mod store;
pub mod version;

// Re-export primary types at crate root.
pub use config::{AllowList, Resolution, ResolutionKind, RipenessConfig, load_config, resolve};
pub use error::{ConfigError, PermissionError, PluginError};
pub use host::{GrowableEntity, PermissionService, PlayerDirectory};
pub use plugin::ForeverRipe;
pub use ripeness::{DeclineReason, Decision, check_gates, evaluate};
pub use store::{ConfigStore, JsonFileStore, MemoryConfigStore};
pub use version::{PLUGIN_VERSION, SchemaVersion};
