//! In-memory game host for the Forever Ripe plugin.
//!
//! Implements the host-side ports of `forever-ripe-core` without a live
//! game server, and drives plants through their lifecycle tick by tick so
//! the plugin's effect on decay can be observed end to end.
//!
//! # Modules
//!
//! - [`error`] -- Host-side error type.
//! - [`garden`] -- Growable plants, growth schedule, and the decay tick.
//! - [`permission_table`] -- User and group permission grants.
//! - [`roster`] -- Player directory.
//! - [`server`] -- [`Server`], which owns the plugin and all ports.
//!
//! [`Server`]: server::Server

pub mod error;
pub mod garden;
pub mod permission_table;
pub mod roster;
pub mod server;

pub use error::HostError;
pub use garden::{Garden, GrowthSchedule, Plant, TickReport};
pub use permission_table::{DEFAULT_GROUP, PermissionTable};
pub use roster::PlayerRoster;
pub use server::Server;
