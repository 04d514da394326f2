//! Shared type definitions for the Forever Ripe plant lifecycle patch.
//!
//! These types describe the slice of the game host's world that the
//! ripeness rule looks at: who owns a plant, which lifecycle state it is
//! in, and its health pool.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe wrappers for host-issued player and plant identifiers
//! - [`enums`] -- Plant lifecycle states
//! - [`structs`] -- Health pool and resolved player handle

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::PlantState;
pub use ids::{PlantId, PlayerId};
pub use structs::{Health, PlayerHandle};
