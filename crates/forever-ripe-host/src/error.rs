//! Error types for the `forever-ripe-host` crate.

use forever_ripe_types::{PlantId, PlantState};

/// Errors raised by the in-memory host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// No plant with this id is in the garden.
    #[error("plant not found: {0}")]
    PlantNotFound(PlantId),

    /// A plant with this id already exists.
    #[error("duplicate plant id: {0}")]
    DuplicatePlant(PlantId),

    /// The plant cannot be harvested in its current state.
    #[error("plant {plant} is {state}, not ripe")]
    NotHarvestable {
        /// The plant.
        plant: PlantId,
        /// Its current state.
        state: PlantState,
    },

    /// A grant was given for a permission nobody registered.
    #[error("permission not registered: {0}")]
    UnknownPermission(String),

    /// Arithmetic overflow in a counter.
    #[error("arithmetic overflow in host counter")]
    ArithmeticOverflow,
}
