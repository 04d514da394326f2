//! Enumeration types for growable plant entities.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Plant lifecycle
// ---------------------------------------------------------------------------

/// Lifecycle state of a growable plant entity, as driven by the host.
///
/// The host walks a tended crop forward through the growth stages, into
/// [`Ripe`](Self::Ripe), then [`Dying`](Self::Dying) once it is neglected or
/// over-ripe, and finally [`Dead`](Self::Dead).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlantState {
    /// Freshly planted seed.
    Seed,
    /// First sprouted stage.
    Seedling,
    /// Young plant.
    Sapling,
    /// Stage at which neighbouring plants can pass on genes.
    Crossbreed,
    /// Fully grown, not yet producing.
    Mature,
    /// Producing fruit.
    Fruiting,
    /// Harvestable and not decaying.
    Ripe,
    /// Decaying towards death.
    Dying,
    /// Dead; the host removes the entity.
    Dead,
}

impl PlantState {
    /// Whether the plant can be harvested in this state.
    pub const fn is_harvestable(self) -> bool {
        matches!(self, Self::Ripe)
    }
}

impl core::fmt::Display for PlantState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Seed => "seed",
            Self::Seedling => "seedling",
            Self::Sapling => "sapling",
            Self::Crossbreed => "crossbreed",
            Self::Mature => "mature",
            Self::Fruiting => "fruiting",
            Self::Ripe => "ripe",
            Self::Dying => "dying",
            Self::Dead => "dead",
        };
        f.write_str(name)
    }
}
