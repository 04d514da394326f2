//! Core value structs shared between the decision rule and host adapters.

use serde::{Deserialize, Serialize};

use crate::ids::PlayerId;

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// Health pool of a growable entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    /// Current health points.
    pub current: f32,
    /// Maximum health points.
    pub max: f32,
}

impl Health {
    /// Full health a kept-ripe plant is restored to on every override.
    pub const FULL: Self = Self {
        current: 1000.0,
        max: 1000.0,
    };

    /// Create a health pool.
    pub const fn new(current: f32, max: f32) -> Self {
        Self { current, max }
    }
}

// ---------------------------------------------------------------------------
// PlayerHandle
// ---------------------------------------------------------------------------

/// A live player resolved through the host's player directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerHandle {
    /// Platform account identifier.
    pub id: PlayerId,
    /// Display name, used only for log output.
    pub display_name: String,
}

impl PlayerHandle {
    /// Create a handle for a resolved player.
    pub fn new(id: PlayerId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }

    /// The key the permission system stores grants under.
    pub fn user_id_string(&self) -> String {
        self.id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_string_is_decimal_id() {
        let player = PlayerHandle::new(PlayerId::new(1234), "Farmer");
        assert_eq!(player.user_id_string(), "1234");
    }
}
