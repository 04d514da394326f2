//! Type-safe identifier wrappers for host-issued identities.
//!
//! The game host identifies players by a 64-bit platform account number and
//! the permission system keys grants by the decimal string form of that
//! number. Wrapping the raw value keeps owner identifiers from being mixed up
//! with harvest counters or other integers at compile time.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around a `u64` host identifier.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl $name {
            /// Wrap a raw host identifier.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Return the inner `u64` value.
            pub const fn into_inner(self) -> u64 {
                self.0
            }

            /// Whether this is the host's "no owner" sentinel (zero).
            pub const fn is_unset(self) -> bool {
                self.0 == 0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Platform account identifier of a player (the owner of a planted crop).
    PlayerId
}

define_id! {
    /// Host-assigned network identifier of a plant entity.
    PlantId
}
