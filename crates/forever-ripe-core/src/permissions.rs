//! Capability grants declared by the plugin.

use forever_ripe_types::PlayerHandle;
use tracing::info;

use crate::error::PermissionError;
use crate::host::PermissionService;

/// Grant required for a player's crops to be kept ripe.
pub const USE: &str = "foreverripe.use";

/// Every grant the plugin registers at startup.
pub const ALL: [&str; 1] = [USE];

/// Register every grant in [`ALL`] under `owner`.
pub fn register_all<P: PermissionService + ?Sized>(
    service: &mut P,
    owner: &str,
) -> Result<(), PermissionError> {
    for name in ALL {
        validate_name(name)?;
        service.register_permission(name, owner)?;
        info!(permission = name, owner, "Permission registered");
    }
    Ok(())
}

/// Whether `player` holds the grant `name`.
pub fn has_permission<P: PermissionService + ?Sized>(
    service: &P,
    player: &PlayerHandle,
    name: &str,
) -> Result<bool, PermissionError> {
    service.user_has_permission(&player.user_id_string(), name)
}

/// Check that a grant name has the `plugin.capability` shape hosts expect.
pub fn validate_name(name: &str) -> Result<(), PermissionError> {
    let valid = name.split_once('.').is_some_and(|(plugin, capability)| {
        !plugin.is_empty()
            && !capability.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '_')
    });
    if valid {
        Ok(())
    } else {
        Err(PermissionError::InvalidName(name.to_owned()))
    }
}
