//! Configuration schema, resolution, and version migration.
//!
//! The persisted document is a small JSON object:
//!
//! ```json
//! {
//!   "Version": "1.2.0",
//!   "Plant Short Prefab Names": []
//! }
//! ```
//!
//! [`resolve`] turns whatever is stored (possibly nothing) into a
//! [`RipenessConfig`] stamped with [`SchemaVersion::CURRENT`]:
//!
//! - no document: hard-coded defaults (wildcard allow-list)
//! - version missing, unparsable, or older than
//!   [`SchemaVersion::FIRST_TRACKED`]: stored fields are discarded
//! - older tracked version: stored fields are kept, fields the document
//!   lacks are filled with defaults
//! - current version: fields are kept untouched
//!
//! [`load_config`] runs the resolver against a [`ConfigStore`] and always
//! writes the result back, so a fresh install gets a materialized file.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::store::ConfigStore;
use crate::version::SchemaVersion;

/// Default allow-list shipped by schema revisions before the wildcard.
pub const LEGACY_DEFAULT_PREFABS: [&str; 4] = [
    "corn.entity",
    "hemp.entity",
    "pumpkin.entity",
    "potato.entity",
];

// ---------------------------------------------------------------------------
// AllowList
// ---------------------------------------------------------------------------

/// Plant prefab short names the rule is restricted to.
///
/// An empty list is a wildcard: every plant type passes. Matching is exact
/// and case-sensitive. Order is preserved so the file round-trips as the
/// operator wrote it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowList(Vec<String>);

impl AllowList {
    /// The wildcard allow-list.
    pub const fn all() -> Self {
        Self(Vec::new())
    }

    /// Build an allow-list from prefab names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Whether this list applies to every plant type.
    pub fn is_wildcard(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the rule applies to a plant with this prefab name.
    pub fn permits(&self, prefab_name: &str) -> bool {
        self.is_wildcard() || self.0.iter().any(|name| name == prefab_name)
    }

    /// The configured names, in file order.
    pub fn names(&self) -> &[String] {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// RipenessConfig
// ---------------------------------------------------------------------------

/// Resolved configuration snapshot consulted by the ripeness rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RipenessConfig {
    /// Schema revision this snapshot conforms to.
    #[serde(rename = "Version")]
    pub version: SchemaVersion,

    /// Plant types the rule applies to; empty means all.
    #[serde(rename = "Plant Short Prefab Names")]
    pub allow_list: AllowList,
}

impl Default for RipenessConfig {
    fn default() -> Self {
        Self {
            version: SchemaVersion::CURRENT,
            allow_list: AllowList::all(),
        }
    }
}

impl RipenessConfig {
    /// Render the snapshot as the pretty-printed persisted document.
    pub fn to_document(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Raw persisted document. Every field is optional so that documents written
/// by older revisions still parse; type mismatches are schema violations.
#[derive(Debug, Deserialize)]
struct StoredDocument {
    #[serde(rename = "Version", default)]
    version: Option<String>,

    #[serde(rename = "Plant Short Prefab Names", default)]
    allow_list: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// How a stored document was turned into the resolved snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionKind {
    /// Nothing was stored; defaults were used.
    Fresh,
    /// The document was already at the current revision.
    Current,
    /// An older tracked revision was upgraded in place.
    Upgraded {
        /// Revision found in the document.
        from: SchemaVersion,
    },
    /// The document predates tracking and was replaced by defaults.
    Reset {
        /// Raw version string found in the document, if any.
        from: Option<String>,
    },
    /// The document was written by a newer build and was kept as-is.
    Newer {
        /// Revision found in the document.
        found: SchemaVersion,
    },
}

/// Result of [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The snapshot to install.
    pub config: RipenessConfig,
    /// Which migration path was taken.
    pub kind: ResolutionKind,
}

/// Resolve a stored document into the current configuration.
///
/// `stored` is the raw document text, or `None` if nothing has been
/// persisted yet. A blank document is treated like a missing one.
///
/// # Errors
///
/// Returns [`ConfigError::Json`] if the document is not valid JSON or a
/// field has the wrong type.
pub fn resolve(stored: Option<&str>) -> Result<Resolution, ConfigError> {
    let Some(raw) = stored.filter(|text| !text.trim().is_empty()) else {
        return Ok(Resolution {
            config: RipenessConfig::default(),
            kind: ResolutionKind::Fresh,
        });
    };

    let document: StoredDocument = serde_json::from_str(raw)?;
    let parsed = document.version.as_deref().and_then(SchemaVersion::parse);

    let resolution = match parsed {
        Some(found) if found >= SchemaVersion::FIRST_TRACKED => {
            let allow_list = document.allow_list.map_or_else(AllowList::all, AllowList);
            let (version, kind) = match found.cmp(&SchemaVersion::CURRENT) {
                Ordering::Less => (
                    SchemaVersion::CURRENT,
                    ResolutionKind::Upgraded { from: found },
                ),
                Ordering::Equal => (found, ResolutionKind::Current),
                Ordering::Greater => (found, ResolutionKind::Newer { found }),
            };
            Resolution {
                config: RipenessConfig {
                    version,
                    allow_list,
                },
                kind,
            }
        }
        _ => Resolution {
            config: RipenessConfig::default(),
            kind: ResolutionKind::Reset {
                from: document.version,
            },
        },
    };

    Ok(resolution)
}

/// Load, resolve, and persist the configuration through `store`.
///
/// The resolved snapshot is written back unconditionally.
pub fn load_config<S: ConfigStore + ?Sized>(store: &mut S) -> Result<Resolution, ConfigError> {
    let stored = store.load()?;
    let resolution = resolve(stored.as_deref())?;

    match &resolution.kind {
        ResolutionKind::Fresh => {
            info!(version = %resolution.config.version, "No stored config, writing defaults");
        }
        ResolutionKind::Current => {}
        ResolutionKind::Upgraded { from } => {
            warn!("Config changes detected, updating");
            warn!(from = %from, to = %SchemaVersion::CURRENT, "Config update complete");
        }
        ResolutionKind::Reset { from } => {
            warn!("Config changes detected, updating");
            warn!(
                from = from.as_deref().unwrap_or("<none>"),
                to = %SchemaVersion::CURRENT,
                "Config predates tracked schema, replaced with defaults"
            );
        }
        ResolutionKind::Newer { found } => {
            warn!(
                found = %found,
                running = %SchemaVersion::CURRENT,
                "Config was written by a newer plugin version, keeping it as-is"
            );
        }
    }

    store.save(&resolution.config.to_document()?)?;

    info!(
        version = %resolution.config.version,
        allow_list = ?resolution.config.allow_list.names(),
        "Configuration loaded"
    );

    Ok(resolution)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::store::MemoryConfigStore;

    fn doc(value: &serde_json::Value) -> String {
        value.to_string()
    }

    #[test]
    fn missing_document_yields_wildcard_defaults() {
        let resolution = resolve(None).unwrap();
        assert_eq!(resolution.kind, ResolutionKind::Fresh);
        assert_eq!(resolution.config.version, SchemaVersion::CURRENT);
        assert!(resolution.config.allow_list.is_wildcard());
    }

    #[test]
    fn blank_document_is_treated_as_missing() {
        let resolution = resolve(Some("  \n")).unwrap();
        assert_eq!(resolution.kind, ResolutionKind::Fresh);
    }

    #[test]
    fn pre_tracked_version_is_reset() {
        let stored = doc(&json!({
            "Version": "0.9.0",
            "Plant Short Prefab Names": ["hemp.entity"]
        }));
        let resolution = resolve(Some(&stored)).unwrap();
        assert_eq!(
            resolution.kind,
            ResolutionKind::Reset {
                from: Some("0.9.0".to_owned())
            }
        );
        assert_eq!(resolution.config, RipenessConfig::default());
    }

    #[test]
    fn missing_version_is_reset() {
        let stored = doc(&json!({ "Plant Short Prefab Names": ["hemp.entity"] }));
        let resolution = resolve(Some(&stored)).unwrap();
        assert_eq!(resolution.kind, ResolutionKind::Reset { from: None });
        assert!(resolution.config.allow_list.is_wildcard());
    }

    #[test]
    fn tracked_version_keeps_user_list() {
        let stored = doc(&json!({
            "Version": "1.0.0",
            "Plant Short Prefab Names": ["corn.entity", "hemp.entity"]
        }));
        let resolution = resolve(Some(&stored)).unwrap();
        assert_eq!(
            resolution.kind,
            ResolutionKind::Upgraded {
                from: SchemaVersion::FIRST_TRACKED
            }
        );
        assert_eq!(resolution.config.version, SchemaVersion::CURRENT);
        assert_eq!(
            resolution.config.allow_list.names(),
            ["corn.entity".to_owned(), "hemp.entity".to_owned()]
        );
    }

    #[test]
    fn tracked_version_without_list_gets_wildcard() {
        let stored = doc(&json!({ "Version": "1.1.0" }));
        let resolution = resolve(Some(&stored)).unwrap();
        assert!(resolution.config.allow_list.is_wildcard());
        assert_eq!(resolution.config.version, SchemaVersion::CURRENT);
    }

    #[test]
    fn current_document_is_unchanged() {
        let original = RipenessConfig {
            version: SchemaVersion::CURRENT,
            allow_list: AllowList::from_names(["pumpkin.entity"]),
        };
        let stored = original.to_document().unwrap();
        let resolution = resolve(Some(&stored)).unwrap();
        assert_eq!(resolution.kind, ResolutionKind::Current);
        assert_eq!(resolution.config, original);

        let again = resolve(Some(&resolution.config.to_document().unwrap())).unwrap();
        assert_eq!(again.config, original);
    }

    #[test]
    fn old_versions_always_land_on_current() {
        for version in ["0.0.1", "0.9.9", "1.0.0", "1.0.5", "1.1.0", "1.1.99", "junk"] {
            let stored = doc(&json!({ "Version": version }));
            let resolution = resolve(Some(&stored)).unwrap();
            assert_eq!(resolution.config.version, SchemaVersion::CURRENT, "{version}");
        }
    }

    #[test]
    fn newer_document_is_not_downgraded() {
        let stored = doc(&json!({
            "Version": "1.10.0",
            "Plant Short Prefab Names": ["corn.entity"]
        }));
        let resolution = resolve(Some(&stored)).unwrap();
        assert_eq!(
            resolution.kind,
            ResolutionKind::Newer {
                found: SchemaVersion::new(1, 10, 0)
            }
        );
        assert_eq!(resolution.config.version, SchemaVersion::new(1, 10, 0));
    }

    #[test]
    fn oversized_version_keeps_allow_list() {
        let stored = doc(&json!({
            "Version": "1.4294967296.0",
            "Plant Short Prefab Names": ["hemp.entity"]
        }));
        let resolution = resolve(Some(&stored)).unwrap();
        assert_eq!(
            resolution.kind,
            ResolutionKind::Newer {
                found: SchemaVersion::new(1, u32::MAX, 0)
            }
        );
        assert_eq!(
            resolution.config.allow_list,
            AllowList::from_names(["hemp.entity"])
        );
    }

    #[test]
    fn schema_violation_is_an_error() {
        let stored = doc(&json!({
            "Version": "1.1.0",
            "Plant Short Prefab Names": "corn.entity"
        }));
        assert!(matches!(resolve(Some(&stored)), Err(ConfigError::Json { .. })));
        assert!(matches!(resolve(Some("{not json")), Err(ConfigError::Json { .. })));
    }

    #[test]
    fn wildcard_permits_everything() {
        let list = AllowList::all();
        for name in ["corn.entity", "pumpkin.entity", "", "anything"] {
            assert!(list.permits(name));
        }
    }

    #[test]
    fn non_empty_list_is_exact_and_case_sensitive() {
        let list = AllowList::from_names(LEGACY_DEFAULT_PREFABS);
        assert!(list.permits("corn.entity"));
        assert!(!list.permits("Corn.entity"));
        assert!(!list.permits("corn"));
        assert!(!list.permits("berry.entity"));
    }

    #[test]
    fn load_config_persists_fresh_defaults() {
        let mut store = MemoryConfigStore::default();
        let resolution = load_config(&mut store).unwrap();
        assert_eq!(resolution.kind, ResolutionKind::Fresh);

        let written: serde_json::Value =
            serde_json::from_str(store.contents().unwrap()).unwrap();
        assert_eq!(written, json!({ "Version": "1.2.0", "Plant Short Prefab Names": [] }));
    }

    #[test]
    fn load_config_rewrites_upgraded_version() {
        let mut store = MemoryConfigStore::with_contents(doc(&json!({
            "Version": "1.1.0",
            "Plant Short Prefab Names": ["hemp.entity"]
        })));
        load_config(&mut store).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(store.contents().unwrap()).unwrap();
        assert_eq!(
            written,
            json!({ "Version": "1.2.0", "Plant Short Prefab Names": ["hemp.entity"] })
        );
    }

    #[test]
    fn load_config_does_not_overwrite_malformed_document() {
        let mut store = MemoryConfigStore::with_contents("[1, 2, 3]".to_owned());
        assert!(load_config(&mut store).is_err());
        assert_eq!(store.contents(), Some("[1, 2, 3]"));
    }
}
