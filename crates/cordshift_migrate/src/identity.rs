//! Source-to-destination ID mapping for one run.

use serde::Serialize;
use std::collections::HashMap;

/// Which mapping table an ID belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
    /// Guilds
    Guild,
    /// Roles
    Role,
    /// Categories
    Category,
    /// Leaf channels
    Channel,
}

/// Four independent tables from source ID to destination ID.
///
/// Writing an existing key replaces the old value. The map lives for one
/// guild run and is handed back in the run's report.
///
/// # Examples
///
/// ```
/// use cordshift_migrate::{EntityKind, IdentityMap};
///
/// let mut ids = IdentityMap::new();
/// ids.put(EntityKind::Role, "src-1", "dst-9");
/// assert_eq!(ids.get(EntityKind::Role, "src-1"), Some("dst-9"));
/// assert_eq!(ids.get(EntityKind::Channel, "src-1"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IdentityMap {
    guilds: HashMap<String, String>,
    roles: HashMap<String, String>,
    categories: HashMap<String, String>,
    channels: HashMap<String, String>,
}

impl IdentityMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, kind: EntityKind) -> &HashMap<String, String> {
        match kind {
            EntityKind::Guild => &self.guilds,
            EntityKind::Role => &self.roles,
            EntityKind::Category => &self.categories,
            EntityKind::Channel => &self.channels,
        }
    }

    fn table_mut(&mut self, kind: EntityKind) -> &mut HashMap<String, String> {
        match kind {
            EntityKind::Guild => &mut self.guilds,
            EntityKind::Role => &mut self.roles,
            EntityKind::Category => &mut self.categories,
            EntityKind::Channel => &mut self.channels,
        }
    }

    /// Record that `source_id` became `destination_id`.
    pub fn put(
        &mut self,
        kind: EntityKind,
        source_id: impl Into<String>,
        destination_id: impl Into<String>,
    ) {
        let source_id = source_id.into();
        let destination_id = destination_id.into();
        tracing::trace!(%kind, %source_id, %destination_id, "Mapped identity");
        self.table_mut(kind).insert(source_id, destination_id);
    }

    /// Destination ID for `source_id`, if one was recorded.
    pub fn get(&self, kind: EntityKind, source_id: &str) -> Option<&str> {
        self.table(kind).get(source_id).map(String::as_str)
    }

    /// Number of entries in one table.
    pub fn len(&self, kind: EntityKind) -> usize {
        self.table(kind).len()
    }

    /// True when no table has entries.
    pub fn is_empty(&self) -> bool {
        self.guilds.is_empty()
            && self.roles.is_empty()
            && self.categories.is_empty()
            && self.channels.is_empty()
    }
}
