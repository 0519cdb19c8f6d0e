//! Role stage.

use crate::{EntityKind, IdentityMap, StageContext, StageTally};
use cordshift_core::{RoleDescriptor, RolePosition};
use cordshift_interface::PacedOperation;
use std::collections::HashMap;

/// Recreates source roles on the destination guild.
///
/// The default role is never created: it is mapped onto the destination's
/// own default role. Other roles are created lowest position first, then the
/// whole hierarchy is reordered in one bulk call.
pub struct RoleMigrator<'a> {
    context: StageContext<'a>,
}

impl<'a> RoleMigrator<'a> {
    /// Stage migrator writing through `context`.
    pub fn new(context: StageContext<'a>) -> Self {
        Self { context }
    }

    /// Migrate `roles` into `destination_guild_id`.
    ///
    /// `existing` is the destination's current role list when running a
    /// partial sync, `None` for a full copy. Roles whose name already exists
    /// there are mapped instead of created.
    #[tracing::instrument(skip_all, fields(destination_guild_id = %destination_guild_id, source_roles = roles.len()))]
    pub async fn migrate(
        &self,
        roles: &[RoleDescriptor],
        destination_guild_id: &str,
        existing: Option<&[RoleDescriptor]>,
        identities: &mut IdentityMap,
    ) -> StageTally {
        let sink = self.context.sink;
        sink.info("--- Migrating Roles ---");

        let mut tally = StageTally::default();
        let mut positions: Vec<RolePosition> = Vec::new();

        let (defaults, mut others): (Vec<&RoleDescriptor>, Vec<&RoleDescriptor>) =
            roles.iter().partition(|role| role.is_default());

        let existing_default = existing
            .and_then(|roles| roles.iter().find(|role| role.is_default()))
            .map(|role| role.id().clone());
        for default in defaults {
            let destination_id = existing_default
                .clone()
                .unwrap_or_else(|| destination_guild_id.to_string());
            sink.info(&format!(
                "Mapping default role '{}' to destination role {}",
                default.name(),
                destination_id
            ));
            identities.put(EntityKind::Role, default.id().as_str(), destination_id.as_str());
            positions.push(RolePosition {
                id: destination_id,
                position: *default.position(),
            });
            tally.matched += 1;
        }
        let mapped_defaults = positions.len();

        let by_name: HashMap<&str, &RoleDescriptor> = existing
            .unwrap_or_default()
            .iter()
            .filter(|role| !role.is_default())
            .map(|role| (role.name().as_str(), role))
            .collect();

        others.sort_by_key(|role| *role.position());

        for role in others {
            if let Some(found) = by_name.get(role.name().as_str()) {
                sink.info(&format!(
                    "Role '{}' already exists (ID: {}), mapping",
                    role.name(),
                    found.id()
                ));
                identities.put(EntityKind::Role, role.id().as_str(), found.id().as_str());
                positions.push(RolePosition {
                    id: found.id().clone(),
                    position: *role.position(),
                });
                tally.matched += 1;
                continue;
            }

            sink.info(&format!("Creating role: {}", role.name()));
            sink.info(&format!(
                "  Color: #{:06x}, Permissions: {}",
                role.color(),
                role.permissions()
            ));

            match self
                .context
                .destination
                .create_role(destination_guild_id, &role.to_new_role())
                .await
            {
                Ok(created) => {
                    sink.info(&format!("  ✓ Role created with ID: {}", created.id()));
                    identities.put(EntityKind::Role, role.id().as_str(), created.id().as_str());
                    positions.push(RolePosition {
                        id: created.id().clone(),
                        position: *role.position(),
                    });
                    tally.created += 1;
                    self.context.pacer.pace(PacedOperation::RoleCreate).await;
                }
                Err(e) => {
                    tracing::warn!(role = %role.name(), error = %e, "Role create failed");
                    sink.warn(&format!("  Failed to create role '{}': {}", role.name(), e));
                    tally.failed += 1;
                }
            }
        }

        if positions.len() > mapped_defaults {
            self.reorder(destination_guild_id, positions).await;
        }

        sink.info(&format!(
            "✓ Migrated {} roles ({} created, {} matched, {} failed)",
            tally.migrated(),
            tally.created,
            tally.matched,
            tally.failed
        ));
        tally
    }

    async fn reorder(&self, destination_guild_id: &str, mut positions: Vec<RolePosition>) {
        let sink = self.context.sink;
        positions.sort_by(|a, b| b.position.cmp(&a.position));
        sink.info(&format!("Setting role hierarchy for {} roles...", positions.len()));

        match self
            .context
            .destination
            .reorder_roles(destination_guild_id, &positions)
            .await
        {
            Ok(()) => sink.info("✓ Role hierarchy updated"),
            Err(e) => {
                tracing::warn!(error = %e, "Role reorder failed");
                sink.warn(&format!("Could not set role positions: {}", e));
                sink.warn("Role hierarchy may be out of order");
            }
        }
    }
}
