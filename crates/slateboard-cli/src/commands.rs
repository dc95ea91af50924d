//! Command implementations, generic over the permission store.

use anyhow::{Result, anyhow};
use slateboard_authz::{PermissionStore, seed_default_permissions};
use slateboard_models::{Action, Feature, PermissionMap, Role};
use tracing::info;

/// Seed default permission records for all six roles. Returns the number of
/// roles written; existing records are skipped unless `force` is set.
pub async fn init_permissions<S: PermissionStore>(store: &S, force: bool) -> Result<usize> {
    let seeded = seed_default_permissions(store, force).await?;
    info!(seeded, force, "permission seeding complete");
    Ok(seeded)
}

/// Render a role's permission record as pretty-printed JSON.
pub async fn show_permissions<S: PermissionStore>(store: &S, role: Role) -> Result<String> {
    let record = store
        .find(role)
        .await?
        .ok_or_else(|| anyhow!("no permissions configured for role '{role}'"))?;

    Ok(serde_json::to_string_pretty(&record)?)
}

/// Set a single feature/action grant on a role, creating the record if the
/// role has none yet.
pub async fn set_grant<S: PermissionStore>(
    store: &S,
    role: Role,
    feature: Feature,
    action: Action,
    allowed: bool,
) -> Result<()> {
    let existing = store.find(role).await?;
    let (mut permissions, is_active) = match existing {
        Some(record) => (record.permissions, record.is_active),
        None => (PermissionMap::new(), true),
    };

    permissions.grant(feature, action, allowed);
    store.upsert(role, permissions, is_active).await?;
    info!(%role, %feature, %action, allowed, "grant updated");
    Ok(())
}

/// Activate or deactivate a role's record. Deactivated records deny exactly
/// like absent ones.
pub async fn set_active<S: PermissionStore>(store: &S, role: Role, active: bool) -> Result<()> {
    let record = store
        .find(role)
        .await?
        .ok_or_else(|| anyhow!("no permissions configured for role '{role}'"))?;

    store.upsert(role, record.permissions, active).await?;
    info!(%role, active, "record activation updated");
    Ok(())
}

/// Delete a role's permission record outright.
pub async fn delete_permissions<S: PermissionStore>(store: &S, role: Role) -> Result<bool> {
    let deleted = store.delete(role).await?;
    info!(%role, deleted, "record deletion attempted");
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slateboard_authz::{InMemoryPermissionStore, resolver};

    #[tokio::test]
    async fn test_init_then_grant_then_resolve() {
        let store = InMemoryPermissionStore::new();
        assert_eq!(init_permissions(&store, false).await.unwrap(), 6);

        // Teachers do not export attendance by default.
        assert!(
            !resolver::resolve(&store, Role::Teacher, Feature::Attendance, Action::Export)
                .await
                .unwrap()
        );

        set_grant(&store, Role::Teacher, Feature::Attendance, Action::Export, true)
            .await
            .unwrap();

        assert!(
            resolver::resolve(&store, Role::Teacher, Feature::Attendance, Action::Export)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_set_grant_creates_missing_record() {
        let store = InMemoryPermissionStore::new();
        set_grant(&store, Role::Staff, Feature::Reports, Action::View, true)
            .await
            .unwrap();

        let record = store.find(Role::Staff).await.unwrap().unwrap();
        assert!(record.is_active);
        assert!(record.permissions.allows(Feature::Reports, Action::View));
    }

    #[tokio::test]
    async fn test_deactivate_blocks_resolution() {
        let store = InMemoryPermissionStore::new();
        init_permissions(&store, false).await.unwrap();

        assert!(
            resolver::resolve(&store, Role::Student, Feature::Grades, Action::View)
                .await
                .unwrap()
        );

        set_active(&store, Role::Student, false).await.unwrap();

        assert!(
            !resolver::resolve(&store, Role::Student, Feature::Grades, Action::View)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_show_missing_role_errors() {
        let store = InMemoryPermissionStore::new();
        assert!(show_permissions(&store, Role::Parent).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_reports_outcome() {
        let store = InMemoryPermissionStore::new();
        init_permissions(&store, false).await.unwrap();

        assert!(delete_permissions(&store, Role::Clark).await.unwrap());
        assert!(!delete_permissions(&store, Role::Clark).await.unwrap());
        assert!(store.find(Role::Clark).await.unwrap().is_none());
    }
}
