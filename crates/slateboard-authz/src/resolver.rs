//! The permission resolver.
//!
//! One store read per check, exact enum-keyed lookup, hard-coded admin
//! bypass. Admins are never denied and no permission record is consulted for
//! them, so callers must not rely on an admin row existing or being correct.
//!
//! Denial outcomes and infrastructure failures are kept apart: a missing or
//! inactive record and an explicit `false` both block the request (403 at the
//! HTTP boundary, with different messages), while a failed store read is a
//! server fault (500). See [`crate::error::AuthzError`].

use crate::error::AuthzError;
use crate::store::PermissionStore;
use slateboard_models::{Action, Feature, Role};
use tracing::debug;

/// Decide whether `role` may perform `action` on `feature`.
///
/// `Ok(())` means allowed. `Err(PolicyNotConfigured)` means the role has no
/// usable record; `Err(PermissionDenied)` means the record says no;
/// `Err(Lookup)` means the store could not be read.
pub async fn check<S: PermissionStore>(
    store: &S,
    role: Role,
    feature: Feature,
    action: Action,
) -> Result<(), AuthzError> {
    if role == Role::Admin {
        return Ok(());
    }

    let record = store.find(role).await?;

    let record = match record {
        Some(record) if record.is_active && !record.permissions.is_empty() => record,
        _ => {
            debug!(%role, %feature, %action, "no usable permission record");
            return Err(AuthzError::PolicyNotConfigured);
        }
    };

    if record.permissions.allows(feature, action) {
        Ok(())
    } else {
        debug!(%role, %feature, %action, "permission denied");
        Err(AuthzError::PermissionDenied { feature, action })
    }
}

/// Boolean form of [`check`]: denials collapse to `false`, store failures
/// stay errors.
pub async fn resolve<S: PermissionStore>(
    store: &S,
    role: Role,
    feature: Feature,
    action: Action,
) -> Result<bool, AuthzError> {
    match check(store, role, feature, action).await {
        Ok(()) => Ok(true),
        Err(err) if err.is_denial() => Ok(false),
        Err(err) => Err(err),
    }
}

/// Allow if any pair allows, short-circuiting on the first success.
///
/// An empty list denies. Used where an operation is reachable through
/// multiple equivalent capabilities.
pub async fn resolve_any<S: PermissionStore>(
    store: &S,
    role: Role,
    pairs: &[(Feature, Action)],
) -> Result<bool, AuthzError> {
    for &(feature, action) in pairs {
        if resolve(store, role, feature, action).await? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Require every pair to allow. The error reports the first pair, in list
/// order, that failed.
pub async fn check_all<S: PermissionStore>(
    store: &S,
    role: Role,
    pairs: &[(Feature, Action)],
) -> Result<(), AuthzError> {
    for &(feature, action) in pairs {
        check(store, role, feature, action).await?;
    }
    Ok(())
}

/// Boolean form of [`check_all`].
pub async fn resolve_all<S: PermissionStore>(
    store: &S,
    role: Role,
    pairs: &[(Feature, Action)],
) -> Result<bool, AuthzError> {
    match check_all(store, role, pairs).await {
        Ok(()) => Ok(true),
        Err(err) if err.is_denial() => Ok(false),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryPermissionStore;
    use slateboard_models::PermissionMap;

    async fn store_with(role: Role, map: PermissionMap, is_active: bool) -> InMemoryPermissionStore {
        let store = InMemoryPermissionStore::new();
        store.upsert(role, map, is_active).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_admin_bypass_without_record() {
        let store = InMemoryPermissionStore::new();
        for feature in Feature::ALL {
            for action in Action::ALL {
                assert!(check(&store, Role::Admin, feature, action).await.is_ok());
            }
        }
    }

    #[tokio::test]
    async fn test_unconfigured_role_denies_with_distinct_error() {
        let store = InMemoryPermissionStore::new();
        let err = check(&store, Role::Teacher, Feature::Students, Action::View)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthzError::PolicyNotConfigured));
        assert_eq!(err.to_string(), "No permissions configured for this role");
    }

    #[tokio::test]
    async fn test_inactive_record_treated_as_absent() {
        let mut map = PermissionMap::new();
        map.grant(Feature::Students, Action::View, true);
        let store = store_with(Role::Teacher, map, false).await;

        let err = check(&store, Role::Teacher, Feature::Students, Action::View)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthzError::PolicyNotConfigured));
    }

    #[tokio::test]
    async fn test_empty_map_treated_as_absent() {
        let store = store_with(Role::Parent, PermissionMap::new(), true).await;

        let err = check(&store, Role::Parent, Feature::Fees, Action::View)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthzError::PolicyNotConfigured));
    }

    #[tokio::test]
    async fn test_exact_match_required() {
        let mut map = PermissionMap::new();
        map.grant(Feature::Students, Action::View, true);
        let store = store_with(Role::Clark, map, true).await;

        assert!(
            resolve(&store, Role::Clark, Feature::Students, Action::View)
                .await
                .unwrap()
        );
        assert!(
            !resolve(&store, Role::Clark, Feature::Students, Action::Create)
                .await
                .unwrap()
        );
        assert!(
            !resolve(&store, Role::Clark, Feature::Teachers, Action::View)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_explicit_false_is_permission_denied() {
        let mut map = PermissionMap::new();
        map.grant(Feature::Grades, Action::View, true);
        map.grant(Feature::Grades, Action::Delete, false);
        let store = store_with(Role::Teacher, map, true).await;

        let err = check(&store, Role::Teacher, Feature::Grades, Action::Delete)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AuthzError::PermissionDenied {
                feature: Feature::Grades,
                action: Action::Delete,
            }
        ));
    }

    #[tokio::test]
    async fn test_resolve_any_short_circuits() {
        let mut map = PermissionMap::new();
        map.grant(Feature::Reports, Action::View, true);
        let store = store_with(Role::Staff, map, true).await;

        let pairs = [
            (Feature::Settings, Action::Update),
            (Feature::Reports, Action::View),
        ];
        assert!(resolve_any(&store, Role::Staff, &pairs).await.unwrap());

        let denied = [
            (Feature::Settings, Action::Update),
            (Feature::Payroll, Action::View),
        ];
        assert!(!resolve_any(&store, Role::Staff, &denied).await.unwrap());
    }

    #[tokio::test]
    async fn test_resolve_any_empty_list_denies() {
        let store = InMemoryPermissionStore::new();
        assert!(!resolve_any(&store, Role::Teacher, &[]).await.unwrap());
    }

    #[tokio::test]
    async fn test_check_all_reports_first_failure() {
        let mut map = PermissionMap::new();
        map.grant(Feature::Attendance, Action::View, true);
        map.grant(Feature::Grades, Action::View, true);
        let store = store_with(Role::Parent, map, true).await;

        let pairs = [
            (Feature::Attendance, Action::View),
            (Feature::Attendance, Action::Delete),
            (Feature::Grades, Action::Delete),
        ];
        let err = check_all(&store, Role::Parent, &pairs).await.unwrap_err();
        assert!(matches!(
            err,
            AuthzError::PermissionDenied {
                feature: Feature::Attendance,
                action: Action::Delete,
            }
        ));

        assert!(!resolve_all(&store, Role::Parent, &pairs).await.unwrap());

        let allowed = [
            (Feature::Attendance, Action::View),
            (Feature::Grades, Action::View),
        ];
        assert!(resolve_all(&store, Role::Parent, &allowed).await.unwrap());
    }
}
