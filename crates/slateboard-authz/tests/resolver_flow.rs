//! End-to-end resolver behavior against a seeded store.

use slateboard_authz::{
    InMemoryPermissionStore, PermissionStore, resolver, seed_default_permissions,
};
use slateboard_models::{Action, Feature, PermissionMap, Role};

async fn seeded_store() -> InMemoryPermissionStore {
    let store = InMemoryPermissionStore::new();
    seed_default_permissions(&store, false).await.unwrap();
    store
}

#[tokio::test]
async fn admin_is_never_denied_even_after_record_deletion() {
    let store = seeded_store().await;
    store.delete(Role::Admin).await.unwrap();

    for feature in Feature::ALL {
        for action in Action::ALL {
            assert!(
                resolver::resolve(&store, Role::Admin, feature, action)
                    .await
                    .unwrap(),
                "admin denied {feature}/{action}"
            );
        }
    }
}

#[tokio::test]
async fn seeded_teacher_matches_curated_defaults() {
    let store = seeded_store().await;

    assert!(
        resolver::resolve(&store, Role::Teacher, Feature::Attendance, Action::Create)
            .await
            .unwrap()
    );
    assert!(
        resolver::resolve(&store, Role::Teacher, Feature::Grades, Action::Export)
            .await
            .unwrap()
    );
    assert!(
        !resolver::resolve(&store, Role::Teacher, Feature::Attendance, Action::Delete)
            .await
            .unwrap()
    );
    assert!(
        !resolver::resolve(&store, Role::Teacher, Feature::UserManagement, Action::View)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn clark_handles_fees_but_not_grades() {
    let store = seeded_store().await;

    assert!(
        resolver::resolve(&store, Role::Clark, Feature::Fees, Action::Export)
            .await
            .unwrap()
    );
    assert!(
        resolver::resolve(&store, Role::Clark, Feature::Certificates, Action::Create)
            .await
            .unwrap()
    );
    assert!(
        !resolver::resolve(&store, Role::Clark, Feature::Grades, Action::View)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn student_reaches_reports_through_no_capability() {
    let store = seeded_store().await;

    let pairs = [
        (Feature::Reports, Action::View),
        (Feature::Reports, Action::Export),
    ];
    assert!(!resolver::resolve_any(&store, Role::Student, &pairs)
        .await
        .unwrap());
}

#[tokio::test]
async fn deactivation_and_reconfiguration_round_trip() {
    let store = seeded_store().await;

    assert!(
        resolver::resolve(&store, Role::Parent, Feature::Fees, Action::View)
            .await
            .unwrap()
    );

    // Deactivate: behaves exactly like an absent record.
    let record = store.find(Role::Parent).await.unwrap().unwrap();
    store
        .upsert(Role::Parent, record.permissions, false)
        .await
        .unwrap();

    let err = resolver::check(&store, Role::Parent, Feature::Fees, Action::View)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "No permissions configured for this role");

    // Reconfigure with a narrower map.
    let mut map = PermissionMap::new();
    map.grant(Feature::Fees, Action::View, true);
    store.upsert(Role::Parent, map, true).await.unwrap();

    assert!(
        resolver::resolve(&store, Role::Parent, Feature::Fees, Action::View)
            .await
            .unwrap()
    );
    assert!(
        !resolver::resolve(&store, Role::Parent, Feature::Grades, Action::View)
            .await
            .unwrap()
    );
}
