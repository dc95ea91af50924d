//! Baseline permission tables and seeding.
//!
//! [`default_permissions_for`] is a pure, hard-curated table, not derived
//! from any rule, used only to seed `role_permissions` rows. Operators are
//! expected to adjust grants afterwards through the admin tooling; nothing
//! else reads this table at request time.

use crate::error::AuthzError;
use crate::store::PermissionStore;
use slateboard_models::{Action, Feature, PermissionMap, Role};
use tracing::info;

/// The hard-coded baseline permission map for a role.
///
/// Admin receives every action on every feature (and is additionally covered
/// by the resolver's unconditional bypass, so this row is informational).
/// The remaining roles receive hand-curated subsets.
pub fn default_permissions_for(role: Role) -> PermissionMap {
    let mut map = PermissionMap::new();

    match role {
        Role::Admin => {
            for feature in Feature::ALL {
                map.grant_actions(feature, &Action::ALL);
            }
        }
        Role::Teacher => {
            map.grant_actions(Feature::Students, &[Action::View]);
            map.grant_actions(Feature::Classes, &[Action::View]);
            map.grant_actions(Feature::Subjects, &[Action::View]);
            map.grant_actions(
                Feature::Attendance,
                &[Action::View, Action::Create, Action::Update],
            );
            map.grant_actions(
                Feature::Grades,
                &[Action::View, Action::Create, Action::Update, Action::Export],
            );
            map.grant_actions(Feature::Exams, &[Action::View, Action::Create, Action::Update]);
            map.grant_actions(
                Feature::Homework,
                &[Action::View, Action::Create, Action::Update, Action::Delete],
            );
            map.grant_actions(Feature::Timetable, &[Action::View]);
            map.grant_actions(Feature::Library, &[Action::View]);
            map.grant_actions(Feature::Events, &[Action::View]);
            map.grant_actions(Feature::Notices, &[Action::View]);
            map.grant_actions(Feature::Circulars, &[Action::View]);
            map.grant_actions(Feature::Communications, &[Action::View, Action::Create]);
            map.grant_actions(Feature::Reports, &[Action::View]);
        }
        Role::Student => {
            map.grant_actions(Feature::Attendance, &[Action::View]);
            map.grant_actions(Feature::Grades, &[Action::View]);
            map.grant_actions(Feature::Exams, &[Action::View]);
            map.grant_actions(Feature::Fees, &[Action::View]);
            map.grant_actions(Feature::Timetable, &[Action::View]);
            map.grant_actions(Feature::Homework, &[Action::View]);
            map.grant_actions(Feature::Library, &[Action::View]);
            map.grant_actions(Feature::Transport, &[Action::View]);
            map.grant_actions(Feature::Events, &[Action::View]);
            map.grant_actions(Feature::Notices, &[Action::View]);
            map.grant_actions(Feature::Circulars, &[Action::View]);
        }
        Role::Clark => {
            map.grant_actions(
                Feature::Students,
                &[Action::View, Action::Create, Action::Update],
            );
            map.grant_actions(
                Feature::Fees,
                &[Action::View, Action::Create, Action::Update, Action::Export],
            );
            map.grant_actions(
                Feature::Certificates,
                &[Action::View, Action::Create, Action::Export],
            );
            map.grant_actions(Feature::Transport, &[Action::View, Action::Update]);
            map.grant_actions(Feature::Reports, &[Action::View, Action::Export]);
            map.grant_actions(Feature::Events, &[Action::View]);
            map.grant_actions(Feature::Notices, &[Action::View]);
            map.grant_actions(Feature::Circulars, &[Action::View]);
        }
        Role::Parent => {
            map.grant_actions(Feature::Attendance, &[Action::View]);
            map.grant_actions(Feature::Grades, &[Action::View]);
            map.grant_actions(Feature::Exams, &[Action::View]);
            map.grant_actions(Feature::Fees, &[Action::View]);
            map.grant_actions(Feature::Timetable, &[Action::View]);
            map.grant_actions(Feature::Homework, &[Action::View]);
            map.grant_actions(Feature::Transport, &[Action::View]);
            map.grant_actions(Feature::Communications, &[Action::View]);
            map.grant_actions(Feature::Events, &[Action::View]);
            map.grant_actions(Feature::Notices, &[Action::View]);
            map.grant_actions(Feature::Circulars, &[Action::View]);
        }
        Role::Staff => {
            map.grant_actions(Feature::Attendance, &[Action::View]);
            map.grant_actions(Feature::Timetable, &[Action::View]);
            map.grant_actions(Feature::Payroll, &[Action::View]);
            map.grant_actions(Feature::Library, &[Action::View]);
            map.grant_actions(Feature::Communications, &[Action::View, Action::Create]);
            map.grant_actions(Feature::Events, &[Action::View]);
            map.grant_actions(Feature::Notices, &[Action::View]);
            map.grant_actions(Feature::Circulars, &[Action::View]);
        }
    }

    map
}

/// Seed `role_permissions` rows with the baseline table for all six roles.
///
/// Without `force`, roles that already have a record are left untouched, so
/// the operation is safe to run on every deployment. Returns the number of
/// roles written.
pub async fn seed_default_permissions<S: PermissionStore>(
    store: &S,
    force: bool,
) -> Result<usize, AuthzError> {
    let mut seeded = 0;

    for role in Role::ALL {
        if !force && store.find(role).await?.is_some() {
            info!(%role, "permission record exists, skipping");
            continue;
        }

        store
            .upsert(role, default_permissions_for(role), true)
            .await?;
        info!(%role, "seeded default permissions");
        seeded += 1;
    }

    Ok(seeded)
}
