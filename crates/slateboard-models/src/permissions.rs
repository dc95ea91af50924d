//! Roles, features, actions, and the permission cube.
//!
//! Access control is data-driven: a [`PermissionMap`] is a
//! feature → action → bool cube stored per role. Features and actions are
//! closed enums rather than raw strings, so a permission checked at a call
//! site cannot drift out of sync with the seeded table: a typo fails to
//! compile instead of silently denying everything.

use crate::ids::RolePermissionId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Principal categories recognized by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
    Clark,
    Parent,
    Staff,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::Teacher,
        Role::Student,
        Role::Clark,
        Role::Parent,
        Role::Staff,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
            Role::Clark => "clark",
            Role::Parent => "parent",
            Role::Staff => "staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            "clark" => Ok(Role::Clark),
            "parent" => Ok(Role::Parent),
            "staff" => Ok(Role::Staff),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// Functional areas of the system gated by permissions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    Students,
    Teachers,
    Classes,
    Subjects,
    Attendance,
    Grades,
    Exams,
    Fees,
    Payroll,
    Certificates,
    Transport,
    Library,
    Hostel,
    Timetable,
    Homework,
    Events,
    Notices,
    Circulars,
    Reports,
    Communications,
    UserManagement,
    Settings,
}

impl Feature {
    pub const ALL: [Feature; 22] = [
        Feature::Students,
        Feature::Teachers,
        Feature::Classes,
        Feature::Subjects,
        Feature::Attendance,
        Feature::Grades,
        Feature::Exams,
        Feature::Fees,
        Feature::Payroll,
        Feature::Certificates,
        Feature::Transport,
        Feature::Library,
        Feature::Hostel,
        Feature::Timetable,
        Feature::Homework,
        Feature::Events,
        Feature::Notices,
        Feature::Circulars,
        Feature::Reports,
        Feature::Communications,
        Feature::UserManagement,
        Feature::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Students => "students",
            Feature::Teachers => "teachers",
            Feature::Classes => "classes",
            Feature::Subjects => "subjects",
            Feature::Attendance => "attendance",
            Feature::Grades => "grades",
            Feature::Exams => "exams",
            Feature::Fees => "fees",
            Feature::Payroll => "payroll",
            Feature::Certificates => "certificates",
            Feature::Transport => "transport",
            Feature::Library => "library",
            Feature::Hostel => "hostel",
            Feature::Timetable => "timetable",
            Feature::Homework => "homework",
            Feature::Events => "events",
            Feature::Notices => "notices",
            Feature::Circulars => "circulars",
            Feature::Reports => "reports",
            Feature::Communications => "communications",
            Feature::UserManagement => "userManagement",
            Feature::Settings => "settings",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown feature: {0}")]
pub struct ParseFeatureError(String);

impl FromStr for Feature {
    type Err = ParseFeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .iter()
            .find(|f| f.as_str() == s)
            .copied()
            .ok_or_else(|| ParseFeatureError(s.to_string()))
    }
}

/// Operation categories on a feature.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    View,
    Create,
    Update,
    Delete,
    Export,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::View,
        Action::Create,
        Action::Update,
        Action::Delete,
        Action::Export,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Export => "export",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown action: {0}")]
pub struct ParseActionError(String);

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .find(|a| a.as_str() == s)
            .copied()
            .ok_or_else(|| ParseActionError(s.to_string()))
    }
}

/// A feature → action → bool permission cube.
///
/// Serialized as nested JSON objects (`{"attendance": {"view": true}}`) and
/// stored in a JSONB column. Absence at either level reads as `false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionMap(BTreeMap<Feature, BTreeMap<Action, bool>>);

impl PermissionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Exact lookup: both the feature and the action must be present and true.
    pub fn allows(&self, feature: Feature, action: Action) -> bool {
        self.0
            .get(&feature)
            .and_then(|actions| actions.get(&action))
            .copied()
            .unwrap_or(false)
    }

    /// Set a single grant.
    pub fn grant(&mut self, feature: Feature, action: Action, allowed: bool) {
        self.0.entry(feature).or_default().insert(action, allowed);
    }

    /// Grant a set of actions on a feature, replacing any existing entry.
    pub fn grant_actions(&mut self, feature: Feature, actions: &[Action]) {
        let grants = actions.iter().map(|a| (*a, true)).collect();
        self.0.insert(feature, grants);
    }

    /// The action grants for a feature, if the feature has an entry at all.
    pub fn actions(&self, feature: Feature) -> Option<&BTreeMap<Action, bool>> {
        self.0.get(&feature)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Feature, &BTreeMap<Action, bool>)> {
        self.0.iter()
    }
}

/// Persisted permission record: one row per role, upsert semantics.
///
/// Inactive records are treated as absent by the resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolePermission {
    pub id: RolePermissionId,
    pub role: Role,
    pub permissions: PermissionMap,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
