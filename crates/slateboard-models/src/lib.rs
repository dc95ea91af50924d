//! # Slateboard Models
//!
//! Domain model for role-based access control in the Slateboard API.
//!
//! - [`ids`]: strongly-typed UUID newtypes
//! - [`permissions`]: roles, features, actions, and the permission cube

pub mod ids;
pub mod permissions;

pub use ids::RolePermissionId;
pub use permissions::{Action, Feature, PermissionMap, Role, RolePermission};
