//! # Slateboard Authz
//!
//! Data-driven role/feature/action authorization for the Slateboard API.
//!
//! Every protected operation in the system funnels through [`resolver`]: a
//! single read of the role's persisted permission record, an exact lookup in
//! its feature → action cube, and a hard-coded bypass for administrators.
//! All reads of `RolePermission` go through the [`store::PermissionStore`]
//! trait; controllers must not query the table directly, so that inactive
//! and unconfigured records are treated uniformly everywhere.
//!
//! # Example
//!
//! ```ignore
//! use slateboard_authz::{resolver, store::PgPermissionStore};
//! use slateboard_models::{Action, Feature, Role};
//!
//! let store = PgPermissionStore::new(pool);
//! resolver::check(&store, Role::Teacher, Feature::Attendance, Action::Create).await?;
//! ```

pub mod defaults;
pub mod error;
pub mod memory;
pub mod resolver;
pub mod store;

pub use defaults::{default_permissions_for, seed_default_permissions};
pub use error::AuthzError;
pub use memory::InMemoryPermissionStore;
pub use store::{PermissionStore, PgPermissionStore};
