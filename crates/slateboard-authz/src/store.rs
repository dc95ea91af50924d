//! Persistence for `RolePermission` records.
//!
//! The resolver and the admin tooling only ever touch the table through
//! [`PermissionStore`], so the "inactive means absent" policy lives in exactly
//! one place. [`PgPermissionStore`] is the production implementation; the
//! in-memory store in [`crate::memory`] backs tests and dry runs.
//!
//! Expected table (managed by the API deployment's migrations):
//!
//! ```sql
//! CREATE TABLE role_permissions (
//!     id          UUID PRIMARY KEY,
//!     role        TEXT NOT NULL UNIQUE,
//!     permissions JSONB NOT NULL DEFAULT '{}',
//!     is_active   BOOLEAN NOT NULL DEFAULT TRUE,
//!     created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
//!     updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use slateboard_models::{PermissionMap, Role, RolePermission, RolePermissionId};
use sqlx::{FromRow, PgPool, types::Json};
use std::future::Future;
use tracing::instrument;
use uuid::Uuid;

/// Storage contract for per-role permission records.
///
/// At most one record exists per role; `upsert` enforces this by keying on
/// the role. Methods return `anyhow::Result`; only infrastructure failures
/// flow through here, never denials.
pub trait PermissionStore: Send + Sync {
    /// Fetch the record for a role, if one exists.
    fn find(&self, role: Role) -> impl Future<Output = Result<Option<RolePermission>>> + Send;

    /// Insert or replace the record for a role.
    fn upsert(
        &self,
        role: Role,
        permissions: PermissionMap,
        is_active: bool,
    ) -> impl Future<Output = Result<RolePermission>> + Send;

    /// Remove the record for a role. Returns whether a record was deleted.
    fn delete(&self, role: Role) -> impl Future<Output = Result<bool>> + Send;
}

#[derive(Debug, FromRow)]
struct RolePermissionRow {
    id: Uuid,
    role: String,
    permissions: Json<PermissionMap>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RolePermissionRow {
    fn into_record(self) -> Result<RolePermission> {
        let role: Role = self
            .role
            .parse()
            .with_context(|| format!("corrupt role_permissions row {}", self.id))?;

        Ok(RolePermission {
            id: RolePermissionId::from_uuid(self.id),
            role,
            permissions: self.permissions.0,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Postgres-backed permission store.
#[derive(Debug, Clone)]
pub struct PgPermissionStore {
    pool: PgPool,
}

impl PgPermissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PermissionStore for PgPermissionStore {
    #[instrument(skip(self))]
    async fn find(&self, role: Role) -> Result<Option<RolePermission>> {
        let row: Option<RolePermissionRow> = sqlx::query_as(
            r#"SELECT id, role, permissions, is_active, created_at, updated_at
            FROM role_permissions WHERE role = $1"#,
        )
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await
        .context("failed to fetch role permissions")?;

        row.map(RolePermissionRow::into_record).transpose()
    }

    #[instrument(skip(self, permissions))]
    async fn upsert(
        &self,
        role: Role,
        permissions: PermissionMap,
        is_active: bool,
    ) -> Result<RolePermission> {
        let row: RolePermissionRow = sqlx::query_as(
            r#"INSERT INTO role_permissions (id, role, permissions, is_active)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (role) DO UPDATE
                SET permissions = EXCLUDED.permissions,
                    is_active = EXCLUDED.is_active,
                    updated_at = now()
            RETURNING id, role, permissions, is_active, created_at, updated_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(role.as_str())
        .bind(Json(permissions))
        .bind(is_active)
        .fetch_one(&self.pool)
        .await
        .context("failed to upsert role permissions")?;

        row.into_record()
    }

    #[instrument(skip(self))]
    async fn delete(&self, role: Role) -> Result<bool> {
        let result = sqlx::query("DELETE FROM role_permissions WHERE role = $1")
            .bind(role.as_str())
            .execute(&self.pool)
            .await
            .context("failed to delete role permissions")?;

        Ok(result.rows_affected() > 0)
    }
}
