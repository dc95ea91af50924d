//! In-memory permission store for tests and CLI dry runs.

use crate::store::PermissionStore;
use anyhow::Result;
use chrono::Utc;
use slateboard_models::{PermissionMap, Role, RolePermission, RolePermissionId};
use std::collections::HashMap;
use std::sync::RwLock;

/// A `PermissionStore` backed by a `HashMap`. Intended for tests and
/// tooling; panics on a poisoned lock.
#[derive(Debug, Default)]
pub struct InMemoryPermissionStore {
    records: RwLock<HashMap<Role, RolePermission>>,
}

impl InMemoryPermissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record directly, bypassing upsert timestamps. Test convenience.
    pub fn insert(&self, record: RolePermission) {
        self.records.write().unwrap().insert(record.role, record);
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().unwrap().is_empty()
    }
}

impl PermissionStore for InMemoryPermissionStore {
    async fn find(&self, role: Role) -> Result<Option<RolePermission>> {
        Ok(self.records.read().unwrap().get(&role).cloned())
    }

    async fn upsert(
        &self,
        role: Role,
        permissions: PermissionMap,
        is_active: bool,
    ) -> Result<RolePermission> {
        let mut records = self.records.write().unwrap();
        let now = Utc::now();

        let record = match records.get(&role) {
            Some(existing) => RolePermission {
                id: existing.id,
                role,
                permissions,
                is_active,
                created_at: existing.created_at,
                updated_at: now,
            },
            None => RolePermission {
                id: RolePermissionId::new(),
                role,
                permissions,
                is_active,
                created_at: now,
                updated_at: now,
            },
        };

        records.insert(role, record.clone());
        Ok(record)
    }

    async fn delete(&self, role: Role) -> Result<bool> {
        Ok(self.records.write().unwrap().remove(&role).is_some())
    }
}
