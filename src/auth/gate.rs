//! Composed access policies used by visibility gates and route guards

use serde::{Deserialize, Serialize};

use super::permissions::{PermissionEvaluator, PermissionSet};

/// A set of authorization criteria combined with AND.
///
/// Criteria left as `None` are trivially satisfied. A supplied criterion is
/// evaluated as-is, so `any_of: Some(vec![])` denies non-admin users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

impl AccessPolicy {
    /// A policy with no criteria; every user passes
    pub fn new() -> Self {
        Self::default()
    }

    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    pub fn all_of<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.all_of = Some(permissions.into_iter().map(Into::into).collect());
        self
    }

    pub fn any_of<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.any_of = Some(permissions.into_iter().map(Into::into).collect());
        self
    }

    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn is_satisfied_by(&self, evaluator: &PermissionEvaluator<'_>) -> bool {
        let permission_ok = self
            .permission
            .as_deref()
            .map_or(true, |p| evaluator.has_permission(p));
        let all_ok = self
            .all_of
            .as_deref()
            .map_or(true, |list| evaluator.has_all_permissions(list));
        let any_ok = self
            .any_of
            .as_deref()
            .map_or(true, |list| evaluator.has_any_permission(list));
        let module_ok = self
            .module
            .as_deref()
            .map_or(true, |m| evaluator.can_access_module(m));

        permission_ok && all_ok && any_ok && module_ok
    }

    pub fn allows(&self, set: &PermissionSet) -> bool {
        self.is_satisfied_by(&set.evaluator())
    }
}
