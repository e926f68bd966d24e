//! Permission evaluation
//!
//! Permissions are dot-namespaced strings such as `vehicles.create`; the
//! segment before the first dot names the module. An admin flag satisfies
//! every check without looking at the list.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Separator between a module name and the action inside it
pub const MODULE_SEPARATOR: char = '.';

/// Permissions granted to one user, as supplied by the identity layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSet {
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl PermissionSet {
    pub fn new<I, S>(permissions: I, is_admin: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            permissions: permissions.into_iter().map(Into::into).collect(),
            is_admin,
        }
    }

    /// A set with the admin bypass and no explicit permissions
    pub fn admin() -> Self {
        Self {
            permissions: Vec::new(),
            is_admin: true,
        }
    }

    pub fn evaluator(&self) -> PermissionEvaluator<'_> {
        PermissionEvaluator::new(self)
    }
}

/// Answers authorization queries against a borrowed permission list
#[derive(Debug, Clone, Copy)]
pub struct PermissionEvaluator<'a> {
    permissions: &'a [String],
    is_admin: bool,
}

impl<'a> PermissionEvaluator<'a> {
    pub fn new(set: &'a PermissionSet) -> Self {
        Self::from_parts(&set.permissions, set.is_admin)
    }

    pub fn from_parts(permissions: &'a [String], is_admin: bool) -> Self {
        Self {
            permissions,
            is_admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// `true` if `permission` is granted exactly
    pub fn has_permission(&self, permission: &str) -> bool {
        self.is_admin || self.permissions.iter().any(|p| p == permission)
    }

    /// `true` if every permission in `required` is granted (vacuously for `[]`)
    pub fn has_all_permissions<S: AsRef<str>>(&self, required: &[S]) -> bool {
        self.is_admin || required.iter().all(|p| self.has_permission(p.as_ref()))
    }

    /// `true` if at least one permission in `candidates` is granted
    pub fn has_any_permission<S: AsRef<str>>(&self, candidates: &[S]) -> bool {
        self.is_admin || candidates.iter().any(|p| self.has_permission(p.as_ref()))
    }

    /// `true` if any granted permission belongs to `module`.
    ///
    /// Matches on the `"<module>."` prefix, so `vehicles2.view` does not grant
    /// access to `vehicles`.
    pub fn can_access_module(&self, module: &str) -> bool {
        self.is_admin
            || self.permissions.iter().any(|p| {
                p.strip_prefix(module)
                    .is_some_and(|rest| rest.starts_with(MODULE_SEPARATOR))
            })
    }
}

/// Module segment of a permission string (`"vehicles.create"` -> `"vehicles"`)
pub fn module_of(permission: &str) -> &str {
    permission
        .split_once(MODULE_SEPARATOR)
        .map_or(permission, |(module, _)| module)
}
