//! Authorization module
//!
//! Evaluates dot-namespaced permission strings and guards routes with
//! composed access policies. Identity and token handling live upstream.

pub mod gate;
pub mod middleware;
pub mod permissions;

pub use gate::AccessPolicy;
pub use middleware::{require_access, AuthenticatedUser};
pub use permissions::{module_of, PermissionEvaluator, PermissionSet};
