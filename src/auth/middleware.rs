//! Authorization middleware for Axum
//!
//! Authentication happens upstream: the identity layer puts an
//! [`AuthenticatedUser`] into the request extensions. The guard here only
//! evaluates that user's permissions against an [`AccessPolicy`].

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use super::gate::AccessPolicy;
use super::permissions::PermissionSet;
use crate::shared::{AppError, DomainError};

/// Authenticated user as provided by the identity layer
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub permissions: PermissionSet,
}

impl AuthenticatedUser {
    pub fn new(user_id: impl Into<String>, permissions: PermissionSet) -> Self {
        Self {
            user_id: user_id.into(),
            permissions,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.permissions.is_admin
    }

    pub fn can(&self, policy: &AccessPolicy) -> bool {
        policy.allows(&self.permissions)
    }
}

/// Route guard: rejects requests whose user does not satisfy the policy.
///
/// ```ignore
/// let policy = Arc::new(AccessPolicy::new().module("vehicles"));
/// Router::new()
///     .route("/vehicles", get(list_vehicles))
///     .layer(axum::middleware::from_fn_with_state(policy, require_access));
/// ```
pub async fn require_access(
    State(policy): State<Arc<AccessPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let allowed = match request.extensions().get::<AuthenticatedUser>() {
        Some(user) => {
            let allowed = user.can(&policy);
            if allowed {
                debug!(user_id = %user.user_id, path = %request.uri().path(), "access granted");
            } else {
                warn!(user_id = %user.user_id, path = %request.uri().path(), "access denied");
            }
            allowed
        }
        None => {
            warn!(path = %request.uri().path(), "no authenticated user on guarded route");
            return AppError::from(DomainError::Unauthorized(
                "Missing authenticated user".into(),
            ))
            .into_response();
        }
    };

    if !allowed {
        return AppError::from(DomainError::Forbidden("Insufficient permissions".into()))
            .into_response();
    }

    next.run(request).await
}

// ── Tests ──────────────────────────────────────────────────────
