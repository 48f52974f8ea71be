//! Per-view identity context.
//!
//! A [`Session`] is created when a view opens and torn down when it closes. Nothing about the
//! actor is cached process-wide; each view resolves its own identity through the
//! [`AuthProvider`].

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::core::client::auth::{AuthError, AuthProvider};
use crate::lifecycle::ActionContext;
use crate::types::actor::Actor;
use crate::types::jobs::types::ViewRole;

#[derive(Debug)]
pub struct Session {
    actor: Actor,
    role: ViewRole,
    shutdown: CancellationToken,
}

impl Session {
    /// Resolves the actor and checks it may use `role`. Only members of the admin group get the
    /// admin view.
    #[instrument(skip(provider))]
    pub async fn init(provider: &dyn AuthProvider, role: ViewRole) -> Result<Self, AuthError> {
        let actor = provider.current_actor().await?;

        if role == ViewRole::Admin && !actor.is_admin() {
            warn!(actor_id = %actor.id, "Actor requested the admin view without the admin group");
            return Err(AuthError::RoleNotPermitted { actor_id: actor.id, role: role.to_string() });
        }

        info!(actor_id = %actor.id, role = %role, "Session initialized");
        Ok(Self { actor, role, shutdown: CancellationToken::new() })
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn role(&self) -> ViewRole {
        self.role
    }

    pub fn action_context(&self, now: DateTime<Utc>) -> ActionContext<'_> {
        ActionContext::new(&self.actor, self.role, now)
    }

    /// Token cancelled on teardown. Background work tied to this view should select on it.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }

    pub fn is_active(&self) -> bool {
        !self.shutdown.is_cancelled()
    }

    pub fn ensure_active(&self) -> Result<(), AuthError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(AuthError::SessionClosed)
        }
    }

    pub fn teardown(&self) {
        if self.is_active() {
            info!(actor_id = %self.actor.id, role = %self.role, "Session torn down");
            self.shutdown.cancel();
        }
    }
}
