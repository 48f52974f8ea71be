pub mod error;
pub mod jwt;

use async_trait::async_trait;
pub use error::AuthError;

use crate::types::actor::Actor;

/// Source of the caller's identity. Signing in, refresh and signature checks live behind it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// current_actor - The signed-in actor, or `Unauthenticated`
    async fn current_actor(&self) -> Result<Actor, AuthError>;

    /// id_token - Token to present to the Job API as a bearer credential
    async fn id_token(&self) -> Result<String, AuthError>;
}
