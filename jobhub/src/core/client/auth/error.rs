#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No identity is available (signed out, missing or expired token).
    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    #[error("Malformed identity token: {0}")]
    MalformedToken(String),

    /// The actor asked for a view its groups do not grant.
    #[error("Actor {actor_id} is not allowed to use the {role} view")]
    RoleNotPermitted { actor_id: String, role: String },

    /// Operation on a session after teardown.
    #[error("Session has been torn down")]
    SessionClosed,
}
