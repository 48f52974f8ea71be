use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{AuthError, AuthProvider};
use crate::types::actor::{Actor, ActorAttributes};

/// Claims carried by the identity token.
#[derive(Debug, Clone, Deserialize)]
pub struct IdTokenClaims {
    pub sub: String,
    #[serde(default)]
    pub email: String,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub phone_number: Option<String>,
    /// JSON-encoded array of category ids
    #[serde(rename = "custom:job_preferences")]
    pub job_preferences: Option<String>,
    #[serde(rename = "cognito:groups", default)]
    pub groups: Vec<String>,
    /// Seconds since the epoch
    pub exp: Option<i64>,
}

impl IdTokenClaims {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp.is_some_and(|exp| exp <= now.timestamp())
    }

    pub fn into_actor(self) -> Actor {
        let job_preferences = self.job_preferences.as_deref().and_then(|raw| {
            serde_json::from_str::<Vec<String>>(raw)
                .map_err(|e| warn!(error = %e, "Ignoring malformed job preferences claim"))
                .ok()
        });

        Actor {
            id: self.sub,
            email: self.email,
            attributes: ActorAttributes {
                given_name: self.given_name,
                family_name: self.family_name,
                phone_number: self.phone_number,
                job_preferences,
            },
            groups: self.groups,
        }
    }
}

/// Decodes the payload segment of a JWT. The signature is not verified here.
pub fn decode_claims(token: &str) -> Result<IdTokenClaims, AuthError> {
    let mut parts = token.trim().split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_header), Some(payload), Some(_signature), None) => payload,
        _ => return Err(AuthError::MalformedToken("expected three dot-separated segments".to_string())),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| AuthError::MalformedToken(format!("payload is not base64url: {}", e)))?;
    serde_json::from_slice(&bytes).map_err(|e| AuthError::MalformedToken(format!("invalid claims: {}", e)))
}

/// Resolves the actor from an identity token obtained out of band (sign-in happens elsewhere).
#[derive(Debug, Clone)]
pub struct JwtAuthProvider {
    token: String,
}

impl JwtAuthProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    pub fn actor_at(&self, now: DateTime<Utc>) -> Result<Actor, AuthError> {
        if self.token.trim().is_empty() {
            return Err(AuthError::Unauthenticated("no identity token configured".to_string()));
        }
        let claims = decode_claims(&self.token)?;
        if claims.is_expired_at(now) {
            return Err(AuthError::Unauthenticated("identity token has expired".to_string()));
        }
        debug!(actor_id = %claims.sub, groups = ?claims.groups, "Resolved actor from identity token");
        Ok(claims.into_actor())
    }
}

#[async_trait]
impl AuthProvider for JwtAuthProvider {
    async fn current_actor(&self) -> Result<Actor, AuthError> {
        self.actor_at(Utc::now())
    }

    async fn id_token(&self) -> Result<String, AuthError> {
        if self.token.trim().is_empty() {
            return Err(AuthError::Unauthenticated("no identity token configured".to_string()));
        }
        Ok(self.token.trim().to_string())
    }
}
