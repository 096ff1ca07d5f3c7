use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::DemoAuthConfig;

// ============================================================================
// Demo login only. There is no hashing, no session storage and no token
// verification: the token is a fixed string handed back on a match.
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl AuthOutcome {
    pub fn granted(token: impl Into<String>) -> Self {
        Self {
            success: true,
            token: Some(token.into()),
        }
    }

    pub fn rejected() -> Self {
        Self {
            success: false,
            token: None,
        }
    }
}

#[derive(Clone)]
pub struct DemoCredentials {
    email: String,
    password: String,
    token: String,
}

impl std::fmt::Debug for DemoCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<&DemoAuthConfig> for DemoCredentials {
    /// A blank configured token falls back to the default one
    fn from(cfg: &DemoAuthConfig) -> Self {
        let token = if cfg.token.trim().is_empty() {
            tracing::warn!("demo_auth.token is empty, using the default demo token");
            DemoAuthConfig::default().token
        } else {
            cfg.token.clone()
        };

        Self {
            email: cfg.email.clone(),
            password: cfg.password.clone(),
            token,
        }
    }
}

impl DemoCredentials {
    /// Exact comparison against the configured pair; blank input never matches
    pub fn check(&self, email: &str, password: &str) -> AuthOutcome {
        if email.is_empty() || password.is_empty() {
            return AuthOutcome::rejected();
        }
        if email == self.email && password == self.password {
            AuthOutcome::granted(self.token.clone())
        } else {
            AuthOutcome::rejected()
        }
    }
}
