//! Authentication ports.
//!
//! Accounts live with the hosted auth provider; the API only verifies the
//! bearer tokens it issues.

/// Role granting the right to post on behalf of the charity `charity_id`.
pub fn charity_role(charity_id: &str) -> String {
    format!("charity:{charity_id}")
}

/// Claims carried by access tokens.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: String,
    pub email: String,
    /// Provider-assigned roles, e.g. `charity:<id>` for charity staff.
    pub roles: Vec<String>,
}

impl TokenClaims {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Verifies bearer tokens.
pub trait TokenService: Send + Sync {
    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,
}
