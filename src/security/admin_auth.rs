use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::error::QuizError;
use crate::schema::Admin;

pub const ADMIN_USERNAME_HEADER: &str = "x-admin-username";
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Configured admin secrets. Either value missing means admin access is closed.
#[derive(Clone, Default)]
pub struct AdminCredentials {
    username: Option<String>,
    password: Option<String>,
}

impl AdminCredentials {
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        Self { username, password }
    }

    pub fn is_configured(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

// Never print the configured password.
impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Compare submitted credentials against the configured secrets.
///
/// Returns a redacted [`Admin`] on an exact match. When the secrets are not
/// configured the failure is logged and every attempt is rejected.
pub fn validate_admin(credentials: &AdminCredentials, username: &str, password: &str) -> Option<Admin> {
    let (admin_username, admin_password) = match (&credentials.username, &credentials.password) {
        (Some(u), Some(p)) => (u, p),
        _ => {
            tracing::error!("ADMIN_USERNAME and ADMIN_PASSWORD environment variables must be set");
            return None;
        }
    };

    // Evaluate both so a username mismatch costs the same as a password mismatch
    let username_ok = constant_time_compare(username, admin_username);
    let password_ok = constant_time_compare(password, admin_password);

    if username_ok && password_ok {
        Some(Admin::redacted(admin_username))
    } else {
        None
    }
}

/// Admin guard for mutation routes.
///
/// Checks:
/// 1. Admin secrets are configured (503 if not)
/// 2. Both credential headers are present (401 if not)
/// 3. Credentials match (401 if not)
///
/// Credentials are checked on every request; no session is issued.
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, QuizError> {
    if !state.storage.admin_credentials().is_configured() {
        tracing::warn!("Admin endpoint accessed but admin credentials are not configured");
        return Err(QuizError::Configuration {
            message: "Admin access is not configured".to_string(),
        });
    }

    // Owned copies only: the request must not stay borrowed across the await below
    let credentials = (
        header_value(&req, ADMIN_USERNAME_HEADER),
        header_value(&req, ADMIN_PASSWORD_HEADER),
    );

    let (username, password) = match credentials {
        (Some(u), Some(p)) => (u, p),
        _ => {
            tracing::warn!("Admin request missing credential headers");
            return Err(QuizError::Unauthorized);
        }
    };

    let admin = state
        .storage
        .validate_admin(&username, &password)
        .await
        .ok_or_else(|| {
            tracing::warn!("Invalid admin credentials for user: {}", username);
            QuizError::Unauthorized
        })?;

    tracing::debug!("Admin authenticated: {}", admin.username);

    req.extensions_mut().insert(admin);

    Ok(next.run(req).await)
}

fn header_value(req: &Request, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
}

/// Constant-time string comparison to prevent timing attacks
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}
