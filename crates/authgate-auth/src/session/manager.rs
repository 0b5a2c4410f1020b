//! Session lifecycle orchestrator — register, login, refresh, logout.

use std::sync::Arc;

use tracing::{info, warn};

use authgate_core::error::AppError;
use authgate_core::result::AppResult;
use authgate_entity::user::{CreateUser, User, UserRole};

use crate::identity::IdentityStore;
use crate::jwt::{JwtEncoder, RefreshClaims};
use crate::password::PasswordHasher;

use super::store::SessionStore;

/// Fixed message for every login failure, so the caller cannot tell which
/// half of email/password was wrong.
const CREDENTIAL_MISMATCH: &str = "Email or password does not match";

/// Fields for a new identity, before hashing.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address, used as the login name.
    pub email: String,
    /// Plaintext password; hashed before it touches the store.
    pub password: String,
    /// Assigned role.
    pub role: UserRole,
    /// Tenant assignment (optional).
    pub tenant_id: Option<i64>,
}

/// A signed access + refresh token pair.
#[derive(Debug, Clone)]
pub struct IssuedTokens {
    /// Short-lived RS256 access token.
    pub access_token: String,
    /// Long-lived HS256 refresh token, bound to a session row.
    pub refresh_token: String,
}

/// Result of a flow that establishes a session.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// The authenticated identity.
    pub user: User,
    /// Freshly signed token pair.
    pub tokens: IssuedTokens,
}

/// Coordinates the credential verifier, token codec, identity store, and
/// session store for the user-facing auth flows.
///
/// Holds capability interfaces rather than concrete storage clients, so
/// tests run against in-memory stores.
#[derive(Clone)]
pub struct SessionManager {
    identities: Arc<dyn IdentityStore>,
    sessions: Arc<dyn SessionStore>,
    password_hasher: PasswordHasher,
    encoder: Arc<JwtEncoder>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("encoder", &self.encoder)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        identities: Arc<dyn IdentityStore>,
        sessions: Arc<dyn SessionStore>,
        password_hasher: PasswordHasher,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            identities,
            sessions,
            password_hasher,
            encoder,
        }
    }

    /// Registers a new identity and establishes its first session.
    ///
    /// Duplicate email is reported as such — registration does not need to
    /// resist enumeration the way login does.
    pub async fn register(&self, data: NewIdentity) -> AppResult<AuthSession> {
        if self.identities.find_by_email(&data.email).await?.is_some() {
            return Err(AppError::conflict("Email is already registered"));
        }

        let user = self.create_identity(data).await?;
        info!(user_id = user.id, "User registered");

        let tokens = self.issue_tokens(&user).await?;
        Ok(AuthSession { user, tokens })
    }

    /// Creates an identity without establishing a session (admin surface).
    pub async fn create_identity(&self, data: NewIdentity) -> AppResult<User> {
        let password_hash = self.password_hasher.hash_password(&data.password)?;
        self.identities
            .create(&CreateUser {
                first_name: data.first_name,
                last_name: data.last_name,
                email: data.email,
                password_hash,
                role: data.role,
                tenant_id: data.tenant_id,
            })
            .await
    }

    /// Verifies credentials and establishes a session.
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let Some(user) = self.identities.find_by_email(email).await? else {
            return Err(AppError::credentials(CREDENTIAL_MISMATCH));
        };

        if !self
            .password_hasher
            .verify_password(password, &user.password_hash)?
        {
            return Err(AppError::credentials(CREDENTIAL_MISMATCH));
        }

        info!(user_id = user.id, "Login successful");
        let tokens = self.issue_tokens(&user).await?;
        Ok(AuthSession { user, tokens })
    }

    /// Rotates a verified refresh token.
    ///
    /// The caller must already have verified the token's signature and
    /// revocation state. The new session row is committed before the
    /// consumed one is deleted; if that deletion fails the flow still
    /// succeeds, leaving a stale row behind rather than a user with zero
    /// valid sessions.
    pub async fn refresh(&self, claims: &RefreshClaims) -> AppResult<AuthSession> {
        let user_id = claims.user_id()?;
        let Some(user) = self.identities.find_by_id(user_id).await? else {
            return Err(AppError::authentication(
                "Refresh token subject no longer exists",
            ));
        };

        let consumed_id = claims.session_id()?;
        let tokens = self.issue_tokens(&user).await?;

        if let Err(e) = self.sessions.delete_by_id(consumed_id).await {
            warn!(
                session_id = consumed_id,
                error = %e,
                "Failed to delete rotated session; stale row left behind"
            );
        }

        info!(user_id = user.id, "Session rotated");
        Ok(AuthSession { user, tokens })
    }

    /// Revokes the session behind a verified refresh token.
    pub async fn logout(&self, claims: &RefreshClaims) -> AppResult<()> {
        let session_id = claims.session_id()?;
        self.sessions.delete_by_id(session_id).await?;
        info!(session_id, "Session revoked");
        Ok(())
    }

    /// Looks up the caller's own identity for introspection.
    pub async fn profile(&self, user_id: i64) -> AppResult<User> {
        self.identities
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Creates a session row and signs both tokens against it.
    async fn issue_tokens(&self, user: &User) -> AppResult<IssuedTokens> {
        let session = self.sessions.create(user.id).await?;
        let access_token = self.encoder.sign_access(user)?;
        let refresh_token = self.encoder.sign_refresh(user, session.id)?;
        Ok(IssuedTokens {
            access_token,
            refresh_token,
        })
    }
}
