//! # authgate-auth
//!
//! Credential verification, dual-algorithm token issuance, and session
//! lifecycle for Authgate.
//!
//! ## Modules
//!
//! - `password` — Argon2id password hashing and verification
//! - `jwt` — token signing and verification for the access (RS256) and
//!   refresh (HS256) contexts
//! - `identity` — identity store abstraction over the user repository
//! - `tenancy` — tenant store abstraction over the tenant repository
//! - `session` — refresh session store and the session orchestrator

pub mod identity;
pub mod jwt;
pub mod password;
pub mod session;
pub mod tenancy;

pub use identity::{IdentityStore, MemoryIdentityStore, PgIdentityStore};
pub use jwt::{AccessClaims, JwtDecoder, JwtEncoder, RefreshClaims};
pub use password::PasswordHasher;
pub use session::{MemorySessionStore, PgSessionStore, SessionManager, SessionStore};
pub use tenancy::{MemoryTenantStore, PgTenantStore, TenantStore};
