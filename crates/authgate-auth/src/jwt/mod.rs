//! Token signing and verification.
//!
//! Two independent signing contexts: access tokens are RS256 (private key
//! signs, public key verifies), refresh tokens are HS256 under a shared
//! secret known only to this service.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::{AccessClaims, RefreshClaims};
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;
