//! Token codec tests: dual-context signing, verification, and rejection.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

use authgate_auth::jwt::{AccessClaims, JwtDecoder, JwtEncoder, RefreshClaims};
use authgate_core::config::auth::AuthConfig;
use authgate_entity::user::{User, UserRole};

const PRIVATE_PEM: &str = include_str!("fixtures/private.pem");
const PUBLIC_PEM: &str = include_str!("fixtures/public.pem");

fn test_config() -> AuthConfig {
    AuthConfig {
        issuer: "authgate".to_string(),
        access_private_key_path: "unused".to_string(),
        access_public_key_path: "unused".to_string(),
        refresh_secret: "test-refresh-secret".to_string(),
        access_ttl_minutes: 60,
        refresh_ttl_days: 365,
        cookie_domain: "localhost".to_string(),
    }
}

fn codec() -> (JwtEncoder, JwtDecoder) {
    let config = test_config();
    let encoder = JwtEncoder::new(PRIVATE_PEM.as_bytes(), &config).unwrap();
    let decoder = JwtDecoder::new(PUBLIC_PEM.as_bytes(), &config).unwrap();
    (encoder, decoder)
}

fn test_user(id: i64, role: UserRole, tenant_id: Option<i64>) -> User {
    let now = Utc::now();
    User {
        id,
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        email: format!("user{id}@example.com"),
        password_hash: String::new(),
        role,
        tenant_id,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn access_token_round_trip() {
    let (encoder, decoder) = codec();
    let user = test_user(7, UserRole::Manager, Some(3));

    let token = encoder.sign_access(&user).unwrap();
    let claims = decoder.verify_access(&token).unwrap();

    assert_eq!(claims.sub, "7");
    assert_eq!(claims.user_id().unwrap(), 7);
    assert_eq!(claims.role, UserRole::Manager);
    assert_eq!(claims.tenant.as_deref(), Some("3"));
    assert!(claims.exp > claims.iat);
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[test]
fn refresh_token_round_trip_carries_session_id() {
    let (encoder, decoder) = codec();
    let user = test_user(9, UserRole::Customer, None);

    let token = encoder.sign_refresh(&user, 1234).unwrap();
    let claims = decoder.verify_refresh(&token).unwrap();

    assert_eq!(claims.sub, "9");
    assert_eq!(claims.session_id().unwrap(), 1234);
    assert_eq!(claims.tenant, None);
}

#[test]
fn contexts_are_not_interchangeable() {
    let (encoder, decoder) = codec();
    let user = test_user(1, UserRole::Customer, None);

    // An access token must not verify under the refresh context,
    // and vice versa.
    let access = encoder.sign_access(&user).unwrap();
    assert!(decoder.verify_refresh(&access).is_err());

    let refresh = encoder.sign_refresh(&user, 1).unwrap();
    assert!(decoder.verify_access(&refresh).is_err());
}

#[test]
fn expired_access_token_is_rejected() {
    let (_, decoder) = codec();
    let now = Utc::now().timestamp();

    let claims = AccessClaims {
        sub: "1".to_string(),
        role: UserRole::Customer,
        tenant: None,
        iss: "authgate".to_string(),
        iat: now - 7200,
        exp: now - 3600,
    };
    let key = EncodingKey::from_rsa_pem(PRIVATE_PEM.as_bytes()).unwrap();
    let token = encode(&Header::new(Algorithm::RS256), &claims, &key).unwrap();

    let err = decoder.verify_access(&token).unwrap_err();
    assert_eq!(err.kind, authgate_core::error::ErrorKind::Authentication);
}

#[test]
fn expired_refresh_token_is_rejected() {
    let (_, decoder) = codec();
    let now = Utc::now().timestamp();

    let claims = RefreshClaims {
        sub: "1".to_string(),
        role: UserRole::Customer,
        tenant: None,
        id: "5".to_string(),
        iss: "authgate".to_string(),
        iat: now - 7200,
        exp: now - 3600,
    };
    let key = EncodingKey::from_secret(b"test-refresh-secret");
    let token = encode(&Header::new(Algorithm::HS256), &claims, &key).unwrap();

    assert!(decoder.verify_refresh(&token).is_err());
}

#[test]
fn wrong_issuer_is_rejected() {
    let config = AuthConfig {
        issuer: "someone-else".to_string(),
        ..test_config()
    };
    let foreign_encoder = JwtEncoder::new(PRIVATE_PEM.as_bytes(), &config).unwrap();
    let (_, decoder) = codec();

    let token = foreign_encoder
        .sign_access(&test_user(1, UserRole::Customer, None))
        .unwrap();
    assert!(decoder.verify_access(&token).is_err());
}

#[test]
fn tampered_and_garbage_tokens_are_rejected() {
    let (encoder, decoder) = codec();
    let token = encoder
        .sign_access(&test_user(1, UserRole::Customer, None))
        .unwrap();

    let mut tampered = token.clone();
    tampered.pop();
    tampered.push('A');
    assert!(decoder.verify_access(&tampered).is_err());

    assert!(decoder.verify_access("not-a-jwt").is_err());
    assert!(decoder.verify_access("").is_err());
}

#[test]
fn refresh_token_signed_with_wrong_secret_is_rejected() {
    let config = AuthConfig {
        refresh_secret: "a-different-secret".to_string(),
        ..test_config()
    };
    let foreign_encoder = JwtEncoder::new(PRIVATE_PEM.as_bytes(), &config).unwrap();
    let (_, decoder) = codec();

    let token = foreign_encoder
        .sign_refresh(&test_user(1, UserRole::Customer, None), 1)
        .unwrap();
    assert!(decoder.verify_refresh(&token).is_err());
}

#[test]
fn invalid_key_material_is_a_configuration_error() {
    let config = test_config();
    let err = JwtEncoder::new(b"not a pem", &config).unwrap_err();
    assert_eq!(err.kind, authgate_core::error::ErrorKind::Configuration);

    let err = JwtDecoder::new(b"not a pem", &config).unwrap_err();
    assert_eq!(err.kind, authgate_core::error::ErrorKind::Configuration);
}

#[test]
fn missing_key_file_is_a_configuration_error() {
    let config = AuthConfig {
        access_private_key_path: "/nonexistent/private.pem".to_string(),
        access_public_key_path: "/nonexistent/public.pem".to_string(),
        ..test_config()
    };
    assert!(JwtEncoder::from_config(&config).is_err());
    assert!(JwtDecoder::from_config(&config).is_err());
}
