//! Wire compatibility with a standard JWT implementation, both directions.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use gatekeeper::auth::{sign, verify, PrincipalId, TokenError};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{json, Value};

const SECRET: &[u8] = b"interop-secret";

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

#[test]
fn test_issued_token_decodes_with_jsonwebtoken() {
    let token = sign(
        PrincipalId::from(42_i64).to_claims(),
        SECRET,
        Duration::from_secs(600),
    )
    .unwrap();

    let data = decode::<Value>(
        &token,
        &DecodingKey::from_secret(SECRET),
        &Validation::new(Algorithm::HS256),
    )
    .unwrap();

    assert_eq!(data.header.alg, Algorithm::HS256);
    assert_eq!(data.header.typ.as_deref(), Some("JWT"));
    assert_eq!(data.claims["principalId"], 42);
    assert_eq!(
        data.claims["exp"].as_i64().unwrap() - data.claims["iat"].as_i64().unwrap(),
        600
    );
}

#[test]
fn test_jsonwebtoken_token_verifies() {
    let now = now_secs();
    let claims = json!({"principalId": "user-9", "iat": now, "exp": now + 600});
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET),
    )
    .unwrap();

    let verified = verify(&token, SECRET).unwrap();
    assert_eq!(verified.principal(), Some(PrincipalId::from("user-9")));
    assert_eq!(verified.expires_at, now + 600);
}

#[test]
fn test_other_algorithms_do_not_verify() {
    let now = now_secs();
    let claims = json!({"principalId": 1, "iat": now, "exp": now + 600});
    let token = encode(
        &Header::new(Algorithm::HS384),
        &claims,
        &EncodingKey::from_secret(SECRET),
    )
    .unwrap();

    assert_eq!(verify(&token, SECRET), Err(TokenError::InvalidSignature));
}
