use api::auth::{AuthConfig, JwtService};
use uuid::Uuid;

fn test_config(secret: &str) -> AuthConfig {
    AuthConfig {
        jwt_secret: secret.to_string(),
        access_token_expiration_minutes: 60,
        google_client_id: String::new(),
        google_client_secret: String::new(),
        kakao_client_id: String::new(),
        kakao_client_secret: String::new(),
        redirect_base_url: "http://localhost:8080".to_string(),
    }
}

#[test]
fn token_round_trips_claims() {
    let service = JwtService::new(&test_config("test-secret-for-round-trip"));
    let user_id = Uuid::new_v4();

    let token = service
        .create_token(user_id, "member@club.test".to_string(), 3)
        .unwrap();
    let claims = service.verify_token(&token).unwrap();

    assert_eq!(claims.user_id().unwrap(), user_id);
    assert_eq!(claims.email, "member@club.test");
    assert_eq!(claims.level, 3);
    assert!(claims.exp > claims.iat);
}

#[test]
fn token_from_another_secret_is_rejected() {
    let issuer = JwtService::new(&test_config("secret-one"));
    let verifier = JwtService::new(&test_config("secret-two"));

    let token = issuer
        .create_token(Uuid::new_v4(), "member@club.test".to_string(), 1)
        .unwrap();

    assert!(verifier.verify_token(&token).is_err());
}

#[test]
fn tampered_token_is_rejected() {
    let service = JwtService::new(&test_config("tamper-test-secret"));

    let token = service
        .create_token(Uuid::new_v4(), "member@club.test".to_string(), 1)
        .unwrap();

    // Flip a character in the payload segment.
    let mut chars: Vec<char> = token.chars().collect();
    let mid = chars.len() / 2;
    chars[mid] = if chars[mid] == 'a' { 'b' } else { 'a' };
    let tampered: String = chars.into_iter().collect();

    assert!(service.verify_token(&tampered).is_err());
}

#[test]
fn garbage_token_is_rejected() {
    let service = JwtService::new(&test_config("garbage-test-secret"));
    assert!(service.verify_token("not-a-jwt").is_err());
}
