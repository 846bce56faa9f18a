//! JWT 토큰 발급 및 검증.
//!
//! [`TokenService`]는 생성 시 주입된 서명 키와 TTL만 사용합니다.
//! 만료 검사는 라이브러리 leeway 없이 `exp > now`로 직접 수행하며,
//! 시계를 인자로 받는 `*_at` 변형을 함께 제공합니다.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::debug;

use clinic_core::{AuthConfig, Role};

/// JWT Access Token 페이로드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 ID
    pub sub: i64,
    /// 사용자 이메일
    pub email: String,
    /// 발급 시점의 사용자 역할
    pub role: Role,
    /// Issued At (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// 주어진 시각에 만료되었는지 확인.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }
}

/// 토큰 발급 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("token encoding failed: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
    #[error("token expiry overflows (iat={iat}, ttl={ttl_secs})")]
    ExpiryOverflow { iat: i64, ttl_secs: i64 },
}

/// 토큰 검증 실패.
///
/// 서명 불일치, 형식 오류, 만료를 구분하지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid token")]
pub struct InvalidToken;

/// 토큰 발급/검증 서비스.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &Algorithm::HS256)
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// 서명 키와 TTL(초)로 생성.
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // 만료는 verify_at에서 직접 검사
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs,
        }
    }

    /// 인증 설정에서 생성.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.jwt_secret.expose_secret(), config.token_ttl_secs)
    }

    /// Access Token 유효 기간 (초).
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// 현재 시각 기준으로 토큰 발급.
    pub fn issue(&self, user_id: i64, email: &str, role: Role) -> Result<String, JwtError> {
        self.issue_at(user_id, email, role, Utc::now().timestamp())
    }

    /// 주어진 시각(`iat`) 기준으로 토큰 발급. `exp = iat + TTL`.
    pub fn issue_at(
        &self,
        user_id: i64,
        email: &str,
        role: Role,
        now: i64,
    ) -> Result<String, JwtError> {
        let exp = now
            .checked_add(self.ttl_secs)
            .ok_or(JwtError::ExpiryOverflow {
                iat: now,
                ttl_secs: self.ttl_secs,
            })?;

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            role,
            iat: now,
            exp,
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    /// 현재 시각 기준으로 토큰 검증.
    pub fn verify(&self, token: &str) -> Result<Claims, InvalidToken> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// 주어진 시각 기준으로 토큰 검증.
    ///
    /// 서명과 `exp > now`를 확인합니다. 실패 원인은 debug 로그에만 남깁니다.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, InvalidToken> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!(reason = ?e.kind(), "token rejected");
            InvalidToken
        })?;

        if data.claims.is_expired_at(now) {
            debug!(sub = data.claims.sub, exp = data.claims.exp, "token rejected: expired");
            return Err(InvalidToken);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";
    const TTL: i64 = 3600;

    fn service() -> TokenService {
        TokenService::new(TEST_SECRET, TTL)
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let tokens = service();
        let token = tokens.issue(42, "doctor@clinic.test", Role::Admin).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "doctor@clinic.test");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp - claims.iat, TTL);
    }

    #[test]
    fn test_expiry_boundary() {
        let tokens = service();
        let now = 1_700_000_000;
        let token = tokens.issue_at(1, "a@b.c", Role::User, now).unwrap();

        assert!(tokens.verify_at(&token, now + TTL - 1).is_ok());
        assert_eq!(tokens.verify_at(&token, now + TTL), Err(InvalidToken));
        assert_eq!(tokens.verify_at(&token, now + TTL + 1), Err(InvalidToken));
    }

    #[test]
    fn test_issue_is_deterministic_for_same_time() {
        let tokens = service();
        let a = tokens.issue_at(5, "x@y.z", Role::User, 1_000).unwrap();
        let b = tokens.issue_at(5, "x@y.z", Role::User, 1_000).unwrap();
        let c = tokens.issue_at(5, "x@y.z", Role::User, 1_001).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().issue(1, "a@b.c", Role::User).unwrap();
        let other = TokenService::new("wrong-secret-key-for-testing-minimum-32-chars", TTL);

        assert_eq!(other.verify(&token), Err(InvalidToken));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let tokens = service();
        assert_eq!(tokens.verify("invalid.token.here"), Err(InvalidToken));
        assert_eq!(tokens.verify(""), Err(InvalidToken));
        assert_eq!(tokens.verify("not-a-jwt"), Err(InvalidToken));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let tokens = service();
        let token = tokens.issue(1, "a@b.c", Role::User).unwrap();
        let admin = tokens.issue(1, "a@b.c", Role::Admin).unwrap();

        // user 토큰의 서명에 admin 페이로드를 붙이면 서명 불일치
        let user_parts: Vec<&str> = token.split('.').collect();
        let admin_parts: Vec<&str> = admin.split('.').collect();
        let forged = format!("{}.{}.{}", user_parts[0], admin_parts[1], user_parts[2]);

        assert_eq!(tokens.verify(&forged), Err(InvalidToken));
    }

    #[test]
    fn test_expiry_overflow_is_error() {
        let tokens = TokenService::new(TEST_SECRET, i64::MAX);
        let err = tokens.issue_at(1, "a@b.c", Role::User, 1_700_000_000).unwrap_err();
        assert!(matches!(err, JwtError::ExpiryOverflow { .. }));
    }

    #[test]
    fn test_from_config_uses_configured_secret() {
        let config = AuthConfig {
            jwt_secret: TEST_SECRET.to_string().into(),
            token_ttl_secs: 120,
        };
        let tokens = TokenService::from_config(&config);
        assert_eq!(tokens.ttl_secs(), 120);

        let token = tokens.issue(9, "a@b.c", Role::User).unwrap();
        assert_eq!(service().verify(&token).unwrap().sub, 9);
    }

    #[test]
    fn test_debug_hides_keys() {
        let debug = format!("{:?}", service());
        assert!(!debug.contains(TEST_SECRET));
        assert!(debug.contains("ttl_secs"));
    }
}
