//! 비밀번호 해싱 유틸리티.
//!
//! Argon2id 기반 비밀번호 해싱 및 검증.
//! 해시는 PHC 문자열로 저장되며 솔트와 비용 파라미터를 포함하므로
//! 검증 시 별도 솔트 저장소가 필요 없습니다.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use once_cell::sync::Lazy;
use secrecy::{ExposeSecret, SecretString};

/// Argon2 메모리 비용 (KiB).
pub const MEMORY_COST_KIB: u32 = 19_456;
/// Argon2 반복 횟수.
pub const TIME_COST: u32 = 2;
/// Argon2 병렬도.
pub const PARALLELISM: u32 = 1;

/// 비밀번호 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password hashing failed")]
    HashingFailed,
    #[error("password hashing task was cancelled")]
    TaskFailed,
}

/// 존재하지 않는 이메일로 로그인할 때 검증에 사용하는 해시.
///
/// 미등록 이메일도 동일한 해시 비용을 지불하게 해 응답 시간으로 계정 존재 여부가
/// 드러나지 않도록 합니다.
static DUMMY_HASH: Lazy<String> =
    Lazy::new(|| hash_password("clinic-dummy-password-for-timing").unwrap_or_default());

/// 고정 파라미터 Argon2id 인스턴스.
fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)
        .map_err(|_| PasswordError::HashingFailed)?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// 비밀번호 해싱.
///
/// 솔트는 매 호출마다 새로 생성되므로 같은 비밀번호라도 해시가 다릅니다.
///
/// # Example
///
/// ```rust,ignore
/// let hash = hash_password("my_secure_password1").unwrap();
/// // "$argon2id$v=19$m=19456,t=2,p=1$..."
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| PasswordError::HashingFailed)?;

    Ok(hash.to_string())
}

/// 비밀번호 검증.
///
/// 해시에 포함된 솔트/파라미터로 다시 계산해 상수 시간으로 비교합니다.
/// 불일치와 잘못된 해시 형식 모두 `false`를 반환합니다.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// 결과를 버리는 더미 검증. 미등록 이메일 로그인 경로에서 사용합니다.
pub fn burn_verification(password: &str) {
    let _ = verify_password(password, &DUMMY_HASH);
}

/// [`hash_password`]를 blocking 스레드 풀에서 실행합니다.
pub async fn hash_password_blocking(password: SecretString) -> Result<SecretString, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(password.expose_secret()))
        .await
        .map_err(|_| PasswordError::TaskFailed)?
        .map(SecretString::from)
}

/// [`verify_password`]를 blocking 스레드 풀에서 실행합니다.
///
/// 작업이 실패하면 `false`를 반환합니다.
pub async fn verify_password_blocking(password: SecretString, hash: SecretString) -> bool {
    tokio::task::spawn_blocking(move || {
        verify_password(password.expose_secret(), hash.expose_secret())
    })
        .await
        .unwrap_or(false)
}

/// [`burn_verification`]을 blocking 스레드 풀에서 실행합니다.
pub async fn burn_verification_blocking(password: SecretString) {
    let _ = tokio::task::spawn_blocking(move || burn_verification(password.expose_secret())).await;
}

/// 비밀번호 강도 검증.
///
/// # 요구사항
///
/// - 최소 8자 이상
/// - 최소 1개의 숫자 포함
/// - 최소 1개의 영문자 포함
pub fn validate_password_strength(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < 8 {
        return Err("password must be at least 8 characters");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("password must contain at least one digit");
    }

    if !password.chars().any(|c| c.is_alphabetic()) {
        return Err("password must contain at least one letter");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let password = "TestPassword123!";
        let hash = hash_password(password).unwrap();

        assert!(hash.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
        assert!(verify_password(password, &hash));
        assert!(!verify_password("WrongPassword123!", &hash));
    }

    #[test]
    fn test_different_salts_same_password() {
        let hash1 = hash_password("Password1").unwrap();
        let hash2 = hash_password("Password1").unwrap();

        assert_ne!(hash1, hash2);
        assert!(verify_password("Password1", &hash1));
        assert!(verify_password("Password1", &hash2));
    }

    #[test]
    fn test_malformed_hash_fails_closed() {
        assert!(!verify_password("password", "not-a-valid-hash"));
        assert!(!verify_password("password", ""));
        assert!(!verify_password("password", "$argon2id$v=19$garbage"));
    }

    #[test]
    fn test_dummy_hash_is_valid() {
        assert!(DUMMY_HASH.starts_with("$argon2id$"));
        assert!(!verify_password("anything", &DUMMY_HASH));
    }

    #[tokio::test]
    async fn test_blocking_variants() {
        let secret = |s: &str| SecretString::from(s.to_string());

        let hash = hash_password_blocking(secret("Blocking42")).await.unwrap();
        assert!(hash.expose_secret().starts_with("$argon2id$"));
        assert!(verify_password_blocking(secret("Blocking42"), hash.clone()).await);
        assert!(!verify_password_blocking(secret("blocking42"), hash).await);
    }

    #[test]
    fn test_password_strength_validation() {
        assert!(validate_password_strength("Password1").is_ok());
        assert!(validate_password_strength("abcd1234").is_ok());

        assert!(validate_password_strength("Pass1").is_err());
        assert!(validate_password_strength("Password").is_err());
        assert!(validate_password_strength("12345678").is_err());
        assert!(validate_password_strength("").is_err());
    }

    #[test]
    fn test_unicode_password() {
        let password = "비밀번호패스워드123";
        let hash = hash_password(password).unwrap();
        assert!(verify_password(password, &hash));
        assert!(validate_password_strength(password).is_ok());
    }
}
