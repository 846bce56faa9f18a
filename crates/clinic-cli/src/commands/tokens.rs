//! 토큰 발급/검증 명령.
//!
//! 서버와 같은 설정(`CLINIC__AUTH__JWT_SECRET` 등)에서 서명 키를 읽습니다.

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};

use clinic_api::auth::{Claims, TokenService};
use clinic_core::{AppConfig, Role};

/// 설정 파일/환경 변수에서 토큰 서비스를 구성합니다.
pub fn token_service_from_env() -> Result<TokenService> {
    let config = AppConfig::load_from_env().context("Failed to load configuration")?;
    Ok(TokenService::from_config(&config.auth))
}

/// 토큰 발급.
pub fn issue_token(tokens: &TokenService, id: i64, email: &str, role: Role) -> Result<String> {
    Ok(tokens.issue(id, email, role)?)
}

/// 토큰 검증 결과를 출력용 문자열로 만듭니다.
///
/// 유효하지 않은 토큰은 사유 없이 `invalid`.
pub fn describe_token(tokens: &TokenService, token: &str) -> String {
    match tokens.verify(token.trim()) {
        Ok(claims) => format_claims(&claims),
        Err(_) => "invalid".to_string(),
    }
}

fn format_claims(claims: &Claims) -> String {
    let expires = Utc
        .timestamp_opt(claims.exp, 0)
        .single()
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| claims.exp.to_string());

    let json = serde_json::json!({
        "sub": claims.sub,
        "email": claims.email,
        "role": claims.role,
        "iat": claims.iat,
        "exp": claims.exp,
        "expiresAt": expires,
    });

    serde_json::to_string_pretty(&json).unwrap_or_else(|_| format!("{:?}", claims))
}
