//! 요청 검증용 커스텀 validator 함수.

use chrono::{Months, NaiveDate, Utc};
use secrecy::{ExposeSecret, SecretString};
use validator::ValidationError;

use crate::auth::validate_password_strength;

/// 생년월일 허용 범위 (년).
pub const MAX_AGE_YEARS: u32 = 120;

/// 전화번호 최대 길이. `phone`/`phone_number` 컬럼은 `VARCHAR(32)`.
pub const MAX_PHONE_LEN: usize = 32;

pub(crate) fn validate_password(value: &SecretString) -> Result<(), ValidationError> {
    validate_password_strength(value.expose_secret())
        .map_err(|reason| ValidationError::new("weak_password").with_message(reason.into()))
}

/// `[+]?[숫자 공백 - ( )]+` 형식, 최대 [`MAX_PHONE_LEN`]자의 전화번호.
pub(crate) fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > MAX_PHONE_LEN {
        let message = format!("Phone number must be at most {} characters", MAX_PHONE_LEN);
        return Err(ValidationError::new("phone_too_long").with_message(message.into()));
    }

    let body = value.strip_prefix('+').unwrap_or(value);
    let valid = !body.is_empty()
        && body
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'));

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_phone").with_message(
            "Phone number may only contain digits, spaces, dashes and parentheses".into(),
        ))
    }
}

pub(crate) fn validate_dob(value: &NaiveDate) -> Result<(), ValidationError> {
    validate_dob_at(value, Utc::now().date_naive())
}

/// 생년월일은 미래일 수 없고 [`MAX_AGE_YEARS`]년 이전일 수 없습니다.
pub(crate) fn validate_dob_at(value: &NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    if *value > today {
        return Err(ValidationError::new("dob_in_future")
            .with_message("Date of birth cannot be in the future".into()));
    }

    let earliest = today
        .checked_sub_months(Months::new(MAX_AGE_YEARS * 12))
        .unwrap_or(NaiveDate::MIN);
    if *value < earliest {
        return Err(ValidationError::new("dob_too_old")
            .with_message("Date of birth is too far in the past".into()));
    }

    Ok(())
}
