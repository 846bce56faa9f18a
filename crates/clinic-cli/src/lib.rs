//! 클리닉 백엔드 운영 CLI.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 데이터베이스에 사용자 생성 (최초 관리자 시딩)
//! - 비밀번호 해시 생성
//! - 토큰 발급 및 검증

pub mod commands;
