//! 클리닉 백엔드 운영 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 최초 관리자 생성
//! clinic create-user --email admin@clinic.test --password 'Admin1234' \
//!     --first-name Ada --last-name Admin --role admin
//!
//! # 비밀번호 해시 출력 (인자 대신 환경 변수 사용 가능)
//! CLINIC_USER_PASSWORD='Admin1234' clinic hash-password
//!
//! # 토큰 발급 / 검증
//! clinic issue-token --id 1 --email admin@clinic.test --role admin
//! clinic verify-token <token>
//! ```

use clap::{Parser, Subcommand};
use tracing::error;

use clinic_cli::commands::tokens::{describe_token, issue_token, token_service_from_env};
use clinic_cli::commands::users::{create_user, hash, CreateUserConfig};
use clinic_cli::commands::parse_role;
use clinic_core::{init_logging, LogConfig, LogFormat, LogTarget, Role};

#[derive(Parser)]
#[command(name = "clinic")]
#[command(about = "Clinic backend CLI - 사용자 시딩 및 토큰 도구", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 데이터베이스에 사용자 생성
    CreateUser {
        /// 로그인 이메일
        #[arg(long)]
        email: String,

        /// 비밀번호 (최소 8자, 영문자와 숫자 포함)
        #[arg(long, env = "CLINIC_USER_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        phone: Option<String>,

        /// 역할 (admin, user)
        #[arg(long, default_value = "user", value_parser = parse_role)]
        role: Role,

        /// 데이터베이스 URL (기본: DATABASE_URL 환경변수)
        #[arg(long)]
        db_url: Option<String>,
    },

    /// 비밀번호 해시(PHC 문자열) 출력
    HashPassword {
        /// 평문 비밀번호
        #[arg(long, env = "CLINIC_USER_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// 설정된 서명 키로 토큰 발급
    IssueToken {
        #[arg(long)]
        id: i64,

        #[arg(long)]
        email: String,

        /// 역할 (admin, user)
        #[arg(long, value_parser = parse_role)]
        role: Role,
    },

    /// 토큰 검증 후 클레임 출력
    VerifyToken {
        token: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    init_logging(
        LogConfig::new("warn")
            .with_format(LogFormat::Compact)
            .with_target(LogTarget::Stderr),
    )?;

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateUser {
            email,
            password,
            first_name,
            last_name,
            phone,
            role,
            db_url,
        } => {
            let config = CreateUserConfig {
                email,
                password: password.into(),
                first_name,
                last_name,
                phone,
                role,
                db_url,
            };

            match create_user(config).await {
                Ok(user) => {
                    println!(
                        "사용자 생성 완료: id={} email={} role={}",
                        user.id, user.email, user.role
                    );
                }
                Err(e) => {
                    error!("Create user failed: {:#}", e);
                    return Err(e);
                }
            }
        }

        Commands::HashPassword { password } => {
            println!("{}", hash(&password.into())?);
        }

        Commands::IssueToken { id, email, role } => {
            let tokens = token_service_from_env()?;
            println!("{}", issue_token(&tokens, id, &email, role)?);
        }

        Commands::VerifyToken { token } => {
            let tokens = token_service_from_env()?;
            let output = describe_token(&tokens, &token);
            let valid = output != "invalid";
            println!("{}", output);
            if !valid {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_takes_flag_not_positional() {
        let cli = Cli::try_parse_from(["clinic", "hash-password", "--password", "Operator99"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::HashPassword { ref password } if password == "Operator99"
        ));

        assert!(Cli::try_parse_from(["clinic", "hash-password", "Operator99"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
