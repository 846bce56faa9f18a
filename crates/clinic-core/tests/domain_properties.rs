//! 도메인 타입 속성 테스트

use clinic_core::{normalize_email, Role};
use proptest::prelude::*;

proptest! {
    #[test]
    fn normalize_email_is_idempotent(email in "[ ]{0,2}[A-Za-z0-9._%+-]{1,16}@[A-Za-z0-9-]{1,12}\\.[A-Za-z]{2,6}[ ]{0,2}") {
        let once = normalize_email(&email);
        prop_assert_eq!(normalize_email(&once), once.clone());
        prop_assert_eq!(once.trim(), once.as_str());
        prop_assert_eq!(once.to_lowercase(), once);
    }

    #[test]
    fn role_parse_accepts_any_case(upper in proptest::collection::vec(any::<bool>(), 5)) {
        let name: String = "admin"
            .chars()
            .zip(upper)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
            .collect();
        prop_assert_eq!(Role::parse(&name), Some(Role::Admin));
    }

    #[test]
    fn unknown_role_names_are_rejected(name in "[a-z]{1,10}") {
        prop_assume!(name != "admin" && name != "user");
        prop_assert_eq!(Role::parse(&name), None);
    }
}
