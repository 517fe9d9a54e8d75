use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

#[test]
fn constant_names() {
    assert_eq!(constant_name("Starting job"), "CONST_STARTING_JOB");
    assert_eq!(constant_name("a--b  c!"), "CONST_A_B_C_");
    assert_eq!(constant_name("user: %s"), "CONST_USER_S");
    assert_eq!(constant_name(""), "CONST_");
    assert_eq!(constant_name("42 items"), "CONST_42_ITEMS");
}

#[test]
fn constant_name_is_truncated() {
    let long = "x".repeat(80);
    assert_eq!(constant_name(&long), format!("CONST_{}", "X".repeat(50)));
}

#[test]
fn env_var_names() {
    assert_eq!(env_var_name("dbPassword"), "DB_PASSWORD");
    assert_eq!(env_var_name("API_KEY"), "API_KEY");
    assert_eq!(env_var_name("apiKEYValue"), "API_KEY_VALUE");
    assert_eq!(env_var_name("secret2Key"), "SECRET2_KEY");
    assert_eq!(env_var_name("client_secret"), "CLIENT_SECRET");
    assert_eq!(env_var_name("password"), "PASSWORD");
}

#[test]
fn first_free_appends_suffix() {
    let taken = ["CONST_A", "CONST_A_2"];
    assert_eq!(first_free("CONST_A", |n| taken.contains(&n)), "CONST_A_3");
    assert_eq!(first_free("CONST_B", |n| taken.contains(&n)), "CONST_B");
}

proptest! {
    #[test]
    fn constant_name_is_a_java_identifier(value in ".{0,120}") {
        let name = constant_name(&value);
        prop_assert!(name.starts_with(CONSTANT_PREFIX));
        prop_assert!(name.len() <= CONSTANT_PREFIX.len() + MAX_STEM_LEN);
        prop_assert!(name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'));
        prop_assert!(!name.contains("__"));
    }

    #[test]
    fn constant_name_is_stable(value in "[ -~]{0,60}") {
        prop_assert_eq!(constant_name(&value), constant_name(&value));
    }

    #[test]
    fn env_var_name_is_screaming_snake(ident in "[a-zA-Z][a-zA-Z0-9_]{0,30}") {
        let name = env_var_name(&ident);
        prop_assert!(name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'));
        prop_assert!(!name.ends_with('_'));
    }
}
