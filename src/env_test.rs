use super::*;
use serial_test::serial;

#[test]
fn test_get_existing_var() {
    std::env::set_var("PAYDASH_TEST_VAR", "value");
    assert_eq!(EnvVar::get("PAYDASH_TEST_VAR"), Some("value".to_string()));
    std::env::remove_var("PAYDASH_TEST_VAR");
}

#[test]
fn test_get_blank_var() {
    std::env::set_var("PAYDASH_TEST_BLANK", "  ");
    assert_eq!(EnvVar::get("PAYDASH_TEST_BLANK"), None);
    std::env::remove_var("PAYDASH_TEST_BLANK");
}

#[test]
fn test_get_nonexistent_var() {
    assert_eq!(EnvVar::get("PAYDASH_NONEXISTENT_12345"), None);
}

#[test]
#[serial]
fn test_log_level_parses_name() {
    std::env::set_var(LOG_LEVEL, "debug");
    assert_eq!(EnvVar::log_level(), log::LevelFilter::Debug);
    std::env::remove_var(LOG_LEVEL);
}

#[test]
#[serial]
fn test_log_level_defaults_to_info() {
    std::env::set_var(LOG_LEVEL, "loud");
    assert_eq!(EnvVar::log_level(), log::LevelFilter::Info);
    std::env::remove_var(LOG_LEVEL);
    assert_eq!(EnvVar::log_level(), log::LevelFilter::Info);
}
