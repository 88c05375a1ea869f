use super::*;

#[test]
fn defaults_when_nothing_is_set() {
    let config = ConsoleConfig::from_values(None, None);
    assert_eq!(config, ConsoleConfig::default());
    assert_eq!(config.api_base_url, "http://localhost:8080");
    assert_eq!(config.unauthorized_policy, UnauthorizedPolicy::Global);
}

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let config = ConsoleConfig::from_values(Some("https://licenses.example.com/"), None);
    assert_eq!(config.api_base_url, "https://licenses.example.com");
}

#[test]
fn blank_base_url_falls_back_to_default() {
    let config = ConsoleConfig::from_values(Some("   "), None);
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn policy_parses_known_values() {
    assert_eq!(parse_policy(Some("protected-only")), UnauthorizedPolicy::ProtectedOnly);
    assert_eq!(parse_policy(Some("PROTECTED_ONLY")), UnauthorizedPolicy::ProtectedOnly);
    assert_eq!(parse_policy(Some("global")), UnauthorizedPolicy::Global);
}

#[test]
fn unknown_policy_falls_back_to_global() {
    assert_eq!(parse_policy(Some("sometimes")), UnauthorizedPolicy::Global);
}
