use super::*;

// =============================================================
// AuthState defaults
// =============================================================

#[test]
fn auth_state_default_no_user() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(state.token.is_none());
}

#[test]
fn auth_state_default_is_loading_until_restored() {
    let state = AuthState::default();
    assert_eq!(state.phase, SessionPhase::Uninitialized);
    assert!(state.loading());
}

// =============================================================
// SessionPhase
// =============================================================

#[test]
fn transient_phases_are_loading() {
    assert!(SessionPhase::Restoring.is_loading());
    assert!(SessionPhase::LoggingIn.is_loading());
    assert!(SessionPhase::SigningUp.is_loading());
}

#[test]
fn settled_phases_are_not_loading() {
    assert!(!SessionPhase::Anonymous.is_loading());
    assert!(!SessionPhase::Authenticated.is_loading());
}

#[test]
fn authenticated_state_sets_user_and_token_together() {
    let state = AuthState::authenticated(User::admin("root@x.io"), "tok".to_owned());
    assert!(state.is_authenticated());
    assert_eq!(state.role(), Some(Role::Admin));
    assert!(!state.loading());
}

#[test]
fn anonymous_state_has_no_role() {
    let state = AuthState::anonymous();
    assert!(!state.is_authenticated());
    assert_eq!(state.role(), None);
}
