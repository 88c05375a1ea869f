use super::*;
use crate::net::types::User;
use crate::state::auth::SessionPhase;

fn signed_in(user: User) -> AuthState {
    AuthState::authenticated(user, "tok".to_owned())
}

#[test]
fn replace_history_replaces_entry() {
    assert!(replace_history().replace);
}

#[test]
fn public_gate_follows_session_changes() {
    let owner = leptos::reactive::owner::Owner::new();
    owner.with(|| {
        let auth = RwSignal::new(AuthState::default());
        let gate = public_gate(auth);
        assert_eq!(gate.get_untracked(), GuardDecision::Loading);

        auth.set(AuthState::anonymous());
        assert_eq!(gate.get_untracked(), GuardDecision::Render);

        auth.set(signed_in(User::admin("root@x.io")));
        assert_eq!(gate.get_untracked(), GuardDecision::Redirect("/admin/dashboard"));

        auth.set(signed_in(User::customer("a@b.com", "Ann", "555")));
        assert_eq!(gate.get_untracked(), GuardDecision::Redirect("/customer/subscription"));
    });
}

#[test]
fn protected_gate_redirects_wrong_role_and_logged_out_users() {
    let owner = leptos::reactive::owner::Owner::new();
    owner.with(|| {
        let auth = RwSignal::new(signed_in(User::customer("a@b.com", "Ann", "555")));
        let admin_only = protected_gate(auth, Some(Role::Admin));
        let any_user = protected_gate(auth, None);
        assert_eq!(admin_only.get_untracked(), GuardDecision::Redirect("/unauthorized"));
        assert_eq!(any_user.get_untracked(), GuardDecision::Render);

        auth.set(AuthState::anonymous());
        assert_eq!(admin_only.get_untracked(), GuardDecision::Redirect("/login"));
        assert_eq!(any_user.get_untracked(), GuardDecision::Redirect("/login"));
    });
}

#[test]
fn protected_gate_waits_while_logging_in() {
    let owner = leptos::reactive::owner::Owner::new();
    owner.with(|| {
        let auth = RwSignal::new(AuthState::anonymous());
        let gate = protected_gate(auth, Some(Role::Customer));
        assert_eq!(gate.get_untracked(), GuardDecision::Redirect("/login"));

        auth.update(|a| a.phase = SessionPhase::LoggingIn);
        assert_eq!(gate.get_untracked(), GuardDecision::Loading);

        auth.set(signed_in(User::customer("a@b.com", "Ann", "555")));
        assert_eq!(gate.get_untracked(), GuardDecision::Render);
    });
}

#[test]
fn gates_read_the_provided_auth_signal() {
    let owner = leptos::reactive::owner::Owner::new();
    owner.with(|| {
        let auth = RwSignal::new(signed_in(User::admin("root@x.io")));
        provide_context(auth);
        let gate = protected_gate(use_auth(), Some(Role::Admin));
        assert_eq!(gate.get_untracked(), GuardDecision::Render);

        use_auth().set(AuthState::anonymous());
        assert_eq!(gate.get_untracked(), GuardDecision::Redirect("/login"));
    });
}
