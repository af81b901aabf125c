use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Opaque token for the signed-in user. Only its presence is ever inspected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrentUser(pub String);

#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<CurrentUser>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn signed_in(token: impl Into<String>) -> Self {
        Self {
            user: Some(CurrentUser(token.into())),
        }
    }

    pub fn from_token(token: Option<String>) -> Self {
        Self {
            user: token.map(CurrentUser),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }
}

/// Host hook invoked when a gated action is attempted without a user.
pub trait AuthPrompt: Send + Sync {
    fn authentication_required(&self);
}

impl<F> AuthPrompt for F
where
    F: Fn() + Send + Sync,
{
    fn authentication_required(&self) {
        self()
    }
}

/// Gate for actions that need a signed-in user (booking).
#[derive(Clone)]
pub struct AuthGate {
    session: Session,
    prompt: Arc<dyn AuthPrompt>,
}

impl AuthGate {
    pub fn new(session: Session, prompt: Arc<dyn AuthPrompt>) -> Self {
        Self { session, prompt }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns true when the action may proceed. Otherwise the prompt is
    /// fired once and false is returned.
    pub fn allow(&self, action: &str) -> bool {
        if self.session.is_authenticated() {
            return true;
        }

        tracing::warn!("Blocked '{}' for anonymous session, asking host to authenticate", action);
        self.prompt.authentication_required();
        false
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("authenticated", &self.session.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_gate(session: Session) -> (AuthGate, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let gate = AuthGate::new(session, Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        (gate, calls)
    }

    #[test]
    fn test_anonymous_session_prompts_once() {
        let (gate, calls) = counting_gate(Session::anonymous());

        assert!(!gate.allow("book"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_signed_in_session_passes_silently() {
        let (gate, calls) = counting_gate(Session::signed_in("user-1"));

        assert!(gate.allow("book"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(gate.session().user(), Some(&CurrentUser("user-1".to_string())));
    }

    #[test]
    fn test_from_token() {
        assert!(!Session::from_token(None).is_authenticated());
        assert!(Session::from_token(Some("t".into())).is_authenticated());
    }
}
