use std::sync::RwLock;

/// Explicit per-application session state shared by all commands.
///
/// Created once at application start, mutated on login/logout and language
/// change. The session token is attached to every outgoing request.
#[derive(Debug, Default)]
pub struct ClientContext {
    state: RwLock<SessionState>,
}

#[derive(Debug, Default, Clone)]
struct SessionState {
    token: Option<String>,
    locale: Option<String>,
}

impl ClientContext {
    pub fn new() -> Self {
        ClientContext::default()
    }

    pub fn login(&self, token: impl Into<String>) {
        self.state.write().unwrap().token = Some(token.into());
    }

    pub fn logout(&self) {
        let mut state = self.state.write().unwrap();
        state.token = None;
    }

    pub fn session_token(&self) -> Option<String> {
        self.state.read().unwrap().token.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session_token().is_some()
    }

    pub fn set_locale(&self, locale: impl Into<String>) {
        self.state.write().unwrap().locale = Some(locale.into());
    }

    pub fn locale(&self) -> Option<String> {
        self.state.read().unwrap().locale.clone()
    }
}
