//! Mock authentication with a persisted session.
//!
//! [`AuthService`] moves between [`AuthState::Anonymous`] and
//! [`AuthState::Authenticated`]. Every change is pushed to the listeners
//! registered through [`AuthService::subscribe`], which also receive the state
//! current at the time they subscribe.

pub mod error;
pub mod listeners;

use {
    crate::{
        auth::{
            error::AuthError,
            listeners::{Listeners, Subscription},
        },
        config::AuthConfig,
        latency::{Delay, Latency},
        metrics::{SIGN_IN_FAILURES_TOTAL, SIGN_IN_TIME_SECONDS, SIGN_INS_TOTAL},
        models::Principal,
        session::SessionStore,
    },
    std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock},
    tracing::{debug, info, warn},
};

const PRINCIPAL_ID: &str = "mock-user-1";
const AVATAR_URL: &str = "https://ui-avatars.com/api/?name=Admin+User&background=3B82F6&color=fff";
const FEDERATED_EMAIL: &str = "admin.google@wafr.com";
const FEDERATED_PROVIDER: &str = "google.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated(Principal),
}

impl AuthState {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            AuthState::Anonymous => None,
            AuthState::Authenticated(principal) => Some(principal),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }
}

fn credential_principal(email: &str) -> Principal {
    Principal {
        id: PRINCIPAL_ID.to_string(),
        email: email.to_string(),
        display_name: "Admin User".to_string(),
        avatar_url: Some(AVATAR_URL.to_string()),
        provider: None,
    }
}

fn federated_principal() -> Principal {
    Principal {
        id: PRINCIPAL_ID.to_string(),
        email: FEDERATED_EMAIL.to_string(),
        display_name: "Admin Google User".to_string(),
        avatar_url: Some(AVATAR_URL.to_string()),
        provider: Some(FEDERATED_PROVIDER.to_string()),
    }
}

pub struct AuthService {
    credentials: AuthConfig,
    session: SessionStore,
    delay: Arc<dyn Delay>,
    latency: Latency,
    state: RwLock<AuthState>,
    // Serializes transitions and subscriptions so each listener sees every
    // change exactly once and in order.
    transitions: Mutex<()>,
    listeners: Arc<Listeners>,
}

impl AuthService {
    /// Builds the service, restoring a persisted session if one is flagged.
    ///
    /// A flagged session whose principal cannot be read comes back as the
    /// canonical credential principal.
    pub fn new(
        credentials: AuthConfig,
        session: SessionStore,
        delay: Arc<dyn Delay>,
        latency: Latency,
    ) -> Self {
        let state = if session.is_authenticated() {
            let principal = session
                .get()
                .unwrap_or_else(|| credential_principal(&credentials.email));
            info!("Restored session for {}", principal.email);
            AuthState::Authenticated(principal)
        } else {
            AuthState::Anonymous
        };

        AuthService {
            credentials,
            session,
            delay,
            latency,
            state: RwLock::new(state),
            transitions: Mutex::new(()),
            listeners: Arc::new(Listeners::default()),
        }
    }

    pub fn current(&self) -> AuthState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn current_principal(&self) -> Option<Principal> {
        self.current().principal().cloned()
    }

    /// Gate for everything behind sign-in.
    pub fn require_principal(&self) -> Result<Principal, AuthError> {
        self.current_principal().ok_or(AuthError::NotSignedIn)
    }

    pub async fn sign_in_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Principal, AuthError> {
        debug!("Attempting sign-in for {}", email);

        let accepted = crate::measure!(SIGN_IN_TIME_SECONDS, {
            self.delay.pause(self.latency.sign_in).await;
            email == self.credentials.email && password == self.credentials.password
        });

        if !accepted {
            SIGN_IN_FAILURES_TOTAL.inc();
            warn!("Rejected sign-in for {}", email);
            return Err(AuthError::InvalidCredentials);
        }

        let principal = credential_principal(email);
        self.transition(AuthState::Authenticated(principal.clone()));

        SIGN_INS_TOTAL.inc();
        info!("Signed in {}", principal.email);
        Ok(principal)
    }

    /// Federated sign-in always succeeds.
    pub async fn sign_in_federated(&self) -> Principal {
        debug!("Attempting federated sign-in");

        crate::measure!(SIGN_IN_TIME_SECONDS, {
            self.delay.pause(self.latency.sign_in_federated).await;
        });

        let principal = federated_principal();
        self.transition(AuthState::Authenticated(principal.clone()));

        SIGN_INS_TOTAL.inc();
        info!("Signed in {} via {}", principal.email, FEDERATED_PROVIDER);
        principal
    }

    /// Ends the session. Signing out while anonymous is a no-op for listeners.
    pub async fn sign_out(&self) {
        self.delay.pause(self.latency.sign_out).await;

        if self.transition(AuthState::Anonymous) {
            info!("Signed out");
        }
    }

    /// Registers `listener`, calls it right away with the current state, then
    /// again after every transition until the returned handle is dropped.
    ///
    /// Listeners run synchronously on the task performing the transition and
    /// must not call `subscribe` themselves.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&AuthState) + Send + Sync + 'static,
    {
        let _gate = self.lock_transitions();

        let listener = Arc::new(listener);
        let subscription = self.listeners.add(listener.clone());
        listener(&self.current());
        subscription
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Persists `next` and makes it current. Returns whether the state
    /// actually changed.
    ///
    /// The session write happens under the same gate as the state change, so
    /// the stored session always matches the last transition.
    fn transition(&self, next: AuthState) -> bool {
        let _gate = self.lock_transitions();

        match &next {
            AuthState::Authenticated(principal) => self.session.set(principal),
            AuthState::Anonymous => self.session.clear(),
        }

        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            if *state == next {
                return false;
            }
            *state = next.clone();
        }

        self.listeners.notify(&next);
        true
    }

    fn lock_transitions(&self) -> MutexGuard<'_, ()> {
        self.transitions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
