//! Authentication gate over the identity widget's lifecycle events.
//!
//! The widget itself is a black box; this module reduces its event stream to
//! one derived boolean ("is an admin session active") and fans transitions
//! out to subscribers. When the widget script never loaded, the gate is
//! constructed with [`AuthGate::unavailable`] and permanently reports
//! signed-out; the page then behaves as a plain read-only document.

use serde::{Deserialize, Serialize};

/// Minimal identity of the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub email: Option<String>,
}

/// Lifecycle events fired by the identity widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// Widget finished initializing; carries the restored session, if any.
    Init(Option<UserInfo>),
    Login(UserInfo),
    Logout,
}

/// Commands and queries the panel issues against the identity widget.
pub trait AuthProvider {
    /// Currently signed-in user, if the widget holds a session.
    fn current_user(&self) -> Option<UserInfo>;

    /// Show the widget's login UI.
    fn request_login(&self);

    /// End the current session.
    fn request_logout(&self);
}

type ChangeListener = Box<dyn Fn(bool)>;

/// Derived "admin session active" boolean with change subscriptions.
pub struct AuthGate {
    available: bool,
    authenticated: bool,
    listeners: Vec<ChangeListener>,
}

impl AuthGate {
    /// Gate over a live identity widget; signed-out until events say
    /// otherwise.
    pub fn new() -> Self {
        Self {
            available: true,
            authenticated: false,
            listeners: Vec::new(),
        }
    }

    /// Permanent signed-out fallback for when the widget script never
    /// loaded. Events are ignored and listeners never fire.
    pub fn unavailable() -> Self {
        tracing::warn!("identity widget not found, page stays read-only");
        Self {
            available: false,
            authenticated: false,
            listeners: Vec::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Subscribe to transitions of the derived boolean. Fires on changes
    /// only, not on every widget event.
    pub fn on_change(&mut self, listener: impl Fn(bool) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Fold a widget event into the gate. Returns whether the derived
    /// boolean changed; listeners run synchronously when it did.
    pub fn apply(&mut self, event: AuthEvent) -> bool {
        if !self.available {
            return false;
        }
        let next = match &event {
            AuthEvent::Init(user) => user.is_some(),
            AuthEvent::Login(_) => true,
            AuthEvent::Logout => false,
        };
        if next == self.authenticated {
            tracing::trace!(?event, "auth event without transition");
            return false;
        }
        self.authenticated = next;
        match &event {
            AuthEvent::Login(user) | AuthEvent::Init(Some(user)) => {
                tracing::info!(email = ?user.email, "admin session active");
            }
            _ => tracing::info!("admin session ended"),
        }
        for listener in &self.listeners {
            listener(next);
        }
        true
    }
}

impl Default for AuthGate {
    fn default() -> Self {
        Self::new()
    }
}
