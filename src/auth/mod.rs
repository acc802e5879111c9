// Authentication capability: sign in, sign out, observe the current user.

pub mod local;

pub use local::LocalAuthProvider;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("the email address is badly formatted")]
    InvalidEmail,

    #[error("password should be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("no account for {0}")]
    UserNotFound(String),

    #[error("wrong password")]
    WrongPassword,

    #[error("{0} is already registered")]
    EmailInUse(String),

    #[error("no {0} account is linked on this device")]
    ProviderNotLinked(FederatedProvider),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FederatedProvider {
    Google,
}

impl fmt::Display for FederatedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FederatedProvider::Google => write!(f, "Google"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl User {
    /// Avatar letter: first letter of the email, else `U`.
    pub fn initial(&self) -> char {
        self.email
            .as_deref()
            .or(self.display_name.as_deref())
            .and_then(|s| s.chars().next())
            .map(|c| c.to_uppercase().next().unwrap_or(c))
            .unwrap_or('U')
    }

    pub fn label(&self) -> &str {
        self.email
            .as_deref()
            .or(self.display_name.as_deref())
            .unwrap_or(&self.uid)
    }
}

/// Stream of current-user changes. Dropping it unsubscribes.
pub struct Subscription {
    rx: Receiver<Option<User>>,
}

impl Subscription {
    pub(crate) fn channel() -> (Sender<Option<User>>, Subscription) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (tx, Subscription { rx })
    }

    /// Next pending change, if any. `Some(None)` means signed out.
    pub fn try_next(&self) -> Option<Option<User>> {
        match self.rx.try_recv() {
            Ok(change) => Some(change),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Drains pending changes and returns only the most recent.
    pub fn latest(&self) -> Option<Option<User>> {
        let mut last = None;
        while let Some(change) = self.try_next() {
            last = Some(change);
        }
        last
    }
}

pub trait AuthProvider: Send {
    fn sign_in_with_password(&mut self, email: &str, password: &str) -> Result<User, AuthError>;

    fn sign_in_federated(&mut self, provider: FederatedProvider) -> Result<User, AuthError>;

    fn register(&mut self, email: &str, password: &str) -> Result<User, AuthError>;

    fn sign_out(&mut self);

    fn current_user(&self) -> Option<User>;

    /// Emits the current user immediately, then every change.
    fn subscribe(&mut self) -> Subscription;
}
