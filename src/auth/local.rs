use crate::auth::{AuthError, AuthProvider, FederatedProvider, Subscription, User};
use crate::engine::config::AuthConfig;
use crossbeam_channel::Sender;
use std::collections::HashMap;

pub const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    uid: String,
    password: String,
}

/// Accounts held in memory for the lifetime of the process.
#[derive(Default)]
pub struct LocalAuthProvider {
    /// Keyed by lowercased email
    accounts: HashMap<String, Account>,
    linked: HashMap<FederatedProvider, User>,
    current: Option<User>,
    subscribers: Vec<Sender<Option<User>>>,
    next_uid: u64,
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

impl LocalAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider with the Google identity from `[auth]` linked, if any.
    pub fn from_config(config: &AuthConfig) -> Self {
        let provider = Self::new();
        match config.google_email.as_deref().map(str::trim) {
            Some(email) if is_valid_email(email) => {
                let name = config
                    .google_name
                    .clone()
                    .unwrap_or_else(|| email.split('@').next().unwrap_or(email).to_string());
                log::info!("google sign-in linked to {}", email);
                provider.link(FederatedProvider::Google, email, &name)
            }
            Some(email) => {
                log::warn!("ignoring invalid google_email {:?}", email);
                provider
            }
            None => provider,
        }
    }

    /// Pre-registers an account.
    pub fn with_account(mut self, email: &str, password: &str) -> Result<Self, AuthError> {
        self.create_account(email, password)?;
        Ok(self)
    }

    /// Makes federated sign-in with `provider` succeed as `email`.
    pub fn link(mut self, provider: FederatedProvider, email: &str, display_name: &str) -> Self {
        let uid = self.allocate_uid();
        self.linked.insert(
            provider,
            User {
                uid,
                email: Some(email.to_string()),
                display_name: Some(display_name.to_string()),
            },
        );
        self
    }

    fn allocate_uid(&mut self) -> String {
        self.next_uid += 1;
        format!("local-{}", self.next_uid)
    }

    fn create_account(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(AuthError::InvalidEmail);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword {
                min: MIN_PASSWORD_LEN,
            });
        }
        let key = email.to_lowercase();
        if self.accounts.contains_key(&key) {
            return Err(AuthError::EmailInUse(email.to_string()));
        }

        let uid = self.allocate_uid();
        self.accounts.insert(
            key,
            Account {
                uid: uid.clone(),
                password: password.to_string(),
            },
        );
        Ok(User {
            uid,
            email: Some(email.to_string()),
            display_name: None,
        })
    }

    fn set_current(&mut self, user: Option<User>) {
        if self.current == user {
            return;
        }
        self.current = user;
        let current = self.current.clone();
        self.subscribers
            .retain(|tx| tx.send(current.clone()).is_ok());
    }
}

impl AuthProvider for LocalAuthProvider {
    fn sign_in_with_password(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(AuthError::InvalidEmail);
        }
        let account = self
            .accounts
            .get(&email.to_lowercase())
            .ok_or_else(|| AuthError::UserNotFound(email.to_string()))?;
        if account.password != password {
            log::warn!("failed sign-in for {}", email);
            return Err(AuthError::WrongPassword);
        }

        let user = User {
            uid: account.uid.clone(),
            email: Some(email.to_string()),
            display_name: None,
        };
        log::info!("signed in {}", email);
        self.set_current(Some(user.clone()));
        Ok(user)
    }

    fn sign_in_federated(&mut self, provider: FederatedProvider) -> Result<User, AuthError> {
        let user = self
            .linked
            .get(&provider)
            .cloned()
            .ok_or(AuthError::ProviderNotLinked(provider))?;
        log::info!("signed in {} via {}", user.label(), provider);
        self.set_current(Some(user.clone()));
        Ok(user)
    }

    fn register(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self.create_account(email, password)?;
        log::info!("registered {}", user.label());
        self.set_current(Some(user.clone()));
        Ok(user)
    }

    fn sign_out(&mut self) {
        if let Some(user) = &self.current {
            log::info!("signed out {}", user.label());
        }
        self.set_current(None);
    }

    fn current_user(&self) -> Option<User> {
        self.current.clone()
    }

    fn subscribe(&mut self) -> Subscription {
        let (tx, subscription) = Subscription::channel();
        if tx.send(self.current.clone()).is_ok() {
            self.subscribers.push(tx);
        }
        subscription
    }
}
