//! Gated actions with success/error continuations
//!
//! A [`GatedAction`] evaluates an authentication predicate and dispatches to
//! one of two callbacks. Both continuations are independent, optional slots:
//! a caller may supply an error handler without a custom success handler and
//! vice versa. When the predicate rejects the credentials and no error
//! handler is present, the failure surfaces as
//! [`CallbackError::Authentication`].
//!
//! The predicate itself is pluggable through [`Authenticator`]; this module
//! does not implement any authentication scheme beyond the in-memory
//! [`CredentialTable`].

use crate::callback::Callback;
use crate::types::{CallbackError, Outcome, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Predicate deciding whether an identity/credential pair is accepted
pub trait Authenticator {
    fn authenticate(&self, identity: &str, credential: &str) -> bool;
}

impl<F> Authenticator for F
where
    F: Fn(&str, &str) -> bool,
{
    fn authenticate(&self, identity: &str, credential: &str) -> bool {
        self(identity, credential)
    }
}

/// Map-backed authenticator (identity -> credential)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialTable {
    accounts: HashMap<String, String>,
}

impl CredentialTable {
    /// Create an empty table (rejects everyone)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: add or replace an account
    pub fn with_account(mut self, identity: impl Into<String>, credential: impl Into<String>) -> Self {
        self.insert(identity, credential);
        self
    }

    /// Add or replace an account
    pub fn insert(&mut self, identity: impl Into<String>, credential: impl Into<String>) {
        self.accounts.insert(identity.into(), credential.into());
    }

    /// Number of known accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Authenticator for CredentialTable {
    fn authenticate(&self, identity: &str, credential: &str) -> bool {
        let accepted = self
            .accounts
            .get(identity)
            .is_some_and(|expected| expected == credential);
        log::debug!("Credential check for '{}': {}", identity, if accepted { "accepted" } else { "rejected" });
        accepted
    }
}

/// A transient action guarded by an authentication predicate
///
/// Built per request and consumed by [`GatedAction::execute`].
///
/// # Example
/// ```
/// use callback_core::{CallbackError, GatedAction, Outcome};
///
/// let only_admin = |id: &str, cred: &str| id == "admin" && cred == "hunter2";
///
/// let outcome = GatedAction::new(&only_admin)
///     .on_success(|_: &()| println!("Welcome"))
///     .execute("admin", "hunter2")
///     .unwrap();
/// assert_eq!(outcome, Outcome::Success);
///
/// let denied = GatedAction::new(&only_admin).execute("guest", "guest");
/// assert!(matches!(denied, Err(CallbackError::Authentication { .. })));
/// ```
pub struct GatedAction<'a> {
    predicate: &'a dyn Authenticator,
    on_success: Option<Callback>,
    on_error: Option<Callback>,
}

impl<'a> GatedAction<'a> {
    /// Create a gated action with no continuations attached
    pub fn new(predicate: &'a dyn Authenticator) -> Self {
        Self {
            predicate,
            on_success: None,
            on_error: None,
        }
    }

    /// Builder method: set the success continuation
    pub fn on_success(mut self, callback: impl Into<Callback>) -> Self {
        self.on_success = Some(callback.into());
        self
    }

    /// Builder method: set the error continuation
    pub fn on_error(mut self, callback: impl Into<Callback>) -> Self {
        self.on_error = Some(callback.into());
        self
    }

    /// Builder method: set or clear both continuations at once
    pub fn with_handlers(mut self, on_success: Option<Callback>, on_error: Option<Callback>) -> Self {
        self.on_success = on_success;
        self.on_error = on_error;
        self
    }

    /// True if an error continuation is attached
    pub fn has_error_handler(&self) -> bool {
        self.on_error.is_some()
    }

    /// Run the predicate once and dispatch to the matching continuation
    ///
    /// # Returns
    /// * `Ok(Outcome::Success)` - the predicate accepted; the success callback (if any) ran once
    /// * `Ok(Outcome::Handled)` - the predicate rejected; the error callback ran once
    /// * `Err(CallbackError::Authentication)` - the predicate rejected and no error callback was set
    pub fn execute(self, identity: &str, credential: &str) -> Result<Outcome> {
        if self.predicate.authenticate(identity, credential) {
            match &self.on_success {
                Some(callback) => {
                    log::debug!("Access granted to '{}', dispatching {:?}", identity, callback);
                    callback.call();
                }
                None => log::debug!("Access granted to '{}', no success callback", identity),
            }
            return Ok(Outcome::Success);
        }

        match &self.on_error {
            Some(callback) => {
                log::debug!("Access denied to '{}', dispatching {:?}", identity, callback);
                callback.call();
                Ok(Outcome::Handled)
            }
            None => {
                log::warn!("Access denied to '{}' and no error callback supplied", identity);
                Err(CallbackError::Authentication {
                    identity: identity.to_string(),
                })
            }
        }
    }
}
