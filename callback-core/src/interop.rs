//! Runtime-declared callbacks and their conversion into typed callbacks
//!
//! Callbacks that come from outside the type system (configuration files,
//! scripting layers) declare their arity as data and take JSON values. They
//! are converted into typed [`Callback`]s at the API boundary; a declared
//! arity that does not match the slot being filled fails right there with
//! [`CallbackError::ArityMismatch`], never later during dispatch.

use crate::callback::Callback;
use crate::types::{CallbackError, Result};
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// A named callback over JSON arguments with a declared arity
#[derive(Clone)]
pub struct DynCallback {
    name: String,
    arity: usize,
    body: Rc<dyn Fn(&[Value]) -> Value>,
}

impl DynCallback {
    /// Create a dynamic callback
    ///
    /// `body` is only ever called with exactly `arity` arguments.
    pub fn new<F>(name: impl Into<String>, arity: usize, body: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Self {
            name: name.into(),
            arity,
            body: Rc::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared number of arguments
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Invoke with an argument list, checking it against the declared arity
    pub fn invoke(&self, args: &[Value]) -> Result<Value> {
        if args.len() != self.arity {
            return Err(CallbackError::arity(Some(&self.name), self.arity, args.len()));
        }
        Ok((self.body)(args))
    }

    /// Fail unless this callback fits a slot taking `expected` arguments
    fn expect_arity(&self, expected: usize) -> Result<()> {
        if self.arity != expected {
            log::debug!(
                "Rejecting callback '{}': declares {} argument(s), slot takes {}",
                self.name,
                self.arity,
                expected
            );
            return Err(CallbackError::arity(Some(&self.name), expected, self.arity));
        }
        Ok(())
    }

    /// Convert into a zero-parameter callback whose result is discarded
    pub fn into_action(self) -> Result<Callback> {
        Ok(self.into_supplier()?.map_output(|_| ()))
    }

    /// Convert into a zero-parameter callback
    pub fn into_supplier(self) -> Result<Callback<(), Value>> {
        self.expect_arity(0)?;
        let body = self.body;
        Ok(Callback::named(self.name, move |_: &()| body(&[])))
    }

    /// Convert into a one-parameter callback
    pub fn into_unary(self) -> Result<Callback<Value, Value>> {
        self.expect_arity(1)?;
        let body = self.body;
        Ok(Callback::named(self.name, move |arg: &Value| {
            body(std::slice::from_ref(arg))
        }))
    }

    /// Convert into a two-parameter callback
    pub fn into_binary(self) -> Result<Callback<(Value, Value), Value>> {
        self.expect_arity(2)?;
        let body = self.body;
        Ok(Callback::named(self.name, move |(a, b): &(Value, Value)| {
            body(&[a.clone(), b.clone()])
        }))
    }
}

impl fmt::Debug for DynCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynCallback")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}
