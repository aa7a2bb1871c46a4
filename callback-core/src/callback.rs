//! First-class callback values
//!
//! A [`Callback`] is the single function-value type used throughout the
//! library. There is no separate "block" form: a plain closure converts into a
//! `Callback` wherever one is accepted, and every component takes callbacks as
//! explicit (possibly optional) parameters.
//!
//! The signature is fixed at creation time. A callback receives its argument
//! by reference, `()` meaning "no parameters" and a tuple meaning several.
//! Because the signature is part of the type, supplying a callback of the
//! wrong arity is rejected where the callback is accepted. Callbacks declared
//! at runtime go through [`crate::interop`], which checks arity explicitly.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A named, context-capturing unit of deferred behavior
///
/// Cloning a callback is cheap and shares the same underlying behavior,
/// including any state created with [`Callback::with_state`].
pub struct Callback<T = (), R = ()> {
    name: Option<Rc<str>>,
    body: Rc<dyn Fn(&T) -> R>,
}

impl<T, R> Callback<T, R> {
    /// Create an anonymous callback from a closure
    ///
    /// # Example
    /// ```
    /// use callback_core::Callback;
    ///
    /// let double = Callback::new(|x: &i32| x * 2);
    /// assert_eq!(double.invoke(&21), 42);
    /// ```
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&T) -> R + 'static,
    {
        Self {
            name: None,
            body: Rc::new(f),
        }
    }

    /// Create a callback carrying a diagnostic name
    pub fn named<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&T) -> R + 'static,
    {
        let name: String = name.into();
        Self {
            name: Some(Rc::from(name)),
            body: Rc::new(f),
        }
    }

    /// Create a callback with an explicit, immutable capture payload
    ///
    /// The payload is moved into the callback, so every invocation observes
    /// `context` exactly as it was at construction.
    ///
    /// # Example
    /// ```
    /// use callback_core::Callback;
    ///
    /// let greet = Callback::bind(String::from("Hello"), |greeting, name: &String| {
    ///     format!("{}, {}", greeting, name)
    /// });
    /// assert_eq!(greet.invoke(&"Ada".to_string()), "Hello, Ada");
    /// ```
    pub fn bind<C, F>(context: C, f: F) -> Self
    where
        C: 'static,
        F: Fn(&C, &T) -> R + 'static,
    {
        Self::new(move |args| f(&context, args))
    }

    /// Create a callback that owns an isolated mutable state cell
    ///
    /// The state belongs to this callback (and its clones) only; two callbacks
    /// built from the same initial value never observe each other's updates.
    ///
    /// # Panics
    /// Panics if the callback re-enters itself while already running.
    pub fn with_state<S, F>(initial: S, f: F) -> Self
    where
        S: 'static,
        F: Fn(&mut S, &T) -> R + 'static,
    {
        let state = RefCell::new(initial);
        Self::new(move |args| match state.try_borrow_mut() {
            Ok(mut state) => f(&mut *state, args),
            Err(_) => {
                let body = std::any::type_name::<F>();
                log::error!("Stateful callback {} re-entered while already running", body);
                panic!("stateful callback {} re-entered while already running", body);
            }
        })
    }

    /// Diagnostic name, if one was given
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Attach (or replace) the diagnostic name
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        let name: String = name.into();
        self.name = Some(Rc::from(name));
        self
    }

    /// Invoke the callback
    pub fn invoke(&self, args: &T) -> R {
        (self.body)(args)
    }

    /// Compose the callback with a function applied to its result
    pub fn map_output<S, G>(self, g: G) -> Callback<T, S>
    where
        T: 'static,
        R: 'static,
        G: Fn(R) -> S + 'static,
    {
        let body = self.body;
        Callback {
            name: self.name,
            body: Rc::new(move |args| g(body(args))),
        }
    }
}

impl<R> Callback<(), R> {
    /// Invoke a zero-parameter callback
    pub fn call(&self) -> R {
        self.invoke(&())
    }
}

impl<T, R> Clone for Callback<T, R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            body: Rc::clone(&self.body),
        }
    }
}

impl<T, R> fmt::Debug for Callback<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

impl<T, R, F> From<F> for Callback<T, R>
where
    F: Fn(&T) -> R + 'static,
{
    fn from(f: F) -> Self {
        Callback::new(f)
    }
}
