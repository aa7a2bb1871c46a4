//! Closure-producing factories
//!
//! A [`ClosureFactory`] holds a behavior parameterised over a context value and
//! stamps out [`Callback`]s that have that context bound. Each produced
//! callback owns its own copy of the context, so callbacks made from different
//! contexts never interfere with one another, and all of them outlive the
//! factory call that created them.

use crate::callback::Callback;
use std::rc::Rc;

/// Produces callbacks that capture a context value at creation time
pub struct ClosureFactory<C, T = (), R = ()> {
    name: Option<String>,
    behavior: Rc<dyn Fn(&C, &T) -> R>,
}

impl<C, T, R> ClosureFactory<C, T, R>
where
    C: 'static,
    T: 'static,
    R: 'static,
{
    /// Create a factory from a context-aware behavior
    ///
    /// # Example
    /// ```
    /// use callback_core::ClosureFactory;
    ///
    /// let greeter = ClosureFactory::new(|greeting: &String, name: &String| {
    ///     format!("{}, {}!", greeting, name)
    /// });
    ///
    /// let english = greeter.make_bound_callback("Hello".to_string());
    /// let french = greeter.make_bound_callback("Bonjour".to_string());
    ///
    /// assert_eq!(french.invoke(&"Ada".to_string()), "Bonjour, Ada!");
    /// assert_eq!(english.invoke(&"Ada".to_string()), "Hello, Ada!");
    /// ```
    pub fn new<F>(behavior: F) -> Self
    where
        F: Fn(&C, &T) -> R + 'static,
    {
        Self {
            name: None,
            behavior: Rc::new(behavior),
        }
    }

    /// Create a factory whose callbacks carry a diagnostic name
    pub fn named<F>(name: impl Into<String>, behavior: F) -> Self
    where
        F: Fn(&C, &T) -> R + 'static,
    {
        Self {
            name: Some(name.into()),
            behavior: Rc::new(behavior),
        }
    }

    /// Produce a callback with `context` bound into it
    pub fn make_bound_callback(&self, context: C) -> Callback<T, R> {
        let behavior = Rc::clone(&self.behavior);
        let callback = Callback::bind(context, move |ctx: &C, args: &T| behavior(ctx, args));

        match &self.name {
            Some(name) => {
                log::trace!("Bound new callback from factory '{}'", name);
                callback.renamed(name.as_str())
            }
            None => callback,
        }
    }
}
