//! Iteration delegation
//!
//! An [`IterationDelegate`] owns no data. It borrows a sequence from the type
//! that owns it and forwards traversal and transformation to caller-supplied
//! callbacks. Collection-owning types implement [`Delegating`] once instead of
//! re-implementing traversal logic each time.
//!
//! The delegate re-borrows its owner on every call, so mutations made to the
//! owner between calls are visible to the next traversal. While a traversal
//! runs, the shared borrow prevents the owner from being mutated.
//!
//! A transform is either a concrete [`Callback`] or a [`Symbol`] naming one
//! attribute to look up on each element through [`Attributes`]. Symbols are
//! resolved lazily, per element, and a failure aborts the traversal.

use crate::callback::Callback;
use crate::types::{CallbackError, Result};
use serde_json::Value;
use std::fmt;

/// Name of a single attribute/method to resolve on each element
///
/// The name is never split: `user.name` is looked up as one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Symbol(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Symbol(name)
    }
}

/// Elements that expose named attributes of type `V`
pub trait Attributes<V> {
    /// Look up one attribute by name, `None` if the element does not expose it
    fn attribute(&self, name: &str) -> Option<V>;
}

/// JSON objects expose their top-level keys
impl Attributes<Value> for Value {
    fn attribute(&self, name: &str) -> Option<Value> {
        self.as_object()?.get(name).cloned()
    }
}

/// Per-element transform: a concrete callback or a symbolic shortcut
///
/// The attribute lookup is bound when the symbolic form is built, so the
/// callback form places no requirement on the element type.
#[derive(Debug, Clone)]
pub enum Transform<T, U> {
    /// Invoke the callback on each element
    Apply(Callback<T, U>),
    /// Resolve the named attribute on each element
    Attribute {
        symbol: Symbol,
        resolve: Callback<T, Option<U>>,
    },
}

impl<T, U> Transform<T, U> {
    /// Shortcut constructor for [`Transform::Attribute`]
    pub fn attribute(name: impl Into<Symbol>) -> Self
    where
        T: Attributes<U>,
    {
        let symbol = name.into();
        let lookup = symbol.clone();
        Transform::Attribute {
            symbol,
            resolve: Callback::new(move |item: &T| item.attribute(lookup.as_str())),
        }
    }

    /// The symbol of a symbolic transform
    pub fn symbol(&self) -> Option<&Symbol> {
        match self {
            Transform::Apply(_) => None,
            Transform::Attribute { symbol, .. } => Some(symbol),
        }
    }

    /// Apply the transform to the element at `index`
    pub fn apply(&self, item: &T, index: usize) -> Result<U> {
        match self {
            Transform::Apply(callback) => Ok(callback.invoke(item)),
            Transform::Attribute { symbol, resolve } => {
                resolve.invoke(item).ok_or_else(|| CallbackError::UnresolvedName {
                    name: symbol.as_str().to_string(),
                    index,
                })
            }
        }
    }
}

impl<T, U> From<Callback<T, U>> for Transform<T, U> {
    fn from(callback: Callback<T, U>) -> Self {
        Transform::Apply(callback)
    }
}

impl<T: Attributes<U>, U> From<Symbol> for Transform<T, U> {
    fn from(symbol: Symbol) -> Self {
        Transform::attribute(symbol)
    }
}

/// Types that own a sequence and hand out a delegate over it
pub trait Delegating {
    type Item;

    fn delegate(&self) -> IterationDelegate<'_, Self::Item>;
}

/// Forwards traversal requests to a borrowed sequence
#[derive(Debug)]
pub struct IterationDelegate<'a, T> {
    source: &'a [T],
}

impl<'a, T> Clone for IterationDelegate<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for IterationDelegate<'a, T> {}

impl<'a, T> IterationDelegate<'a, T> {
    /// Create a delegate over a borrowed sequence
    pub fn new(source: &'a [T]) -> Self {
        Self { source }
    }

    /// Number of elements in the underlying sequence
    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Invoke `action` once per element, in order
    ///
    /// # Example
    /// ```
    /// use callback_core::{Callback, IterationDelegate};
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    ///
    /// let tweets = vec!["First tweet".to_string(), "Second tweet".to_string()];
    /// let seen = Rc::new(RefCell::new(Vec::new()));
    /// let sink = Rc::clone(&seen);
    ///
    /// IterationDelegate::new(&tweets)
    ///     .for_each(&Callback::new(move |t: &String| sink.borrow_mut().push(t.clone())));
    ///
    /// assert_eq!(*seen.borrow(), tweets);
    /// ```
    pub fn for_each(&self, action: &Callback<T>) {
        for (index, item) in self.source.iter().enumerate() {
            log::trace!("for_each: element {}", index);
            action.invoke(item);
        }
    }

    /// Produce one output per element, in order
    pub fn map<U>(&self, transform: &Callback<T, U>) -> Vec<U> {
        self.source.iter().map(|item| transform.invoke(item)).collect()
    }

    /// Like [`map`](Self::map), accepting either a callback or a symbolic shortcut
    ///
    /// Stops at the first element a symbol cannot be resolved against; no
    /// partial output is returned.
    pub fn map_by<U>(&self, transform: &Transform<T, U>) -> Result<Vec<U>> {
        self.source
            .iter()
            .enumerate()
            .map(|(index, item)| transform.apply(item, index))
            .collect()
    }

    /// Like [`for_each`](Self::for_each), accepting either a callback or a symbolic shortcut
    ///
    /// Results of the transform are discarded; elements after the first
    /// unresolved one are not visited.
    pub fn for_each_by<U>(&self, action: &Transform<T, U>) -> Result<()> {
        for (index, item) in self.source.iter().enumerate() {
            action.apply(item, index)?;
        }
        Ok(())
    }

    /// Attach an element transform applied before every action
    pub fn through<U>(self, transform: impl Into<Transform<T, U>>) -> TransformedDelegate<'a, T, U> {
        TransformedDelegate {
            source: self.source,
            transform: transform.into(),
        }
    }

    /// Plain iterator over the borrowed elements
    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.source.iter()
    }
}

impl<'a, T> IntoIterator for IterationDelegate<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.source.iter()
    }
}

/// A delegate with an element transform attached
#[derive(Debug)]
pub struct TransformedDelegate<'a, T, U> {
    source: &'a [T],
    transform: Transform<T, U>,
}

impl<'a, T, U> TransformedDelegate<'a, T, U> {
    /// Transform each element and hand the result to `action`, in order
    ///
    /// The transform and the action alternate per element, so an unresolved
    /// name on element `n` leaves exactly `n` actions performed.
    pub fn for_each(&self, action: &Callback<U>) -> Result<()> {
        for (index, item) in self.source.iter().enumerate() {
            let value = self.transform.apply(item, index)?;
            action.invoke(&value);
        }
        Ok(())
    }

    /// Collect every transformed element
    pub fn collect(&self) -> Result<Vec<U>> {
        IterationDelegate::new(self.source).map_by(&self.transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{MemorySink, OutputSink};
    use serde_json::json;
    use std::rc::Rc;

    #[derive(Debug, Clone)]
    struct Tweet {
        user: String,
        text: String,
    }

    impl Attributes<String> for Tweet {
        fn attribute(&self, name: &str) -> Option<String> {
            match name {
                "user" => Some(self.user.clone()),
                "text" => Some(self.text.clone()),
                _ => None,
            }
        }
    }

    struct Timeline {
        tweets: Vec<Tweet>,
    }

    impl Delegating for Timeline {
        type Item = Tweet;

        fn delegate(&self) -> IterationDelegate<'_, Tweet> {
            IterationDelegate::new(&self.tweets)
        }
    }

    fn tweet(user: &str, text: &str) -> Tweet {
        Tweet {
            user: user.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_for_each_writes_in_order() {
        let tweets = vec!["First tweet".to_string(), "Second tweet".to_string()];
        let sink = Rc::new(MemorySink::new());
        let out = Rc::clone(&sink);

        IterationDelegate::new(&tweets).for_each(&Callback::new(move |t: &String| out.write_line(t)));

        assert_eq!(sink.lines(), vec!["First tweet", "Second tweet"]);
    }

    #[test]
    fn test_map_preserves_order_and_length() {
        let input = vec![3, 1, 2];
        let doubled = IterationDelegate::new(&input).map(&Callback::new(|x: &i32| x * 2));
        assert_eq!(doubled, vec![6, 2, 4]);

        let empty: Vec<i32> = Vec::new();
        assert!(IterationDelegate::new(&empty).map(&Callback::new(|x: &i32| *x)).is_empty());
    }

    #[test]
    fn test_map_by_symbol() {
        let timeline = Timeline {
            tweets: vec![tweet("ada", "hello"), tweet("grace", "hi")],
        };

        let users: Vec<String> = timeline.delegate().map_by(&Transform::attribute("user")).unwrap();
        assert_eq!(users, vec!["ada", "grace"]);

        let texts = timeline
            .delegate()
            .map_by(&Transform::Apply(Callback::new(|t: &Tweet| t.text.to_uppercase())))
            .unwrap();
        assert_eq!(texts, vec!["HELLO", "HI"]);
    }

    #[test]
    fn test_unresolved_name_fails_fast() {
        let items = vec![json!({"user": "ada"}), json!({"text": "no user"}), json!({"user": "grace"})];
        let err = IterationDelegate::new(&items)
            .map_by(&Transform::<Value, Value>::attribute("user"))
            .unwrap_err();

        assert_eq!(
            err,
            CallbackError::UnresolvedName {
                name: "user".to_string(),
                index: 1
            }
        );
    }

    #[test]
    fn test_symbol_chain_is_not_split() {
        let items = vec![json!({"user": {"name": "ada"}})];
        let delegate = IterationDelegate::new(&items);

        assert!(delegate.map_by(&Transform::<Value, Value>::attribute("user")).is_ok());
        assert!(matches!(
            delegate.map_by(&Transform::<Value, Value>::attribute("user.name")),
            Err(CallbackError::UnresolvedName { index: 0, .. })
        ));
    }

    #[test]
    fn test_json_scalars_have_no_attributes() {
        let tweets = vec![json!("First tweet")];
        let err = IterationDelegate::new(&tweets)
            .for_each_by(&Transform::<Value, Value>::attribute("user"))
            .unwrap_err();
        assert!(matches!(err, CallbackError::UnresolvedName { .. }));
    }

    #[derive(Debug, PartialEq)]
    struct Point {
        x: i32,
    }

    #[test]
    fn test_callback_transform_needs_no_attributes() {
        let points = vec![Point { x: 1 }, Point { x: 2 }];
        let delegate = IterationDelegate::new(&points);
        let scale = Transform::Apply(Callback::new(|p: &Point| p.x * 10));

        assert_eq!(delegate.map_by(&scale).unwrap(), vec![10, 20]);
        assert!(delegate.for_each_by(&scale).is_ok());
        assert_eq!(scale.symbol(), None);

        let sink = Rc::new(MemorySink::new());
        let out = Rc::clone(&sink);
        delegate
            .through::<i32>(Callback::new(|p: &Point| p.x + 1))
            .for_each(&Callback::new(move |x: &i32| out.write_line(&x.to_string())))
            .unwrap();
        assert_eq!(sink.lines(), vec!["2", "3"]);
    }

    #[test]
    fn test_mutations_between_calls_are_visible() {
        let mut timeline = Timeline {
            tweets: vec![tweet("ada", "one")],
        };
        assert_eq!(timeline.delegate().len(), 1);

        timeline.tweets.push(tweet("grace", "two"));
        let users: Vec<String> = timeline.delegate().map_by(&Transform::attribute("user")).unwrap();
        assert_eq!(users, vec!["ada", "grace"]);
    }

    #[test]
    fn test_through_stops_at_unresolved_element() {
        let items = vec![json!({"user": "ada"}), json!({}), json!({"user": "grace"})];
        let sink = Rc::new(MemorySink::new());
        let out = Rc::clone(&sink);

        let result = IterationDelegate::new(&items)
            .through::<Value>(Symbol::new("user"))
            .for_each(&Callback::new(move |v: &Value| out.write_line(&v.to_string())));

        assert!(result.is_err());
        assert_eq!(sink.lines(), vec!["\"ada\""]);
    }

    #[test]
    fn test_through_collect_and_iter() {
        let timeline = Timeline {
            tweets: vec![tweet("ada", "one"), tweet("grace", "two")],
        };
        let texts = timeline
            .delegate()
            .through::<String>(Symbol::new("text"))
            .collect()
            .unwrap();
        assert_eq!(texts, vec!["one", "two"]);

        let users: Vec<&str> = timeline.delegate().into_iter().map(|t| t.user.as_str()).collect();
        assert_eq!(users, vec!["ada", "grace"]);
        assert_eq!(Symbol::new("text").to_string(), ":text");
    }
}
