//! Callback Core Library
//!
//! A small, synchronous library of callable-value building blocks: first-class
//! callbacks, closure factories that bind context at creation time, gated
//! actions with success/error continuations, and iteration delegates that
//! forward traversal to a borrowed collection.
//!
//! # Architecture
//!
//! - [`Callback`] is the one function-value type; everything else accepts it
//! - [`ClosureFactory`] stamps out callbacks with a captured context
//! - [`GatedAction`] runs a pluggable [`Authenticator`] and dispatches to a
//!   success or error callback
//! - [`IterationDelegate`] forwards `for_each`/`map` to a borrowed slice,
//!   with an optional symbolic attribute shortcut ([`Transform`])
//! - [`DynCallback`] converts runtime-declared callbacks at the API boundary
//!
//! The library does NOT:
//! - Implement any authentication scheme beyond a credential table
//! - Run anything concurrently (callbacks are `Rc`-based and not `Send`)
//! - Own its output: callbacks write to an injected [`OutputSink`]
//!
//! # Example Usage
//!
//! ```
//! use callback_core::{
//!     Callback, CredentialTable, GatedAction, IterationDelegate, MemorySink, Outcome,
//!     OutputSink,
//! };
//! use std::rc::Rc;
//!
//! let sink = Rc::new(MemorySink::new());
//! let accounts = CredentialTable::new().with_account("ada", "s3cret");
//!
//! let welcome = {
//!     let sink = Rc::clone(&sink);
//!     Callback::new(move |_: &()| sink.write_line("Welcome back"))
//! };
//! let denied = {
//!     let sink = Rc::clone(&sink);
//!     Callback::new(move |_: &()| sink.write_line("Access denied"))
//! };
//!
//! let outcome = GatedAction::new(&accounts)
//!     .on_success(welcome)
//!     .on_error(denied)
//!     .execute("ada", "s3cret")
//!     .unwrap();
//! assert_eq!(outcome, Outcome::Success);
//!
//! let tweets = vec!["First tweet".to_string(), "Second tweet".to_string()];
//! let echo = {
//!     let sink = Rc::clone(&sink);
//!     Callback::new(move |t: &String| sink.write_line(t))
//! };
//! IterationDelegate::new(&tweets).for_each(&echo);
//!
//! assert_eq!(sink.lines(), vec!["Welcome back", "First tweet", "Second tweet"]);
//! ```

// Public modules
pub mod callback;
pub mod config;
pub mod delegate;
pub mod factory;
pub mod gate;
pub mod interop;
pub mod sink;
pub mod types;

// Re-export main types for convenience
pub use callback::Callback;
pub use config::{SinkConfig, SinkKind};
pub use delegate::{Attributes, Delegating, IterationDelegate, Symbol, Transform, TransformedDelegate};
pub use factory::ClosureFactory;
pub use gate::{Authenticator, CredentialTable, GatedAction};
pub use interop::DynCallback;
pub use sink::{LogSink, MemorySink, OutputSink, StdoutSink};
pub use types::{CallbackError, Outcome, Result, Timestamp};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
