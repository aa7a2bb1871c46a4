//! Demo scenarios
//!
//! Each scenario wires configured callbacks into one of the core components
//! and writes what happens to the output sink.

use crate::callbacks::CallbackRegistry;
use crate::config::DemoConfig;
use anyhow::{Context, Result};
use callback_core::{
    Callback, ClosureFactory, GatedAction, IterationDelegate, Outcome, OutputSink, Transform,
};
use clap::ValueEnum;
use serde_json::Value;
use std::rc::Rc;

/// Which scenario(s) to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    All,
    Gate,
    Closures,
    Timeline,
}

/// Runs scenarios against one configuration and sink
pub struct Runner<'a> {
    config: &'a DemoConfig,
    registry: CallbackRegistry,
    sink: Rc<dyn OutputSink>,
}

impl<'a> Runner<'a> {
    pub fn new(config: &'a DemoConfig, sink: Rc<dyn OutputSink>) -> Result<Self> {
        let registry = CallbackRegistry::from_config(&config.callbacks, Rc::clone(&sink))
            .context("Invalid [[callbacks]] configuration")?;
        Ok(Self {
            config,
            registry,
            sink,
        })
    }

    pub fn run(&self, scenario: Scenario) -> Result<()> {
        match scenario {
            Scenario::All => {
                self.gate(&self.config.gate.identity, &self.config.gate.credential)?;
                self.closures();
                self.timeline()
            }
            Scenario::Gate => self
                .gate(&self.config.gate.identity, &self.config.gate.credential)
                .map(|_| ()),
            Scenario::Closures => {
                self.closures();
                Ok(())
            }
            Scenario::Timeline => self.timeline(),
        }
    }

    /// Authenticate against the configured accounts and dispatch the gate callbacks
    pub fn gate(&self, identity: &str, credential: &str) -> Result<Outcome> {
        log::info!("Running gate scenario for '{}'", identity);
        let gate = &self.config.gate;

        let on_success = self
            .registry
            .resolve(gate.on_success.as_deref())?
            .map(|cb| cb.into_action())
            .transpose()
            .context("on_success must take no arguments")?;
        let on_error = self
            .registry
            .resolve(gate.on_error.as_deref())?
            .map(|cb| cb.into_action())
            .transpose()
            .context("on_error must take no arguments")?;

        let outcome = GatedAction::new(&self.config.accounts)
            .with_handlers(on_success, on_error)
            .execute(identity, credential)?;

        log::info!("Gate outcome: {}", outcome);
        Ok(outcome)
    }

    /// Greeting callbacks bound per greeting, plus a stateful counter
    pub fn closures(&self) {
        let closures = &self.config.closures;
        log::info!("Running closures scenario with {} greeting(s)", closures.greetings.len());

        let sink = Rc::clone(&self.sink);
        let factory = ClosureFactory::named("greeter", move |greeting: &String, name: &String| {
            sink.write_line(&format!("{}, {}!", greeting, name));
        });
        let greeters: Vec<Callback<String>> = closures
            .greetings
            .iter()
            .map(|greeting| factory.make_bound_callback(greeting.clone()))
            .collect();

        // Bound callbacks run after the factory calls have all returned
        for greeter in greeters.iter().rev() {
            greeter.invoke(&closures.name);
        }

        let sink = Rc::clone(&self.sink);
        let counter = Callback::with_state(0u32, move |count, _: &()| {
            *count += 1;
            sink.write_line(&format!("counter: {}", count));
        });
        for _ in 0..closures.counter_calls {
            counter.call();
        }
    }

    /// Delegate traversal of the configured tweets
    pub fn timeline(&self) -> Result<()> {
        let timeline = &self.config.timeline;
        let delegate = IterationDelegate::new(&timeline.tweets);
        log::info!("Running timeline scenario over {} tweet(s)", delegate.len());

        if let Some(name) = &timeline.on_each {
            let action = self
                .registry
                .get(name)?
                .into_unary()
                .with_context(|| format!("on_each callback '{}' must take one argument", name))?
                .map_output(|_| ());
            delegate.for_each(&action);
        }

        if let Some(attribute) = &timeline.attribute {
            let values: Vec<Value> = delegate
                .map_by(&Transform::attribute(attribute.as_str()))
                .with_context(|| format!("Cannot map tweets by attribute '{}'", attribute))?;

            let rendered: Vec<String> = values.iter().map(crate::callbacks::render_value).collect();
            self.sink
                .write_line(&format!("{}: {}", attribute, rendered.join(", ")));
        }

        Ok(())
    }
}
