// End-to-end scenarios: gate dispatch, capture isolation, delegated iteration
use callback_core::{
    Attributes, Callback, CallbackError, ClosureFactory, CredentialTable, Delegating,
    DynCallback, GatedAction, IterationDelegate, MemorySink, Outcome, OutputSink, Transform,
};
use serde_json::{json, Value};
use std::rc::Rc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Callback that writes a fixed line to a shared sink
fn say(sink: &Rc<MemorySink>, line: &'static str) -> Callback {
    let sink = Rc::clone(sink);
    Callback::named(line, move |_: &()| sink.write_line(line))
}

#[test]
fn gate_dispatches_exactly_one_branch() {
    init_logging();
    let accounts = CredentialTable::new().with_account("ada", "s3cret");
    let predicates: Vec<(&str, &str, Outcome, &str)> = vec![
        ("ada", "s3cret", Outcome::Success, "welcome"),
        ("ada", "wrong", Outcome::Handled, "denied"),
        ("grace", "s3cret", Outcome::Handled, "denied"),
    ];

    for (identity, credential, expected, line) in predicates {
        let sink = Rc::new(MemorySink::new());
        let outcome = GatedAction::new(&accounts)
            .on_success(say(&sink, "welcome"))
            .on_error(say(&sink, "denied"))
            .execute(identity, credential)
            .unwrap();

        assert_eq!(outcome, expected);
        assert_eq!(sink.lines(), vec![line]);
    }
}

#[test]
fn gate_without_error_handler_surfaces_authentication_error() {
    init_logging();
    let sink = Rc::new(MemorySink::new());
    let reject = |_: &str, _: &str| false;

    let result = GatedAction::new(&reject)
        .on_success(say(&sink, "welcome"))
        .execute("ada", "s3cret");

    assert!(matches!(result, Err(CallbackError::Authentication { ref identity }) if identity == "ada"));
    assert!(sink.is_empty());
}

#[test]
fn runtime_declared_handler_with_wrong_arity_is_rejected_before_dispatch() {
    let sink = Rc::new(MemorySink::new());
    let out = Rc::clone(&sink);
    let handler = DynCallback::new("greet", 1, move |args| {
        out.write_line(&format!("hello {}", args[0]));
        Value::Null
    });

    let err = handler.into_action().unwrap_err();
    assert!(matches!(err, CallbackError::ArityMismatch { expected: 0, actual: 1, .. }));
    assert!(sink.is_empty());
}

#[test]
fn factory_callbacks_are_isolated_regardless_of_call_order() {
    let sink = Rc::new(MemorySink::new());
    let out = Rc::clone(&sink);
    let factory = ClosureFactory::new(move |greeting: &String, name: &String| {
        out.write_line(&format!("{}, {}", greeting, name));
    });

    let c1 = factory.make_bound_callback("Hello".to_string());
    let c2 = factory.make_bound_callback("Bonjour".to_string());
    drop(factory);

    let (ada, grace) = ("Ada".to_string(), "Grace".to_string());
    c2.invoke(&ada);
    c1.invoke(&ada);
    c2.invoke(&grace);

    assert_eq!(sink.lines(), vec!["Bonjour, Ada", "Hello, Ada", "Bonjour, Grace"]);
}

struct Tweet {
    text: String,
}

impl Attributes<String> for Tweet {
    fn attribute(&self, name: &str) -> Option<String> {
        (name == "text").then(|| self.text.clone())
    }
}

struct Timeline {
    tweets: Vec<Tweet>,
}

impl Timeline {
    fn post(&mut self, text: &str) {
        self.tweets.push(Tweet {
            text: text.to_string(),
        });
    }
}

impl Delegating for Timeline {
    type Item = Tweet;

    fn delegate(&self) -> IterationDelegate<'_, Tweet> {
        IterationDelegate::new(&self.tweets)
    }
}

#[test]
fn timeline_for_each_writes_each_tweet_in_order() {
    let mut timeline = Timeline { tweets: Vec::new() };
    timeline.post("First tweet");
    timeline.post("Second tweet");

    let sink = Rc::new(MemorySink::new());
    let out = Rc::clone(&sink);
    timeline
        .delegate()
        .for_each(&Callback::new(move |t: &Tweet| out.write_line(&t.text)));

    assert_eq!(sink.lines(), vec!["First tweet", "Second tweet"]);
}

#[test]
fn timeline_map_sees_later_posts() {
    let mut timeline = Timeline { tweets: Vec::new() };
    timeline.post("one");
    let lengths = Callback::new(|t: &Tweet| t.text.len());
    assert_eq!(timeline.delegate().map(&lengths), vec![3]);

    timeline.post("three");
    assert_eq!(timeline.delegate().map(&lengths), vec![3, 5]);
}

#[test]
fn symbolic_shortcut_fails_on_first_element_lacking_attribute() {
    let tweets = vec![json!("First tweet"), json!({"user": "ada"})];

    let result = IterationDelegate::new(&tweets).map_by(&Transform::<Value, Value>::attribute("user"));

    assert_eq!(
        result,
        Err(CallbackError::UnresolvedName {
            name: "user".to_string(),
            index: 0
        })
    );
}

#[test]
fn map_preserves_length_and_order() {
    let input = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    let f = Callback::new(|s: &String| format!("f({})", s));

    let output = IterationDelegate::new(&input).map(&f);
    assert_eq!(output.len(), input.len());
    assert_eq!(output, vec!["f(a)", "f(b)", "f(c)"]);
}
