//! Basic dispatch usage example.
//!
//! Demonstrates core switchboard features:
//! - Registering a strategy and interceptors for a repository identity
//! - Shortcut vs. chained dispatch
//!
//! Run: `cargo run --example basic -p switchboard-runtime`

use switchboard_runtime::{
    Args, DispatchResult, EchoStrategy, Interceptor, InterceptorSpec, Registration,
    RegistrationStore, Repository, StrategySpec, Value,
};

/// Uppercases the first string argument before the strategy sees it.
struct Upper;

impl Interceptor for Upper {
    fn before(&mut self, _op: &str, mut args: Args) -> DispatchResult<Args> {
        if let Some(s) = args.first().and_then(Value::as_str) {
            args[0] = Value::from(s.to_uppercase());
        }
        Ok(args)
    }
}

/// Appends a marker to string return values.
struct Exclaim;

impl Interceptor for Exclaim {
    fn after(&mut self, _op: &str, ret: Value, _args: &Args) -> DispatchResult<Value> {
        match ret.as_str() {
            Some(s) => Ok(Value::from(format!("{}!", s))),
            None => Ok(ret),
        }
    }
}

fn main() -> DispatchResult<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    // Configure the store: one identity, one strategy, two wrappers.
    let store = RegistrationStore::new();
    store.register(
        "messages",
        Registration::new(["find", "put"])
            .with_strategy(StrategySpec::new("echo", || EchoStrategy))
            .with_wrapper(InterceptorSpec::new("upper", || Upper).intercepts_before("find"))
            .with_wrapper(InterceptorSpec::new("exclaim", || Exclaim).intercepts_after("find")),
    );

    let messages = Repository::new("messages", &store);

    // Chained dispatch: before-chain, strategy, after-chain.
    let found = messages.call("find", vec![Value::from("hi")])?;
    println!("find(\"hi\") = {}", found);

    // Shortcut dispatch: no wrapper hooks "put", straight to the strategy.
    let put = messages.call("put", vec![Value::from("raw")])?;
    println!("put(\"raw\") = {}", put);

    // Capability queries never force resolution.
    println!("supports find: {}", messages.supports("find"));
    println!("supports drop: {}", messages.supports("drop"));

    Ok(())
}
