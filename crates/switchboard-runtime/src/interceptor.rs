//! Strategy and interceptor traits.
//!
//! A **strategy** is the single implementation that actually performs an
//! operation. An **interceptor** optionally transforms the arguments before
//! the strategy runs and/or the return value after it.
//!
//! Both are call-scoped: the dispatch layer builds a fresh instance per
//! invocation and discards it afterwards, so implementations may hold
//! call-local mutable state without cross-call contamination. An
//! interceptor hooking both phases of the same operation uses one instance
//! for both, so state set in `before` is visible in `after`.

use switchboard_core::{Args, DispatchError, DispatchResult, Value};

/// Interception phase relative to the strategy call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Runs before the strategy, may transform arguments.
    Before,
    /// Runs after the strategy, may transform the return value.
    After,
}

/// A backing implementation for repository operations.
pub trait Strategy: Send {
    /// Perform the named operation.
    ///
    /// # Errors
    ///
    /// Failures propagate unchanged to the original caller; the dispatch
    /// layer never catches or retries them.
    fn perform(&mut self, operation: &str, args: Args) -> DispatchResult<Value>;
}

/// Optional hooks around a strategy call.
///
/// Default implementations pass arguments and return values through
/// unchanged, so an interceptor only overrides the phases it declared.
pub trait Interceptor: Send {
    /// Called before the strategy. Returns the (possibly transformed)
    /// arguments handed to the next interceptor or the strategy.
    fn before(&mut self, _operation: &str, args: Args) -> DispatchResult<Args> {
        Ok(args)
    }

    /// Called after the strategy with the current return value and the
    /// arguments the strategy actually saw. Returns the (possibly
    /// transformed) return value.
    fn after(&mut self, _operation: &str, ret: Value, _args: &Args) -> DispatchResult<Value> {
        Ok(ret)
    }
}

/// Built-in strategy for tests and docs: returns its first argument.
#[derive(Debug, Default)]
pub struct EchoStrategy;

impl Strategy for EchoStrategy {
    fn perform(&mut self, operation: &str, mut args: Args) -> DispatchResult<Value> {
        if args.is_empty() {
            return Err(DispatchError::hook(format!(
                "echo '{}' called without arguments",
                operation
            )));
        }
        Ok(args.swap_remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_returns_first_argument() {
        let mut echo = EchoStrategy;
        let result = echo.perform("find", vec![Value::from("hello")]).unwrap();
        assert_eq!(result, Value::from("hello"));
    }

    #[test]
    fn test_echo_without_arguments_fails() {
        let mut echo = EchoStrategy;
        assert!(echo.perform("find", vec![]).is_err());
    }

    #[test]
    fn test_default_hooks_pass_through() {
        struct Silent;
        impl Interceptor for Silent {}

        let mut silent = Silent;
        let args = silent.before("find", vec![Value::from(1i64)]).unwrap();
        assert_eq!(args, vec![Value::from(1i64)]);
        let ret = silent.after("find", Value::from("r"), &args).unwrap();
        assert_eq!(ret, Value::from("r"));
    }
}
