//! Interceptor chain execution.
//!
//! Runs the before-chain in registration order, invokes the strategy, then
//! runs the after-chain in reverse order. The first wrapper to touch the
//! input is the last to touch the output, giving wrap/unwrap symmetry like
//! a middleware stack.

use crate::interceptor::Interceptor;
use crate::plan::{DispatchPlan, PlanEntry};
use switchboard_core::{Args, DispatchResult, Value};

/// Execute one call through the plan's interceptor chain.
///
/// Instantiates one fresh interceptor per plan entry, so an interceptor
/// hooking both phases shares call-scoped state between its hooks. Any
/// hook or strategy failure aborts the chain immediately and propagates
/// unchanged.
pub fn run_chain<F>(plan: &DispatchPlan, args: Args, strategy_call: F) -> DispatchResult<Value>
where
    F: FnOnce(Args) -> DispatchResult<Value>,
{
    let operation = plan.operation();
    let mut chain: Vec<(&PlanEntry, Box<dyn Interceptor>)> = plan
        .entries()
        .iter()
        .map(|entry| (entry, entry.spec().build()))
        .collect();

    let mut args = args;
    for (entry, interceptor) in chain.iter_mut() {
        if !entry.hooks_before() {
            continue;
        }
        tracing::trace!(
            operation = %operation,
            interceptor = %entry.spec().name(),
            "Before hook"
        );
        args = interceptor.before(operation, args)?;
    }

    if !plan.has_after() {
        return strategy_call(args);
    }

    // After-hooks see the arguments the strategy actually received.
    let mut ret = strategy_call(args.clone())?;
    for (entry, interceptor) in chain.iter_mut().rev() {
        if !entry.hooks_after() {
            continue;
        }
        tracing::trace!(
            operation = %operation,
            interceptor = %entry.spec().name(),
            "After hook"
        );
        ret = interceptor.after(operation, ret, &args)?;
    }

    Ok(ret)
}
