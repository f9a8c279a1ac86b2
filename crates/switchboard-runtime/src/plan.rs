//! Dispatch plans: the cached resolution of one operation name.
//!
//! Building a plan is the expensive part of dispatch, so it happens at most
//! once per (repository, operation name). The builder here is a pure
//! function of the registration and the operation name; caching is the
//! repository's job.

use crate::interceptor::Phase;
use crate::registration::{InterceptorSpec, Registration, StrategySpec};
use std::sync::Arc;
use switchboard_core::{DispatchError, DispatchResult};

/// One participating interceptor in a plan, with its matched phases.
#[derive(Debug, Clone)]
pub struct PlanEntry {
    spec: Arc<InterceptorSpec>,
    before: bool,
    after: bool,
}

impl PlanEntry {
    /// The interceptor spec behind this entry.
    pub fn spec(&self) -> &InterceptorSpec {
        &self.spec
    }

    /// Whether the entry participates in the before-chain.
    pub fn hooks_before(&self) -> bool {
        self.before
    }

    /// Whether the entry participates in the after-chain.
    pub fn hooks_after(&self) -> bool {
        self.after
    }
}

/// The resolved description of how to execute one operation.
///
/// Holds the strategy and the registration-ordered subsequence of wrappers
/// that declared at least one hook for the operation. Immutable once built;
/// the repository caches it for the process lifetime.
#[derive(Debug)]
pub struct DispatchPlan {
    operation: String,
    strategy: Arc<StrategySpec>,
    entries: Vec<PlanEntry>,
}

impl DispatchPlan {
    /// Build the plan for `operation` from a registration.
    ///
    /// Pure: no caching, no side effects beyond the returned plan.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NotConfigured`] if the registration
    /// declares no strategy.
    pub fn build(
        repository: &str,
        registration: &Registration,
        operation: &str,
    ) -> DispatchResult<DispatchPlan> {
        let strategy = registration
            .strategy()
            .ok_or_else(|| DispatchError::NotConfigured {
                repository: repository.to_string(),
            })?;

        let entries = registration
            .wrappers()
            .iter()
            .filter_map(|spec| {
                let before = spec.declares(operation, Phase::Before);
                let after = spec.declares(operation, Phase::After);
                (before || after).then(|| PlanEntry {
                    spec: Arc::clone(spec),
                    before,
                    after,
                })
            })
            .collect();

        Ok(DispatchPlan {
            operation: operation.to_string(),
            strategy: Arc::clone(strategy),
            entries,
        })
    }

    /// The operation name this plan resolves.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// The strategy spec performing the operation.
    pub fn strategy(&self) -> &Arc<StrategySpec> {
        &self.strategy
    }

    /// Participating interceptors, in registration order.
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Number of entries participating in the before-chain.
    pub fn before_count(&self) -> usize {
        self.entries.iter().filter(|e| e.hooks_before()).count()
    }

    /// Number of entries participating in the after-chain.
    pub fn after_count(&self) -> usize {
        self.entries.iter().filter(|e| e.hooks_after()).count()
    }

    /// Whether any entry participates in the after-chain.
    pub fn has_after(&self) -> bool {
        self.entries.iter().any(PlanEntry::hooks_after)
    }

    /// True when no interceptor participates in either phase.
    ///
    /// Decided on the filtered entries, not the raw wrapper list: a
    /// registration whose wrappers match nothing for this operation is a
    /// passthrough and takes the shortcut path.
    pub fn is_passthrough(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interceptor::{EchoStrategy, Interceptor};

    struct NoopWrapper;
    impl Interceptor for NoopWrapper {}

    fn strategy() -> StrategySpec {
        StrategySpec::new("echo", || EchoStrategy)
    }

    #[test]
    fn test_missing_strategy_is_not_configured() {
        let registration = Registration::new(["find"])
            .with_wrapper(InterceptorSpec::new("audit", || NoopWrapper).intercepts_before("find"));

        let err = DispatchPlan::build("users", &registration, "find").unwrap_err();
        assert!(matches!(err, DispatchError::NotConfigured { repository } if repository == "users"));
    }

    #[test]
    fn test_filters_wrappers_by_declared_hooks() {
        let registration = Registration::new(["find", "delete"])
            .with_strategy(strategy())
            .with_wrapper(InterceptorSpec::new("w1", || NoopWrapper).intercepts_before("find"))
            .with_wrapper(InterceptorSpec::new("w2", || NoopWrapper).intercepts_after("find"))
            .with_wrapper(InterceptorSpec::new("w3", || NoopWrapper).intercepts_before("delete"));

        let plan = DispatchPlan::build("users", &registration, "find").unwrap();
        assert_eq!(plan.entries().len(), 2);
        assert_eq!(plan.entries()[0].spec().name(), "w1");
        assert!(plan.entries()[0].hooks_before());
        assert!(!plan.entries()[0].hooks_after());
        assert_eq!(plan.entries()[1].spec().name(), "w2");
        assert!(plan.entries()[1].hooks_after());
        assert!(plan.has_after());
        assert!(!plan.is_passthrough());
    }

    #[test]
    fn test_phase_counts() {
        let registration = Registration::new(["find"])
            .with_strategy(strategy())
            .with_wrapper(InterceptorSpec::new("w1", || NoopWrapper).intercepts_before("find"))
            .with_wrapper(
                InterceptorSpec::new("w2", || NoopWrapper)
                    .intercepts_before("find")
                    .intercepts_after("find"),
            )
            .with_wrapper(InterceptorSpec::new("w3", || NoopWrapper).intercepts_after("find"));

        let plan = DispatchPlan::build("users", &registration, "find").unwrap();
        assert_eq!(plan.before_count(), 2);
        assert_eq!(plan.after_count(), 2);

        let bare = Registration::new(["find"]).with_strategy(strategy());
        let empty = DispatchPlan::build("users", &bare, "find").unwrap();
        assert_eq!(empty.before_count(), 0);
        assert_eq!(empty.after_count(), 0);
    }

    #[test]
    fn test_entry_keeps_both_phases_on_one_spec() {
        let registration = Registration::new(["find"]).with_strategy(strategy()).with_wrapper(
            InterceptorSpec::new("both", || NoopWrapper)
                .intercepts_before("find")
                .intercepts_after("find"),
        );

        let plan = DispatchPlan::build("users", &registration, "find").unwrap();
        assert_eq!(plan.entries().len(), 1);
        assert!(plan.entries()[0].hooks_before());
        assert!(plan.entries()[0].hooks_after());
    }

    #[test]
    fn test_unmatched_wrappers_yield_passthrough() {
        let registration = Registration::new(["find", "delete"])
            .with_strategy(strategy())
            .with_wrapper(InterceptorSpec::new("w1", || NoopWrapper).intercepts_before("delete"));

        // Wrappers exist, but none hook "find": shortcut applies.
        let plan = DispatchPlan::build("users", &registration, "find").unwrap();
        assert!(plan.is_passthrough());
        assert!(!plan.has_after());
    }

    #[test]
    fn test_no_wrappers_yield_passthrough() {
        let registration = Registration::new(["find"]).with_strategy(strategy());
        let plan = DispatchPlan::build("users", &registration, "find").unwrap();
        assert!(plan.is_passthrough());
    }
}
