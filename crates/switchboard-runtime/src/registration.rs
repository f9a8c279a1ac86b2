//! Registration records: strategy and interceptor specs.
//!
//! Instances of [`Strategy`] and [`Interceptor`] are created fresh per
//! call, so a registration cannot hold instances directly. It holds
//! **specs** instead: a factory paired with declared capabilities. An
//! [`InterceptorSpec`] names the operations it hooks and in which phase up
//! front, so plan building never has to probe an instance to find out.

use crate::interceptor::{Interceptor, Phase, Strategy};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

type StrategyFactory = Box<dyn Fn() -> Box<dyn Strategy> + Send + Sync>;
type InterceptorFactory = Box<dyn Fn() -> Box<dyn Interceptor> + Send + Sync>;

/// A named strategy constructor.
pub struct StrategySpec {
    name: String,
    factory: StrategyFactory,
}

impl StrategySpec {
    /// Create a spec from a name and a factory producing fresh instances.
    pub fn new<F, S>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: Strategy + 'static,
    {
        Self {
            name: name.into(),
            factory: Box::new(move || Box::new(factory())),
        }
    }

    /// Stable spec name, used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Construct a fresh strategy instance for one call.
    pub fn build(&self) -> Box<dyn Strategy> {
        (self.factory)()
    }
}

impl fmt::Debug for StrategySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategySpec")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A named interceptor constructor with declared hook tags.
pub struct InterceptorSpec {
    name: String,
    before_ops: HashSet<String>,
    after_ops: HashSet<String>,
    factory: InterceptorFactory,
}

impl InterceptorSpec {
    /// Create a spec from a name and a factory producing fresh instances.
    ///
    /// The new spec declares no hooks; tag operations with
    /// [`intercepts_before`](Self::intercepts_before) and
    /// [`intercepts_after`](Self::intercepts_after).
    pub fn new<F, I>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> I + Send + Sync + 'static,
        I: Interceptor + 'static,
    {
        Self {
            name: name.into(),
            before_ops: HashSet::new(),
            after_ops: HashSet::new(),
            factory: Box::new(move || Box::new(factory())),
        }
    }

    /// Declare a before-hook for an operation name.
    pub fn intercepts_before(mut self, operation: impl Into<String>) -> Self {
        self.before_ops.insert(operation.into());
        self
    }

    /// Declare an after-hook for an operation name.
    pub fn intercepts_after(mut self, operation: impl Into<String>) -> Self {
        self.after_ops.insert(operation.into());
        self
    }

    /// Whether this spec declares a hook for the operation in the phase.
    pub fn declares(&self, operation: &str, phase: Phase) -> bool {
        match phase {
            Phase::Before => self.before_ops.contains(operation),
            Phase::After => self.after_ops.contains(operation),
        }
    }

    /// Stable spec name, used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Construct a fresh interceptor instance for one call.
    pub fn build(&self) -> Box<dyn Interceptor> {
        (self.factory)()
    }
}

impl fmt::Debug for InterceptorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorSpec")
            .field("name", &self.name)
            .field("before_ops", &self.before_ops)
            .field("after_ops", &self.after_ops)
            .finish_non_exhaustive()
    }
}

/// Configuration for one repository identity.
///
/// Declares the reachable operation names, the strategy performing them,
/// and the ordered interceptor list wrapping them. Read-only once handed to
/// the registration store.
#[derive(Debug)]
pub struct Registration {
    strategy: Option<Arc<StrategySpec>>,
    wrappers: Vec<Arc<InterceptorSpec>>,
    operations: Vec<String>,
}

impl Registration {
    /// Create a registration declaring the given operation names.
    pub fn new<I, S>(operations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            strategy: None,
            wrappers: Vec::new(),
            operations: operations.into_iter().map(Into::into).collect(),
        }
    }

    /// Set the strategy.
    pub fn with_strategy(mut self, strategy: StrategySpec) -> Self {
        self.strategy = Some(Arc::new(strategy));
        self
    }

    /// Append an interceptor. Order is registration order; before-hooks run
    /// in it, after-hooks run reversed.
    pub fn with_wrapper(mut self, wrapper: InterceptorSpec) -> Self {
        self.wrappers.push(Arc::new(wrapper));
        self
    }

    /// The strategy spec, if one was configured.
    pub fn strategy(&self) -> Option<&Arc<StrategySpec>> {
        self.strategy.as_ref()
    }

    /// Ordered interceptor specs.
    pub fn wrappers(&self) -> &[Arc<InterceptorSpec>] {
        &self.wrappers
    }

    /// Declared operation names, in declaration order.
    pub fn operations(&self) -> &[String] {
        &self.operations
    }

    /// Whether the operation name is declared reachable.
    pub fn declares(&self, operation: &str) -> bool {
        self.operations.iter().any(|op| op == operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interceptor::EchoStrategy;

    struct NoopWrapper;
    impl Interceptor for NoopWrapper {}

    #[test]
    fn test_spec_declared_hooks() {
        let spec = InterceptorSpec::new("audit", || NoopWrapper)
            .intercepts_before("find")
            .intercepts_after("find")
            .intercepts_after("delete");

        assert!(spec.declares("find", Phase::Before));
        assert!(spec.declares("find", Phase::After));
        assert!(!spec.declares("delete", Phase::Before));
        assert!(spec.declares("delete", Phase::After));
        assert!(!spec.declares("update", Phase::Before));
    }

    #[test]
    fn test_registration_builder() {
        let registration = Registration::new(["find", "delete"])
            .with_strategy(StrategySpec::new("echo", || EchoStrategy))
            .with_wrapper(InterceptorSpec::new("audit", || NoopWrapper).intercepts_before("find"));

        assert!(registration.declares("find"));
        assert!(registration.declares("delete"));
        assert!(!registration.declares("update"));
        assert_eq!(registration.wrappers().len(), 1);
        assert_eq!(registration.strategy().unwrap().name(), "echo");
    }

    #[test]
    fn test_factories_build_fresh_instances() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let built = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&built);
        let spec = StrategySpec::new("echo", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            EchoStrategy
        });

        spec.build();
        spec.build();
        assert_eq!(built.load(Ordering::SeqCst), 2);
    }
}
