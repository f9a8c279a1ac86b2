//! Repository front objects.
//!
//! A [`Repository`] is the caller-facing handle for a registered identity.
//! It does not implement its operations; on the first call to each
//! operation name it resolves a [`DispatchPlan`](crate::plan::DispatchPlan)
//! and binds a fast-path entry, so every later call skips resolution
//! entirely.

use crate::chain::run_chain;
use crate::interceptor::Strategy;
use crate::plan::DispatchPlan;
use crate::registration::{Registration, StrategySpec};
use crate::registry::RegistrationStore;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use switchboard_core::{Args, DispatchError, DispatchResult, Value};

/// The permanently bound fast path for one resolved operation name.
enum BoundOperation {
    /// No interceptor participates: forward straight to a fresh strategy.
    Shortcut {
        operation: String,
        strategy: Arc<StrategySpec>,
    },
    /// At least one interceptor participates: run the full chain.
    Chained { plan: DispatchPlan },
}

impl BoundOperation {
    fn invoke(&self, args: Args) -> DispatchResult<Value> {
        match self {
            BoundOperation::Shortcut {
                operation,
                strategy,
            } => strategy.build().perform(operation, args),
            BoundOperation::Chained { plan } => {
                let strategy = Arc::clone(plan.strategy());
                let operation = plan.operation().to_string();
                run_chain(plan, args, move |args| {
                    strategy.build().perform(&operation, args)
                })
            }
        }
    }
}

/// Caller-facing dispatch handle for one repository identity.
///
/// The registration is snapshotted at construction; later store mutation
/// never affects an existing repository. The bound-operation table is
/// shared across all calls to this instance and is never invalidated.
pub struct Repository {
    identity: String,
    registration: Option<Arc<Registration>>,
    bound: DashMap<String, Arc<BoundOperation>>,
}

impl Repository {
    /// Create a front object for `identity`, snapshotting its
    /// registration from the store.
    ///
    /// An identity absent from the store still yields a repository; every
    /// call on it fails with [`DispatchError::NotConfigured`].
    pub fn new(identity: impl Into<String>, store: &RegistrationStore) -> Self {
        let identity = identity.into();
        let registration = store.lookup(&identity);
        Self {
            identity,
            registration,
            bound: DashMap::new(),
        }
    }

    /// The repository identity.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Whether the operation name is declared reachable.
    ///
    /// Reflects the registration without forcing resolution.
    pub fn supports(&self, operation: &str) -> bool {
        self.registration
            .as_ref()
            .is_some_and(|registration| registration.declares(operation))
    }

    /// Declared operation names, in declaration order.
    pub fn operations(&self) -> Vec<&str> {
        self.registration
            .as_ref()
            .map(|registration| {
                registration
                    .operations()
                    .iter()
                    .map(String::as_str)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether a fast path has already been bound for the operation.
    pub fn resolved(&self, operation: &str) -> bool {
        self.bound.contains_key(operation)
    }

    /// Invoke an operation.
    ///
    /// First call per operation name builds and binds the dispatch plan;
    /// subsequent calls invoke the bound entry directly.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::UnsupportedOperation`] if the name is not
    ///   declared; the resolution cache is never consulted in that case.
    /// - [`DispatchError::NotConfigured`] if no registration or no
    ///   strategy exists for this identity, on this and every later call.
    /// - Any strategy or interceptor failure, forwarded unchanged.
    pub fn call(&self, operation: &str, args: Args) -> DispatchResult<Value> {
        let Some(registration) = self.registration.as_ref() else {
            return Err(DispatchError::NotConfigured {
                repository: self.identity.clone(),
            });
        };

        if !registration.declares(operation) {
            return Err(DispatchError::UnsupportedOperation {
                repository: self.identity.clone(),
                operation: operation.to_string(),
            });
        }

        let bound = self.bind(registration, operation)?;
        bound.invoke(args).map_err(|err| {
            tracing::error!(
                repository = %self.identity,
                operation = %operation,
                error = %err,
                "Dispatch failed"
            );
            err
        })
    }

    /// Get the bound fast path for `operation`, building it on first use.
    ///
    /// The vacant-entry path holds the map shard lock across plan
    /// construction, so the builder runs at most once per operation name
    /// even when first calls race.
    fn bind(
        &self,
        registration: &Registration,
        operation: &str,
    ) -> DispatchResult<Arc<BoundOperation>> {
        if let Some(bound) = self.bound.get(operation) {
            return Ok(Arc::clone(bound.value()));
        }

        match self.bound.entry(operation.to_string()) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let plan = DispatchPlan::build(&self.identity, registration, operation)?;
                tracing::debug!(
                    repository = %self.identity,
                    operation = %operation,
                    strategy = %plan.strategy().name(),
                    interceptors = plan.entries().len(),
                    "Resolved dispatch plan"
                );
                let bound = Arc::new(if plan.is_passthrough() {
                    BoundOperation::Shortcut {
                        operation: operation.to_string(),
                        strategy: Arc::clone(plan.strategy()),
                    }
                } else {
                    BoundOperation::Chained { plan }
                });
                entry.insert(Arc::clone(&bound));
                Ok(bound)
            }
        }
    }
}
