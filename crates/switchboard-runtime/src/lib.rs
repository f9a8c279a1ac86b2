//! Switchboard Runtime - Pluggable method interception for repository objects
//!
//! A repository is a front object that does not implement its operations.
//! For each operation name it resolves, once, a backing strategy and the
//! interceptors hooking that operation, then caches the resolution so
//! later calls take a bound fast path.
//!
//! - **RegistrationStore**: identity → strategy, wrappers, operation set
//! - **DispatchPlan**: the cached resolution for one operation name
//! - **Chain execution**: before-hooks in order, strategy, after-hooks reversed
//! - **Repository**: the caller-facing dispatch surface
//!
//! # Example
//!
//! ```rust
//! use switchboard_runtime::{
//!     EchoStrategy, InterceptorSpec, Registration, RegistrationStore, Repository, StrategySpec,
//! };
//! use switchboard_runtime::{Args, DispatchResult, Interceptor, Value};
//!
//! struct Shout;
//!
//! impl Interceptor for Shout {
//!     fn before(&mut self, _op: &str, mut args: Args) -> DispatchResult<Args> {
//!         if let Some(s) = args.first().and_then(Value::as_str) {
//!             args[0] = Value::from(s.to_uppercase());
//!         }
//!         Ok(args)
//!     }
//! }
//!
//! # fn main() -> DispatchResult<()> {
//! let store = RegistrationStore::new();
//! store.register(
//!     "messages",
//!     Registration::new(["find"])
//!         .with_strategy(StrategySpec::new("echo", || EchoStrategy))
//!         .with_wrapper(InterceptorSpec::new("shout", || Shout).intercepts_before("find")),
//! );
//!
//! let messages = Repository::new("messages", &store);
//! assert_eq!(messages.call("find", vec![Value::from("hi")])?, Value::from("HI"));
//! # Ok(())
//! # }
//! ```

pub mod chain;
pub mod interceptor;
pub mod plan;
pub mod registration;
pub mod registry;
pub mod repository;

pub use chain::run_chain;
pub use interceptor::{EchoStrategy, Interceptor, Phase, Strategy};
pub use plan::{DispatchPlan, PlanEntry};
pub use registration::{InterceptorSpec, Registration, StrategySpec};
pub use registry::RegistrationStore;
pub use repository::Repository;

// Re-export commonly used core types
pub use switchboard_core::{Args, BoxError, DispatchError, DispatchResult, Number, Value};
