//! Registration store for repository configuration lookup.

use crate::registration::Registration;
use dashmap::DashMap;
use std::sync::Arc;

/// Concurrent registration store.
///
/// Thread-safe map from repository identity to its [`Registration`].
/// Populated at configuration time, before the first call goes through a
/// repository; pure lookup afterwards.
#[derive(Default)]
pub struct RegistrationStore {
    registrations: DashMap<String, Arc<Registration>>,
}

impl RegistrationStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            registrations: DashMap::new(),
        }
    }

    /// Register a repository identity, replacing any previous registration
    /// under the same identity.
    pub fn register(&self, identity: impl Into<String>, registration: Registration) {
        let identity = identity.into();
        tracing::info!(
            repository = %identity,
            operations = registration.operations().len(),
            wrappers = registration.wrappers().len(),
            "Registered repository"
        );
        self.registrations.insert(identity, Arc::new(registration));
    }

    /// Look up the registration for a repository identity.
    pub fn lookup(&self, identity: &str) -> Option<Arc<Registration>> {
        self.registrations
            .get(identity)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Check if an identity is registered.
    pub fn contains(&self, identity: &str) -> bool {
        self.registrations.contains_key(identity)
    }

    /// List all registered identities.
    pub fn list_names(&self) -> Vec<String> {
        self.registrations
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Remove a registration.
    ///
    /// Returns true if an entry was removed. Repositories already
    /// constructed over the old registration keep dispatching against it.
    pub fn unregister(&self, identity: &str) -> bool {
        self.registrations.remove(identity).is_some()
    }

    /// Clear all registrations.
    pub fn clear(&self) {
        self.registrations.clear();
    }

    /// Get the number of registrations.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interceptor::EchoStrategy;
    use crate::registration::StrategySpec;

    fn echo_registration() -> Registration {
        Registration::new(["find"]).with_strategy(StrategySpec::new("echo", || EchoStrategy))
    }

    #[test]
    fn test_store_creation() {
        let store = RegistrationStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_register_and_lookup() {
        let store = RegistrationStore::new();
        store.register("users", echo_registration());

        assert_eq!(store.len(), 1);
        assert!(store.contains("users"));
        assert!(store.lookup("users").is_some());
        assert!(store.lookup("orders").is_none());
    }

    #[test]
    fn test_register_replaces() {
        let store = RegistrationStore::new();
        store.register("users", echo_registration());
        store.register(
            "users",
            Registration::new(["find", "delete"])
                .with_strategy(StrategySpec::new("echo", || EchoStrategy)),
        );

        assert_eq!(store.len(), 1);
        let registration = store.lookup("users").unwrap();
        assert!(registration.declares("delete"));
    }

    #[test]
    fn test_unregister() {
        let store = RegistrationStore::new();
        store.register("users", echo_registration());

        assert!(store.unregister("users"));
        assert!(!store.unregister("users"));
        assert!(!store.contains("users"));
    }

    #[test]
    fn test_list_names() {
        let store = RegistrationStore::new();
        store.register("users", echo_registration());
        store.register("orders", echo_registration());

        let mut names = store.list_names();
        names.sort();
        assert_eq!(names, vec!["orders".to_string(), "users".to_string()]);
    }
}
