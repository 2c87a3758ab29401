// Environment-variable table abstraction.
// Every component reaches ambient process state through this trait so tests
// can substitute an in-memory table instead of mutating the real process.

use std::collections::HashMap;

use parking_lot::RwLock;

/// Read/write access to an environment-variable table.
pub trait EnvironmentProvider: Send + Sync {
    /// Look up a variable. Returns `None` when the variable is unset.
    fn get(&self, name: &str) -> Option<String>;

    /// Set a variable, overwriting any existing value.
    fn set(&self, name: &str, value: &str);

    /// A point-in-time copy of the whole table.
    fn snapshot(&self) -> HashMap<String, String>;
}

/// The real process environment table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl EnvironmentProvider for ProcessEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn set(&self, name: &str, value: &str) {
        std::env::set_var(name, value);
    }

    fn snapshot(&self) -> HashMap<String, String> {
        std::env::vars().collect()
    }
}

/// An in-memory environment table. Useful for tests.
#[derive(Debug, Default)]
pub struct MemoryEnvironment {
    vars: RwLock<HashMap<String, String>>,
}

impl MemoryEnvironment {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table pre-populated with the given variables.
    pub fn with_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: RwLock::new(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Remove a variable from the table.
    pub fn remove(&self, name: &str) {
        self.vars.write().remove(name);
    }
}

impl EnvironmentProvider for MemoryEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.read().get(name).cloned()
    }

    fn set(&self, name: &str, value: &str) {
        self.vars.write().insert(name.to_string(), value.to_string());
    }

    fn snapshot(&self) -> HashMap<String, String> {
        self.vars.read().clone()
    }
}
