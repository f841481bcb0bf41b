//! Command-line overrides (highest precedence layer).
//!
//! Values here were already validated when the arguments were parsed.

use std::collections::BTreeMap;

use super::schema::{OptionKey, OptionValue};

/// Option values supplied on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    values: BTreeMap<OptionKey, OptionValue>,
}

impl CliOverrides {
    /// Create empty overrides (no overrides applied).
    pub fn none() -> Self {
        Self::default()
    }

    /// Check if any overrides are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, key: OptionKey) -> Option<&OptionValue> {
        self.values.get(&key)
    }

    pub fn set(&mut self, key: OptionKey, value: OptionValue) {
        self.values.insert(key, value);
    }

    /// Builder-style `set`.
    pub fn with(mut self, key: OptionKey, value: OptionValue) -> Self {
        self.set(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}
