// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Environment variable access
//!
//! Configuration reads go through [`EnvSource`] so callers and tests can
//! supply variables without touching the process environment.

use std::collections::HashMap;

/// Named size tier or raw size string
pub const SIZE_VAR: &str = "LANGUAGEMODELS_SIZE";

/// License filter pattern
pub const LICENSE_VAR: &str = "LANGUAGEMODELS_MODEL_LICENSE";

/// Pinned instruct model name (testing only)
pub const INSTRUCT_MODEL_VAR: &str = "LANGUAGEMODELS_INSTRUCT_MODEL";

/// Override for the settings home directory
pub const HOME_VAR: &str = "LANGUAGEMODELS_HOME";

/// Source of environment-style configuration values
pub trait EnvSource: Send + Sync {
    fn var(&self, key: &str) -> Option<String>;

    /// Value of `key`, treating an empty string as unset
    fn non_empty(&self, key: &str) -> Option<String> {
        self.var(key).filter(|v| !v.is_empty())
    }
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for HashMap<&'static str, &'static str> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_source() {
        let env: HashMap<&'static str, &'static str> =
            HashMap::from([(SIZE_VAR, "large"), (LICENSE_VAR, "")]);
        assert_eq!(env.var(SIZE_VAR).as_deref(), Some("large"));
        assert_eq!(env.var(LICENSE_VAR).as_deref(), Some(""));
        assert_eq!(env.non_empty(LICENSE_VAR), None);
        assert_eq!(env.var(INSTRUCT_MODEL_VAR), None);
    }

    #[test]
    fn test_owned_map_source() {
        let mut env = HashMap::new();
        env.insert(SIZE_VAR.to_string(), "xl".to_string());
        assert_eq!(env.non_empty(SIZE_VAR).as_deref(), Some("xl"));
    }

    #[test]
    fn test_process_env_missing_var() {
        assert_eq!(
            ProcessEnv.var("LANGUAGEMODELS_TEST_DEFINITELY_UNSET_4821"),
            None
        );
    }
}
