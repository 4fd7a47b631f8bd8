//! Keyboard shortcut scope
//!
//! Global shortcuts only fire while the active scope matches the scope they
//! were registered under. The shell claims `app` while mounted.

/// Scope claimed by the application shell
pub const APP_SCOPE: &str = "app";

#[derive(Debug, Default, Clone)]
pub struct KeyScopeRegistry {
    scope: Option<String>,
}

impl KeyScopeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_scope(&mut self, scope: impl Into<String>) {
        self.scope = Some(scope.into());
    }

    /// Return to no active scope
    pub fn reset(&mut self) {
        self.scope = None;
    }

    pub fn current(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn is_active(&self, scope: &str) -> bool {
        self.current() == Some(scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_reset() {
        let mut registry = KeyScopeRegistry::new();
        assert_eq!(registry.current(), None);

        registry.set_scope(APP_SCOPE);
        assert!(registry.is_active(APP_SCOPE));

        registry.reset();
        assert!(!registry.is_active(APP_SCOPE));
    }
}
