//! Name-based access gate.
//!
//! The gate keeps casual users out of the ledger commands. It compares a
//! name, ignoring case, against one configured literal and is not a security
//! boundary.

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Name accepted when no other is configured.
pub const DEFAULT_ACCESS_NAME: &str = "marc";

/// Gate that admits a single name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGate {
    name: String,
}

impl AccessGate {
    /// Create a gate admitting `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Whether `candidate` matches the admitted name, ignoring case and
    /// surrounding whitespace.
    #[must_use]
    pub fn admits(&self, candidate: &str) -> bool {
        candidate.trim().to_lowercase() == self.name.trim().to_lowercase()
    }

    /// Check a candidate name, which may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AccessDenied`] if no name was given or it does not
    /// match.
    pub fn check(&self, candidate: Option<&str>) -> Result<()> {
        match candidate {
            Some(name) if self.admits(name) => {
                debug!("access granted");
                Ok(())
            }
            Some(name) => {
                warn!("access denied for name {name:?}");
                Err(Error::AccessDenied)
            }
            None => {
                warn!("access denied: no name given");
                Err(Error::AccessDenied)
            }
        }
    }
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new(DEFAULT_ACCESS_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admits_ignoring_case() {
        let gate = AccessGate::default();
        assert!(gate.admits("marc"));
        assert!(gate.admits("MARC"));
        assert!(gate.admits(" Marc "));
    }

    #[test]
    fn test_rejects_other_names() {
        let gate = AccessGate::default();
        assert!(!gate.admits("marco"));
        assert!(!gate.admits(""));
    }

    #[test]
    fn test_check() {
        let gate = AccessGate::new("Anouk");
        assert!(gate.check(Some("anouk")).is_ok());
        assert!(matches!(gate.check(Some("marc")), Err(Error::AccessDenied)));
        assert!(matches!(gate.check(None), Err(Error::AccessDenied)));
    }
}
