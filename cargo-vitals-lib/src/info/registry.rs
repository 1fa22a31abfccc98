use super::history::PROJECT_INFO_KEY;
use super::provider::{Extraction, InfoProvider, Registered};
use crate::Result;
use core::fmt::Debug;
use ohno::app_err;

/// The ordered set of providers executed during a run.
///
/// Providers run in registration order, which is also the order of their summaries in the report.
#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<Box<dyn Extraction>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider to the registry.
    ///
    /// # Errors
    ///
    /// Fails if the identifier is empty, reserved, or already registered.
    pub fn register<P>(&mut self, provider: P, args: Option<P::Args>) -> Result<()>
    where
        P: InfoProvider + Debug + 'static,
    {
        let identifier = provider.identifier();

        if identifier.is_empty() {
            return Err(app_err!("provider identifiers cannot be empty"));
        }

        if identifier == PROJECT_INFO_KEY {
            return Err(app_err!("'{identifier}' is reserved and cannot be used as a provider identifier"));
        }

        if self.contains(identifier) {
            return Err(app_err!("a provider with identifier '{identifier}' is already registered"));
        }

        self.entries.push(Box::new(Registered::new(provider, args)));
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.iter().any(|e| e.identifier() == identifier)
    }

    /// Identifiers in registration order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.identifier())
    }

    #[must_use]
    pub fn entries(&self) -> &[Box<dyn Extraction>] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
