use super::Summary;

/// The data a provider extracted during a run, paired with its comparison against the previous run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedInfo<T> {
    pub data: T,
    pub summaries: Vec<Summary>,
}

/// Outcome of running a single provider.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderResult<T> {
    /// Extraction succeeded.
    Extracted(ExtractedInfo<T>),

    /// Extraction failed. The message is prefixed with the provider's identifier.
    Failed(String),
}

impl<T> ProviderResult<T> {
    /// Returns `true` if the result is `Extracted`.
    #[must_use]
    pub const fn is_extracted(&self) -> bool {
        matches!(self, Self::Extracted(_))
    }

    /// Returns a reference to the extracted info, otherwise `None`.
    #[must_use]
    pub const fn as_ref(&self) -> Option<&ExtractedInfo<T>> {
        match self {
            Self::Extracted(info) => Some(info),
            Self::Failed(_) => None,
        }
    }

    /// Returns the failure message, otherwise `None`.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Extracted(_) => None,
            Self::Failed(message) => Some(message),
        }
    }
}
