use super::{Context, OutputBuilder, Runner, Summary};
use crate::Result;
use core::fmt::Debug;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A metric extractor.
///
/// A provider measures one aspect of the project (`extract`) and describes how the measurement
/// compares with the one recorded by the previous run (`summarize`). Its identifier is the key
/// under which the measurement is persisted, so it must stay stable across releases.
pub trait InfoProvider {
    /// The measurement produced by [`extract`](Self::extract).
    type Data: Serialize + DeserializeOwned + Clone + Debug;

    /// Provider-specific configuration, handed unmodified to both `extract` and `summarize`.
    type Args: Debug;

    /// The stable identifier of this provider.
    fn identifier(&self) -> &str;

    /// Take a fresh measurement.
    fn extract(&self, context: &Context, args: Option<&Self::Args>) -> Result<Self::Data>;

    /// Describe `current` relative to `previous`.
    ///
    /// `previous` is `None` when no earlier run recorded data for this provider, in which case
    /// the summary reports absolute values only. This must not fail; when nothing meaningful can
    /// be said, return an empty or informational list.
    fn summarize(&self, current: &Self::Data, previous: Option<&Self::Data>, args: Option<&Self::Args>) -> Vec<Summary>;
}

/// A provider bundled with its arguments, with the data type erased.
///
/// This is what a [`Registry`](super::Registry) stores so providers with different data types can
/// share one ordered list.
pub trait Extraction: Debug {
    fn identifier(&self) -> &str;

    /// Run the provider through `runner` and record its outcome in `output`.
    fn run(&self, runner: &Runner, output: &mut OutputBuilder);
}

#[derive(Debug)]
pub struct Registered<P: InfoProvider> {
    provider: P,
    args: Option<P::Args>,
}

impl<P: InfoProvider> Registered<P> {
    #[must_use]
    pub const fn new(provider: P, args: Option<P::Args>) -> Self {
        Self { provider, args }
    }
}

impl<P> Extraction for Registered<P>
where
    P: InfoProvider + Debug,
{
    fn identifier(&self) -> &str {
        self.provider.identifier()
    }

    fn run(&self, runner: &Runner, output: &mut OutputBuilder) {
        let result = runner.extract(&self.provider, self.args.as_ref());
        output.push(self.provider.identifier(), result);
    }
}
