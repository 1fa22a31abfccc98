use super::provider::InfoProvider;
use super::{Context, ExtractedInfo, History, Output, OutputBuilder, ProviderResult, Registry};

const LOG_TARGET: &str = "    runner";

/// Runs providers against the current project and the recorded history.
///
/// Providers run one at a time in registration order. A failing provider is reported in the
/// output and never stops the others.
#[derive(Debug)]
pub struct Runner {
    context: Context,
    history: History,
}

impl Runner {
    #[must_use]
    pub const fn new(context: Context, history: History) -> Self {
        Self { context, history }
    }

    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.context
    }

    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Run every registered provider and aggregate the outcomes.
    #[must_use]
    pub fn run(&self, registry: &Registry) -> Output {
        let mut output = OutputBuilder::new();
        for entry in registry.entries() {
            entry.run(self, &mut output);
        }

        output.build()
    }

    /// Run a single provider end to end.
    pub fn extract<P: InfoProvider>(&self, provider: &P, args: Option<&P::Args>) -> ProviderResult<P::Data> {
        let identifier = provider.identifier();
        log::info!(target: LOG_TARGET, "Extracting {identifier}");

        let data = match provider.extract(&self.context, args) {
            Ok(data) => data,
            Err(e) => {
                let message = format!("{identifier}: {e}");
                log::error!(target: LOG_TARGET, "{message}");
                return ProviderResult::Failed(message);
            }
        };

        log::debug!(target: LOG_TARGET, "{identifier}: Looking up previously extracted data");
        let previous = self.history.last_extracted::<P::Data>(identifier);
        if previous.is_none() {
            log::debug!(target: LOG_TARGET, "{identifier}: No previous data to compare with");
        }

        log::debug!(target: LOG_TARGET, "{identifier}: Comparing with previously extracted data");
        let summaries = provider.summarize(&data, previous.as_ref(), args);

        log::debug!(target: LOG_TARGET, "{identifier}: Finished");
        ProviderResult::Extracted(ExtractedInfo { data, summaries })
    }
}
