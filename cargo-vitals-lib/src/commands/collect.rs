use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::delivery::WebhookClient;
use crate::info::providers::registry_for;
use crate::info::{Context, Output, ProjectInfo, RunProjectInfo, Runner};
use crate::reports::{generate_console, generate_json, webhook};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::Parser;
use ohno::{AppError, IntoAppError};
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "   collect";

#[derive(Parser, Debug)]
pub struct CollectArgs {
    /// Identifier of the build being measured, recorded with the run
    #[arg(long, value_name = "ID", env = "VITALS_BUILD_NUMBER")]
    pub build_number: Option<String>,

    /// Don't append this run to the history file
    #[arg(long)]
    pub no_save: bool,

    /// Don't post the report to the webhook
    #[arg(long)]
    pub no_send: bool,

    /// Webhook receiving the report, overrides `webhook_url` from the configuration
    #[arg(long, value_name = "URL", env = "VITALS_WEBHOOK_URL")]
    pub webhook_url: Option<String>,

    /// Also write the report as JSON to this file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Exit with an error when the report cannot be delivered to the webhook
    #[arg(long)]
    pub error_if_delivery_fails: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Extract every configured metric, report the deltas, then record and deliver the run.
pub async fn collect_vitals<H: Host>(host: &mut H, args: &CollectArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let config = &common.config;

    let project = ProjectInfo::from_metadata(&common.metadata, &config.project, args.build_number.clone())?;
    let registry = registry_for(&config.providers, &config.settings)?;

    let store = common.history_store();
    let history = match store.load() {
        Ok(history) => history,
        Err(e) => {
            let _ = writeln!(host.error(), "Fatal error: {e:#}");
            return Err(e);
        }
    };

    log::info!(target: LOG_TARGET, "Measuring {project} with {} provider(s)", registry.len());

    let context = Context::new(
        common.workspace_root(),
        common.metadata.target_directory.clone(),
        project.clone(),
        config.toolchain.clone(),
    );
    let runner = Runner::new(context, history);
    let output = runner.run(&registry);

    let mut console_output = String::new();
    generate_console(&output, &project, common.use_colors, &mut console_output)?;
    let _ = write!(host.output(), "{console_output}");

    let mut failure: Option<AppError> = None;

    if let Some(filename) = &args.json
        && let Err(e) = write_json_report(&output, &project, filename)
    {
        let _ = writeln!(host.error(), "Unable to write the JSON report: {e:#}");
        failure = Some(e);
    }

    if args.no_save {
        log::info!(target: LOG_TARGET, "Not saving this run");
    } else {
        let record = output.clone().into_run_record(RunProjectInfo::new(&project, Utc::now()));
        if let Err(e) = store.save(record, runner.history()) {
            let _ = writeln!(host.error(), "Fatal error: {e:#}");
            let _ = failure.get_or_insert(e);
        }
    }

    let webhook_url = args.webhook_url.as_ref().or(config.webhook_url.as_ref());
    if args.no_send {
        log::info!(target: LOG_TARGET, "Not sending the report");
    } else if let Some(url) = webhook_url {
        let payload = webhook::generate(&output, &project);
        let delivered = match WebhookClient::new(url) {
            Ok(client) => client.post(&payload).await,
            Err(e) => Err(e),
        };

        if let Err(e) = delivered {
            let _ = writeln!(host.error(), "Unable to deliver the report: {e:#}");
            if args.error_if_delivery_fails && failure.is_none() {
                failure = Some(e);
            }
        }
    } else {
        log::debug!(target: LOG_TARGET, "No webhook configured");
    }

    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn write_json_report(output: &Output, project: &ProjectInfo, filename: &Utf8Path) -> Result<()> {
    let mut json_output = String::new();
    generate_json(output, project, &mut json_output)?;
    fs::write(filename, json_output).into_app_err_with(|| format!("writing JSON report to '{filename}'"))
}
