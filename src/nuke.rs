use serde::Serialize;

use crate::cloud_formation_stack_client::LaunchStack;
use crate::config::{Config, NukeSettings};
use crate::error::SandboxError;
use crate::sns_notification_client::{publish_to_matching_topics, Notify};
use crate::stack_request::StackRequest;

#[derive(Debug, PartialEq, Serialize)]
pub struct NukeReport {
    pub notified_topics: Vec<String>,
    pub stack_id: Option<String>,
}

pub async fn handle_nuke<F, N, S>(
    lookup: F,
    settings: &NukeSettings,
    notifier: &N,
    launcher: &S,
) -> Result<NukeReport, SandboxError>
where
    F: Fn(&str) -> Option<String>,
    N: Notify + ?Sized,
    S: LaunchStack + ?Sized,
{
    let config = Config::from_lookup(lookup)?;
    run_nuke(&config, settings, notifier, launcher).await
}

/// Warns the billing topic subscribers, then requests the teardown stack.
pub async fn run_nuke<N, S>(
    config: &Config,
    settings: &NukeSettings,
    notifier: &N,
    launcher: &S,
) -> Result<NukeReport, SandboxError>
where
    N: Notify + ?Sized,
    S: LaunchStack + ?Sized,
{
    let notified_topics =
        publish_to_matching_topics(notifier, &settings.topic_marker, &settings.limit_message)
            .await?;

    let request = StackRequest::nuke(config, settings);
    let stack_id = launcher.create_stack(&request).await?;
    log::info!(
        "Requested stack {} ({})",
        request.stack_name,
        stack_id.as_deref().unwrap_or("no stack id")
    );

    Ok(NukeReport {
        notified_topics,
        stack_id,
    })
}
