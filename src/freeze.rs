use serde::Serialize;

use crate::cloud_formation_stack_client::LaunchStack;
use crate::config::{Config, FreezeSettings};
use crate::error::SandboxError;
use crate::iam_identity_client::IdentityDirectory;
use crate::sns_notification_client::{publish_to_matching_topics, Notify};
use crate::stack_request::StackRequest;

#[derive(Debug, PartialEq, Serialize)]
pub struct FreezeReport {
    pub notified_topics: Vec<String>,
    pub demoted_users: Vec<String>,
    pub stack_id: Option<String>,
}

/// Resolves the configuration through `lookup`, then runs the freeze.
/// A missing token fails before any service is called.
pub async fn handle_freeze<F, I, N, S>(
    lookup: F,
    settings: &FreezeSettings,
    identity: &I,
    notifier: &N,
    launcher: &S,
) -> Result<FreezeReport, SandboxError>
where
    F: Fn(&str) -> Option<String>,
    I: IdentityDirectory + ?Sized,
    N: Notify + ?Sized,
    S: LaunchStack + ?Sized,
{
    let config = Config::from_lookup(lookup)?;
    run_freeze(&config, settings, identity, notifier, launcher).await
}

pub async fn run_freeze<I, N, S>(
    config: &Config,
    settings: &FreezeSettings,
    identity: &I,
    notifier: &N,
    launcher: &S,
) -> Result<FreezeReport, SandboxError>
where
    I: IdentityDirectory + ?Sized,
    N: Notify + ?Sized,
    S: LaunchStack + ?Sized,
{
    ensure_read_only_group(
        identity,
        &settings.read_only_group,
        &settings.read_only_policy_arn,
    )
    .await?;

    let notified_topics =
        publish_to_matching_topics(notifier, &settings.topic_marker, &settings.warning_message)
            .await?;

    let demoted_users = demote_all_users(identity, &settings.read_only_group).await?;

    let request = StackRequest::freeze(config, settings);
    let stack_id = launcher.create_stack(&request).await?;
    log::info!(
        "Requested stack {} ({})",
        request.stack_name,
        stack_id.as_deref().unwrap_or("no stack id")
    );

    Ok(FreezeReport {
        notified_topics,
        demoted_users,
        stack_id,
    })
}

/// Creates the read-only group with its policy unless it already exists.
/// Returns whether the group was created.
pub async fn ensure_read_only_group<I>(
    identity: &I,
    group_name: &str,
    policy_arn: &str,
) -> Result<bool, SandboxError>
where
    I: IdentityDirectory + ?Sized,
{
    if identity.group_exists(group_name).await? {
        return Ok(false);
    }
    identity.create_group(group_name).await?;
    identity.attach_group_policy(group_name, policy_arn).await?;
    log::info!("Created group {} with policy {}", group_name, policy_arn);
    Ok(true)
}

/// Moves one user to read-only access.
///
/// The steps run strictly in this order, so a failure never leaves the user
/// in the read-only group while still holding an elevated policy or group:
/// 1. detach every attached managed policy,
/// 2. leave every group,
/// 3. join `read_only_group`.
pub async fn demote_user<I>(
    identity: &I,
    user_name: &str,
    read_only_group: &str,
) -> Result<(), SandboxError>
where
    I: IdentityDirectory + ?Sized,
{
    for policy_arn in identity.list_attached_user_policies(user_name).await? {
        log::debug!("Detaching {} from {}", policy_arn, user_name);
        identity.detach_user_policy(user_name, &policy_arn).await?;
    }

    for group_name in identity.list_groups_for_user(user_name).await? {
        log::debug!("Removing {} from {}", user_name, group_name);
        identity
            .remove_user_from_group(user_name, &group_name)
            .await?;
    }

    identity.add_user_to_group(user_name, read_only_group).await
}

/// Demotes every user in the account. Stops at the first failure without
/// rolling back users already demoted.
pub async fn demote_all_users<I>(
    identity: &I,
    read_only_group: &str,
) -> Result<Vec<String>, SandboxError>
where
    I: IdentityDirectory + ?Sized,
{
    let user_names = identity.list_user_names().await?;
    for user_name in &user_names {
        demote_user(identity, user_name, read_only_group).await?;
        log::info!("Demoted {} to {}", user_name, read_only_group);
    }
    Ok(user_names)
}
