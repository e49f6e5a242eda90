use crate::error::SandboxError;
use std::env;
use std::fmt;
use std::fmt::{Debug, Formatter};

pub const GIT_TOKEN_VARIABLE: &str = "GITHUBToken";

pub const BILLING_TOPIC_MARKER: &str = "BillingEmailAlertTopic";
pub const STACK_CAPABILITIES: [&str; 2] = ["CAPABILITY_IAM", "CAPABILITY_NAMED_IAM"];

/// Values resolved from the execution environment once per invocation.
#[derive(Clone, PartialEq)]
pub struct Config {
    pub git_token: String,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Config")
            .field("git_token", &"<redacted>")
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, SandboxError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves the configuration through `lookup`; an empty value counts as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SandboxError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let git_token = lookup(GIT_TOKEN_VARIABLE)
            .filter(|token| !token.is_empty())
            .ok_or(SandboxError::MissingConfiguration(GIT_TOKEN_VARIABLE))?;
        Ok(Config { git_token })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FreezeSettings {
    pub read_only_group: String,
    pub read_only_policy_arn: String,
    pub topic_marker: String,
    pub warning_message: String,
    pub stack_name: String,
    pub template_url: String,
    pub notification_email: String,
    pub schedule_expression: String,
    pub retention_in_days: u32,
    pub freeze_profile_name: String,
}

impl Default for FreezeSettings {
    fn default() -> Self {
        Self {
            read_only_group: "datascientest-readonlyusers".to_string(),
            read_only_policy_arn: "arn:aws:iam::aws:policy/ReadOnlyAccess".to_string(),
            topic_marker: BILLING_TOPIC_MARKER.to_string(),
            warning_message: "You reached the warning level of your AWS sandbox budget. We’ll stop your resources to reduce unwanted billing.".to_string(),
            stack_name: "cfn-freeze-stack".to_string(),
            template_url: "https://cf-template-datascientest-sandboxes.s3.amazonaws.com/aws-freeze-service.yaml".to_string(),
            notification_email: "dst-student@datascientest.com".to_string(),
            schedule_expression: "cron(0 0 * * ? *)".to_string(),
            retention_in_days: 14,
            freeze_profile_name: "freeze".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NukeSettings {
    pub topic_marker: String,
    pub limit_message: String,
    pub stack_name: String,
    pub template_url: String,
    pub git_user: String,
    pub git_repo: String,
    pub git_branch: String,
    pub nuke_version: String,
    pub nuke_config_file: String,
    pub nuke_profile_name: String,
}

impl Default for NukeSettings {
    fn default() -> Self {
        Self {
            topic_marker: BILLING_TOPIC_MARKER.to_string(),
            limit_message: "You have reached the limit of your AWS sandbox budget. We’ll proceed with the reset of this environment and destroy all the resources.".to_string(),
            stack_name: "cfn-nuke-stack".to_string(),
            template_url: "https://cf-template-datascientest-sandboxes.s3.amazonaws.com/aws-wipe-service.yaml".to_string(),
            git_user: "antho-data".to_string(),
            git_repo: "sandbox-automation".to_string(),
            git_branch: "main".to_string(),
            nuke_version: "2.21.0".to_string(),
            nuke_config_file: "aws-nuke-config/config.yaml".to_string(),
            nuke_profile_name: "nuke".to_string(),
        }
    }
}
