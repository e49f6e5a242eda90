use crate::config::{Config, FreezeSettings, NukeSettings, STACK_CAPABILITIES};
use rusoto_cloudformation::{CreateStackInput, Parameter};

/// One-shot stack creation request. Parameters keep their declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct StackRequest {
    pub stack_name: String,
    pub template_url: String,
    pub capabilities: Vec<String>,
    pub parameters: Vec<(String, String)>,
}

impl StackRequest {
    pub fn freeze(config: &Config, settings: &FreezeSettings) -> Self {
        Self::with_parameters(
            &settings.stack_name,
            &settings.template_url,
            vec![
                ("GitToken", config.git_token.clone()),
                ("NotificationEmailAddress", settings.notification_email.clone()),
                ("WhenToExecute", settings.schedule_expression.clone()),
                ("RetentionInDays", settings.retention_in_days.to_string()),
                ("AWSFreezeProfileName", settings.freeze_profile_name.clone()),
            ],
        )
    }

    pub fn nuke(config: &Config, settings: &NukeSettings) -> Self {
        Self::with_parameters(
            &settings.stack_name,
            &settings.template_url,
            vec![
                ("GitUser", settings.git_user.clone()),
                ("GitRepo", settings.git_repo.clone()),
                ("GitBranch", settings.git_branch.clone()),
                ("GitToken", config.git_token.clone()),
                ("AWSNukeVersionNumber", settings.nuke_version.clone()),
                ("AWSNukeConfigFile", settings.nuke_config_file.clone()),
                ("AWSNukeProfileName", settings.nuke_profile_name.clone()),
            ],
        )
    }

    fn with_parameters(
        stack_name: &str,
        template_url: &str,
        parameters: Vec<(&str, String)>,
    ) -> Self {
        StackRequest {
            stack_name: stack_name.to_string(),
            template_url: template_url.to_string(),
            capabilities: STACK_CAPABILITIES
                .iter()
                .map(|capability| capability.to_string())
                .collect(),
            parameters: parameters
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        }
    }

    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

impl From<&StackRequest> for CreateStackInput {
    fn from(request: &StackRequest) -> Self {
        CreateStackInput {
            stack_name: request.stack_name.clone(),
            template_url: Some(request.template_url.clone()),
            capabilities: Some(request.capabilities.clone()),
            parameters: Some(
                request
                    .parameters
                    .iter()
                    .map(|(key, value)| Parameter {
                        parameter_key: Some(key.clone()),
                        parameter_value: Some(value.clone()),
                        ..Default::default()
                    })
                    .collect(),
            ),
            ..Default::default()
        }
    }
}
