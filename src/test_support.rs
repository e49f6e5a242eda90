//! In-memory stand-ins for the AWS services, recording every call.

use async_trait::async_trait;
use rusoto_core::RusotoError;
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::cloud_formation_stack_client::LaunchStack;
use crate::error::SandboxError;
use crate::iam_identity_client::IdentityDirectory;
use crate::sns_notification_client::Notify;
use crate::stack_request::StackRequest;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserState {
    pub policies: Vec<String>,
    pub groups: Vec<String>,
}

#[derive(Default)]
struct Directory {
    groups: BTreeMap<String, Vec<String>>,
    users: BTreeMap<String, UserState>,
    calls: Vec<String>,
}

#[derive(Default)]
pub struct FakeIdentity {
    directory: Mutex<Directory>,
    fail_on: Option<String>,
}

impl FakeIdentity {
    pub fn with_user(self, user_name: &str, policies: &[&str], groups: &[&str]) -> Self {
        {
            let mut directory = self.directory.lock().unwrap();
            for group in groups {
                directory.groups.entry(group.to_string()).or_default();
            }
            directory.users.insert(
                user_name.to_string(),
                UserState {
                    policies: policies.iter().map(|p| p.to_string()).collect(),
                    groups: groups.iter().map(|g| g.to_string()).collect(),
                },
            );
        }
        self
    }

    pub fn with_group(self, group_name: &str, policies: &[&str]) -> Self {
        self.directory.lock().unwrap().groups.insert(
            group_name.to_string(),
            policies.iter().map(|p| p.to_string()).collect(),
        );
        self
    }

    /// Fails the first call whose recorded form equals `call`, e.g. `AddUserToGroup(bob)`.
    pub fn failing_on(mut self, call: &str) -> Self {
        self.fail_on = Some(call.to_string());
        self
    }

    pub fn user(&self, user_name: &str) -> Option<UserState> {
        self.directory.lock().unwrap().users.get(user_name).cloned()
    }

    pub fn group_policies(&self, group_name: &str) -> Option<Vec<String>> {
        self.directory.lock().unwrap().groups.get(group_name).cloned()
    }

    pub fn group_count(&self) -> usize {
        self.directory.lock().unwrap().groups.len()
    }

    pub fn calls(&self) -> Vec<String> {
        self.directory.lock().unwrap().calls.clone()
    }

    fn record<E>(
        &self,
        call: String,
        variant: fn(RusotoError<E>) -> SandboxError,
    ) -> Result<(), SandboxError> {
        let mut directory = self.directory.lock().unwrap();
        let failing = self.fail_on.as_deref() == Some(call.as_str());
        directory.calls.push(call);
        if failing {
            Err(injected_failure(variant))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl IdentityDirectory for FakeIdentity {
    async fn group_exists(&self, group_name: &str) -> Result<bool, SandboxError> {
        self.record(format!("GetGroup({})", group_name), SandboxError::GetGroup)?;
        Ok(self
            .directory
            .lock()
            .unwrap()
            .groups
            .contains_key(group_name))
    }

    async fn create_group(&self, group_name: &str) -> Result<(), SandboxError> {
        self.record(format!("CreateGroup({})", group_name), SandboxError::CreateGroup)?;
        self.directory
            .lock()
            .unwrap()
            .groups
            .insert(group_name.to_string(), Vec::new());
        Ok(())
    }

    async fn attach_group_policy(
        &self,
        group_name: &str,
        policy_arn: &str,
    ) -> Result<(), SandboxError> {
        self.record(
            format!("AttachGroupPolicy({}, {})", group_name, policy_arn),
            SandboxError::AttachGroupPolicy,
        )?;
        self.directory
            .lock()
            .unwrap()
            .groups
            .entry(group_name.to_string())
            .or_default()
            .push(policy_arn.to_string());
        Ok(())
    }

    async fn list_user_names(&self) -> Result<Vec<String>, SandboxError> {
        self.record("ListUsers".to_string(), SandboxError::ListUsers)?;
        Ok(self
            .directory
            .lock()
            .unwrap()
            .users
            .keys()
            .cloned()
            .collect())
    }

    async fn list_attached_user_policies(
        &self,
        user_name: &str,
    ) -> Result<Vec<String>, SandboxError> {
        self.record(
            format!("ListAttachedUserPolicies({})", user_name),
            SandboxError::ListAttachedUserPolicies,
        )?;
        Ok(self
            .user(user_name)
            .map(|user| user.policies)
            .unwrap_or_default())
    }

    async fn detach_user_policy(
        &self,
        user_name: &str,
        policy_arn: &str,
    ) -> Result<(), SandboxError> {
        self.record(
            format!("DetachUserPolicy({}, {})", user_name, policy_arn),
            SandboxError::DetachUserPolicy,
        )?;
        if let Some(user) = self.directory.lock().unwrap().users.get_mut(user_name) {
            user.policies.retain(|policy| policy != policy_arn);
        }
        Ok(())
    }

    async fn list_groups_for_user(&self, user_name: &str) -> Result<Vec<String>, SandboxError> {
        self.record(format!("ListGroupsForUser({})", user_name), SandboxError::ListGroupsForUser)?;
        Ok(self
            .user(user_name)
            .map(|user| user.groups)
            .unwrap_or_default())
    }

    async fn remove_user_from_group(
        &self,
        user_name: &str,
        group_name: &str,
    ) -> Result<(), SandboxError> {
        self.record(
            format!("RemoveUserFromGroup({}, {})", user_name, group_name),
            SandboxError::RemoveUserFromGroup,
        )?;
        if let Some(user) = self.directory.lock().unwrap().users.get_mut(user_name) {
            user.groups.retain(|group| group != group_name);
        }
        Ok(())
    }

    async fn add_user_to_group(
        &self,
        user_name: &str,
        group_name: &str,
    ) -> Result<(), SandboxError> {
        self.record(
            format!("AddUserToGroup({}, {})", user_name, group_name),
            SandboxError::AddUserToGroup,
        )?;
        if let Some(user) = self.directory.lock().unwrap().users.get_mut(user_name) {
            if !user.groups.iter().any(|group| group == group_name) {
                user.groups.push(group_name.to_string());
            }
        }
        Ok(())
    }
}

fn injected_failure<E>(variant: fn(RusotoError<E>) -> SandboxError) -> SandboxError {
    variant(RusotoError::Validation("injected failure".to_string()))
}

#[derive(Default)]
pub struct FakeNotifier {
    topics: Vec<String>,
    published: Mutex<Vec<(String, String)>>,
    list_calls: Mutex<usize>,
    fail_on: Option<String>,
}

impl FakeNotifier {
    pub fn with_topics(topics: &[&str]) -> Self {
        FakeNotifier {
            topics: topics.iter().map(|topic| topic.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Fails `ListTopics` or `Publish(<topic arn>)`.
    pub fn failing_on(mut self, call: &str) -> Self {
        self.fail_on = Some(call.to_string());
        self
    }

    pub fn published(&self) -> Vec<(String, String)> {
        self.published.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }

    fn fails(&self, call: &str) -> bool {
        self.fail_on.as_deref() == Some(call)
    }
}

#[async_trait]
impl Notify for FakeNotifier {
    async fn list_topic_arns(&self) -> Result<Vec<String>, SandboxError> {
        *self.list_calls.lock().unwrap() += 1;
        if self.fails("ListTopics") {
            return Err(injected_failure(SandboxError::ListTopics));
        }
        Ok(self.topics.clone())
    }

    async fn publish(&self, topic_arn: &str, message: &str) -> Result<(), SandboxError> {
        if self.fails(&format!("Publish({})", topic_arn)) {
            return Err(injected_failure(SandboxError::Publish));
        }
        self.published
            .lock()
            .unwrap()
            .push((topic_arn.to_string(), message.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeStackLauncher {
    requests: Mutex<Vec<StackRequest>>,
    failing: bool,
}

impl FakeStackLauncher {
    pub fn failing() -> Self {
        FakeStackLauncher {
            failing: true,
            ..Default::default()
        }
    }

    /// Requests the service accepted.
    pub fn requests(&self) -> Vec<StackRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LaunchStack for FakeStackLauncher {
    async fn create_stack(&self, request: &StackRequest) -> Result<Option<String>, SandboxError> {
        if self.failing {
            return Err(injected_failure(SandboxError::CreateStack));
        }
        self.requests.lock().unwrap().push(request.clone());
        Ok(Some(format!(
            "arn:aws:cloudformation:eu-west-3:123456789012:stack/{}/1",
            request.stack_name
        )))
    }
}
