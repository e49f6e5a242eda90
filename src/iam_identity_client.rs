use async_trait::async_trait;
use rusoto_core::{Region, RusotoError};
use rusoto_iam::{
    AddUserToGroupRequest, AttachGroupPolicyRequest, CreateGroupRequest, DetachUserPolicyRequest,
    GetGroupError, GetGroupRequest, Iam, IamClient, ListAttachedUserPoliciesRequest,
    ListGroupsForUserRequest, ListUsersRequest, RemoveUserFromGroupRequest,
};

use crate::error::SandboxError;

/// Identity operations the freeze handler needs. List calls return every page.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    async fn group_exists(&self, group_name: &str) -> Result<bool, SandboxError>;
    async fn create_group(&self, group_name: &str) -> Result<(), SandboxError>;
    async fn attach_group_policy(
        &self,
        group_name: &str,
        policy_arn: &str,
    ) -> Result<(), SandboxError>;
    async fn list_user_names(&self) -> Result<Vec<String>, SandboxError>;
    async fn list_attached_user_policies(
        &self,
        user_name: &str,
    ) -> Result<Vec<String>, SandboxError>;
    async fn detach_user_policy(&self, user_name: &str, policy_arn: &str)
        -> Result<(), SandboxError>;
    async fn list_groups_for_user(&self, user_name: &str) -> Result<Vec<String>, SandboxError>;
    async fn remove_user_from_group(
        &self,
        user_name: &str,
        group_name: &str,
    ) -> Result<(), SandboxError>;
    async fn add_user_to_group(&self, user_name: &str, group_name: &str)
        -> Result<(), SandboxError>;
}

pub struct IamIdentityClient {
    client: IamClient,
}

#[async_trait]
impl IdentityDirectory for IamIdentityClient {
    async fn group_exists(&self, group_name: &str) -> Result<bool, SandboxError> {
        let result = self
            .client
            .get_group(GetGroupRequest {
                group_name: group_name.to_string(),
                ..Default::default()
            })
            .await;
        match result {
            Ok(_) => Ok(true),
            Err(RusotoError::Service(GetGroupError::NoSuchEntity(_))) => Ok(false),
            Err(error) => Err(error.into()),
        }
    }

    async fn create_group(&self, group_name: &str) -> Result<(), SandboxError> {
        self.client
            .create_group(CreateGroupRequest {
                group_name: group_name.to_string(),
                ..Default::default()
            })
            .await?;
        Ok(())
    }

    async fn attach_group_policy(
        &self,
        group_name: &str,
        policy_arn: &str,
    ) -> Result<(), SandboxError> {
        self.client
            .attach_group_policy(AttachGroupPolicyRequest {
                group_name: group_name.to_string(),
                policy_arn: policy_arn.to_string(),
            })
            .await?;
        Ok(())
    }

    async fn list_user_names(&self) -> Result<Vec<String>, SandboxError> {
        let mut user_names = Vec::<String>::new();
        let mut marker: Option<String> = None;
        loop {
            let page = self
                .client
                .list_users(ListUsersRequest {
                    marker: marker.take(),
                    ..Default::default()
                })
                .await?;
            user_names.extend(page.users.into_iter().map(|user| user.user_name));
            marker = next_marker(page.is_truncated, page.marker);
            if marker.is_none() {
                return Ok(user_names);
            }
        }
    }

    async fn list_attached_user_policies(
        &self,
        user_name: &str,
    ) -> Result<Vec<String>, SandboxError> {
        let mut policy_arns = Vec::<String>::new();
        let mut marker: Option<String> = None;
        loop {
            let page = self
                .client
                .list_attached_user_policies(ListAttachedUserPoliciesRequest {
                    user_name: user_name.to_string(),
                    marker: marker.take(),
                    ..Default::default()
                })
                .await?;
            policy_arns.extend(
                page.attached_policies
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|policy| policy.policy_arn),
            );
            marker = next_marker(page.is_truncated, page.marker);
            if marker.is_none() {
                return Ok(policy_arns);
            }
        }
    }

    async fn detach_user_policy(
        &self,
        user_name: &str,
        policy_arn: &str,
    ) -> Result<(), SandboxError> {
        self.client
            .detach_user_policy(DetachUserPolicyRequest {
                user_name: user_name.to_string(),
                policy_arn: policy_arn.to_string(),
            })
            .await?;
        Ok(())
    }

    async fn list_groups_for_user(&self, user_name: &str) -> Result<Vec<String>, SandboxError> {
        let mut group_names = Vec::<String>::new();
        let mut marker: Option<String> = None;
        loop {
            let page = self
                .client
                .list_groups_for_user(ListGroupsForUserRequest {
                    user_name: user_name.to_string(),
                    marker: marker.take(),
                    ..Default::default()
                })
                .await?;
            group_names.extend(page.groups.into_iter().map(|group| group.group_name));
            marker = next_marker(page.is_truncated, page.marker);
            if marker.is_none() {
                return Ok(group_names);
            }
        }
    }

    async fn remove_user_from_group(
        &self,
        user_name: &str,
        group_name: &str,
    ) -> Result<(), SandboxError> {
        self.client
            .remove_user_from_group(RemoveUserFromGroupRequest {
                user_name: user_name.to_string(),
                group_name: group_name.to_string(),
            })
            .await?;
        Ok(())
    }

    async fn add_user_to_group(
        &self,
        user_name: &str,
        group_name: &str,
    ) -> Result<(), SandboxError> {
        self.client
            .add_user_to_group(AddUserToGroupRequest {
                user_name: user_name.to_string(),
                group_name: group_name.to_string(),
            })
            .await?;
        Ok(())
    }
}

impl IamIdentityClient {
    pub fn new(region: Region) -> Self {
        Self::new_with_client(IamClient::new(region))
    }

    pub fn new_with_client(client: IamClient) -> Self {
        IamIdentityClient { client }
    }
}

fn next_marker(is_truncated: Option<bool>, marker: Option<String>) -> Option<String> {
    if is_truncated.unwrap_or(false) {
        marker
    } else {
        None
    }
}
