use std::error::Error;

use rusoto_cloudformation::CreateStackError;
use rusoto_core::RusotoError;
use rusoto_iam::{
    AddUserToGroupError, AttachGroupPolicyError, CreateGroupError, DetachUserPolicyError,
    GetGroupError, ListAttachedUserPoliciesError, ListGroupsForUserError, ListUsersError,
    RemoveUserFromGroupError,
};
use rusoto_sns::{ListTopicsError, PublishError};
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq)]
pub enum SandboxError {
    MissingConfiguration(&'static str),
    GetGroup(RusotoError<GetGroupError>),
    CreateGroup(RusotoError<CreateGroupError>),
    AttachGroupPolicy(RusotoError<AttachGroupPolicyError>),
    ListUsers(RusotoError<ListUsersError>),
    ListAttachedUserPolicies(RusotoError<ListAttachedUserPoliciesError>),
    DetachUserPolicy(RusotoError<DetachUserPolicyError>),
    ListGroupsForUser(RusotoError<ListGroupsForUserError>),
    RemoveUserFromGroup(RusotoError<RemoveUserFromGroupError>),
    AddUserToGroup(RusotoError<AddUserToGroupError>),
    ListTopics(RusotoError<ListTopicsError>),
    Publish(RusotoError<PublishError>),
    CreateStack(RusotoError<CreateStackError>),
}

impl SandboxError {
    /// Name of the service call that failed, or `None` when no call was made.
    pub fn call(&self) -> Option<&'static str> {
        match *self {
            SandboxError::MissingConfiguration(_) => None,
            SandboxError::GetGroup(_) => Some("GetGroup"),
            SandboxError::CreateGroup(_) => Some("CreateGroup"),
            SandboxError::AttachGroupPolicy(_) => Some("AttachGroupPolicy"),
            SandboxError::ListUsers(_) => Some("ListUsers"),
            SandboxError::ListAttachedUserPolicies(_) => Some("ListAttachedUserPolicies"),
            SandboxError::DetachUserPolicy(_) => Some("DetachUserPolicy"),
            SandboxError::ListGroupsForUser(_) => Some("ListGroupsForUser"),
            SandboxError::RemoveUserFromGroup(_) => Some("RemoveUserFromGroup"),
            SandboxError::AddUserToGroup(_) => Some("AddUserToGroup"),
            SandboxError::ListTopics(_) => Some("ListTopics"),
            SandboxError::Publish(_) => Some("Publish"),
            SandboxError::CreateStack(_) => Some("CreateStack"),
        }
    }

    fn service_error(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            SandboxError::MissingConfiguration(_) => None,
            SandboxError::GetGroup(ref error) => Some(error),
            SandboxError::CreateGroup(ref error) => Some(error),
            SandboxError::AttachGroupPolicy(ref error) => Some(error),
            SandboxError::ListUsers(ref error) => Some(error),
            SandboxError::ListAttachedUserPolicies(ref error) => Some(error),
            SandboxError::DetachUserPolicy(ref error) => Some(error),
            SandboxError::ListGroupsForUser(ref error) => Some(error),
            SandboxError::RemoveUserFromGroup(ref error) => Some(error),
            SandboxError::AddUserToGroup(ref error) => Some(error),
            SandboxError::ListTopics(ref error) => Some(error),
            SandboxError::Publish(ref error) => Some(error),
            SandboxError::CreateStack(ref error) => Some(error),
        }
    }
}

impl Display for SandboxError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            SandboxError::MissingConfiguration(key) => {
                write!(f, "Missing required configuration value {}", key)
            }
            _ => match (self.call(), self.service_error()) {
                (Some(call), Some(error)) => write!(f, "{} failed: {}", call, error),
                _ => write!(f, "Service call failed"),
            },
        }
    }
}

impl Error for SandboxError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.service_error()
    }
}

macro_rules! impl_from_rusoto_error {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<RusotoError<$error>> for SandboxError {
                fn from(e: RusotoError<$error>) -> SandboxError {
                    SandboxError::$variant(e)
                }
            }
        )+
    };
}

impl_from_rusoto_error! {
    GetGroupError => GetGroup,
    CreateGroupError => CreateGroup,
    AttachGroupPolicyError => AttachGroupPolicy,
    ListUsersError => ListUsers,
    ListAttachedUserPoliciesError => ListAttachedUserPolicies,
    DetachUserPolicyError => DetachUserPolicy,
    ListGroupsForUserError => ListGroupsForUser,
    RemoveUserFromGroupError => RemoveUserFromGroup,
    AddUserToGroupError => AddUserToGroup,
    ListTopicsError => ListTopics,
    PublishError => Publish,
    CreateStackError => CreateStack,
}
