use async_trait::async_trait;
use rusoto_cloudformation::{CloudFormation, CloudFormationClient, CreateStackInput};
use rusoto_core::Region;

use crate::error::SandboxError;
use crate::stack_request::StackRequest;

#[async_trait]
pub trait LaunchStack: Send + Sync {
    /// Requests stack creation and returns the stack id, without waiting for completion.
    async fn create_stack(&self, request: &StackRequest) -> Result<Option<String>, SandboxError>;
}

pub struct CloudFormationStackClient {
    client: CloudFormationClient,
}

#[async_trait]
impl LaunchStack for CloudFormationStackClient {
    async fn create_stack(&self, request: &StackRequest) -> Result<Option<String>, SandboxError> {
        let output = self
            .client
            .create_stack(CreateStackInput::from(request))
            .await?;
        Ok(output.stack_id)
    }
}

impl CloudFormationStackClient {
    pub fn new(region: Region) -> Self {
        Self::new_with_client(CloudFormationClient::new(region))
    }

    pub fn new_with_client(client: CloudFormationClient) -> Self {
        CloudFormationStackClient { client }
    }
}
