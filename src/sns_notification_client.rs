use async_trait::async_trait;
use rusoto_core::Region;
use rusoto_sns::{ListTopicsInput, PublishInput, Sns, SnsClient};

use crate::error::SandboxError;

#[async_trait]
pub trait Notify: Send + Sync {
    async fn list_topic_arns(&self) -> Result<Vec<String>, SandboxError>;
    async fn publish(&self, topic_arn: &str, message: &str) -> Result<(), SandboxError>;
}

pub struct SnsNotificationClient {
    client: SnsClient,
}

#[async_trait]
impl Notify for SnsNotificationClient {
    async fn list_topic_arns(&self) -> Result<Vec<String>, SandboxError> {
        let mut topic_arns = Vec::<String>::new();
        let mut next_token: Option<String> = None;
        loop {
            let page = self
                .client
                .list_topics(ListTopicsInput {
                    next_token: next_token.take(),
                    ..Default::default()
                })
                .await?;
            topic_arns.extend(
                page.topics
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|topic| topic.topic_arn),
            );
            next_token = page.next_token.filter(|token| !token.is_empty());
            if next_token.is_none() {
                return Ok(topic_arns);
            }
        }
    }

    async fn publish(&self, topic_arn: &str, message: &str) -> Result<(), SandboxError> {
        let response = self
            .client
            .publish(PublishInput {
                topic_arn: Some(topic_arn.to_string()),
                message: message.to_string(),
                ..Default::default()
            })
            .await?;
        log::debug!(
            "Published message {} to {}",
            response.message_id.unwrap_or_default(),
            topic_arn
        );
        Ok(())
    }
}

impl SnsNotificationClient {
    pub fn new(region: Region) -> Self {
        Self::new_with_client(SnsClient::new(region))
    }

    pub fn new_with_client(client: SnsClient) -> Self {
        SnsNotificationClient { client }
    }
}

/// Publishes `message` to every topic whose ARN contains `marker`.
/// Returns the notified ARNs; no match is not an error.
pub async fn publish_to_matching_topics<N>(
    notifier: &N,
    marker: &str,
    message: &str,
) -> Result<Vec<String>, SandboxError>
where
    N: Notify + ?Sized,
{
    let matching: Vec<String> = notifier
        .list_topic_arns()
        .await?
        .into_iter()
        .filter(|topic_arn| topic_arn.contains(marker))
        .collect();
    if matching.is_empty() {
        log::warn!("No topic matches {}, skipping notification", marker);
    }
    for topic_arn in &matching {
        notifier.publish(topic_arn, message).await?;
        log::info!("Notified subscribers of {}", topic_arn);
    }
    Ok(matching)
}
