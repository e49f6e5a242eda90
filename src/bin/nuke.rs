use anyhow::Context as _;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use rusoto_core::Region;
use sandbox_lifecycle::cloud_formation_stack_client::CloudFormationStackClient;
use sandbox_lifecycle::config::NukeSettings;
use sandbox_lifecycle::nuke::handle_nuke;
use sandbox_lifecycle::sns_notification_client::SnsNotificationClient;
use serde_json::Value;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Error> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .env()
        .init()
        .context("Unable to setup logging")?;
    lambda_runtime::run(service_fn(nuke_handler)).await?;
    Ok(())
}

async fn nuke_handler(_: LambdaEvent<Value>) -> Result<Value, Error> {
    let region = Region::default();
    let report = handle_nuke(
        |key| env::var(key).ok(),
        &NukeSettings::default(),
        &SnsNotificationClient::new(region.clone()),
        &CloudFormationStackClient::new(region),
    )
    .await
    .map_err(|error| {
        log::error!("Nuke failed: {}", error);
        error
    })?;
    Ok(serde_json::to_value(report)?)
}
