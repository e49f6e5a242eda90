//! Billing lifecycle handlers for a shared AWS sandbox account.
//!
//! `freeze` demotes every IAM user to read-only and launches the freeze
//! stack once the warning budget is reached. `nuke` launches the teardown
//! stack once the hard limit is reached. Both warn the billing alert topic
//! subscribers first.

pub mod cloud_formation_stack_client;
pub mod config;
pub mod error;
pub mod freeze;
pub mod iam_identity_client;
pub mod nuke;
pub mod sns_notification_client;
pub mod stack_request;

#[cfg(test)]
mod test_support;
