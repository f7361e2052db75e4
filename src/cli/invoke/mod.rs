//! Invoke command - runs the deploy handler on a raw event

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::config::DeployConfig;
use crate::infrastructure::cloudformation::CloudFormationProvisioner;
use crate::infrastructure::services::DeployService;

/// Arguments for the invoke command
#[derive(Args, Clone)]
pub struct InvokeArgs {
    /// Event JSON file; read from stdin when omitted
    #[arg(long)]
    pub event: Option<PathBuf>,
}

pub async fn run(args: InvokeArgs) -> anyhow::Result<()> {
    let config = super::bootstrap();

    let event = read_event(args.event.as_ref())?;
    let service = build_service(&config.deploy).await;

    let response = service.handle(event).await;
    print_json(&response)?;

    Ok(())
}

fn read_event(path: Option<&PathBuf>) -> anyhow::Result<Value> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event file {}", path.display()))?,
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read event from stdin")?;
            raw
        }
    };

    serde_json::from_str(&raw).context("Event is not valid JSON")
}

pub(super) async fn build_service(config: &DeployConfig) -> DeployService {
    let provisioner = CloudFormationProvisioner::from_env(config.region.as_deref()).await;
    info!(wait = ?config.wait, "Deploy handler ready");

    DeployService::new(Arc::new(provisioner), config.wait.clone())
}

pub(super) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
