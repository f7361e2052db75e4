//! Deploy service - two-stack create/update orchestration

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::domain::deploy::{resolve_template_url, FORWARDED_OUTPUT_KEYS};
use crate::domain::{
    DeployEvent, DeployOutcome, DeployRequest, DeployResponse, DomainError, HandlerResponse,
    SingleStackRequest, StackDescription, StackPhase, StackProvisioner, StackSpec, WaitStrategy,
};

/// Orchestrates stack deployments against an injected provisioner
#[derive(Debug, Clone)]
pub struct DeployService {
    provisioner: Arc<dyn StackProvisioner>,
    wait: WaitStrategy,
}

impl DeployService {
    pub fn new(provisioner: Arc<dyn StackProvisioner>, wait: WaitStrategy) -> Self {
        Self { provisioner, wait }
    }

    /// Handle a raw invocation event; never fails
    pub async fn handle(&self, event: Value) -> HandlerResponse {
        match DeployEvent::from_value(event) {
            Ok(DeployEvent::Pipeline(request)) => {
                HandlerResponse::Deploy(self.handle_request(&request).await)
            }
            Ok(DeployEvent::Single(request)) => match self.deploy_single(&request).await {
                Ok(outcome) => HandlerResponse::Stack(outcome),
                Err(e) => {
                    error!(stack = %request.stack_name, error = %e, "Single stack deploy failed");
                    HandlerResponse::error(e.to_string())
                }
            },
            Err(e) => {
                error!(error = %e, "Rejected deploy event");
                HandlerResponse::error(e.to_string())
            }
        }
    }

    /// Run a two-stack deploy and fold any failure into the response
    pub async fn handle_request(&self, request: &DeployRequest) -> DeployResponse {
        match self.deploy(request).await {
            Ok(stacks) => DeployResponse::ok(stacks),
            Err(e) => {
                error!(error = %e, "Deploy failed");
                DeployResponse::error(e.to_string())
            }
        }
    }

    /// Deploy infra, wait for it, then deploy the pipeline with the infra outputs
    pub async fn deploy(&self, request: &DeployRequest) -> Result<Vec<DeployOutcome>, DomainError> {
        let mut outcomes = Vec::with_capacity(2);

        match self.deploy_pipeline(request, &mut outcomes).await {
            Ok(()) => Ok(outcomes),
            Err(e) => {
                if !outcomes.is_empty() {
                    warn!(completed = ?outcomes, "Deploy aborted after partial progress");
                }
                Err(e)
            }
        }
    }

    async fn deploy_pipeline(
        &self,
        request: &DeployRequest,
        outcomes: &mut Vec<DeployOutcome>,
    ) -> Result<(), DomainError> {
        let infra_spec = request.infra_spec()?;
        // Reject a bad pipeline location before touching any stack
        resolve_template_url(&request.pipeline_template_s3)?;

        let infra_outcome = self.deploy_stack(&infra_spec).await?;
        outcomes.push(infra_outcome.clone());

        let infra = self.wait_for_stack(infra_spec.name(), &infra_outcome).await?;
        info!(stack = infra_spec.name(), outputs = ?infra.outputs, "Infra outputs");

        let forwarded = FORWARDED_OUTPUT_KEYS
            .iter()
            .map(|&key| {
                infra
                    .require_output(key)
                    .map(|value| (key.to_string(), value.to_string()))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        let pipeline_spec = request.pipeline_spec(&forwarded)?;
        outcomes.push(self.deploy_stack(&pipeline_spec).await?);

        Ok(())
    }

    pub async fn deploy_single(
        &self,
        request: &SingleStackRequest,
    ) -> Result<DeployOutcome, DomainError> {
        self.deploy_stack(&request.spec()?).await
    }

    /// Create the stack if it is unknown, otherwise update it
    pub async fn deploy_stack(&self, spec: &StackSpec) -> Result<DeployOutcome, DomainError> {
        let name = spec.name();

        let exists = match self.provisioner.describe_stack(name).await {
            Ok(_) => true,
            Err(DomainError::StackNotFound { .. }) => false,
            Err(e) => return Err(e),
        };

        let outcome = if exists {
            info!(stack = name, provider = self.provisioner.provider_name(), "Updating stack");
            match self.provisioner.update_stack(spec).await {
                Ok(stack_id) => DeployOutcome::updated(stack_id),
                Err(DomainError::NoUpdates { .. }) => {
                    info!(stack = name, "No updates required");
                    DeployOutcome::unchanged(name)
                }
                Err(e) => return Err(e),
            }
        } else {
            info!(stack = name, provider = self.provisioner.provider_name(), "Creating stack");
            DeployOutcome::created(self.provisioner.create_stack(spec).await?)
        };

        info!(stack = name, "{}", outcome);
        Ok(outcome)
    }

    /// Wait for a stack according to the configured strategy and describe it
    ///
    /// A rolled-back update is only acceptable when `outcome` shows this run
    /// left the stack alone; otherwise the change just requested was undone.
    pub async fn wait_for_stack(
        &self,
        stack_name: &str,
        outcome: &DeployOutcome,
    ) -> Result<StackDescription, DomainError> {
        let accept_rolled_back = matches!(outcome, DeployOutcome::NoChange { .. });

        match &self.wait {
            WaitStrategy::Fixed { delay_secs } => {
                info!(stack = stack_name, delay_secs, "Waiting a fixed delay for stack");
                tokio::time::sleep(Duration::from_secs(*delay_secs)).await;
                self.provisioner.describe_stack(stack_name).await
            }
            WaitStrategy::Poll(config) => {
                let max_attempts = config.max_attempts.max(1);

                for attempt in 0..max_attempts {
                    let description = self.provisioner.describe_stack(stack_name).await?;

                    match description.status.phase() {
                        StackPhase::Succeeded => {
                            info!(stack = stack_name, status = %description.status, "Stack is ready");
                            return Ok(description);
                        }
                        StackPhase::RolledBack if accept_rolled_back => {
                            info!(
                                stack = stack_name,
                                status = %description.status,
                                "Stack unchanged since an earlier rollback, using its outputs"
                            );
                            return Ok(description);
                        }
                        StackPhase::RolledBack | StackPhase::Failed => {
                            return Err(DomainError::stack_failed(
                                stack_name,
                                description.status.as_str(),
                                description.status_reason.clone(),
                            ));
                        }
                        StackPhase::InProgress => {
                            debug!(
                                stack = stack_name,
                                status = %description.status,
                                attempt = attempt + 1,
                                max_attempts,
                                "Stack still in progress"
                            );
                        }
                    }

                    if attempt + 1 < max_attempts {
                        tokio::time::sleep(config.delay_for_attempt(attempt)).await;
                    }
                }

                Err(DomainError::wait_timeout(stack_name, max_attempts))
            }
        }
    }
}
