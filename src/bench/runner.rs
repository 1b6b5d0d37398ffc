//! Drives virtual users through the plan's stages.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::bench::plan::{LoadPlan, Target};

/// One timed call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Index into `LoadPlan::targets`.
    pub target: usize,
    pub latency: Duration,
    /// `None` when no response arrived.
    pub status: Option<u16>,
    /// 200, body fully read, and faster than the SLO.
    pub ok: bool,
}

/// Everything recorded during a run.
#[derive(Debug, Default)]
pub struct RunOutcome {
    pub samples: Vec<Sample>,
    pub elapsed: Duration,
}

/// Execute every stage in order and collect all samples.
pub async fn run(plan: &LoadPlan, client: reqwest::Client) -> RunOutcome {
    let started = Instant::now();
    let targets = Arc::new(plan.targets.clone());
    let mut samples = Vec::new();

    if targets.is_empty() {
        tracing::warn!("No targets configured, nothing to do");
        return RunOutcome::default();
    }

    for (idx, stage) in plan.stages.iter().enumerate() {
        tracing::info!(
            stage = idx + 1,
            users = stage.users,
            duration = ?stage.duration,
            "Stage starting"
        );
        let deadline = Instant::now() + stage.duration;

        if stage.users == 0 {
            tokio::time::sleep_until(deadline).await;
            continue;
        }

        let workers: Vec<_> = (0..stage.users)
            .map(|_| {
                tokio::spawn(virtual_user(
                    client.clone(),
                    targets.clone(),
                    deadline,
                    plan.think_time,
                    plan.slo,
                ))
            })
            .collect();

        for worker in workers {
            match worker.await {
                Ok(recorded) => samples.extend(recorded),
                Err(e) => tracing::error!(error = %e, "Virtual user task failed"),
            }
        }
    }

    RunOutcome {
        samples,
        elapsed: started.elapsed(),
    }
}

async fn virtual_user(
    client: reqwest::Client,
    targets: Arc<Vec<Target>>,
    deadline: Instant,
    think_time: Duration,
    slo: Duration,
) -> Vec<Sample> {
    let mut samples = Vec::new();
    while Instant::now() < deadline {
        for (index, target) in targets.iter().enumerate() {
            samples.push(probe(&client, index, target, slo).await);
        }
        if !think_time.is_zero() {
            tokio::time::sleep(think_time).await;
        }
    }
    samples
}

async fn probe(client: &reqwest::Client, index: usize, target: &Target, slo: Duration) -> Sample {
    let start = Instant::now();
    let (status, body_read) = match client.get(&target.url).send().await {
        Ok(resp) => {
            let status = resp.status().as_u16();
            // Latency includes the body.
            match resp.bytes().await {
                Ok(_) => (Some(status), true),
                Err(e) => {
                    tracing::debug!(target = %target.name, error = %e, "Body read failed");
                    (Some(status), false)
                }
            }
        }
        Err(e) => {
            tracing::debug!(target = %target.name, error = %e, "Request failed");
            (None, false)
        }
    };
    let latency = start.elapsed();

    Sample {
        target: index,
        latency,
        status,
        ok: status == Some(200) && body_read && latency < slo,
    }
}
