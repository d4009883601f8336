//! Cron binding: parses expressions, spawns one tick loop per job and
//! registers the resulting handle.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use chrono_tz::Tz;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use modpick_core::ChannelId;

use crate::error::{Result, SchedulerError};
use crate::registry::{JobRegistry, JobSnapshot, ScheduledJob};

/// Callback seam invoked on every firing of a scheduled job.
///
/// Implementations must be `Send + Sync`; the same handler serves the tick
/// loops of every scheduled channel.
#[async_trait]
pub trait TickHandler: Send + Sync {
    async fn run_tick(&self, channel: &ChannelId) -> anyhow::Result<()>;
}

/// Binds cron expressions to tick tasks. All jobs fire in a single configured
/// timezone.
pub struct Scheduler {
    registry: Arc<JobRegistry>,
    timezone: Tz,
    handler: Arc<dyn TickHandler>,
}

impl Scheduler {
    pub fn new(registry: Arc<JobRegistry>, timezone: Tz, handler: Arc<dyn TickHandler>) -> Self {
        Self {
            registry,
            timezone,
            handler,
        }
    }

    /// Create a recurring trigger for `channel_id` and register it.
    ///
    /// Fails with [`SchedulerError::InvalidSchedule`] when the expression does
    /// not parse; in that case nothing is spawned and nothing is registered.
    /// Handler failures inside a tick are caught and logged by the spawned
    /// loop and never reach this caller.
    pub fn schedule(&self, channel_id: ChannelId, cron_expr: &str) -> Result<JobSnapshot> {
        let schedule = cron::Schedule::from_str(&normalize_cron(cron_expr))
            .map_err(|e| SchedulerError::InvalidSchedule(format!("{cron_expr}: {e}")))?;

        let token = CancellationToken::new();
        let task = tokio::spawn(run_job_loop(
            schedule,
            self.timezone,
            channel_id.clone(),
            Arc::clone(&self.handler),
            token.clone(),
        ));

        // Timer first, registry entry second: no entry without a live trigger.
        let job = ScheduledJob::new(channel_id, cron_expr, token, task);
        let snapshot = job.snapshot();
        self.registry.add_job(job);
        Ok(snapshot)
    }
}

/// Normalize a 5-field cron expression to the 6-field form the `cron` crate
/// expects, by prepending a seconds field. 6-field input passes through.
fn normalize_cron(expr: &str) -> String {
    let trimmed = expr.trim();
    if trimmed.split_whitespace().count() == 5 {
        format!("0 {trimmed}")
    } else {
        trimmed.to_string()
    }
}

/// Per-job tick loop: sleep until the next firing in `tz`, run the handler,
/// repeat. Cancellation is observed between firings only, so an in-progress
/// tick always completes.
async fn run_job_loop(
    schedule: cron::Schedule,
    tz: Tz,
    channel: ChannelId,
    handler: Arc<dyn TickHandler>,
    token: CancellationToken,
) {
    loop {
        let Some(next) = schedule.upcoming(tz).next() else {
            warn!(channel = %channel, "schedule exhausted; job loop ending");
            break;
        };
        let wait = (next.with_timezone(&Utc) - Utc::now())
            .to_std()
            .unwrap_or_default();
        debug!(channel = %channel, next = %next, "sleeping until next firing");

        tokio::select! {
            _ = token.cancelled() => break,
            _ = tokio::time::sleep(wait) => {
                info!(channel = %channel, "running picker tick");
                if let Err(e) = handler.run_tick(&channel).await {
                    // One bad tick never disables the recurring job.
                    error!(channel = %channel, error = %e, "picker tick failed");
                }
            }
        }
    }
    debug!(channel = %channel, "job loop exited");
}
