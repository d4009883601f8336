use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use modpick_core::{ChannelId, ModpickConfig};
use modpick_picker::{PickOutcome, PickerWorkflow};
use modpick_scheduler::{JobRegistry, Scheduler, TickHandler};
use modpick_slack::SlackClient;

/// Adapts the picker workflow to the scheduler's tick seam.
struct PickerTick(Arc<PickerWorkflow<SlackClient>>);

#[async_trait]
impl TickHandler for PickerTick {
    async fn run_tick(&self, channel: &ChannelId) -> anyhow::Result<()> {
        match self.0.run_once(channel).await? {
            PickOutcome::Notified { moderators } => {
                info!(channel = %channel, count = moderators.len(), "moderators announced");
            }
            PickOutcome::NoEligibleRoster => {
                info!(channel = %channel, "no eligible members; nothing announced");
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "modpick=info".into()),
        )
        .init();

    // load config: MODPICK_CONFIG env > ~/.modpick/modpick.toml
    let config_path = std::env::var("MODPICK_CONFIG").ok();
    let config = ModpickConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        warn!("Config load failed ({}), using defaults", e);
        ModpickConfig::default()
    });

    if config.slack.bot_token.is_empty() {
        warn!("slack.bot_token is empty; Slack calls will be rejected");
    }
    let timezone = config.scheduler.timezone()?;

    let client = Arc::new(SlackClient::new(config.slack.bot_token.clone()));
    let workflow = Arc::new(PickerWorkflow::new(client, config.picker.clone()));
    let registry = Arc::new(JobRegistry::new());
    let scheduler = Scheduler::new(
        Arc::clone(&registry),
        timezone,
        Arc::new(PickerTick(workflow)),
    );

    for job in &config.scheduler.jobs {
        match scheduler.schedule(job.channel_id.clone(), &job.schedule) {
            Ok(snapshot) => {
                info!(
                    job_id = %snapshot.id,
                    channel = %snapshot.channel_id,
                    schedule = %snapshot.schedule,
                    "picker job scheduled"
                );
            }
            Err(e) => {
                // One bad entry must not take the others down with it.
                error!(channel = %job.channel_id, error = %e, "job skipped");
            }
        }
    }

    if registry.is_empty() {
        warn!("no jobs scheduled; add [[scheduler.jobs]] entries to the config");
    }
    info!(jobs = registry.len(), timezone = %config.scheduler.timezone, "modpick running");

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    registry.cancel_all();
    Ok(())
}
