//! Per-tick orchestration: resolve the roster, draw the moderators, notify
//! the channel. Owns no state between ticks.

use std::sync::Arc;

use tracing::{info, warn};

use modpick_core::config::PickerConfig;
use modpick_core::{ChannelId, UserId};
use modpick_slack::{ChatApi, OutgoingMessage};

use crate::error::PickerError;
use crate::roster::RosterResolver;
use crate::select;

/// What one tick produced. The scheduler side pattern-matches on this to
/// decide between "announced" and "log and no-op".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// Moderators were drawn and the channel was notified.
    Notified { moderators: Vec<UserId> },

    /// Nothing to pick from; no message was sent.
    NoEligibleRoster,
}

pub struct PickerWorkflow<C: ChatApi> {
    client: Arc<C>,
    resolver: RosterResolver<C>,
    config: PickerConfig,
}

impl<C: ChatApi> PickerWorkflow<C> {
    pub fn new(client: Arc<C>, config: PickerConfig) -> Self {
        let resolver = RosterResolver::new(Arc::clone(&client), config.members_limit);
        Self {
            client,
            resolver,
            config,
        }
    }

    /// Run one picker invocation for `channel`.
    ///
    /// Roster dead-ends come back as `Ok(NoEligibleRoster)`; only send
    /// failures of the announcement itself (and transport failures past the
    /// resolver boundary) surface as errors.
    pub async fn run_once(&self, channel: &ChannelId) -> Result<PickOutcome, PickerError> {
        let Some(eligible) = self
            .resolver
            .resolve(channel, &self.config.ignored_members)
            .await
        else {
            return Ok(PickOutcome::NoEligibleRoster);
        };

        let Some(moderators) =
            select::pick_unique(&mut rand::rng(), &eligible, self.config.moderator_count)
        else {
            return Ok(PickOutcome::NoEligibleRoster);
        };

        info!(
            channel = %channel,
            eligible = eligible.len(),
            picked = moderators.len(),
            "announcing moderators"
        );
        self.client
            .post_message(&OutgoingMessage::broadcast(
                channel.clone(),
                announcement_text(&moderators),
            ))
            .await?;

        // The announcement is already out; a failed private nudge is not
        // worth failing the tick over.
        for moderator in &moderators {
            let nudge = OutgoingMessage::ephemeral(
                channel.clone(),
                moderator.clone(),
                "You have been picked as one of this channel's moderators for the upcoming round.",
            );
            if let Err(e) = self.client.post_message(&nudge).await {
                warn!(channel = %channel, user = %moderator, error = %e, "ephemeral nudge failed");
            }
        }

        Ok(PickOutcome::Notified { moderators })
    }
}

/// Channel announcement for the drawn moderators.
fn announcement_text(moderators: &[UserId]) -> String {
    match moderators {
        [] => String::new(),
        [only] => format!(
            "{} is the next moderator. Thank you for keeping this channel healthy!",
            only.mention()
        ),
        [rest @ .., last] => {
            let mentions: Vec<String> = rest.iter().map(UserId::mention).collect();
            format!(
                "{} and {} are the next moderators. Thank you for keeping this channel healthy!",
                mentions.join(", "),
                last.mention()
            )
        }
    }
}
