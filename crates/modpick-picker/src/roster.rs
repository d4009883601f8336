//! Roster resolution: turn a channel's membership into the set of eligible
//! humans, isolating per-member lookup failures.

use std::collections::HashSet;
use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, warn};

use modpick_core::{ChannelId, UserId};
use modpick_slack::ChatApi;

use crate::error::PickerError;

/// Resolves the eligible member set for a channel.
///
/// `resolve` is the error boundary for the whole lookup: every dead-end
/// (empty channel, everyone ignored, no humans left) and any transport
/// failure of the membership fetch is logged here and flattened to `None`.
/// Callers get either a non-empty eligible set or "nothing to pick from",
/// never an error.
pub struct RosterResolver<C: ChatApi> {
    client: Arc<C>,
    members_limit: u32,
}

impl<C: ChatApi> RosterResolver<C> {
    pub fn new(client: Arc<C>, members_limit: u32) -> Self {
        Self {
            client,
            members_limit,
        }
    }

    pub async fn resolve(&self, channel: &ChannelId, ignored: &[UserId]) -> Option<Vec<UserId>> {
        match self.try_resolve(channel, ignored).await {
            Ok(eligible) => Some(eligible),
            Err(e) => {
                warn!(channel = %channel, error = %e, "roster resolution came up empty");
                None
            }
        }
    }

    async fn try_resolve(
        &self,
        channel: &ChannelId,
        ignored: &[UserId],
    ) -> Result<Vec<UserId>, PickerError> {
        let members = self.client.list_members(channel, self.members_limit).await?;
        if members.is_empty() {
            return Err(PickerError::NoMembersFound {
                channel: channel.clone(),
            });
        }

        let ignored: HashSet<&UserId> = ignored.iter().collect();
        let remaining: Vec<UserId> = members
            .into_iter()
            .filter(|m| !ignored.contains(m))
            .collect();
        if remaining.is_empty() {
            return Err(PickerError::NoEligibleMembers {
                channel: channel.clone(),
            });
        }

        // Fetch all profiles concurrently and let each lookup settle on its
        // own: a failed fetch drops that one member, never its siblings.
        let settled = join_all(remaining.iter().map(|member| {
            let client = Arc::clone(&self.client);
            async move { (member, client.user_profile(member).await) }
        }))
        .await;

        let mut humans = Vec::with_capacity(settled.len());
        for (member, outcome) in settled {
            match outcome {
                Ok(profile) => {
                    if let Some(id) = profile.human_id() {
                        humans.push(id.clone());
                    } else {
                        debug!(member = %member, "skipping bot or id-less profile");
                    }
                }
                Err(e) => {
                    warn!(member = %member, error = %e, "profile lookup failed; member skipped");
                }
            }
        }

        if humans.is_empty() {
            return Err(PickerError::NoHumanMembers {
                channel: channel.clone(),
            });
        }
        Ok(humans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::tests::MockChat;

    fn resolver(mock: MockChat) -> RosterResolver<MockChat> {
        RosterResolver::new(Arc::new(mock), 50)
    }

    #[tokio::test]
    async fn empty_channel_resolves_to_none() {
        let r = resolver(MockChat::new(&[]));
        assert!(r.resolve(&"C1".into(), &[]).await.is_none());
    }

    #[tokio::test]
    async fn ignored_members_are_excluded() {
        let r = resolver(MockChat::new(&["U1", "U2", "U3"]));
        let eligible = r.resolve(&"C1".into(), &["U1".into()]).await.unwrap();
        assert_eq!(eligible, vec![UserId::from("U2"), UserId::from("U3")]);
    }

    #[tokio::test]
    async fn all_members_ignored_resolves_to_none() {
        let r = resolver(MockChat::new(&["U1", "U2"]));
        let ignored = vec!["U1".into(), "U2".into()];
        assert!(r.resolve(&"C1".into(), &ignored).await.is_none());
    }

    #[tokio::test]
    async fn bots_are_excluded_even_with_successful_profiles() {
        let r = resolver(MockChat::new(&["U1", "U2"]).with_bot("U1"));
        let eligible = r.resolve(&"C1".into(), &[]).await.unwrap();
        assert_eq!(eligible, vec![UserId::from("U2")]);
    }

    #[tokio::test]
    async fn only_bots_resolves_to_none() {
        let r = resolver(MockChat::new(&["U1"]).with_bot("U1"));
        assert!(r.resolve(&"C1".into(), &[]).await.is_none());
    }

    #[tokio::test]
    async fn one_failing_profile_drops_only_that_member() {
        let r = resolver(
            MockChat::new(&["U1", "U2", "U3", "U4"]).with_failing_profile("U2"),
        );
        let eligible = r.resolve(&"C1".into(), &[]).await.unwrap();
        assert_eq!(eligible.len(), 3);
        assert!(!eligible.contains(&UserId::from("U2")));
    }

    #[tokio::test]
    async fn membership_fetch_failure_resolves_to_none() {
        let r = resolver(MockChat::new(&["U1"]).with_failing_members());
        assert!(r.resolve(&"C1".into(), &[]).await.is_none());
    }
}
