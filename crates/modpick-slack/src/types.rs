use serde::{Deserialize, Serialize};

use modpick_core::{ChannelId, UserId};

/// A resolved Slack user profile, reduced to the fields selection cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Platform user ID. Slack can in principle omit it on partially
    /// deactivated accounts, hence the `Option`.
    pub id: Option<UserId>,

    /// True for bot users (including workflow and app bots).
    pub is_bot: bool,
}

impl UserProfile {
    /// A profile counts as a selectable human when it carries an ID and is
    /// not flagged as a bot.
    pub fn human_id(&self) -> Option<&UserId> {
        if self.is_bot {
            return None;
        }
        self.id.as_ref()
    }
}

/// A message to be delivered to a Slack channel.
///
/// With `user_id` set, delivery is ephemeral — visible only to that user
/// inside the channel. Without it, the message is broadcast to everyone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub channel_id: ChannelId,
    pub user_id: Option<UserId>,
    pub text: String,
}

impl OutgoingMessage {
    /// Broadcast to the whole channel.
    pub fn broadcast(channel_id: ChannelId, text: impl Into<String>) -> Self {
        Self {
            channel_id,
            user_id: None,
            text: text.into(),
        }
    }

    /// Ephemeral message for a single user within the channel.
    pub fn ephemeral(channel_id: ChannelId, user_id: UserId, text: impl Into<String>) -> Self {
        Self {
            channel_id,
            user_id: Some(user_id),
            text: text.into(),
        }
    }
}

// --- wire types ------------------------------------------------------------

/// Envelope shared by every Slack Web API response.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope {
    pub ok: bool,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MembersResponse {
    pub ok: bool,
    pub error: Option<String>,
    pub members: Option<Vec<UserId>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserInfoResponse {
    pub ok: bool,
    pub error: Option<String>,
    pub user: Option<WireUser>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireUser {
    pub id: Option<UserId>,
    #[serde(default)]
    pub is_bot: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bot_profile_is_not_human() {
        let p = UserProfile {
            id: Some("U1".into()),
            is_bot: true,
        };
        assert!(p.human_id().is_none());
    }

    #[test]
    fn profile_without_id_is_not_human() {
        let p = UserProfile {
            id: None,
            is_bot: false,
        };
        assert!(p.human_id().is_none());
    }

    #[test]
    fn human_profile_yields_id() {
        let p = UserProfile {
            id: Some("U1".into()),
            is_bot: false,
        };
        assert_eq!(p.human_id().map(|u| u.as_str()), Some("U1"));
    }

    #[test]
    fn members_response_parses() {
        let json = r#"{"ok":true,"members":["U1","U2"]}"#;
        let resp: MembersResponse = serde_json::from_str(json).unwrap();
        assert!(resp.ok);
        assert_eq!(resp.members.unwrap().len(), 2);
    }

    #[test]
    fn user_info_defaults_is_bot_false() {
        let json = r#"{"ok":true,"user":{"id":"U1"}}"#;
        let resp: UserInfoResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.user.unwrap().is_bot);
    }
}
