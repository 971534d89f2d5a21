//! Cross-context messages, push payloads, and notification rendering

use crate::config::schema::NotificationsConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Notification action id that opens the app root
pub const ACTION_EXPLORE: &str = "explore";
/// Notification action id that dismisses the notification
pub const ACTION_CLOSE: &str = "close";

/// Vibration pattern attached to every notification
pub const VIBRATE_PATTERN: [u32; 3] = [100, 50, 100];

/// Message from a client to the router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Message {
    /// Force immediate activation of a waiting update
    #[serde(rename = "SKIP_WAITING")]
    SkipWaiting,
    /// Ask for the current cache generation name
    #[serde(rename = "GET_VERSION")]
    GetVersion,
}

/// Reply to a [`Message::GetVersion`] query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionReply {
    /// The current version marker, e.g. `airlock-v3`
    pub version: String,
}

/// Push payload as delivered by the push service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PushPayload {
    /// Notification title; config default when absent
    pub title: Option<String>,
    /// Notification body; config default when absent
    pub body: Option<String>,
}

impl PushPayload {
    /// Parse a raw payload, falling back to the empty payload
    ///
    /// A malformed payload still renders a notification with defaults.
    pub fn parse(raw: &[u8]) -> Self {
        serde_json::from_slice(raw).unwrap_or_default()
    }
}

/// One action button on a rendered notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    /// Action id reported back on click
    pub action: String,
    /// Button label
    pub title: String,
    /// Button icon path
    pub icon: String,
}

/// A rendered user notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub vibrate: Vec<u32>,
    /// When the payload arrived
    pub arrived_at: DateTime<Utc>,
    /// Fixed pair of actions: explore, close
    pub actions: Vec<NotificationAction>,
}

impl Notification {
    /// Render a payload against the configured defaults
    pub fn render(payload: PushPayload, config: &NotificationsConfig) -> Self {
        Self {
            title: payload.title.unwrap_or_else(|| config.default_title.clone()),
            body: payload.body.unwrap_or_else(|| config.default_body.clone()),
            icon: config.icon.clone(),
            badge: config.badge.clone(),
            vibrate: VIBRATE_PATTERN.to_vec(),
            arrived_at: Utc::now(),
            actions: vec![
                NotificationAction {
                    action: ACTION_EXPLORE.to_string(),
                    title: "Explore".to_string(),
                    icon: config.badge.clone(),
                },
                NotificationAction {
                    action: ACTION_CLOSE.to_string(),
                    title: "Close".to_string(),
                    icon: config.badge.clone(),
                },
            ],
        }
    }
}

/// What a notification click resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Focus or open the app root page
    OpenRoot,
    /// Close the notification, nothing else
    Dismiss,
}
