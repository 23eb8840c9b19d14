use serde::{Deserialize, Serialize};

use crate::alert::{AlertId, AlertPriority};

/// Delivery target for rendered alerts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationChannel {
    /// Writes the message to the process log.
    Log,
    /// Desktop notification on the local machine.
    System,
    Ntfy {
        url: String,
        topic: String,
    },
    Telegram {
        bot_token: String,
        chat_id: String,
    },
}

impl NotificationChannel {
    pub fn id(&self) -> String {
        match self {
            NotificationChannel::Log => "log".to_string(),
            NotificationChannel::System => "system".to_string(),
            NotificationChannel::Ntfy { url, topic } => format!("ntfy:{url}/{topic}"),
            NotificationChannel::Telegram { chat_id, .. } => format!("telegram:{chat_id}"),
        }
    }
}

/// Human readable form of an alert, ready for any channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedMessage {
    pub alert_id: AlertId,
    pub priority: AlertPriority,
    pub title: String,
    pub body: String,
    /// One-line variant for length-limited channels.
    pub short: String,
}
