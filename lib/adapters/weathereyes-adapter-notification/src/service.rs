use std::sync::{Arc, RwLock};
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use serde_json::json;

use weathereyes_domain::{AlertPriority, NotificationChannel, RenderedMessage};
use weathereyes_ports::NotificationPort;

const TELEGRAM_API: &str = "https://api.telegram.org";

/// Fans a rendered alert out to every configured channel.
#[derive(Debug, Clone)]
pub struct NotificationService {
    channels: Arc<RwLock<Vec<NotificationChannel>>>,
    client: reqwest::Client,
}

impl NotificationService {
    pub fn new(channels: Vec<NotificationChannel>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            channels: Arc::new(RwLock::new(channels)),
            client,
        })
    }

    pub fn channels(&self) -> Vec<NotificationChannel> {
        self.channels
            .read()
            .expect("notification channels lock poisoned")
            .clone()
    }

    async fn deliver(&self, channel: &NotificationChannel, message: &RenderedMessage) -> Result<()> {
        match channel {
            NotificationChannel::Log => {
                tracing::info!(
                    alert_id = message.alert_id,
                    priority = %message.priority,
                    "{}\n{}",
                    message.title,
                    message.body
                );
                Ok(())
            }
            NotificationChannel::System => {
                let title = message.title.clone();
                let body = message.body.clone();
                tokio::task::spawn_blocking(move || {
                    notify_rust::Notification::new()
                        .summary(&title)
                        .body(&body)
                        .show()
                        .map(|_| ())
                        .map_err(|e| anyhow!("desktop notification failed: {e}"))
                })
                .await
                .context("desktop notification task panicked")?
            }
            NotificationChannel::Ntfy { url, topic } => {
                let payload = json!({
                    "topic": topic,
                    "title": message.title,
                    "message": message.body,
                    "priority": ntfy_priority(message.priority),
                });
                self.client
                    .post(url.trim_end_matches('/'))
                    .json(&payload)
                    .send()
                    .await
                    .with_context(|| format!("ntfy request to {url} failed"))?
                    .error_for_status()
                    .context("ntfy rejected the message")?;
                Ok(())
            }
            NotificationChannel::Telegram { bot_token, chat_id } => {
                let payload = json!({
                    "chat_id": chat_id,
                    "text": format!("{}\n\n{}", message.title, message.body),
                });
                self.client
                    .post(format!("{TELEGRAM_API}/bot{bot_token}/sendMessage"))
                    .json(&payload)
                    .send()
                    .await
                    .context("telegram request failed")?
                    .error_for_status()
                    .context("telegram rejected the message")?;
                Ok(())
            }
        }
    }
}

/// ntfy priorities run 1 (min) to 5 (max).
fn ntfy_priority(priority: AlertPriority) -> u8 {
    match priority {
        AlertPriority::Low => 2,
        AlertPriority::Medium => 3,
        AlertPriority::High => 4,
        AlertPriority::Urgent => 5,
    }
}

#[async_trait]
impl NotificationPort for NotificationService {
    /// Succeeds only when every channel accepted the message.
    async fn send_notification(&self, message: &RenderedMessage) -> Result<()> {
        let channels = self.channels();
        if channels.is_empty() {
            bail!("no notification channels configured");
        }
        let mut failures = Vec::new();
        for channel in &channels {
            if let Err(err) = self.deliver(channel, message).await {
                tracing::warn!(channel = %channel.id(), alert_id = message.alert_id, "{err:#}");
                failures.push(channel.id());
            }
        }
        if !failures.is_empty() {
            bail!("delivery failed on {}", failures.join(", "));
        }
        Ok(())
    }

    async fn configure_channel(&self, channel: NotificationChannel) -> Result<()> {
        let mut channels = self
            .channels
            .write()
            .expect("notification channels lock poisoned");
        if let Some(existing) = channels
            .iter_mut()
            .find(|existing| existing.id() == channel.id())
        {
            *existing = channel;
        } else {
            channels.push(channel);
        }
        Ok(())
    }
}
