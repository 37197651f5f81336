//! Progress reporting to the operator.

use async_trait::async_trait;
use fresco_sync::ProgressSink;
use serenity::http::Http;
use serenity::model::channel::Message;
use serenity::model::id::ChannelId;
use std::sync::Arc;
use tracing::{info, warn};

/// Sends sync progress to the operator's direct messages, falling back to
/// the invoking channel, falling back to the log.
///
/// Progress goes to DMs first because the invoking channel is usually one
/// of the channels the run is about to delete.
pub struct OperatorNotifier {
    http: Arc<Http>,
    dm: Option<ChannelId>,
    invoking: ChannelId,
}

impl OperatorNotifier {
    /// Set up the notifier for the invoking message's author.
    ///
    /// Opening the DM channel is best-effort; when the operator's DMs are
    /// closed everything goes through the invoking channel instead.
    pub async fn new(http: Arc<Http>, invocation: &Message) -> Self {
        let dm = match invocation.author.create_dm_channel(&http).await {
            Ok(channel) => Some(channel.id),
            Err(e) => {
                warn!(error = %e, "Could not open a DM channel; falling back to the invoking channel");
                None
            }
        };
        Self {
            http,
            dm,
            invoking: invocation.channel_id,
        }
    }

    /// Whether direct messages are available.
    pub fn has_dm(&self) -> bool {
        self.dm.is_some()
    }
}

#[async_trait]
impl ProgressSink for OperatorNotifier {
    async fn emit(&self, message: &str) {
        if let Some(dm) = self.dm {
            if dm.say(&self.http, message).await.is_ok() {
                return;
            }
        }
        if self.invoking.say(&self.http, message).await.is_err() {
            info!(progress = message, "sync progress");
        }
    }
}
