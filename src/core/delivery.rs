//! Ordered delivery of message segments to a channel
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.1.0
//!
//! ## Changelog
//! - 1.0.0: Shared by the text commands and the webhook

use anyhow::Result;
use async_trait::async_trait;
use serenity::http::Http;
use serenity::model::id::ChannelId;
use std::sync::Arc;

/// Anything that can post plain text into a channel
#[async_trait]
pub trait ChannelSender: Send + Sync {
    async fn send(&self, channel_id: u64, content: &str) -> Result<()>;
}

/// [`ChannelSender`] backed by the Discord REST client
#[derive(Clone)]
pub struct HttpSender {
    http: Arc<Http>,
}

impl HttpSender {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ChannelSender for HttpSender {
    async fn send(&self, channel_id: u64, content: &str) -> Result<()> {
        ChannelId(channel_id).say(&self.http, content).await?;
        Ok(())
    }
}

/// Send segments in order, stopping at the first failure
///
/// Returns the number of segments sent. Already-sent segments are not retried.
pub async fn deliver<S>(sender: &S, channel_id: u64, segments: &[String]) -> Result<usize>
where
    S: ChannelSender + ?Sized,
{
    for (sent, segment) in segments.iter().enumerate() {
        if let Err(e) = sender.send(channel_id, segment).await {
            return Err(e.context(format!(
                "delivery aborted after {sent} of {} segments",
                segments.len()
            )));
        }
    }
    Ok(segments.len())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tokio::sync::Mutex;

    /// Records every message, optionally failing after a number of sends
    #[derive(Default)]
    pub(crate) struct RecordingSender {
        pub sent: Mutex<Vec<(u64, String)>>,
        pub fail_after: Option<usize>,
    }

    #[async_trait]
    impl ChannelSender for RecordingSender {
        async fn send(&self, channel_id: u64, content: &str) -> Result<()> {
            let mut sent = self.sent.lock().await;
            if self.fail_after.is_some_and(|n| sent.len() >= n) {
                anyhow::bail!("channel unavailable");
            }
            sent.push((channel_id, content.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_deliver_in_order() {
        let sender = RecordingSender::default();
        let segments = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let count = deliver(&sender, 7, &segments).await.unwrap();
        assert_eq!(count, 3);

        let sent = sender.sent.lock().await;
        let contents: Vec<&str> = sent.iter().map(|(_, c)| c.as_str()).collect();
        assert_eq!(contents, vec!["a", "b", "c"]);
        assert!(sent.iter().all(|(id, _)| *id == 7));
    }

    #[tokio::test]
    async fn test_deliver_stops_on_failure() {
        let sender = RecordingSender {
            fail_after: Some(1),
            ..Default::default()
        };
        let segments = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let err = deliver(&sender, 1, &segments).await.unwrap_err();
        assert!(err.to_string().contains("after 1 of 3"));
        assert_eq!(sender.sent.lock().await.len(), 1);
    }
}
