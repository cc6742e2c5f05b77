//! Chat delivery

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Discord rejects message content longer than this many characters
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

/// Somewhere reports can be posted
#[async_trait::async_trait]
pub trait ChatSink: Send + Sync {
    async fn send(&self, message: &str) -> Result<()>;
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

/// Posts messages through a Discord webhook
#[derive(Debug, Clone)]
pub struct DiscordWebhook {
    url: String,
    client: Client,
}

impl DiscordWebhook {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { url: url.into(), client })
    }
}

#[async_trait::async_trait]
impl ChatSink for DiscordWebhook {
    async fn send(&self, message: &str) -> Result<()> {
        let chunks = split_message(message, DISCORD_MESSAGE_LIMIT);
        if chunks.is_empty() {
            warn!("Refusing to post an empty message");
            return Ok(());
        }

        for chunk in &chunks {
            let response = self
                .client
                .post(&self.url)
                .json(&WebhookPayload { content: chunk })
                .send()
                .await
                .context("Failed to post to Discord webhook")?;

            if !response.status().is_success() {
                bail!("Discord webhook returned status: {}", response.status());
            }
        }

        debug!("Posted message in {} part(s)", chunks.len());
        Ok(())
    }
}

/// Prints messages instead of posting them (dry-run mode)
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

#[async_trait::async_trait]
impl ChatSink for StdoutSink {
    async fn send(&self, message: &str) -> Result<()> {
        println!("{}\n", message.trim_end());
        Ok(())
    }
}

/// Splits `message` into chunks of at most `limit` characters.
///
/// Chunks break on line boundaries; a single line longer than `limit` is cut
/// mid-line. Trailing newlines are trimmed and blank chunks dropped.
pub fn split_message(message: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    let mut flush = |current: &mut String, current_len: &mut usize| {
        let chunk = current.trim_end_matches('\n');
        if !chunk.trim().is_empty() {
            chunks.push(chunk.to_string());
        }
        current.clear();
        *current_len = 0;
    };

    for line in message.split_inclusive('\n') {
        let line_len = line.chars().count();

        if current_len + line_len > limit {
            flush(&mut current, &mut current_len);
        }

        if line_len <= limit {
            current.push_str(line);
            current_len += line_len;
            continue;
        }

        for ch in line.chars() {
            if current_len == limit {
                flush(&mut current, &mut current_len);
            }
            current.push(ch);
            current_len += 1;
        }
    }
    flush(&mut current, &mut current_len);

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_message_is_one_chunk() {
        assert_eq!(split_message("**Scores**\nA 1\nB 2\n\n", 2000), vec!["**Scores**\nA 1\nB 2"]);
    }

    #[test]
    fn test_splits_on_line_boundaries() {
        let message = "aaaa\nbbbb\ncccc\n";

        let chunks = split_message(message, 10);

        assert_eq!(chunks, vec!["aaaa\nbbbb", "cccc"]);
        assert!(chunks.iter().all(|c| c.chars().count() <= 10));
    }

    #[test]
    fn test_long_line_is_cut() {
        let chunks = split_message("abcdefghij\nxy", 4);
        assert_eq!(chunks, vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        let message = "🏈🏈🏈\n🏈🏈🏈\n";
        assert_eq!(split_message(message, 4), vec!["🏈🏈🏈", "🏈🏈🏈"]);
    }

    #[test]
    fn test_empty_message_has_no_chunks() {
        assert!(split_message("", 2000).is_empty());
        assert!(split_message("\n\n\n", 2000).is_empty());
    }

    #[tokio::test]
    async fn test_stdout_sink_accepts_messages() {
        assert!(StdoutSink.send("hello").await.is_ok());
    }
}
