//! Console adapter - runs the command router over stdin/stdout.
//!
//! Every line read from stdin is treated as a chat message from the first
//! configured owner; replies and relayed feed posts go to stdout.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::commands::{Bot, CommandContext};
use crate::relay::{ChannelSink, FeedError};

/// Display name used for console messages
const CONSOLE_USER: &str = "console";

/// Channel sink that prints each message with its channel id
#[derive(Debug, Default)]
pub struct StdoutSink;

#[async_trait]
impl ChannelSink for StdoutSink {
    async fn send(&self, channel_id: u64, content: &str) -> Result<(), FeedError> {
        let line = format!("[#{}] {}\n", channel_id, content);
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(line.as_bytes())
            .await
            .map_err(|e| FeedError::Send {
                channel_id,
                message: e.to_string(),
            })?;
        stdout.flush().await.map_err(|e| FeedError::Send {
            channel_id,
            message: e.to_string(),
        })
    }
}

/// Read stdin until EOF, answering each command line on stdout
pub async fn run_console(bot: Arc<Bot>) -> std::io::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve_lines(&bot, stdin, stdout).await
}

async fn serve_lines<R, W>(bot: &Bot, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let author_id = bot.session().owner_ids.first().copied().unwrap_or(0);
    let ctx = CommandContext::new(author_id, CONSOLE_USER, None);

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(reply) = bot.handle_message(&ctx, &line).await {
            writer.write_all(reply.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }

    crate::debug!("Console input closed");
    Ok(())
}
