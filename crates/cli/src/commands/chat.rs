//! `eatba chat`: Interactive terminal session with the bot.
//!
//! Every line is sent as a text message from `--user`. Lines starting with
//! `postback:` are sent as postback data instead, which is how the phone and
//! review buttons of a carousel can be exercised locally.

use eatba_channels::ConsoleChannel;
use eatba_core::channel::ReplyChannel;
use eatba_core::event::InboundEvent;
use std::path::Path;
use tokio::io::{self, AsyncBufReadExt, BufReader};

const POSTBACK_PREFIX: &str = "postback:";

/// What one typed line asks for.
#[derive(Debug, PartialEq)]
enum ChatInput {
    Quit,
    Skip,
    Event(InboundEvent),
}

fn parse_line(user: &str, turn: usize, line: &str) -> ChatInput {
    let line = line.trim();
    if line.is_empty() {
        return ChatInput::Skip;
    }
    if line == "exit" || line == "quit" {
        return ChatInput::Quit;
    }

    let reply_token = format!("chat-{turn}");
    match line.strip_prefix(POSTBACK_PREFIX) {
        Some(data) => ChatInput::Event(InboundEvent::Postback {
            reply_token,
            data: data.trim().to_string(),
        }),
        None => ChatInput::Event(InboundEvent::Text {
            user_id: user.to_string(),
            reply_token,
            text: line.to_string(),
        }),
    }
}

pub async fn run(config_path: Option<&Path>, user: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let bot = eatba_gateway::bot_from_config(&config)?;
    let channel = ConsoleChannel::printing();

    println!("🍜 Eatba chat as `{user}`. Try 美食推薦. Type `exit` to quit.\n");

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut turn = 0;
    while let Some(line) = lines.next_line().await? {
        turn += 1;
        let event = match parse_line(user, turn, &line) {
            ChatInput::Quit => break,
            ChatInput::Skip => continue,
            ChatInput::Event(event) => event,
        };

        match bot.handle_event(&event).await {
            Some(payload) => {
                let token = event.reply_token().unwrap_or_default();
                channel.reply(token, &payload).await?;
            }
            None => println!("(no reply)"),
        }
    }

    println!("Goodbye!");
    Ok(())
}
