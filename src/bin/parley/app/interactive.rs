use std::io::{self, Write};

use parley::Conversation;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render::{render_markdown, Theme};

use super::notice;

pub(super) async fn run(mut conversation: Conversation, theme: &Theme) -> anyhow::Result<()> {
    println!("Chatting with {} (type 'exit' or 'quit' to leave)", conversation.model());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let input = match parse_input(&line) {
            Input::Blank => continue,
            Input::Quit => break,
            Input::Message(text) => text,
        };

        println!("\n{}\n{input}\n", theme.you.apply("You"));
        match conversation.send_message(input).await {
            Ok(answer) => {
                println!(
                    "{}\n{}\n",
                    theme.ai.apply("AI"),
                    render_markdown(&answer, &theme.markdown)
                );
            }
            Err(err) => {
                log::error!("turn failed: {err}");
                notice::print_error(&err, theme);
                if err.is_credential_error() {
                    break;
                }
            }
        }
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Blank,
    Quit,
    Message(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    match trimmed {
        "" => Input::Blank,
        "exit" | "quit" => Input::Quit,
        _ => Input::Message(trimmed),
    }
}
