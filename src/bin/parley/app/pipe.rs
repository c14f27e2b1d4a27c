use std::io::{self, IsTerminal};
use std::process::ExitCode;

use parley::Conversation;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::render::{render_markdown, Theme};

use super::notice;

const MAX_STDIN_BYTES: u64 = 10 * 1024;

pub(super) async fn run(
    mut conversation: Conversation,
    header: Option<&str>,
    theme: &Theme,
) -> anyhow::Result<ExitCode> {
    if io::stdin().is_terminal() {
        println!("Try piping in some text.");
        return Ok(ExitCode::FAILURE);
    }

    let input = read_capped(tokio::io::stdin()).await?;
    let prompt = build_prompt(header, &input);
    log::debug!("pipe mode prompt of {} chars", prompt.chars().count());

    match conversation.send_message(&prompt).await {
        Ok(answer) => {
            println!("{}", render_markdown(&answer, &theme.markdown));
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            log::error!("request failed: {err}");
            notice::print_error(&err, theme);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Reads at most [`MAX_STDIN_BYTES`], replacing invalid UTF-8.
async fn read_capped<R: AsyncRead + Unpin>(reader: R) -> io::Result<String> {
    let mut buf = Vec::new();
    reader.take(MAX_STDIN_BYTES).read_to_end(&mut buf).await?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn build_prompt(header: Option<&str>, input: &str) -> String {
    match header.filter(|h| !h.is_empty()) {
        Some(header) => format!("{header}\n{input}"),
        None => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_goes_on_its_own_line() {
        assert_eq!(
            build_prompt(Some("Summarize this:"), "some log"),
            "Summarize this:\nsome log"
        );
    }

    #[tokio::test]
    async fn stdin_is_capped_at_ten_kib() {
        let input = "x".repeat(20 * 1024);
        let read = read_capped(input.as_bytes()).await.unwrap();
        assert_eq!(read.len(), 10 * 1024);

        let read = read_capped(&b"short\xff"[..]).await.unwrap();
        assert_eq!(read, "short\u{fffd}");
    }

    #[test]
    fn missing_header_leaves_input_alone() {
        assert_eq!(build_prompt(None, "some log"), "some log");
        assert_eq!(build_prompt(Some(""), "some log"), "some log");
    }
}
