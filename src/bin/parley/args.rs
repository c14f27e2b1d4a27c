use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "parley",
    version,
    about = "Chat with an OpenAI-compatible model from the terminal"
)]
pub struct CliArgs {
    /// Start an interactive chat session.
    #[arg(long, short = 'i')]
    pub interactive: bool,
    /// Text placed on its own line before the piped input.
    #[arg(long, short = 'e')]
    pub header: Option<String>,
    #[arg(long, short = 'm')]
    pub model: Option<String>,
    #[arg(long)]
    pub base_url: Option<String>,
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_flags() {
        let args = CliArgs::parse_from(["parley", "-i", "-e", "Summarize:", "-m", "gpt-4o"]);
        assert!(args.interactive);
        assert_eq!(args.header.as_deref(), Some("Summarize:"));
        assert_eq!(args.model.as_deref(), Some("gpt-4o"));
        assert!(args.base_url.is_none());
    }

    #[test]
    fn defaults_to_pipe_mode() {
        let args = CliArgs::parse_from(["parley"]);
        assert!(!args.interactive);
        assert!(args.header.is_none());
        assert!(args.config.is_none());
    }
}
