mod interactive;
mod notice;
mod pipe;

use std::io::{self, IsTerminal};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use parley::backend::{ChatBackend, OpenAIBackend};
use parley::tools::ToolRegistry;
use parley::Conversation;

use crate::args::CliArgs;
use crate::config::{load_config, resolve_settings};
use crate::logging::init_logging;
use crate::render::Theme;

pub async fn run() -> anyhow::Result<ExitCode> {
    let args = CliArgs::parse();
    let loaded = load_config(args.config.clone())?;
    let _logger = init_logging(&loaded.config.logging, &loaded.paths)?;
    if !loaded.config_exists {
        log::debug!(
            "no config at {}, using defaults",
            loaded.paths.config_file.display()
        );
    }

    let settings = resolve_settings(&loaded.config, &args, |key| std::env::var(key).ok());
    let backend = OpenAIBackend::new(settings.backend)?;
    log::info!(
        "using model {} at {}",
        backend.model(),
        backend.endpoint()
    );
    let tools = ToolRegistry::builtin(settings.search)?;
    let conversation = Conversation::new(Arc::new(backend), tools);

    let theme = if io::stdout().is_terminal() {
        Theme::default()
    } else {
        Theme::plain()
    };

    if args.interactive {
        interactive::run(conversation, &theme).await?;
        Ok(ExitCode::SUCCESS)
    } else {
        pipe::run(conversation, args.header.as_deref(), &theme).await
    }
}
