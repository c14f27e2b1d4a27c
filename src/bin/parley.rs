use std::process::ExitCode;

#[path = "parley/app/mod.rs"]
mod app;
#[path = "parley/args.rs"]
mod args;
#[path = "parley/config/mod.rs"]
mod config;
#[path = "parley/logging.rs"]
mod logging;
#[path = "parley/render/mod.rs"]
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    app::run().await
}
