use crate::app::Application;
use crate::utils::logging::init_logging;
use anyhow::Context;

mod app;
mod cli;
mod output;
mod utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging().context("initializing logging")?;

    let app = Application::init()?;
    app.run().await
}
