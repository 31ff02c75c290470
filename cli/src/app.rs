use crate::cli::{Cli, ClientArgs, Command, IdsArgs};
use crate::output::Report;
use anyhow::{Context, Result};
use clap::Parser;
use grand_exchange::{ClientConfig, ExchangeClient};
use std::time::Duration;
use tracing::debug;

pub struct Application {
    config: ClientConfig,
    client: ExchangeClient,
    cmd: Command,
}

impl Application {
    pub fn init() -> Result<Application> {
        let cli = Cli::parse();

        // Values from the env file only fill in what the process environment lacks, so
        // parse again once it is loaded to pick them up as flag fallbacks.
        let cli = match dotenvy::from_filename(&cli.env_file) {
            Ok(path) => {
                debug!("loaded environment from {}", path.display());
                Cli::parse()
            }
            Err(_) => cli,
        };

        let config = client_config(&cli.client).context("Invalid client configuration")?;
        let client = ExchangeClient::new(&config).context("Failed to build HTTP client")?;

        Ok(Application {
            config,
            client,
            cmd: cli.cmd,
        })
    }

    pub async fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Item(args) => self.items(args).await,
            Command::Graph(args) => self.graphs(args).await,
        }
    }

    async fn items(&self, args: &IdsArgs) -> Result<()> {
        let records = match args.ids.as_slice() {
            [id] => vec![self
                .client
                .fetch_item(*id)
                .await
                .with_context(|| format!("Failed to fetch item {id}"))?],
            ids => self.client.batch_fetch_items(ids).await,
        };

        Report::new(self.config.catalogue, args.ids.len(), records).emit("item", args.compact)
    }

    async fn graphs(&self, args: &IdsArgs) -> Result<()> {
        let records = match args.ids.as_slice() {
            [id] => vec![self
                .client
                .fetch_graph(*id)
                .await
                .with_context(|| format!("Failed to fetch graph for item {id}"))?],
            ids => self.client.batch_fetch_graphs(ids).await,
        };

        Report::new(self.config.catalogue, args.ids.len(), records).emit("graph", args.compact)
    }
}

fn client_config(args: &ClientArgs) -> Result<ClientConfig> {
    let mut builder = ClientConfig::builder();
    builder
        .base_url(args.base_url.clone())
        .catalogue(args.catalogue)
        .concurrency(args.concurrency)
        .request_timeout(Duration::from_secs(args.request_timeout_secs));
    if let Some(secs) = args.batch_deadline_secs {
        builder.batch_deadline(Duration::from_secs(secs));
    }

    builder.build().map_err(Into::into)
}
