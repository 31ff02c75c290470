use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Console logging: user-facing lines go through target `plain`, everything else respects
/// `RUST_LOG` with a quiet default.
pub(crate) fn init_logging() -> anyhow::Result<()> {
    // plain layer (only target="plain"), bare message for ge's own output
    let plain_fmt = tracing_subscriber::fmt::format()
        .without_time()
        .with_level(false)
        .with_target(false)
        .compact();
    let plain_layer = tracing_subscriber::fmt::layer()
        .event_format(plain_fmt)
        .with_writer(std::io::stderr)
        .with_filter(Targets::new().with_target("plain", LevelFilter::TRACE));

    // RUST_LOG wins; otherwise library info plus warnings from dependencies
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,grand_exchange=info,ge=info"));

    // rich layer for everything else
    let rich_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(plain_layer)
        .with(rich_layer)
        .try_init()?;

    Ok(())
}
