use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ga4gh_report::{Config, ReportGenerator, client::HttpClient};

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr, stdout carries the report
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| config.log_level.clone().into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut client = HttpClient::new(&config.base_url)?;
    if let Some(page_size) = config.page_size {
        client = client.with_page_size(page_size);
    }
    tracing::info!("Querying GA4GH API at {}", client.base_url());

    let stdout = std::io::stdout();
    ReportGenerator::new(&client)
        .with_region(config.region())
        .run(&mut stdout.lock())?;

    Ok(())
}
