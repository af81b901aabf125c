use clap::Parser;
use tourdesk_app::{run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tourdesk_app=info,tourdesk_booking=info,tourdesk_catalog=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = tourdesk_core::app_config::Config::load()?;
    tracing::info!("Using catalog {}", cli.catalog.as_deref().unwrap_or(&config.catalog.path));

    let output = run(cli, &config).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
