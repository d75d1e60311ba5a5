use anyhow::Context;
use clap::Parser;
use shelter_web::config::init_shared_app_state;
use shelter_web::{adapter, cmd::*, config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // step1. parse cli
    let cli = ShelterCli::parse();
    match cli.command {
        Commands::Run { config } => {
            let config = config::parse_config(&config).await?;
            // env first, then config directives
            let mut filter = tracing_subscriber::EnvFilter::from_default_env();
            if let Some(tracing) = &config.tracing {
                for x in tracing.filter.split(',').filter(|x| !x.trim().is_empty()) {
                    let directive = x
                        .trim()
                        .parse()
                        .with_context(|| format!("invalid tracing directive: {x}"))?;
                    filter = filter.add_directive(directive);
                }
            }
            tracing_subscriber::fmt().with_env_filter(filter).init();
            // step2. init state
            let state = init_shared_app_state(&config)
                .await
                .context("connect database")?;
            // step3. start web
            adapter::http::server::start_http_server(&config, state).await?;
        }
    }
    Ok(())
}
