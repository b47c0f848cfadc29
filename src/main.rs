use anyhow::Context;
use clap::Parser;
use flightsurety_dapp::app::{display, session};
use flightsurety_dapp::utils::{logger, validation::Validate};
use flightsurety_dapp::{CliConfig, Dapp, DappConfig, FlightSuretyContract, JsonRpcProvider};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Loading configuration from: {}", cli.config);
    let config = match DappConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let network = config.network(cli.network.as_deref())?;
    tracing::info!(
        "Network '{}' at {} (app {}, data {})",
        network.name,
        network.url,
        network.app_address,
        network.data_address
    );

    let provider = JsonRpcProvider::with_timeout(&network.url, config.request_timeout())?;
    let contract = FlightSuretyContract::connect(provider, network.app_address, network.data_address)
        .await
        .with_context(|| format!("failed to read accounts from {}", network.url))?;

    let base_timestamp_ms = config
        .base_timestamp_ms()
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis().max(0) as u64);
    let mut dapp = Dapp::new(contract, base_timestamp_ms)?;
    dapp.load().await;

    let mut stdout = std::io::stdout();
    match cli.action {
        Some(action) => action.apply(&mut dapp, &mut stdout).await?,
        None => {
            print!("{}", display::render_page(dapp.page()));
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            session::run_session(&mut dapp, stdin, &mut stdout).await?;
        }
    }

    Ok(())
}
