use anyhow::Result;
use clap::Parser;
use config_manager::SystemConfig;
use orbit_client::{OrbitClient, OrbitClientConfig};
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};
use wallet_core::{Address, WalletError};

mod render;

use render::TextRenderer;

/// Show the balance and recent transactions of an Orbit wallet
#[derive(Debug, Parser)]
#[command(name = "orbit_wallet", version)]
struct Cli {
    /// Wallet address to look up
    address: String,

    /// Print the wallet view as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter_handle = init_tracing();

    let (address, config) = prepare(&cli)?;
    if config.system.debug_mode {
        raise_to_debug(filter_handle.as_ref());
    }
    debug!("Configuration: {:#?}", config);

    let client = OrbitClient::with_config(OrbitClientConfig::from(&config.api))?;
    let view = client
        .fetch_wallet_view(&address)
        .await
        .map_err(WalletError::from)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", TextRenderer::new(config.display.clone()).render(&view));
    }

    Ok(())
}

/// The address is validated before the config file is read, so a blank
/// address is reported even when the config is broken.
fn prepare(cli: &Cli) -> Result<(Address, SystemConfig)> {
    let address = Address::normalize(&cli.address)?;
    let config = SystemConfig::load_from_path(&cli.config)?;
    Ok((address, config))
}

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Install the stderr subscriber at `info`, or at `RUST_LOG` when set. The
/// returned handle allows `debug_mode` to raise the level once config is
/// loaded; it is `None` when `RUST_LOG` already decides the level.
fn init_tracing() -> Option<FilterHandle> {
    let from_env = EnvFilter::try_from_default_env().ok();
    let env_decides = from_env.is_some();
    let (filter, handle) = reload::Layer::new(from_env.unwrap_or_else(|| EnvFilter::new("info")));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    (!env_decides).then_some(handle)
}

fn raise_to_debug(handle: Option<&FilterHandle>) {
    if let Some(handle) = handle {
        if let Err(e) = handle.modify(|filter| *filter = EnvFilter::new("debug")) {
            warn!("Could not switch log level to debug: {}", e);
        }
    }
}
