//! CLI for Auction contract deployment
//!
//! # Local test
//! Start `anvil`, compile the contracts, then run
//! `cargo run --bin deploy-auction -- -c auction-contract/test-configs/deploy.toml`
use std::{io, path::PathBuf};

use alloy::providers::WalletProvider;
use anyhow::{Context, Result, bail};
use auction_contract::{
    ArtifactStore, RpcChain,
    config::{DeployConfig, record_or_warn},
    logging,
    provider::{build_provider, chain_id_mismatch},
};
use clap::Parser;
use tracing::info;

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Deployment config file
    #[clap(short, long, default_value = "./deploy.toml")]
    config: PathBuf,

    /// Wallet mnemonic, takes precedence over the config file
    #[clap(short, long, env = "AUCTION_DEPLOYER_MNEMONIC", hide_env_values = true)]
    mnemonic: Option<String>,

    /// Do not write the deployed address back into the config file
    #[clap(long)]
    no_record: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init_logging();

    let args = Args::parse();
    let config_path = args.config;

    info!("Starting Auction deployment with config: {:?}", config_path);
    let config = DeployConfig::read(&config_path).await?;

    let Some(mnemonic) = args.mnemonic.or(config.wallet.mnemonic.clone()) else {
        bail!("no wallet mnemonic in {config_path:?} or AUCTION_DEPLOYER_MNEMONIC");
    };
    let provider = build_provider(
        mnemonic,
        config.wallet.account_index,
        config.network.rpc_url.clone(),
    )
    .context("Failed to build wallet from mnemonic")?;

    if let Some(expected) = config.network.chain_id {
        let mismatch = chain_id_mismatch(&provider, expected)
            .await
            .with_context(|| format!("Failed to query {}", config.network.rpc_url))?;
        if let Some(actual) = mismatch {
            bail!("chain id mismatch: config expects {expected}, node reports {actual}");
        }
    }

    let deployer = provider.default_signer_address();
    info!("Deploying with deployer address: {deployer:#x}");

    let artifacts = ArtifactStore::new(config.artifacts_dir(&config_path));
    let chain = RpcChain::new(&provider)
        .with_confirmations(config.network.confirmations)
        .with_timeout(config.network.timeout());

    let addr = auction_contract::run(&artifacts, &chain, &mut io::stdout().lock())
        .await
        .context("Failed to deploy Auction contract")?;

    if !args.no_record && record_or_warn(&config_path, addr).await {
        info!("Config file updated with Auction address: {addr:#x}");
    }

    Ok(())
}
