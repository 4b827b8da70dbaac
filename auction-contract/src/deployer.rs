//! Helper logic for contract deployment

use std::io::Write;

use alloy::primitives::Address;
use tracing::info;

use crate::artifact::ArtifactResolver;
use crate::chain::{Chain, CreationTx};
use crate::error::DeployError;
use crate::params::AuctionParams;

/// Name of the contract template deployed by [`run`].
pub const AUCTION: &str = "Auction";

/// Deploy a contract (with logging)
pub async fn deploy<C>(chain: &C, tx: &CreationTx) -> Result<Address, DeployError>
where
    C: Chain + ?Sized,
{
    info!("deploying {}", tx.contract);
    let tx_hash = chain.submit(tx).await?;
    info!(%tx_hash, "waiting for tx to be mined");

    let addr = chain.confirm(tx_hash).await?;
    info!("deployed {} at {addr:#x}", tx.contract);
    Ok(addr)
}

/// Resolve the Auction template and deploy it with `params` as constructor arguments.
pub async fn deploy_auction<R, C>(
    resolver: &R,
    chain: &C,
    params: AuctionParams,
) -> Result<Address, DeployError>
where
    R: ArtifactResolver + ?Sized,
    C: Chain + ?Sized,
{
    let artifact = resolver.resolve(AUCTION).await?;
    info!(
        betting_period = params.betting_period,
        task_settlement_period = params.task_settlement_period,
        artifact = %artifact.source.display(),
        "resolved {AUCTION}"
    );
    let tx = CreationTx::new(&artifact, params.constructor_args())?;
    deploy(chain, &tx).await
}

/// Deploy the Auction contract with its fixed periods and report the address to `out`.
///
/// Nothing is written to `out` unless the deployment is confirmed.
pub async fn run<R, C, W>(resolver: &R, chain: &C, out: &mut W) -> Result<Address, DeployError>
where
    R: ArtifactResolver + ?Sized,
    C: Chain + ?Sized,
    W: Write,
{
    let addr = deploy_auction(resolver, chain, AuctionParams::default()).await?;
    writeln!(out, "{AUCTION} contract deployed to: {addr}")?;
    Ok(addr)
}
