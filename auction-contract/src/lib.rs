//! Auction contract deployer.
//!
//! Resolves the compiled `Auction` contract, deploys it with its fixed
//! betting and task settlement periods and reports the deployed address.
//! The artifact source and the target chain are passed in explicitly
//! (see [`ArtifactResolver`] and [`Chain`]), so the deployment logic does not
//! depend on a particular provider.

pub mod artifact;
pub mod chain;
pub mod config;
pub mod deployer;
pub mod error;
pub mod logging;
pub mod params;
pub mod provider;

#[cfg(test)]
mod testing;

pub use artifact::{ArtifactResolver, ArtifactStore, ContractArtifact};
pub use chain::{Chain, CreationTx, RpcChain};
pub use deployer::{AUCTION, deploy, deploy_auction, run};
pub use error::{ConfirmationError, DeployError, ResolutionError, SubmissionError};
pub use params::{AuctionParams, BETTING_PERIOD_SECS, TASK_SETTLEMENT_PERIOD_SECS};
