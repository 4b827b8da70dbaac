//! Deployment configuration.
//!
//! See `test-configs/deploy.toml` for an example.

use std::path::{Path, PathBuf};
use std::time::Duration;

use alloy::primitives::Address;
use serde::Deserialize;
use toml_edit::{DocumentMut, value};
use tracing::warn;
use url::Url;

#[derive(Debug, thiserror::Error)]
#[error("config error {0}: {1}")]
pub struct ConfigError(PathBuf, #[source] Box<dyn std::error::Error + Send + Sync>);

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DeployConfig {
    /// Build output directory holding the compiled contract artifacts.
    #[serde(default = "default_artifacts")]
    pub artifacts: PathBuf,
    pub wallet: WalletConfig,
    pub network: NetworkConfig,
    #[serde(default)]
    pub deployments: Deployments,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WalletConfig {
    #[serde(default)]
    pub mnemonic: Option<String>,
    #[serde(default)]
    pub account_index: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkConfig {
    /// RPC endpoint of the target chain
    pub rpc_url: Url,
    /// Checked against the chain id reported by the node, if set.
    #[serde(default)]
    pub chain_id: Option<u64>,
    #[serde(default = "default_confirmations")]
    pub confirmations: u64,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl NetworkConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Deployments {
    /// Address of the last deployed Auction contract.
    pub auction: Option<Address>,
}

fn default_artifacts() -> PathBuf {
    PathBuf::from("./artifacts")
}

fn default_confirmations() -> u64 {
    1
}

impl DeployConfig {
    pub async fn read<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = read_string(path.as_ref()).await?;
        let c: Self =
            toml::from_str(&s).map_err(|e| ConfigError(path.as_ref().into(), Box::new(e)))?;
        if c.network.confirmations == 0 {
            let e = "network.confirmations must be at least 1";
            return Err(ConfigError(path.as_ref().into(), e.into()));
        }
        Ok(c)
    }

    /// Artifacts directory, relative paths taken from the config file's location.
    pub fn artifacts_dir<P: AsRef<Path>>(&self, config_path: P) -> PathBuf {
        if self.artifacts.is_absolute() {
            return self.artifacts.clone();
        }
        match config_path.as_ref().parent() {
            Some(dir) => dir.join(&self.artifacts),
            None => self.artifacts.clone(),
        }
    }
}

/// Set `deployments.auction` in the config file, keeping the rest of the document intact.
pub async fn record_deployment<P: AsRef<Path>>(path: P, addr: Address) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let s = read_string(path).await?;
    let mut doc = s
        .parse::<DocumentMut>()
        .map_err(|e| ConfigError(path.into(), Box::new(e)))?;

    doc["deployments"]["auction"] = value(format!("{addr:#x}"));

    tokio::fs::write(path, doc.to_string())
        .await
        .map_err(|e| ConfigError(path.into(), Box::new(e)))
}

/// Like [`record_deployment`], but a failure only logs a warning.
///
/// The contract is already deployed at this point, so the outcome of the run
/// does not depend on the config file being writable.
pub async fn record_or_warn<P: AsRef<Path>>(path: P, addr: Address) -> bool {
    match record_deployment(path.as_ref(), addr).await {
        Ok(()) => true,
        Err(err) => {
            warn!(%err, %addr, "failed to record deployed address");
            false
        }
    }
}

async fn read_string(path: &Path) -> Result<String, ConfigError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError(path.into(), Box::new(e)))
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    const SAMPLE: &str = include_str!("../test-configs/deploy.toml");

    #[tokio::test]
    async fn reads_sample_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deploy.toml");
        tokio::fs::write(&path, SAMPLE).await.unwrap();

        let config = DeployConfig::read(&path).await.unwrap();
        assert_eq!(config.wallet.account_index, 0);
        assert!(config.wallet.mnemonic.is_some());
        assert_eq!(config.network.rpc_url.as_str(), "http://127.0.0.1:8545/");
        assert_eq!(config.network.chain_id, Some(31337));
        assert_eq!(config.network.confirmations, 1);
        assert_eq!(config.network.timeout(), Some(Duration::from_secs(300)));
        assert!(config.deployments.auction.is_none());
        assert_eq!(config.artifacts_dir(&path), dir.path().join("./artifacts"));
    }

    #[tokio::test]
    async fn defaults_optional_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("minimal.toml");
        let minimal = "[wallet]\n\n[network]\nrpc-url = \"http://localhost:8545\"\n";
        tokio::fs::write(&path, minimal).await.unwrap();

        let config = DeployConfig::read(&path).await.unwrap();
        assert!(config.wallet.mnemonic.is_none());
        assert_eq!(config.network.confirmations, 1);
        assert_eq!(config.network.timeout(), None);
        assert_eq!(config.artifacts, PathBuf::from("./artifacts"));
    }

    #[tokio::test]
    async fn records_deployment_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deploy.toml");
        tokio::fs::write(&path, SAMPLE).await.unwrap();

        let addr = address!("0x5fbdb2315678afecb367f032d93f642f64180aa3");
        record_deployment(&path, addr).await.unwrap();

        let updated = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(updated.contains("# Local hardhat/anvil dev chain"));
        assert!(updated.contains("auction = \"0x5fbdb2315678afecb367f032d93f642f64180aa3\""));

        let config = DeployConfig::read(&path).await.unwrap();
        assert_eq!(config.deployments.auction, Some(addr));
        assert_eq!(config.network.chain_id, Some(31337));
    }

    #[tokio::test]
    async fn rejects_zero_confirmations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deploy.toml");
        let zero = SAMPLE.replace("confirmations = 1", "confirmations = 0");
        tokio::fs::write(&path, zero).await.unwrap();

        let err = DeployConfig::read(&path).await.unwrap_err();
        assert!(err.to_string().contains("confirmations"));
    }

    #[tokio::test]
    async fn failed_record_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let addr = address!("0x5fbdb2315678afecb367f032d93f642f64180aa3");

        assert!(!record_or_warn(dir.path().join("missing.toml"), addr).await);
        assert!(!record_or_warn(dir.path(), addr).await);

        let path = dir.path().join("deploy.toml");
        tokio::fs::write(&path, SAMPLE).await.unwrap();
        assert!(record_or_warn(&path, addr).await);
    }

    #[tokio::test]
    async fn missing_file_names_path() {
        let err = DeployConfig::read("/definitely/not/here.toml")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
