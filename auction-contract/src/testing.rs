//! In-memory collaborators for deployer tests.

use std::path::PathBuf;

use alloy::{
    json_abi::JsonAbi,
    primitives::{Address, B256, TxHash, hex},
};
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::artifact::{ArtifactResolver, ContractArtifact};
use crate::chain::{Chain, CreationTx};
use crate::error::{ConfirmationError, ResolutionError, SubmissionError};

pub const AUCTION_ABI: &str = r#"[
    {
        "type": "constructor",
        "inputs": [
            { "name": "_bettingPeriod", "type": "uint256", "internalType": "uint256" },
            { "name": "_taskSettlementPeriod", "type": "uint256", "internalType": "uint256" }
        ],
        "stateMutability": "nonpayable"
    }
]"#;

/// Init code that ignores its arguments and leaves a single `STOP` as runtime code.
pub const AUCTION_BYTECODE: &str = "0x6001600c60003960016000f300";

pub fn auction_artifact() -> ContractArtifact {
    ContractArtifact {
        name: "Auction".to_string(),
        source: PathBuf::from("contracts/Auction.sol/Auction.json"),
        abi: serde_json::from_str::<JsonAbi>(AUCTION_ABI).unwrap(),
        bytecode: hex::decode(AUCTION_BYTECODE).unwrap().into(),
    }
}

pub struct StubResolver {
    artifact: Option<ContractArtifact>,
    requested: Mutex<Vec<String>>,
}

impl StubResolver {
    pub fn auction() -> Self {
        Self {
            artifact: Some(auction_artifact()),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn without_constructor() -> Self {
        let mut artifact = auction_artifact();
        artifact.abi.constructor = None;
        Self {
            artifact: Some(artifact),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn missing() -> Self {
        Self {
            artifact: None,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().clone()
    }
}

#[async_trait]
impl ArtifactResolver for StubResolver {
    async fn resolve(&self, name: &str) -> Result<ContractArtifact, ResolutionError> {
        self.requested.lock().push(name.to_string());
        self.artifact
            .clone()
            .ok_or_else(|| ResolutionError::NotFound {
                name: name.to_string(),
                root: PathBuf::from("artifacts"),
            })
    }
}

enum Outcome {
    Deployed(Address),
    Rejected,
    Reverted,
}

pub struct StubChain {
    outcome: Outcome,
    submitted: Mutex<Vec<CreationTx>>,
    confirmed: Mutex<Vec<TxHash>>,
}

impl StubChain {
    fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            submitted: Mutex::new(Vec::new()),
            confirmed: Mutex::new(Vec::new()),
        }
    }

    pub fn confirming(addr: Address) -> Self {
        Self::new(Outcome::Deployed(addr))
    }

    pub fn rejecting() -> Self {
        Self::new(Outcome::Rejected)
    }

    pub fn reverting() -> Self {
        Self::new(Outcome::Reverted)
    }

    pub fn submitted(&self) -> Vec<CreationTx> {
        self.submitted.lock().clone()
    }

    pub fn confirmed(&self) -> Vec<TxHash> {
        self.confirmed.lock().clone()
    }
}

#[async_trait]
impl Chain for StubChain {
    async fn submit(&self, tx: &CreationTx) -> Result<TxHash, SubmissionError> {
        if let Outcome::Rejected = self.outcome {
            return Err(SubmissionError::Rejected("insufficient funds for gas".into()));
        }
        let mut submitted = self.submitted.lock();
        submitted.push(tx.clone());
        Ok(B256::with_last_byte(submitted.len() as u8))
    }

    async fn confirm(&self, tx_hash: TxHash) -> Result<Address, ConfirmationError> {
        self.confirmed.lock().push(tx_hash);
        match self.outcome {
            Outcome::Deployed(addr) => Ok(addr),
            Outcome::Reverted => Err(ConfirmationError::Reverted(tx_hash)),
            Outcome::Rejected => Err(ConfirmationError::MissingAddress(tx_hash)),
        }
    }
}
