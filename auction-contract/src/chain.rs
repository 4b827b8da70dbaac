//! Submission and confirmation of contract-creation transactions.

use std::time::Duration;

use alloy::{
    contract::RawCallBuilder,
    dyn_abi::{DynSolValue, JsonAbiExt},
    network::Ethereum,
    primitives::{Address, Bytes, TxHash},
    providers::{PendingTransactionBuilder, Provider},
};
use async_trait::async_trait;
use tracing::{info, warn};

use crate::artifact::ContractArtifact;
use crate::error::{ConfirmationError, SubmissionError};

/// A contract-creation transaction: creation bytecode followed by the
/// ABI-encoded constructor arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct CreationTx {
    pub contract: String,
    pub args: Vec<DynSolValue>,
    pub input: Bytes,
}

impl CreationTx {
    /// Type-checks `args` against the artifact's constructor and encodes them.
    pub fn new(
        artifact: &ContractArtifact,
        args: Vec<DynSolValue>,
    ) -> Result<Self, SubmissionError> {
        let encoded = match &artifact.abi.constructor {
            Some(ctor) => {
                ctor.abi_encode_input(&args)
                    .map_err(|source| SubmissionError::Arguments {
                        contract: artifact.name.clone(),
                        source,
                    })?
            }
            None if args.is_empty() => Vec::new(),
            None => {
                return Err(SubmissionError::Arity {
                    contract: artifact.name.clone(),
                    expected: 0,
                    actual: args.len(),
                });
            }
        };

        let mut input = Vec::with_capacity(artifact.bytecode.len() + encoded.len());
        input.extend_from_slice(&artifact.bytecode);
        input.extend_from_slice(&encoded);

        Ok(Self {
            contract: artifact.name.clone(),
            args,
            input: input.into(),
        })
    }
}

/// The network a contract is deployed to.
#[async_trait]
pub trait Chain: Send + Sync {
    /// Send the creation transaction and return its hash.
    async fn submit(&self, tx: &CreationTx) -> Result<TxHash, SubmissionError>;

    /// Wait until the transaction is mined and return the created contract's address.
    async fn confirm(&self, tx_hash: TxHash) -> Result<Address, ConfirmationError>;
}

/// [`Chain`] backed by an alloy provider with a wallet.
#[derive(Debug, Clone)]
pub struct RpcChain<P> {
    provider: P,
    confirmations: u64,
    timeout: Option<Duration>,
}

impl<P: Provider> RpcChain<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            confirmations: 1,
            timeout: None,
        }
    }

    /// At least one confirmation is always awaited.
    pub fn with_confirmations(mut self, n: u64) -> Self {
        if n == 0 {
            warn!("0 confirmations requested, waiting for 1");
        }
        self.confirmations = n.max(1);
        self
    }

    pub fn confirmations(&self) -> u64 {
        self.confirmations
    }

    pub fn with_timeout(mut self, t: Option<Duration>) -> Self {
        self.timeout = t;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

#[async_trait]
impl<P: Provider> Chain for RpcChain<P> {
    async fn submit(&self, tx: &CreationTx) -> Result<TxHash, SubmissionError> {
        let call = RawCallBuilder::<_, Ethereum>::new_raw_deploy(&self.provider, tx.input.clone());
        let pending = call
            .send()
            .await
            .map_err(|e| SubmissionError::Rejected(Box::new(e)))?;
        Ok(*pending.tx_hash())
    }

    async fn confirm(&self, tx_hash: TxHash) -> Result<Address, ConfirmationError> {
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), tx_hash)
            .with_required_confirmations(self.confirmations)
            .with_timeout(self.timeout)
            .get_receipt()
            .await
            .map_err(|e| ConfirmationError::Receipt(tx_hash, Box::new(e)))?;
        info!(%receipt.gas_used, %tx_hash, "tx mined");

        if !receipt.status() {
            return Err(ConfirmationError::Reverted(tx_hash));
        }
        receipt
            .contract_address
            .ok_or(ConfirmationError::MissingAddress(tx_hash))
    }
}
