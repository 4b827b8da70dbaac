use std::io;
use std::path::PathBuf;

use alloy::primitives::TxHash;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Any failure of a deployment run.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error(transparent)]
    Confirmation(#[from] ConfirmationError),

    #[error("failed to report deployment: {0}")]
    Output(#[from] io::Error),
}

impl DeployError {
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::Resolution(_))
    }

    pub fn is_submission(&self) -> bool {
        matches!(self, Self::Submission(_))
    }

    pub fn is_confirmation(&self) -> bool {
        matches!(self, Self::Confirmation(_))
    }
}

/// The contract template could not be resolved to deployable bytecode.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("artifact for contract {name:?} not found under {root:?}")]
    NotFound { name: String, root: PathBuf },

    #[error("multiple artifacts for contract {name:?}: {candidates:?}")]
    Ambiguous {
        name: String,
        candidates: Vec<PathBuf>,
    },

    #[error("failed to read artifact {0:?}: {1}")]
    Io(PathBuf, #[source] io::Error),

    #[error("invalid artifact {0:?}: {1}")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("contract {name:?} is not deployable: {reason}")]
    NotDeployable { name: String, reason: String },
}

/// The creation transaction could not be built or sent.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("invalid constructor arguments for {contract}: {source}")]
    Arguments {
        contract: String,
        #[source]
        source: alloy::dyn_abi::Error,
    },

    #[error("{contract} takes {expected} constructor arguments, {actual} given")]
    Arity {
        contract: String,
        expected: usize,
        actual: usize,
    },

    #[error("creation tx rejected: {0}")]
    Rejected(#[source] BoxError),
}

/// The creation transaction was sent but its outcome is not a deployed contract.
#[derive(Debug, Error)]
pub enum ConfirmationError {
    #[error("failed to confirm tx {0}: {1}")]
    Receipt(TxHash, #[source] BoxError),

    #[error("tx {0} reverted")]
    Reverted(TxHash),

    #[error("tx {0} mined without a contract address")]
    MissingAddress(TxHash),
}
