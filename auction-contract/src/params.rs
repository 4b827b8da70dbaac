//! Constructor parameters of the Auction contract.

use alloy::{dyn_abi::DynSolValue, primitives::U256};

const DAY_SECS: u64 = 24 * 60 * 60;

/// How long bidding stays open, in seconds.
pub const BETTING_PERIOD_SECS: u64 = 2 * DAY_SECS;

/// How long settling a task may take, in seconds.
pub const TASK_SETTLEMENT_PERIOD_SECS: u64 = 2 * DAY_SECS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuctionParams {
    pub betting_period: u64,
    pub task_settlement_period: u64,
}

impl Default for AuctionParams {
    fn default() -> Self {
        Self {
            betting_period: BETTING_PERIOD_SECS,
            task_settlement_period: TASK_SETTLEMENT_PERIOD_SECS,
        }
    }
}

impl AuctionParams {
    /// Arguments in the order of `constructor(uint256 bettingPeriod, uint256 taskSettlementPeriod)`.
    pub fn constructor_args(&self) -> Vec<DynSolValue> {
        vec![
            DynSolValue::Uint(U256::from(self.betting_period), 256),
            DynSolValue::Uint(U256::from(self.task_settlement_period), 256),
        ]
    }
}
