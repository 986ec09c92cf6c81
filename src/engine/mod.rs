//! Balance and settlement computation.
//!
//! The engine is pure: it consumes an already-materialized member list
//! and transaction list, converts every amount into one display
//! currency, and produces per-member balances plus the transfers that
//! bring everyone to the group average. Identical inputs always yield
//! identical outputs.

pub mod balance;
pub mod settlement;

use crate::core::currency::CurrencyError;
use crate::core::member::MemberId;
use crate::core::transaction::TransactionId;
use thiserror::Error;

/// Errors raised by the balance and settlement computations.
///
/// All errors surface synchronously to the caller; the engine never
/// retries and never substitutes a plausible-looking number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettleError {
    #[error(transparent)]
    Currency(#[from] CurrencyError),
    /// Settlement over an empty member set has no defined average.
    #[error("cannot settle a group with no members")]
    NoMembers,
    /// A transaction references a member that is not in the group.
    #[error("transaction {transaction} references unknown member {member}")]
    OrphanTransaction {
        transaction: TransactionId,
        member: MemberId,
    },
}
