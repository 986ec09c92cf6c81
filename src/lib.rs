//! # tripsplit-engine
//!
//! Group travel-expense tracking and multi-currency debt settlement engine.
//!
//! Given a group of members and the shared transactions they paid for,
//! this engine converts every amount into one display currency,
//! computes each member's net spend, and produces the pairwise
//! transfers that bring everyone to the group average.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: currencies and rates, members, transactions, groups
//! - **engine** — Balance accumulation and the greedy settlement pass
//! - **scan** — Validation of receipt-scan results into transactions
//! - **simulation** — Random group generation for benchmarks and stress tests
//!
//! The engine is pure and synchronous: no I/O, no clock or randomness
//! inside a computation, so any number of invocations can run in
//! parallel without coordination.

pub mod core;
pub mod engine;
pub mod scan;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::currency::{Currency, CurrencyError, RateTable};
    pub use crate::core::group::Group;
    pub use crate::core::member::{Member, MemberId};
    pub use crate::core::transaction::{Category, Transaction, TransactionId};
    pub use crate::engine::balance::{compute_balances, BalanceSheet};
    pub use crate::engine::settlement::{compute_settlements, Settlement, SettlementReport};
    pub use crate::engine::SettleError;
}
