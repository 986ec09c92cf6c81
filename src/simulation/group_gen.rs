//! Generates random expense groups to exercise the settlement engine
//! under various shapes and sizes. Never used by the engine itself.

use crate::core::currency::Currency;
use crate::core::group::Group;
use crate::core::member::{Member, MemberId};
use crate::core::transaction::{Transaction, TransactionId};
use chrono::{Duration, Utc};
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for generating a random expense group.
#[derive(Debug, Clone)]
pub struct GroupConfig {
    /// Number of members in the group.
    pub member_count: usize,
    /// Number of transactions to generate.
    pub transaction_count: usize,
    /// Currencies to draw from.
    pub currencies: Vec<Currency>,
    /// Minimum transaction amount, in cents.
    pub min_amount_cents: u64,
    /// Maximum transaction amount, in cents.
    pub max_amount_cents: u64,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            member_count: 5,
            transaction_count: 20,
            currencies: vec![Currency::Eur],
            min_amount_cents: 100,
            max_amount_cents: 50_000,
        }
    }
}

/// Generate a random group for testing.
///
/// Transactions need an owner and a currency to draw from, so a config
/// with no members or no currencies yields a group without
/// transactions.
pub fn generate_random_group(config: &GroupConfig) -> Group {
    let mut rng = rand::thread_rng();
    let mut group = Group::with_id("random_group", "Random Group");

    for i in 0..config.member_count {
        group.add_member(Member::new(
            format!("u{:03}", i),
            format!("Member {:03}", i),
        ));
    }

    if config.member_count == 0 || config.currencies.is_empty() {
        return group;
    }

    let base_time = Utc::now();
    for i in 0..config.transaction_count {
        let member_index = rng.gen_range(0..config.member_count);
        let currency = config.currencies[rng.gen_range(0..config.currencies.len())];
        let cents = rng.gen_range(config.min_amount_cents..=config.max_amount_cents);
        let amount = Decimal::new(cents as i64, 2);
        let datetime = base_time - Duration::minutes(i as i64);

        group.add_transaction(Transaction::with_id(
            TransactionId::from_datetime(datetime),
            MemberId::new(format!("u{:03}", member_index)),
            amount,
            currency,
            format!("Expense {}", i),
            datetime,
        ));
    }

    group
}
