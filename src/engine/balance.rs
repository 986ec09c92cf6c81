use crate::core::currency::{Currency, RateTable};
use crate::core::member::{Member, MemberId};
use crate::core::transaction::Transaction;
use crate::engine::SettleError;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-member net spend in a single display currency.
///
/// Derived on every recomputation, never persisted. Every group member
/// has an entry, including members with no transactions — they sit at
/// zero and show up as net debtors once others have spent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheet {
    balances: HashMap<MemberId, Decimal>,
    display_currency: Currency,
}

impl BalanceSheet {
    /// The converted net spend of a member. Members absent from the
    /// sheet read as zero.
    pub fn balance(&self, member: &MemberId) -> Decimal {
        self.balances.get(member).copied().unwrap_or(Decimal::ZERO)
    }

    /// Total spend across all members, in the display currency.
    pub fn total_spent(&self) -> Decimal {
        self.balances.values().sum()
    }

    /// Number of members on the sheet.
    pub fn member_count(&self) -> usize {
        self.balances.len()
    }

    /// The currency every balance is expressed in.
    pub fn display_currency(&self) -> Currency {
        self.display_currency
    }

    /// All entries, in arbitrary order. Use the group's member list for
    /// display ordering.
    pub fn entries(&self) -> &HashMap<MemberId, Decimal> {
        &self.balances
    }
}

/// Compute each member's net spend converted into `display_currency`.
///
/// Every member starts at exactly zero; each transaction's amount is
/// converted and credited to its owner. The full amount goes to the
/// payer — there is no per-beneficiary split; settlement later assumes
/// costs are shared equally across the whole group.
///
/// # Errors
///
/// - [`SettleError::Currency`] if a transaction's currency (or the
///   display currency) has no rate in `rates`.
/// - [`SettleError::OrphanTransaction`] if a transaction's owner is not
///   in `members`. The computation fails fast rather than dropping the
///   amount, so a corrupted group cannot produce a quietly wrong total.
pub fn compute_balances(
    members: &[Member],
    transactions: &[Transaction],
    display_currency: Currency,
    rates: &RateTable,
) -> Result<BalanceSheet, SettleError> {
    let mut balances: HashMap<MemberId, Decimal> = members
        .iter()
        .map(|m| (m.id.clone(), Decimal::ZERO))
        .collect();

    for tx in transactions {
        let converted = rates.convert(tx.amount, tx.currency, display_currency)?;
        let entry = balances
            .get_mut(&tx.member_id)
            .ok_or_else(|| SettleError::OrphanTransaction {
                transaction: tx.id,
                member: tx.member_id.clone(),
            })?;
        *entry += converted;
    }

    debug!(
        "computed balances for {} members over {} transactions in {}",
        members.len(),
        transactions.len(),
        display_currency
    );

    Ok(BalanceSheet {
        balances,
        display_currency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn members() -> Vec<Member> {
        vec![
            Member::new("u1", "Alice"),
            Member::new("u2", "Bob"),
            Member::new("u3", "Carol"),
        ]
    }

    fn tx(member: &str, amount: Decimal, currency: Currency) -> Transaction {
        Transaction::new(MemberId::new(member), amount, currency, "test")
    }

    #[test]
    fn test_members_without_transactions_are_zero() {
        let sheet = compute_balances(
            &members(),
            &[tx("u1", dec!(100), Currency::Eur)],
            Currency::Eur,
            &RateTable::default(),
        )
        .unwrap();

        assert_eq!(sheet.member_count(), 3);
        assert_eq!(sheet.balance(&MemberId::new("u1")), dec!(100));
        assert_eq!(sheet.balance(&MemberId::new("u2")), Decimal::ZERO);
        assert_eq!(sheet.balance(&MemberId::new("u3")), Decimal::ZERO);
    }

    #[test]
    fn test_single_currency_total_matches_transaction_sum() {
        let txs = vec![
            tx("u1", dec!(30.50), Currency::Eur),
            tx("u2", dec!(19.50), Currency::Eur),
            tx("u1", dec!(50), Currency::Eur),
        ];
        let sheet =
            compute_balances(&members(), &txs, Currency::Eur, &RateTable::default()).unwrap();
        assert_eq!(sheet.total_spent(), dec!(100));
        assert_eq!(sheet.balance(&MemberId::new("u1")), dec!(80.50));
    }

    #[test]
    fn test_converts_into_display_currency() {
        let sheet = compute_balances(
            &members(),
            &[tx("u1", dec!(100), Currency::Eur)],
            Currency::Usd,
            &RateTable::default(),
        )
        .unwrap();
        // (100 / 0.904) * 1 ≈ 110.62
        assert_eq!(sheet.balance(&MemberId::new("u1")).round_dp(2), dec!(110.62));
    }

    #[test]
    fn test_orphan_transaction_fails_fast() {
        let orphan = tx("ghost", dec!(10), Currency::Eur);
        let id = orphan.id;
        let err = compute_balances(&members(), &[orphan], Currency::Eur, &RateTable::default())
            .unwrap_err();
        assert_eq!(
            err,
            SettleError::OrphanTransaction {
                transaction: id,
                member: MemberId::new("ghost"),
            }
        );
    }

    #[test]
    fn test_missing_rate_propagates() {
        let mut rates = RateTable::new(Currency::Usd);
        rates.set_rate(Currency::Usd, Decimal::ONE).unwrap();
        let err = compute_balances(
            &members(),
            &[tx("u1", dec!(10), Currency::Krw)],
            Currency::Usd,
            &rates,
        )
        .unwrap_err();
        assert!(matches!(err, SettleError::Currency(_)));
    }

    #[test]
    fn test_empty_member_list_yields_empty_sheet() {
        let sheet =
            compute_balances(&[], &[], Currency::Eur, &RateTable::default()).unwrap();
        assert_eq!(sheet.member_count(), 0);
        assert_eq!(sheet.total_spent(), Decimal::ZERO);
    }
}
