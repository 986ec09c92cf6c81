//! Basic balance and settlement example.
//!
//! Builds a small trip group with expenses in three currencies and
//! prints the settlement plan in EUR and USD.

use rust_decimal_macros::dec;
use tripsplit_engine::core::currency::{Currency, RateTable};
use tripsplit_engine::core::group::Group;
use tripsplit_engine::core::member::{Member, MemberId};
use tripsplit_engine::core::transaction::{Category, Transaction};
use tripsplit_engine::engine::settlement::SettlementReport;

fn main() {
    let mut group = Group::new("Seoul Trip");
    group.add_member(Member::new("u1", "Alice"));
    group.add_member(Member::new("u2", "Bob"));
    group.add_member(Member::new("u3", "Carol"));

    group.add_transaction(
        Transaction::new(MemberId::new("u1"), dec!(180), Currency::Eur, "Hanok stay")
            .with_category(Category::Accommodation)
            .with_details("Two nights in Bukchon"),
    );
    group.add_transaction(
        Transaction::new(MemberId::new("u2"), dec!(53480), Currency::Krw, "BBQ dinner")
            .with_category(Category::Food),
    );
    group.add_transaction(
        Transaction::new(MemberId::new("u3"), dec!(45), Currency::Usd, "Palace tickets")
            .with_category(Category::Entertainment),
    );

    let rates = RateTable::default();

    for display in [Currency::Eur, Currency::Usd] {
        println!("━━━ Displayed in {} ━━━\n", display);
        let report =
            SettlementReport::compute(&group.members, &group.transactions, display, &rates)
                .expect("demo group is well-formed");
        println!("{}", report);
    }
}
