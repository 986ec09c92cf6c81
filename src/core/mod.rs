//! Foundational types: currencies, members, transactions, groups.

pub mod currency;
pub mod group;
pub mod member;
pub mod transaction;
