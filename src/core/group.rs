use crate::core::currency::Currency;
use crate::core::member::{Member, MemberId};
use crate::core::transaction::{Transaction, TransactionId};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// The aggregate a settlement computation runs over: a named group
/// owning its member set and transaction list plus a default display
/// currency.
///
/// Persistence is an external collaborator's concern; the engine only
/// ever sees a fully materialized group.
///
/// # Examples
///
/// ```
/// use tripsplit_engine::core::group::Group;
/// use tripsplit_engine::core::member::Member;
///
/// let mut group = Group::new("Seoul Trip");
/// group.add_member(Member::new("u1", "Alice"));
/// assert_eq!(group.members.len(), 1);
/// assert!(group.id.starts_with("seoulTrip_"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    pub members: Vec<Member>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default = "default_display_currency")]
    pub default_currency: Currency,
}

fn default_display_currency() -> Currency {
    Currency::Eur
}

impl Group {
    /// Create an empty group with a generated id: the camelCased name
    /// joined to the creation timestamp in millis.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let id = format!("{}_{}", camel_case_slug(&name), Utc::now().timestamp_millis());
        Self {
            id,
            name,
            members: Vec::new(),
            transactions: Vec::new(),
            default_currency: default_display_currency(),
        }
    }

    /// Create a group with a specific id (for loading persisted records).
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            members: Vec::new(),
            transactions: Vec::new(),
            default_currency: default_display_currency(),
        }
    }

    pub fn with_default_currency(mut self, currency: Currency) -> Self {
        self.default_currency = currency;
        self
    }

    pub fn add_member(&mut self, member: Member) {
        self.members.push(member);
    }

    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Remove a transaction by id. Edits are modeled as remove followed
    /// by re-add; stored transactions are never mutated in place.
    pub fn remove_transaction(&mut self, id: TransactionId) -> Option<Transaction> {
        let index = self.transactions.iter().position(|t| t.id == id)?;
        Some(self.transactions.remove(index))
    }

    pub fn member(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }
}

/// camelCase a group name for use in its id ("Seoul Trip" -> "seoulTrip").
fn camel_case_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for (i, word) in name.split_whitespace().enumerate() {
        let mut chars = word.chars();
        let Some(first) = chars.next() else { continue };
        if i == 0 {
            slug.extend(first.to_lowercase());
        } else {
            slug.extend(first.to_uppercase());
        }
        slug.extend(chars);
    }
    slug
}
