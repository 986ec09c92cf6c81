use crate::core::currency::Currency;
use crate::core::member::MemberId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// The most recent id handed out by [`TransactionId::issue`]. Ids must
/// stay unique even when two transactions are created within the same
/// millisecond, so issuing always advances past this watermark.
static LAST_ISSUED: AtomicI64 = AtomicI64::new(0);

/// Identifier for a transaction, derived from its creation timestamp
/// (milliseconds since the Unix epoch). Unique within a group: when
/// creations collide on the same millisecond, the id is bumped to the
/// next free value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TransactionId(i64);

impl TransactionId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Derive an id from a timestamp. Pure: two equal timestamps give
    /// equal ids. Useful for loading persisted records; creation paths
    /// use [`TransactionId::issue`] instead.
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime.timestamp_millis())
    }

    /// Issue a fresh id for a transaction created at `datetime`.
    ///
    /// The id is the timestamp in millis, bumped past any id issued
    /// earlier in this process so that back-to-back creations within
    /// one millisecond still get distinct ids.
    pub fn issue(datetime: DateTime<Utc>) -> Self {
        let millis = datetime.timestamp_millis();
        let mut last = LAST_ISSUED.load(Ordering::Relaxed);
        loop {
            let candidate = (last + 1).max(millis);
            match LAST_ISSUED.compare_exchange_weak(
                last,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Self(candidate),
                Err(actual) => last = actual,
            }
        }
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Spending category tag for a transaction.
///
/// Optional on the wire: group files written before categories existed
/// simply omit the field and fall back to [`Category::Other`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transportation,
    Entertainment,
    Shopping,
    Accommodation,
    #[default]
    Other,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Food => "Food",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Accommodation => "Accommodation",
            Category::Other => "Other",
        };
        write!(f, "{label}")
    }
}

/// A single shared expense, owned by the member who paid it.
///
/// Transactions are immutable once created; an edit is modeled as
/// delete followed by recreate. The amount is non-negative and stays in
/// its original currency — conversion into a display currency happens
/// only when balances are computed.
///
/// # Examples
///
/// ```
/// use tripsplit_engine::core::currency::Currency;
/// use tripsplit_engine::core::member::MemberId;
/// use tripsplit_engine::core::transaction::Transaction;
/// use rust_decimal_macros::dec;
///
/// let tx = Transaction::new(MemberId::new("u1"), dec!(42.50), Currency::Eur, "Dinner");
/// assert_eq!(tx.amount, dec!(42.50));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    /// The amount paid. Must be non-negative.
    pub amount: Decimal,
    pub currency: Currency,
    /// Short descriptive title, e.g. "Dinner at Oseyo".
    pub message: String,
    /// Longer free-form description.
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub category: Category,
    /// The member who paid. Settlement attributes the full amount to
    /// this member; there is no per-beneficiary split.
    pub member_id: MemberId,
    pub datetime: DateTime<Utc>,
}

impl Transaction {
    /// Create a transaction stamped with the current time.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is negative.
    pub fn new(
        member_id: MemberId,
        amount: Decimal,
        currency: Currency,
        message: impl Into<String>,
    ) -> Self {
        assert!(
            amount >= Decimal::ZERO,
            "transaction amount must be non-negative, got {}",
            amount
        );
        let now = Utc::now();
        Self {
            id: TransactionId::issue(now),
            amount,
            currency,
            message: message.into(),
            details: String::new(),
            category: Category::default(),
            member_id,
            datetime: now,
        }
    }

    /// Create a transaction with a specific id and datetime (useful for
    /// testing and for loading persisted records).
    pub fn with_id(
        id: TransactionId,
        member_id: MemberId,
        amount: Decimal,
        currency: Currency,
        message: impl Into<String>,
        datetime: DateTime<Utc>,
    ) -> Self {
        assert!(amount >= Decimal::ZERO);
        Self {
            id,
            amount,
            currency,
            message: message.into(),
            details: String::new(),
            category: Category::default(),
            member_id,
            datetime,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_datetime(mut self, datetime: DateTime<Utc>) -> Self {
        self.datetime = datetime;
        self
    }
}
