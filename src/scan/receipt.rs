use crate::core::currency::{Currency, CurrencyError};
use crate::core::member::MemberId;
use crate::core::transaction::{Category, Transaction};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while turning a scan result into a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error(transparent)]
    Currency(#[from] CurrencyError),
    #[error("scanned amount must be non-negative, got {0}")]
    NegativeAmount(Decimal),
}

/// The best-effort guess the receipt-scanning service returns for one
/// receipt image.
///
/// The currency arrives as a raw string and the category and datetime
/// may be missing. A scan gets no special trust: it passes through
/// exactly the currency and amount checks a manually entered
/// transaction would.
///
/// # Examples
///
/// ```
/// use tripsplit_engine::core::member::MemberId;
/// use tripsplit_engine::scan::receipt::ReceiptScan;
///
/// let scan: ReceiptScan = serde_json::from_str(r#"{
///     "message": "Dinner at Oseyo",
///     "details": "Bibimbap and drinks",
///     "amount": "42.80",
///     "currency": "EUR"
/// }"#).unwrap();
/// let tx = scan.into_transaction(MemberId::new("u1")).unwrap();
/// assert_eq!(tx.message, "Dinner at Oseyo");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptScan {
    pub message: String,
    #[serde(default)]
    pub details: String,
    pub amount: Decimal,
    pub currency: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub datetime: Option<DateTime<Utc>>,
}

impl ReceiptScan {
    /// Validate the guess and build a transaction owned by `member`.
    ///
    /// An unrecognized currency string (the scanner occasionally emits
    /// codes like "WON") fails with [`CurrencyError::InvalidCurrency`]
    /// so the caller can ask the user to fix it; it is never coerced to
    /// a default. A missing datetime falls back to now, a missing
    /// category to [`Category::Other`].
    pub fn into_transaction(self, member: MemberId) -> Result<Transaction, ScanError> {
        let currency: Currency = self.currency.parse()?;
        if self.amount < Decimal::ZERO {
            return Err(ScanError::NegativeAmount(self.amount));
        }

        let mut tx = Transaction::new(member, self.amount, currency, self.message)
            .with_details(self.details)
            .with_category(self.category.unwrap_or_default());
        if let Some(datetime) = self.datetime {
            tx = tx.with_datetime(datetime);
        }
        Ok(tx)
    }
}
