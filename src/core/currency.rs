use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A currency the engine can account in.
///
/// The set is closed: every variant must have an entry in the
/// [`RateTable`] used for a computation. Amounts in an unsupported
/// currency are rejected at parse time rather than valued at zero.
///
/// # Examples
///
/// ```
/// use tripsplit_engine::core::currency::Currency;
///
/// let eur: Currency = "EUR".parse().unwrap();
/// assert_eq!(eur, Currency::Eur);
/// assert!("XYZ".parse::<Currency>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "KRW")]
    Krw,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Krw => "KRW",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "KRW" => Ok(Currency::Krw),
            other => Err(CurrencyError::InvalidCurrency(other.to_string())),
        }
    }
}

/// Errors arising from currency parsing and conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    #[error("invalid currency: {0}")]
    InvalidCurrency(String),
    #[error("no exchange rate configured for {0}")]
    MissingRate(Currency),
    #[error("exchange rate must be positive, got {rate} for {currency}")]
    InvalidRate { currency: Currency, rate: Decimal },
}

/// Fixed exchange-rate table, USD-relative.
///
/// Each entry states how many units of a currency one unit of the base
/// currency buys (USD = 1). The table is built once and never mutated
/// at runtime; rate fetching is out of scope.
///
/// Entries keep insertion order so [`RateTable::supported_currencies`]
/// yields a stable sequence for selection controls.
///
/// # Examples
///
/// ```
/// use tripsplit_engine::core::currency::{Currency, RateTable};
/// use rust_decimal_macros::dec;
///
/// let rates = RateTable::default();
/// let usd = rates.convert(dec!(100), Currency::Eur, Currency::Usd).unwrap();
/// assert!(usd > dec!(110) && usd < dec!(111));
/// ```
#[derive(Debug, Clone)]
pub struct RateTable {
    /// The base currency for normalization.
    pub base_currency: Currency,
    /// USD-relative multipliers, in insertion order.
    rates: Vec<(Currency, Decimal)>,
}

impl RateTable {
    /// Create an empty table with the given base currency.
    pub fn new(base_currency: Currency) -> Self {
        Self {
            base_currency,
            rates: Vec::new(),
        }
    }

    /// Set the rate for a currency: 1 unit of the base = `rate` units of `currency`.
    pub fn set_rate(&mut self, currency: Currency, rate: Decimal) -> Result<(), CurrencyError> {
        if rate <= Decimal::ZERO {
            return Err(CurrencyError::InvalidRate { currency, rate });
        }
        if let Some(entry) = self.rates.iter_mut().find(|(c, _)| *c == currency) {
            entry.1 = rate;
        } else {
            self.rates.push((currency, rate));
        }
        Ok(())
    }

    /// Get the base-relative rate for a currency.
    pub fn rate(&self, currency: Currency) -> Result<Decimal, CurrencyError> {
        self.rates
            .iter()
            .find(|(c, _)| *c == currency)
            .map(|(_, r)| *r)
            .ok_or(CurrencyError::MissingRate(currency))
    }

    /// Convert an amount from one currency to another.
    ///
    /// Identity conversions return the amount untouched, so converting
    /// within a single currency never introduces drift. No rounding is
    /// applied here; callers round at display boundaries.
    pub fn convert(
        &self,
        amount: Decimal,
        from: Currency,
        to: Currency,
    ) -> Result<Decimal, CurrencyError> {
        if from == to {
            return Ok(amount);
        }
        let from_rate = self.rate(from)?;
        let to_rate = self.rate(to)?;
        Ok(amount / from_rate * to_rate)
    }

    /// The currencies this table can convert, in table order.
    pub fn supported_currencies(&self) -> Vec<Currency> {
        self.rates.iter().map(|(c, _)| *c).collect()
    }
}

impl Default for RateTable {
    /// The fixed production table: USD = 1, EUR = 0.904, KRW = 1337.
    fn default() -> Self {
        let mut table = Self::new(Currency::Usd);
        // Static positive constants, so set_rate cannot fail.
        let _ = table.set_rate(Currency::Usd, Decimal::ONE);
        let _ = table.set_rate(Currency::Eur, dec!(0.904));
        let _ = table.set_rate(Currency::Krw, dec!(1337));
        table
    }
}
