//! # Price Quote
//!
//! A live price for one vehicle, fetched per request and never stored.

use crate::domain::errors::{ValidationError, ValidationResult};
use crate::domain::value_objects::VehicleId;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Price quoted by the pricing service for a vehicle.
///
/// # Invariants
///
/// - Currency is a three-letter upper-case ISO 4217 code
/// - Amount is not negative
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
/// use vehicle_catalog::domain::entities::PriceQuote;
/// use vehicle_catalog::domain::value_objects::VehicleId;
///
/// let amount = Decimal::from_str("12917.30").unwrap();
/// let quote = PriceQuote::new(VehicleId::new(2), "USD", amount).unwrap();
/// assert_eq!(quote.to_string(), "USD 12917.30");
///
/// assert!(PriceQuote::new(VehicleId::new(2), "usd", amount).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    vehicle_id: VehicleId,
    currency: String,
    amount: Decimal,
}

impl PriceQuote {
    /// Creates a validated price quote.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidField` if the currency code is
    /// malformed or the amount is negative.
    pub fn new(
        vehicle_id: VehicleId,
        currency: impl Into<String>,
        amount: Decimal,
    ) -> ValidationResult<Self> {
        let currency = currency.into();
        if currency.len() != 3 || !currency.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(ValidationError::invalid(
                "currency",
                format!("'{currency}' is not an ISO 4217 code"),
            ));
        }
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ValidationError::invalid(
                "price",
                format!("{amount} is negative"),
            ));
        }
        Ok(Self {
            vehicle_id,
            currency,
            amount,
        })
    }

    /// Returns the vehicle the quote refers to.
    #[inline]
    #[must_use]
    pub fn vehicle_id(&self) -> VehicleId {
        self.vehicle_id
    }

    /// Returns the ISO 4217 currency code.
    #[inline]
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Returns the quoted amount.
    #[inline]
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

impl fmt::Display for PriceQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency, self.amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn rejects_malformed_currency() {
        for code in ["US", "USDX", "usd", "U$D", ""] {
            let err = PriceQuote::new(VehicleId::new(1), code, Decimal::ONE).unwrap_err();
            assert_eq!(err.field(), "currency");
        }
    }

    #[test]
    fn rejects_negative_amount() {
        let err = PriceQuote::new(VehicleId::new(1), "EUR", Decimal::from_str("-0.01").unwrap())
            .unwrap_err();
        assert_eq!(err.field(), "price");
    }

    #[test]
    fn accepts_zero() {
        let quote = PriceQuote::new(VehicleId::new(1), "EUR", Decimal::ZERO).unwrap();
        assert!(quote.amount().is_zero());
    }
}
