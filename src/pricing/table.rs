//! # Price Table
//!
//! In-process prices served by the pricing service.
//!
//! Vehicles 1 through 20 each get a USD price between 5,000.00 and
//! 25,000.00, drawn once at start-up. A fixed seed reproduces the table.

use crate::domain::entities::PriceQuote;
use crate::domain::errors::ValidationResult;
use crate::domain::value_objects::VehicleId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Vehicle IDs that have a price.
pub const PRICED_VEHICLES: RangeInclusive<i64> = 1..=20;

/// Currency of generated prices.
pub const CURRENCY: &str = "USD";

const MIN_CENTS: i64 = 500_000;
const MAX_CENTS: i64 = 2_500_000;

/// Immutable mapping from vehicle ID to price.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceTable {
    prices: BTreeMap<VehicleId, PriceQuote>,
}

impl PriceTable {
    /// Generates prices for [`PRICED_VEHICLES`], seeded when `seed` is set.
    #[must_use]
    pub fn generate(seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        // CURRENCY and the cent range always validate.
        let prices = PRICED_VEHICLES
            .filter_map(|id| {
                let id = VehicleId::new(id);
                let amount = Decimal::new(rng.gen_range(MIN_CENTS..=MAX_CENTS), 2);
                PriceQuote::new(id, CURRENCY, amount)
                    .ok()
                    .map(|quote| (id, quote))
            })
            .collect();
        Self { prices }
    }

    /// Builds a table from explicit `(vehicle ID, currency, amount)` entries.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any entry has a malformed currency or a
    /// negative amount.
    pub fn from_entries<I, C>(entries: I) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = (i64, C, Decimal)>,
        C: Into<String>,
    {
        let prices = entries
            .into_iter()
            .map(|(id, currency, amount)| {
                let id = VehicleId::new(id);
                PriceQuote::new(id, currency, amount).map(|quote| (id, quote))
            })
            .collect::<ValidationResult<BTreeMap<_, _>>>()?;
        Ok(Self { prices })
    }

    /// Returns the price of a vehicle.
    #[must_use]
    pub fn lookup(&self, id: VehicleId) -> Option<&PriceQuote> {
        self.prices.get(&id)
    }

    /// Returns the number of priced vehicles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns true if no vehicle has a price.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn generated_table_covers_known_vehicles() {
        let table = PriceTable::generate(Some(7));
        assert_eq!(table.len(), 20);
        assert!(table.lookup(VehicleId::new(1)).is_some());
        assert!(table.lookup(VehicleId::new(20)).is_some());
        assert!(table.lookup(VehicleId::new(0)).is_none());
        assert!(table.lookup(VehicleId::new(21)).is_none());
    }

    #[test]
    fn generated_prices_are_in_range_with_cents() {
        let table = PriceTable::generate(Some(42));
        for id in PRICED_VEHICLES {
            let quote = table.lookup(VehicleId::new(id)).unwrap();
            assert_eq!(quote.currency(), "USD");
            assert_eq!(quote.amount().scale(), 2);
            assert!(quote.amount() >= Decimal::new(MIN_CENTS, 2));
            assert!(quote.amount() <= Decimal::new(MAX_CENTS, 2));
        }
    }

    #[test]
    fn same_seed_same_table() {
        assert_eq!(PriceTable::generate(Some(3)), PriceTable::generate(Some(3)));
    }

    #[test]
    fn from_entries_validates() {
        let table =
            PriceTable::from_entries([(2, "USD", Decimal::new(1_291_730, 2))]).unwrap();
        assert_eq!(
            table.lookup(VehicleId::new(2)).unwrap().amount(),
            Decimal::new(1_291_730, 2)
        );

        assert!(PriceTable::from_entries([(1, "usd", Decimal::ONE)]).is_err());
        assert!(PriceTable::from_entries([(1, "USD", Decimal::NEGATIVE_ONE)]).is_err());
    }
}
