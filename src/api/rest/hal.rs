//! # HAL Rendering
//!
//! Hypermedia (HAL) JSON for car resources.
//!
//! A single car renders as
//!
//! ```json
//! {
//!   "id": 1,
//!   "createdAt": "...",
//!   "modifiedAt": "...",
//!   "condition": "USED",
//!   "details": { "manufacturer": { "code": 101, "name": "Chevrolet" }, "model": "Impala", ... },
//!   "location": { "lat": 40.73061, "lon": -73.935242 },
//!   "address": null,
//!   "price": { "currency": "USD", "amount": "12917.30" },
//!   "_links": { "self": { "href": ".../cars/1" }, "cars": { "href": ".../cars" } }
//! }
//! ```
//!
//! and the collection wraps resources in `_embedded.carList`.

use crate::domain::entities::{
    EnrichedVehicleView, PriceQuote, ResolvedLocation, VehicleAttributes,
};
use crate::domain::value_objects::{Condition, GeoCoordinate, Timestamp, VehicleId};
use rust_decimal::Decimal;
use serde::Serialize;

/// Builds absolute links from the public base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
    base_url: String,
}

impl LinkBuilder {
    /// Creates a builder for `base_url`. A trailing slash is ignored.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the collection URL.
    #[must_use]
    pub fn cars(&self) -> String {
        format!("{}/cars", self.base_url)
    }

    /// Returns the URL of one car.
    #[must_use]
    pub fn car(&self, id: VehicleId) -> String {
        format!("{}/cars/{}", self.base_url, id)
    }
}

/// A HAL link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Target URL.
    pub href: String,
}

impl Link {
    fn to(href: String) -> Self {
        Self { href }
    }
}

/// Links of a single car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarLinks {
    /// The car itself.
    #[serde(rename = "self")]
    pub self_link: Link,
    /// The collection.
    pub cars: Link,
}

/// Manufacturer body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManufacturerBody {
    /// Manufacturer code.
    pub code: i32,
    /// Manufacturer name.
    pub name: String,
}

/// Descriptive attributes of a car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsBody {
    /// Manufacturer.
    pub manufacturer: ManufacturerBody,
    /// Model name.
    pub model: String,
    /// Model year.
    pub model_year: Option<i32>,
    /// Production year.
    pub production_year: Option<i32>,
    /// Body style.
    pub body: Option<String>,
    /// Engine description.
    pub engine: Option<String>,
    /// Fuel type.
    pub fuel_type: Option<String>,
    /// Mileage.
    pub mileage: Option<u32>,
    /// Exterior color.
    pub external_color: Option<String>,
    /// Number of doors.
    pub number_of_doors: Option<u8>,
}

impl From<&VehicleAttributes> for DetailsBody {
    fn from(attributes: &VehicleAttributes) -> Self {
        Self {
            manufacturer: ManufacturerBody {
                code: attributes.manufacturer().code(),
                name: attributes.manufacturer().name().to_string(),
            },
            model: attributes.model().to_string(),
            model_year: attributes.model_year(),
            production_year: attributes.production_year(),
            body: attributes.body().map(str::to_string),
            engine: attributes.engine().map(str::to_string),
            fuel_type: attributes.fuel_type().map(str::to_string),
            mileage: attributes.mileage(),
            external_color: attributes.exterior_color().map(str::to_string),
            number_of_doors: attributes.door_count(),
        }
    }
}

/// Stored coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocationBody {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

impl From<GeoCoordinate> for LocationBody {
    fn from(coordinate: GeoCoordinate) -> Self {
        Self {
            lat: coordinate.latitude(),
            lon: coordinate.longitude(),
        }
    }
}

/// Resolved address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressBody {
    /// Street address.
    pub address: String,
    /// City.
    pub city: Option<String>,
    /// State.
    pub state: Option<String>,
    /// Postal code.
    pub zip: Option<String>,
}

impl From<&ResolvedLocation> for AddressBody {
    fn from(location: &ResolvedLocation) -> Self {
        Self {
            address: location.address().to_string(),
            city: location.city().map(str::to_string),
            state: location.state().map(str::to_string),
            zip: location.zip().map(str::to_string),
        }
    }
}

/// Live price. The amount is rendered as a decimal string to keep its scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceBody {
    /// ISO 4217 code.
    pub currency: String,
    /// Amount.
    pub amount: Decimal,
}

impl From<&PriceQuote> for PriceBody {
    fn from(quote: &PriceQuote) -> Self {
        Self {
            currency: quote.currency().to_string(),
            amount: quote.amount(),
        }
    }
}

/// A car resource with its links.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarResource {
    /// Vehicle ID.
    pub id: VehicleId,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last modification time.
    pub modified_at: Timestamp,
    /// New or used.
    pub condition: Condition,
    /// Descriptive attributes.
    pub details: DetailsBody,
    /// Stored coordinate.
    pub location: LocationBody,
    /// Resolved address, null when the lookup failed.
    pub address: Option<AddressBody>,
    /// Live price, null when the lookup failed.
    pub price: Option<PriceBody>,
    /// Hypermedia links.
    #[serde(rename = "_links")]
    pub links: CarLinks,
}

impl CarResource {
    /// Renders a view with its links.
    #[must_use]
    pub fn from_view(view: &EnrichedVehicleView, links: &LinkBuilder) -> Self {
        let record = view.record();
        let attributes = record.attributes();
        Self {
            id: record.id(),
            created_at: record.created_at(),
            modified_at: record.modified_at(),
            condition: attributes.condition(),
            details: DetailsBody::from(attributes),
            location: LocationBody::from(record.location()),
            address: view.location().map(AddressBody::from),
            price: view.price().map(PriceBody::from),
            links: CarLinks {
                self_link: Link::to(links.car(record.id())),
                cars: Link::to(links.cars()),
            },
        }
    }

    /// Returns the self link.
    #[must_use]
    pub fn self_href(&self) -> &str {
        &self.links.self_link.href
    }
}

/// Embedded resources of the collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedCars {
    /// The cars, ordered by ID.
    pub car_list: Vec<CarResource>,
}

/// Links of the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionLinks {
    /// The collection itself.
    #[serde(rename = "self")]
    pub self_link: Link,
}

/// The `/cars` collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarCollection {
    /// Embedded cars.
    #[serde(rename = "_embedded")]
    pub embedded: EmbeddedCars,
    /// Hypermedia links.
    #[serde(rename = "_links")]
    pub links: CollectionLinks,
}

impl CarCollection {
    /// Renders a list of views.
    #[must_use]
    pub fn from_views(views: &[EnrichedVehicleView], links: &LinkBuilder) -> Self {
        Self {
            embedded: EmbeddedCars {
                car_list: views
                    .iter()
                    .map(|view| CarResource::from_view(view, links))
                    .collect(),
            },
            links: CollectionLinks {
                self_link: Link::to(links.cars()),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::{Manufacturer, VehicleRecord};

    fn record() -> VehicleRecord {
        let coordinate = GeoCoordinate::new(40.730610, -73.935242).unwrap();
        let attributes = VehicleAttributes::new(
            Manufacturer::new(101, "Chevrolet").unwrap(),
            "Impala",
            Condition::Used,
            coordinate,
        )
        .unwrap()
        .with_mileage(32280)
        .unwrap()
        .with_door_count(4)
        .unwrap();
        VehicleRecord::new(
            VehicleId::new(1),
            attributes,
            Timestamp::from_millis(0).unwrap(),
        )
    }

    #[test]
    fn link_builder_trims_trailing_slash() {
        let links = LinkBuilder::new("http://localhost:8080/");
        assert_eq!(links.cars(), "http://localhost:8080/cars");
        assert_eq!(links.car(VehicleId::new(3)), "http://localhost:8080/cars/3");
    }

    #[test]
    fn degraded_view_renders_nulls() {
        let links = LinkBuilder::new("http://localhost:8080");
        let view = EnrichedVehicleView::bare(record());
        let json = serde_json::to_value(CarResource::from_view(&view, &links)).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["condition"], "USED");
        assert_eq!(json["createdAt"], "1970-01-01T00:00:00Z");
        assert_eq!(json["details"]["manufacturer"]["name"], "Chevrolet");
        assert_eq!(json["details"]["numberOfDoors"], 4);
        assert_eq!(json["details"]["mileage"], 32280);
        assert!(json["details"]["engine"].is_null());
        assert_eq!(json["location"]["lat"], 40.730610);
        assert!(json["price"].is_null());
        assert!(json["address"].is_null());
        assert_eq!(json["_links"]["self"]["href"], "http://localhost:8080/cars/1");
        assert_eq!(json["_links"]["cars"]["href"], "http://localhost:8080/cars");
    }

    #[test]
    fn enriched_view_renders_price_and_address() {
        let links = LinkBuilder::new("http://localhost:8080");
        let record = record();
        let price = PriceQuote::new(record.id(), "USD", Decimal::new(1_291_730, 2)).unwrap();
        let address = ResolvedLocation::new("777 Brockton Avenue", record.location())
            .unwrap()
            .with_city("Abington");
        let view = EnrichedVehicleView::new(record, Some(price), Some(address));

        let json = serde_json::to_value(CarResource::from_view(&view, &links)).unwrap();
        assert_eq!(json["price"]["currency"], "USD");
        assert_eq!(json["price"]["amount"], "12917.30");
        assert_eq!(json["address"]["address"], "777 Brockton Avenue");
        assert_eq!(json["address"]["city"], "Abington");
        assert!(json["address"]["zip"].is_null());
    }

    #[test]
    fn collection_embeds_car_list() {
        let links = LinkBuilder::new("http://cars.test");
        let views = vec![EnrichedVehicleView::bare(record())];
        let json = serde_json::to_value(CarCollection::from_views(&views, &links)).unwrap();

        assert_eq!(json["_embedded"]["carList"].as_array().unwrap().len(), 1);
        assert_eq!(json["_links"]["self"]["href"], "http://cars.test/cars");
    }
}
