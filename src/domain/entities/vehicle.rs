//! # Vehicle Entity
//!
//! The stored vehicle record and the attributes it carries.
//!
//! A [`VehicleDraft`] is the unvalidated attribute bag a caller submits on
//! create or update. [`VehicleDraft::validate`] turns it into
//! [`VehicleAttributes`], which is the only form the repository accepts.
//! The repository then wraps the attributes in a [`VehicleRecord`] with an
//! assigned [`VehicleId`] and timestamps.
//!
//! # Examples
//!
//! ```
//! use vehicle_catalog::domain::entities::vehicle::VehicleDraft;
//! use vehicle_catalog::domain::value_objects::Condition;
//!
//! let draft = VehicleDraft {
//!     manufacturer_code: Some(101),
//!     manufacturer_name: Some("Chevrolet".to_string()),
//!     model: Some("Impala".to_string()),
//!     condition: Some(Condition::Used),
//!     latitude: Some(40.730610),
//!     longitude: Some(-73.935242),
//!     ..Default::default()
//! };
//!
//! let attributes = draft.validate().unwrap();
//! assert_eq!(attributes.model(), "Impala");
//! assert_eq!(attributes.manufacturer().name(), "Chevrolet");
//! ```

use crate::domain::errors::{ValidationError, ValidationResult};
use crate::domain::value_objects::{Condition, GeoCoordinate, Timestamp, VehicleId};
use serde::Serialize;

/// Earliest model or production year accepted.
pub const MIN_VEHICLE_YEAR: i32 = 1886;

/// Largest mileage accepted. Matches the range of the storage column.
pub const MAX_MILEAGE: u32 = i32::MAX.unsigned_abs();

/// Vehicle manufacturer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Manufacturer {
    code: i32,
    name: String,
}

impl Manufacturer {
    /// Creates a manufacturer.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidField` if the name is blank.
    pub fn new(code: i32, name: impl Into<String>) -> ValidationResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::invalid(
                "manufacturer.name",
                "must not be blank",
            ));
        }
        Ok(Self { code, name })
    }

    /// Returns the manufacturer code.
    #[inline]
    #[must_use]
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Returns the manufacturer name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Validated, mutable attributes of a vehicle.
///
/// # Invariants
///
/// - Manufacturer, model, condition and location are always set
/// - Model is not blank
/// - Years, when set, are not earlier than [`MIN_VEHICLE_YEAR`]
/// - Door count, when set, is positive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleAttributes {
    manufacturer: Manufacturer,
    model: String,
    condition: Condition,
    location: GeoCoordinate,
    model_year: Option<i32>,
    production_year: Option<i32>,
    body: Option<String>,
    engine: Option<String>,
    fuel_type: Option<String>,
    mileage: Option<u32>,
    exterior_color: Option<String>,
    door_count: Option<u8>,
}

impl VehicleAttributes {
    /// Creates attributes with only the required fields set.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidField` if the model is blank.
    pub fn new(
        manufacturer: Manufacturer,
        model: impl Into<String>,
        condition: Condition,
        location: GeoCoordinate,
    ) -> ValidationResult<Self> {
        let model = model.into();
        if model.trim().is_empty() {
            return Err(ValidationError::invalid("model", "must not be blank"));
        }
        Ok(Self {
            manufacturer,
            model,
            condition,
            location,
            model_year: None,
            production_year: None,
            body: None,
            engine: None,
            fuel_type: None,
            mileage: None,
            exterior_color: None,
            door_count: None,
        })
    }

    /// Sets the model year.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidField` if the year is implausible.
    pub fn with_model_year(mut self, year: i32) -> ValidationResult<Self> {
        self.model_year = Some(check_year("modelYear", year)?);
        Ok(self)
    }

    /// Sets the production year.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidField` if the year is implausible.
    pub fn with_production_year(mut self, year: i32) -> ValidationResult<Self> {
        self.production_year = Some(check_year("productionYear", year)?);
        Ok(self)
    }

    /// Sets the body style.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the engine description.
    #[must_use]
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = Some(engine.into());
        self
    }

    /// Sets the fuel type.
    #[must_use]
    pub fn with_fuel_type(mut self, fuel_type: impl Into<String>) -> Self {
        self.fuel_type = Some(fuel_type.into());
        self
    }

    /// Sets the mileage.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidField` if `mileage` exceeds
    /// [`MAX_MILEAGE`].
    pub fn with_mileage(mut self, mileage: u32) -> ValidationResult<Self> {
        if mileage > MAX_MILEAGE {
            return Err(ValidationError::invalid(
                "mileage",
                format!("must not exceed {MAX_MILEAGE}"),
            ));
        }
        self.mileage = Some(mileage);
        Ok(self)
    }

    /// Sets the exterior color.
    #[must_use]
    pub fn with_exterior_color(mut self, color: impl Into<String>) -> Self {
        self.exterior_color = Some(color.into());
        self
    }

    /// Sets the number of doors.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidField` if `doors` is zero.
    pub fn with_door_count(mut self, doors: u8) -> ValidationResult<Self> {
        if doors == 0 {
            return Err(ValidationError::invalid(
                "numberOfDoors",
                "must be positive",
            ));
        }
        self.door_count = Some(doors);
        Ok(self)
    }

    /// Returns the manufacturer.
    #[inline]
    #[must_use]
    pub fn manufacturer(&self) -> &Manufacturer {
        &self.manufacturer
    }

    /// Returns the model name.
    #[inline]
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the condition.
    #[inline]
    #[must_use]
    pub fn condition(&self) -> Condition {
        self.condition
    }

    /// Returns the geocoordinate.
    #[inline]
    #[must_use]
    pub fn location(&self) -> GeoCoordinate {
        self.location
    }

    /// Returns the model year.
    #[inline]
    #[must_use]
    pub fn model_year(&self) -> Option<i32> {
        self.model_year
    }

    /// Returns the production year.
    #[inline]
    #[must_use]
    pub fn production_year(&self) -> Option<i32> {
        self.production_year
    }

    /// Returns the body style.
    #[inline]
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns the engine description.
    #[inline]
    #[must_use]
    pub fn engine(&self) -> Option<&str> {
        self.engine.as_deref()
    }

    /// Returns the fuel type.
    #[inline]
    #[must_use]
    pub fn fuel_type(&self) -> Option<&str> {
        self.fuel_type.as_deref()
    }

    /// Returns the mileage.
    #[inline]
    #[must_use]
    pub fn mileage(&self) -> Option<u32> {
        self.mileage
    }

    /// Returns the exterior color.
    #[inline]
    #[must_use]
    pub fn exterior_color(&self) -> Option<&str> {
        self.exterior_color.as_deref()
    }

    /// Returns the number of doors.
    #[inline]
    #[must_use]
    pub fn door_count(&self) -> Option<u8> {
        self.door_count
    }
}

fn check_year(field: &'static str, year: i32) -> ValidationResult<i32> {
    if year < MIN_VEHICLE_YEAR {
        return Err(ValidationError::invalid(
            field,
            format!("{year} is earlier than {MIN_VEHICLE_YEAR}"),
        ));
    }
    Ok(year)
}

/// Unvalidated vehicle attributes as submitted by a caller.
///
/// Every field is optional so that a missing attribute surfaces as a
/// [`ValidationError`] rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleDraft {
    /// Manufacturer code.
    pub manufacturer_code: Option<i32>,
    /// Manufacturer name.
    pub manufacturer_name: Option<String>,
    /// Model name.
    pub model: Option<String>,
    /// New or used.
    pub condition: Option<Condition>,
    /// Latitude in decimal degrees.
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees.
    pub longitude: Option<f64>,
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
    pub exterior_color: Option<String>,
    /// Number of doors.
    pub door_count: Option<u8>,
}

impl VehicleDraft {
    /// Validates the draft into [`VehicleAttributes`].
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingField` if manufacturer, model,
    /// condition or location is absent, and `ValidationError::InvalidField`
    /// if any supplied value is out of range.
    pub fn validate(self) -> ValidationResult<VehicleAttributes> {
        let code = self
            .manufacturer_code
            .ok_or(ValidationError::missing("manufacturer.code"))?;
        let name = self
            .manufacturer_name
            .ok_or(ValidationError::missing("manufacturer.name"))?;
        let manufacturer = Manufacturer::new(code, name)?;
        let model = self.model.ok_or(ValidationError::missing("model"))?;
        let condition = self.condition.ok_or(ValidationError::missing("condition"))?;
        let location = match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => GeoCoordinate::new(lat, lon)?,
            _ => return Err(ValidationError::missing("location")),
        };

        let mut attributes = VehicleAttributes::new(manufacturer, model, condition, location)?;
        if let Some(year) = self.model_year {
            attributes = attributes.with_model_year(year)?;
        }
        if let Some(year) = self.production_year {
            attributes = attributes.with_production_year(year)?;
        }
        if let Some(doors) = self.door_count {
            attributes = attributes.with_door_count(doors)?;
        }
        if let Some(mileage) = self.mileage {
            attributes = attributes.with_mileage(mileage)?;
        }
        attributes.body = self.body;
        attributes.engine = self.engine;
        attributes.fuel_type = self.fuel_type;
        attributes.exterior_color = self.exterior_color;
        Ok(attributes)
    }
}

/// A persisted vehicle.
///
/// Identity (`id`, `created_at`) is fixed at creation. Attributes are
/// replaced wholesale on update, which also advances `modified_at`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleRecord {
    id: VehicleId,
    created_at: Timestamp,
    modified_at: Timestamp,
    attributes: VehicleAttributes,
}

impl VehicleRecord {
    /// Creates a freshly stored record.
    #[must_use]
    pub fn new(id: VehicleId, attributes: VehicleAttributes, created_at: Timestamp) -> Self {
        Self {
            id,
            created_at,
            modified_at: created_at,
            attributes,
        }
    }

    /// Reconstructs a record from stored parts.
    #[must_use]
    pub fn from_parts(
        id: VehicleId,
        created_at: Timestamp,
        modified_at: Timestamp,
        attributes: VehicleAttributes,
    ) -> Self {
        Self {
            id,
            created_at,
            modified_at,
            attributes,
        }
    }

    /// Returns a copy with the attributes replaced, keeping the identity.
    #[must_use]
    pub fn replace_attributes(&self, attributes: VehicleAttributes, modified_at: Timestamp) -> Self {
        Self {
            id: self.id,
            created_at: self.created_at,
            modified_at,
            attributes,
        }
    }

    /// Returns the vehicle ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> VehicleId {
        self.id
    }

    /// Returns when the record was created.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns when the record was last modified.
    #[inline]
    #[must_use]
    pub fn modified_at(&self) -> Timestamp {
        self.modified_at
    }

    /// Returns the attributes.
    #[inline]
    #[must_use]
    pub fn attributes(&self) -> &VehicleAttributes {
        &self.attributes
    }

    /// Returns the geocoordinate.
    #[inline]
    #[must_use]
    pub fn location(&self) -> GeoCoordinate {
        self.attributes.location
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn impala_draft() -> VehicleDraft {
        VehicleDraft {
            manufacturer_code: Some(101),
            manufacturer_name: Some("Chevrolet".to_string()),
            model: Some("Impala".to_string()),
            condition: Some(Condition::Used),
            latitude: Some(40.730610),
            longitude: Some(-73.935242),
            model_year: Some(2018),
            production_year: Some(2018),
            body: Some("sedan".to_string()),
            engine: Some("3.6L V6".to_string()),
            fuel_type: Some("Gasoline".to_string()),
            mileage: Some(32280),
            exterior_color: Some("white".to_string()),
            door_count: Some(4),
        }
    }

    #[test]
    fn validate_full_draft() {
        let attrs = impala_draft().validate().unwrap();
        assert_eq!(attrs.manufacturer().code(), 101);
        assert_eq!(attrs.condition(), Condition::Used);
        assert_eq!(attrs.mileage(), Some(32280));
        assert_eq!(attrs.door_count(), Some(4));
        assert_eq!(attrs.engine(), Some("3.6L V6"));
        assert_eq!(attrs.location().latitude(), 40.730610);
    }

    #[test]
    fn missing_required_fields() {
        let cases: [(fn(&mut VehicleDraft), &str); 5] = [
            (|d| d.manufacturer_code = None, "manufacturer.code"),
            (|d| d.model = None, "model"),
            (|d| d.condition = None, "condition"),
            (|d| d.latitude = None, "location"),
            (|d| d.longitude = None, "location"),
        ];
        for (strip, field) in cases {
            let mut draft = impala_draft();
            strip(&mut draft);
            let err = draft.validate().unwrap_err();
            assert_eq!(err, ValidationError::missing(field));
        }
    }

    #[test]
    fn invalid_values() {
        let mut draft = impala_draft();
        draft.model = Some("   ".to_string());
        assert_eq!(draft.validate().unwrap_err().field(), "model");

        let mut draft = impala_draft();
        draft.latitude = Some(123.0);
        assert_eq!(draft.validate().unwrap_err().field(), "latitude");

        let mut draft = impala_draft();
        draft.model_year = Some(1700);
        assert_eq!(draft.validate().unwrap_err().field(), "modelYear");

        let mut draft = impala_draft();
        draft.door_count = Some(0);
        assert_eq!(draft.validate().unwrap_err().field(), "numberOfDoors");
    }

    #[test]
    fn mileage_is_bounded() {
        let mut draft = impala_draft();
        draft.mileage = Some(u32::MAX);
        assert_eq!(draft.validate().unwrap_err().field(), "mileage");

        let mut draft = impala_draft();
        draft.mileage = Some(MAX_MILEAGE);
        assert_eq!(draft.validate().unwrap().mileage(), Some(MAX_MILEAGE));
    }

    #[test]
    fn replace_attributes_keeps_identity() {
        let created = Timestamp::from_millis(1_000).unwrap();
        let record = VehicleRecord::new(VehicleId::new(7), impala_draft().validate().unwrap(), created);
        assert_eq!(record.modified_at(), created);

        let mut draft = impala_draft();
        draft.condition = Some(Condition::New);
        let modified = Timestamp::from_millis(2_000).unwrap();
        let updated = record.replace_attributes(draft.validate().unwrap(), modified);

        assert_eq!(updated.id(), VehicleId::new(7));
        assert_eq!(updated.created_at(), created);
        assert_eq!(updated.modified_at(), modified);
        assert_eq!(updated.attributes().condition(), Condition::New);
    }
}
