//! # PostgreSQL Vehicle Repository
//!
//! PostgreSQL implementation of [`VehicleRepository`] using sqlx.
//!
//! Rows are mapped back through [`VehicleDraft::validate`], so a row that no
//! longer satisfies the domain invariants surfaces as
//! [`RepositoryError::Serialization`] instead of an invalid record.

use crate::domain::entities::{VehicleAttributes, VehicleDraft, VehicleRecord};
use crate::domain::value_objects::{Condition, Timestamp, VehicleId};
use crate::infrastructure::persistence::traits::{
    RepositoryError, RepositoryResult, VehicleRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

const SELECT_COLUMNS: &str = r#"
    id, manufacturer_code, manufacturer_name, model, model_year,
    production_year, body, engine, fuel_type, mileage, exterior_color,
    door_count, condition, latitude, longitude, created_at, modified_at
"#;

/// PostgreSQL implementation of [`VehicleRepository`].
///
/// # Examples
///
/// ```ignore
/// use vehicle_catalog::infrastructure::persistence::postgres::PostgresVehicleRepository;
///
/// let repo = PostgresVehicleRepository::connect("postgres://...", 5).await?;
/// repo.migrate().await?;
/// ```
#[derive(Debug, Clone)]
pub struct PostgresVehicleRepository {
    pool: PgPool,
}

impl PostgresVehicleRepository {
    /// Creates a repository over an existing pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a new pool to `database_url`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Connection` if the database is unreachable.
    pub async fn connect(database_url: &str, max_connections: u32) -> RepositoryResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect(database_url)
            .await
            .map_err(|e| RepositoryError::connection(e.to_string()))?;
        Ok(Self::new(pool))
    }

    /// Applies pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Query` if a migration fails.
    pub async fn migrate(&self) -> RepositoryResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;
        info!("vehicle schema migrations applied");
        Ok(())
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Column values bound for insert and update.
struct VehicleParams {
    manufacturer_code: i32,
    manufacturer_name: String,
    model: String,
    model_year: Option<i32>,
    production_year: Option<i32>,
    body: Option<String>,
    engine: Option<String>,
    fuel_type: Option<String>,
    mileage: Option<i32>,
    exterior_color: Option<String>,
    door_count: Option<i16>,
    condition: &'static str,
    latitude: f64,
    longitude: f64,
}

impl VehicleParams {
    fn from_attributes(attributes: &VehicleAttributes) -> RepositoryResult<Self> {
        let mileage = attributes
            .mileage()
            .map(i32::try_from)
            .transpose()
            .map_err(|_| RepositoryError::serialization("mileage exceeds column range"))?;
        Ok(Self {
            manufacturer_code: attributes.manufacturer().code(),
            manufacturer_name: attributes.manufacturer().name().to_string(),
            model: attributes.model().to_string(),
            model_year: attributes.model_year(),
            production_year: attributes.production_year(),
            body: attributes.body().map(str::to_string),
            engine: attributes.engine().map(str::to_string),
            fuel_type: attributes.fuel_type().map(str::to_string),
            mileage,
            exterior_color: attributes.exterior_color().map(str::to_string),
            door_count: attributes.door_count().map(i16::from),
            condition: attributes.condition().as_str(),
            latitude: attributes.location().latitude(),
            longitude: attributes.location().longitude(),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: i64,
    manufacturer_code: i32,
    manufacturer_name: String,
    model: String,
    model_year: Option<i32>,
    production_year: Option<i32>,
    body: Option<String>,
    engine: Option<String>,
    fuel_type: Option<String>,
    mileage: Option<i32>,
    exterior_color: Option<String>,
    door_count: Option<i16>,
    condition: String,
    latitude: f64,
    longitude: f64,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl VehicleRow {
    fn into_record(self) -> RepositoryResult<VehicleRecord> {
        let condition = self
            .condition
            .parse::<Condition>()
            .map_err(|e| RepositoryError::serialization(e.to_string()))?;
        let mileage = self
            .mileage
            .map(u32::try_from)
            .transpose()
            .map_err(|_| RepositoryError::serialization("negative mileage"))?;
        let door_count = self
            .door_count
            .map(u8::try_from)
            .transpose()
            .map_err(|_| RepositoryError::serialization("door count out of range"))?;

        let draft = VehicleDraft {
            manufacturer_code: Some(self.manufacturer_code),
            manufacturer_name: Some(self.manufacturer_name),
            model: Some(self.model),
            condition: Some(condition),
            latitude: Some(self.latitude),
            longitude: Some(self.longitude),
            model_year: self.model_year,
            production_year: self.production_year,
            body: self.body,
            engine: self.engine,
            fuel_type: self.fuel_type,
            mileage,
            exterior_color: self.exterior_color,
            door_count,
        };
        let attributes = draft
            .validate()
            .map_err(|e| RepositoryError::serialization(e.to_string()))?;

        Ok(VehicleRecord::from_parts(
            VehicleId::new(self.id),
            Timestamp::from(self.created_at),
            Timestamp::from(self.modified_at),
            attributes,
        ))
    }
}

#[async_trait]
impl VehicleRepository for PostgresVehicleRepository {
    async fn create(&self, attributes: VehicleAttributes) -> RepositoryResult<VehicleRecord> {
        let p = VehicleParams::from_attributes(&attributes)?;
        let now = Timestamp::now().into_inner();

        let row: VehicleRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO vehicles (
                manufacturer_code, manufacturer_name, model, model_year,
                production_year, body, engine, fuel_type, mileage,
                exterior_color, door_count, condition, latitude, longitude,
                created_at, modified_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $15)
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(p.manufacturer_code)
        .bind(&p.manufacturer_name)
        .bind(&p.model)
        .bind(p.model_year)
        .bind(p.production_year)
        .bind(&p.body)
        .bind(&p.engine)
        .bind(&p.fuel_type)
        .bind(p.mileage)
        .bind(&p.exterior_color)
        .bind(p.door_count)
        .bind(p.condition)
        .bind(p.latitude)
        .bind(p.longitude)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        row.into_record()
    }

    async fn find_by_id(&self, id: VehicleId) -> RepositoryResult<VehicleRecord> {
        let row: Option<VehicleRow> =
            sqlx::query_as(&format!("SELECT {SELECT_COLUMNS} FROM vehicles WHERE id = $1"))
                .bind(id.get())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::query(e.to_string()))?;

        row.ok_or_else(|| RepositoryError::vehicle_not_found(id))?
            .into_record()
    }

    async fn update(
        &self,
        id: VehicleId,
        attributes: VehicleAttributes,
    ) -> RepositoryResult<VehicleRecord> {
        let p = VehicleParams::from_attributes(&attributes)?;
        let now = Timestamp::now().into_inner();

        let row: Option<VehicleRow> = sqlx::query_as(&format!(
            r#"
            UPDATE vehicles SET
                manufacturer_code = $2, manufacturer_name = $3, model = $4,
                model_year = $5, production_year = $6, body = $7, engine = $8,
                fuel_type = $9, mileage = $10, exterior_color = $11,
                door_count = $12, condition = $13, latitude = $14,
                longitude = $15, modified_at = $16
            WHERE id = $1
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(id.get())
        .bind(p.manufacturer_code)
        .bind(&p.manufacturer_name)
        .bind(&p.model)
        .bind(p.model_year)
        .bind(p.production_year)
        .bind(&p.body)
        .bind(&p.engine)
        .bind(&p.fuel_type)
        .bind(p.mileage)
        .bind(&p.exterior_color)
        .bind(p.door_count)
        .bind(p.condition)
        .bind(p.latitude)
        .bind(p.longitude)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        row.ok_or_else(|| RepositoryError::vehicle_not_found(id))?
            .into_record()
    }

    async fn delete(&self, id: VehicleId) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::vehicle_not_found(id));
        }
        Ok(())
    }

    async fn list_all(&self) -> RepositoryResult<Vec<VehicleRecord>> {
        let rows: Vec<VehicleRow> =
            sqlx::query_as(&format!("SELECT {SELECT_COLUMNS} FROM vehicles ORDER BY id"))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepositoryError::query(e.to_string()))?;

        rows.into_iter().map(VehicleRow::into_record).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row() -> VehicleRow {
        let created = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        VehicleRow {
            id: 7,
            manufacturer_code: 101,
            manufacturer_name: "Chevrolet".to_string(),
            model: "Impala".to_string(),
            model_year: Some(2018),
            production_year: Some(2018),
            body: Some("sedan".to_string()),
            engine: Some("3.6L V6".to_string()),
            fuel_type: Some("Gasoline".to_string()),
            mileage: Some(32280),
            exterior_color: Some("white".to_string()),
            door_count: Some(4),
            condition: "USED".to_string(),
            latitude: 40.730610,
            longitude: -73.935242,
            created_at: created,
            modified_at: created,
        }
    }

    #[test]
    fn row_maps_to_record() {
        let record = row().into_record().unwrap();
        assert_eq!(record.id(), VehicleId::new(7));
        assert_eq!(record.attributes().manufacturer().name(), "Chevrolet");
        assert_eq!(record.attributes().condition(), Condition::Used);
        assert_eq!(record.attributes().mileage(), Some(32280));
        assert_eq!(record.attributes().door_count(), Some(4));
        assert_eq!(record.created_at().timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn row_with_unknown_condition_is_rejected() {
        let mut bad = row();
        bad.condition = "SALVAGE".to_string();
        let err = bad.into_record().unwrap_err();
        assert!(matches!(err, RepositoryError::Serialization(_)));
    }

    #[test]
    fn row_with_negative_mileage_is_rejected() {
        let mut bad = row();
        bad.mileage = Some(-1);
        assert!(matches!(
            bad.into_record().unwrap_err(),
            RepositoryError::Serialization(_)
        ));
    }

    #[test]
    fn row_with_out_of_range_latitude_is_rejected() {
        let mut bad = row();
        bad.latitude = 123.0;
        assert!(matches!(
            bad.into_record().unwrap_err(),
            RepositoryError::Serialization(_)
        ));
    }

    #[test]
    fn params_roundtrip_attributes() {
        let record = row().into_record().unwrap();
        let params = VehicleParams::from_attributes(record.attributes()).unwrap();
        assert_eq!(params.condition, "USED");
        assert_eq!(params.door_count, Some(4));
        assert_eq!(params.mileage, Some(32280));
        assert_eq!(params.manufacturer_code, 101);
    }
}
