//! PostgreSQL-backed `IdiomRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{IdiomRepository, IdiomRepositoryError};
use crate::domain::{Idiom, IdiomName, IdiomRecord};

use super::error_mapping::{Violation, map_diesel_error, map_pool_error, violation};
use super::json_columns::{
    decode_exam_images, decode_examples, encode_exam_images, encode_examples,
};
use super::models::{IdiomRow, IdiomWrite};
use super::pool::{DbPool, PoolError};
use super::schema::idioms;

/// Diesel-backed implementation of the `IdiomRepository` port.
#[derive(Clone)]
pub struct DieselIdiomRepository {
    pool: DbPool,
}

impl DieselIdiomRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> IdiomRepositoryError {
    map_pool_error(error, IdiomRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> IdiomRepositoryError {
    map_diesel_error(
        error,
        IdiomRepositoryError::query,
        IdiomRepositoryError::connection,
    )
}

fn row_to_idiom(row: IdiomRow) -> Result<Idiom, IdiomRepositoryError> {
    let examples = decode_examples(&row.examples).map_err(|err| {
        IdiomRepositoryError::serialization(format!("examples of '{}': {err}", row.idiom))
    })?;
    let exam_images = decode_exam_images(row.exam_images.as_deref()).map_err(|err| {
        IdiomRepositoryError::serialization(format!("exam_images of '{}': {err}", row.idiom))
    })?;
    Ok(Idiom {
        idiom: row.idiom,
        description: row.description,
        examples,
        exam_images,
        major_type_code: row.major_type_code,
        minor_type_code: row.minor_type_code,
    })
}

fn record_to_write(record: &IdiomRecord) -> Result<IdiomWrite<'_>, IdiomRepositoryError> {
    let idiom = record.idiom();
    let examples = encode_examples(&idiom.examples)
        .map_err(|err| IdiomRepositoryError::serialization(err.to_string()))?;
    let exam_images = encode_exam_images(&idiom.exam_images)
        .map_err(|err| IdiomRepositoryError::serialization(err.to_string()))?;
    Ok(IdiomWrite {
        idiom: record.name().as_str(),
        description: &idiom.description,
        examples,
        exam_images: Some(exam_images),
        major_type_code: idiom.major_type_code.as_deref(),
        minor_type_code: idiom.minor_type_code.as_deref(),
    })
}

#[async_trait]
impl IdiomRepository for DieselIdiomRepository {
    async fn list_all(&self) -> Result<Vec<Idiom>, IdiomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        // PostgreSQL places NULL last in ascending order.
        let rows: Vec<IdiomRow> = idioms::table
            .order((idioms::major_type_code.asc(), idioms::idiom.asc()))
            .select(IdiomRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(row_to_idiom).collect()
    }

    async fn find_by_name(&self, name: &IdiomName) -> Result<Option<Idiom>, IdiomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<IdiomRow> = idioms::table
            .filter(idioms::idiom.eq(name.as_str()))
            .select(IdiomRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_idiom).transpose()
    }

    async fn exists(&self, name: &IdiomName) -> Result<bool, IdiomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let count: i64 = idioms::table
            .filter(idioms::idiom.eq(name.as_str()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(count > 0)
    }

    async fn insert(&self, record: &IdiomRecord) -> Result<(), IdiomRepositoryError> {
        let write = record_to_write(record)?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(idioms::table)
            .values(&write)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| match violation(&error) {
                Some(Violation::Unique) => IdiomRepositoryError::duplicate(record.name().as_str()),
                _ => diesel_error(error),
            })
    }

    async fn update(&self, record: &IdiomRecord) -> Result<bool, IdiomRepositoryError> {
        let write = record_to_write(record)?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = diesel::update(idioms::table.filter(idioms::idiom.eq(record.name().as_str())))
            .set(&write)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected > 0)
    }
}
