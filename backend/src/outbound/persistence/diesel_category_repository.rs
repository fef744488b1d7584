//! PostgreSQL-backed `CategoryRepository` implementation using Diesel ORM.
//!
//! The foreign key on `idiom_minor_types.major_type_code` backs up the
//! service-level parent check, so a parent removed between the check and the
//! insert still surfaces as `MissingParent`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CategoryRepository, CategoryRepositoryError};
use crate::domain::{
    CategoryUpdate, MajorType, MinorType, NewMajorType, NewMinorType, TypeCodeFilter,
};

use super::error_mapping::{Violation, map_diesel_error, map_pool_error, violation};
use super::models::{MajorTypeRow, MajorTypeUpdate, MinorTypeRow, MinorTypeUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{idiom_major_types, idiom_minor_types};

/// Diesel-backed implementation of the `CategoryRepository` port.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CategoryRepositoryError {
    map_pool_error(error, CategoryRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> CategoryRepositoryError {
    map_diesel_error(
        error,
        CategoryRepositoryError::query,
        CategoryRepositoryError::connection,
    )
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn list_major_types(
        &self,
        filter: &TypeCodeFilter,
    ) -> Result<Vec<MajorType>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let mut query = idiom_major_types::table
            .select(MajorTypeRow::as_select())
            .order(idiom_major_types::type_code.asc())
            .into_boxed();
        if let TypeCodeFilter::Code(code) = filter {
            query = query.filter(idiom_major_types::type_code.eq(code.as_str()));
        }
        let rows: Vec<MajorTypeRow> = query.load(&mut conn).await.map_err(diesel_error)?;
        Ok(rows.into_iter().map(MajorType::from).collect())
    }

    async fn list_minor_types(
        &self,
        filter: &TypeCodeFilter,
    ) -> Result<Vec<MinorType>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let mut query = idiom_minor_types::table
            .select(MinorTypeRow::as_select())
            .order(idiom_minor_types::type_code.asc())
            .into_boxed();
        if let TypeCodeFilter::Code(code) = filter {
            query = query.filter(idiom_minor_types::type_code.eq(code.as_str()));
        }
        let rows: Vec<MinorTypeRow> = query.load(&mut conn).await.map_err(diesel_error)?;
        Ok(rows.into_iter().map(MinorType::from).collect())
    }

    async fn find_major_type(
        &self,
        type_code: &str,
    ) -> Result<Option<MajorType>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<MajorTypeRow> = idiom_major_types::table
            .filter(idiom_major_types::type_code.eq(type_code))
            .select(MajorTypeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(MajorType::from))
    }

    async fn minor_types_of(
        &self,
        major_type_code: &str,
    ) -> Result<Vec<MinorType>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<MinorTypeRow> = idiom_minor_types::table
            .filter(idiom_minor_types::major_type_code.eq(major_type_code))
            .order(idiom_minor_types::type_code.asc())
            .select(MinorTypeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(MinorType::from).collect())
    }

    async fn insert_major_type(&self, new: &NewMajorType) -> Result<(), CategoryRepositoryError> {
        let row = MajorTypeRow {
            type_code: new.type_code.clone(),
            type_name: new.type_name.clone(),
            description: new.description.clone(),
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(idiom_major_types::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| match violation(&error) {
                Some(Violation::Unique) => {
                    CategoryRepositoryError::duplicate_code(new.type_code.as_str())
                }
                _ => diesel_error(error),
            })
    }

    async fn insert_minor_type(&self, new: &NewMinorType) -> Result<(), CategoryRepositoryError> {
        let row = MinorTypeRow {
            type_code: new.type_code.clone(),
            major_type_code: new.major_type_code.clone(),
            type_name: new.type_name.clone(),
            description: new.description.clone(),
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(idiom_minor_types::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| match violation(&error) {
                Some(Violation::Unique) => {
                    CategoryRepositoryError::duplicate_code(new.type_code.as_str())
                }
                Some(Violation::ForeignKey) => {
                    CategoryRepositoryError::missing_parent(new.major_type_code.as_str())
                }
                None => diesel_error(error),
            })
    }

    async fn update_major_type(
        &self,
        type_code: &str,
        update: &CategoryUpdate,
    ) -> Result<bool, CategoryRepositoryError> {
        let changes = MajorTypeUpdate {
            type_name: &update.type_name,
            description: update.description.as_deref(),
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = diesel::update(
            idiom_major_types::table.filter(idiom_major_types::type_code.eq(type_code)),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;
        Ok(affected > 0)
    }

    async fn update_minor_type(
        &self,
        type_code: &str,
        update: &CategoryUpdate,
    ) -> Result<bool, CategoryRepositoryError> {
        let changes = MinorTypeUpdate {
            type_name: &update.type_name,
            description: update.description.as_deref(),
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = diesel::update(
            idiom_minor_types::table.filter(idiom_minor_types::type_code.eq(type_code)),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;
        Ok(affected > 0)
    }
}
