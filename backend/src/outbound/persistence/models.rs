//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use crate::domain::{MajorType, MinorType};

use super::schema::{idiom_major_types, idiom_minor_types, idioms};

/// Row struct for reading from the idioms table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = idioms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IdiomRow {
    pub idiom: String,
    pub description: String,
    pub examples: String,
    pub exam_images: Option<String>,
    pub major_type_code: Option<String>,
    pub minor_type_code: Option<String>,
}

/// Insertable and changeset form of an idiom row.
///
/// `treat_none_as_null` makes an update clear category codes instead of
/// skipping them, so an upsert always replaces the whole row.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = idioms)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct IdiomWrite<'a> {
    pub idiom: &'a str,
    pub description: &'a str,
    pub examples: String,
    pub exam_images: Option<String>,
    pub major_type_code: Option<&'a str>,
    pub minor_type_code: Option<&'a str>,
}

/// Row struct for the idiom_major_types table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = idiom_major_types)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MajorTypeRow {
    pub type_code: String,
    pub type_name: String,
    pub description: Option<String>,
}

impl From<MajorTypeRow> for MajorType {
    fn from(row: MajorTypeRow) -> Self {
        Self {
            type_code: row.type_code,
            type_name: row.type_name,
            description: row.description,
        }
    }
}

/// Row struct for the idiom_minor_types table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = idiom_minor_types)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MinorTypeRow {
    pub type_code: String,
    pub major_type_code: String,
    pub type_name: String,
    pub description: Option<String>,
}

impl From<MinorTypeRow> for MinorType {
    fn from(row: MinorTypeRow) -> Self {
        Self {
            type_code: row.type_code,
            major_type_code: row.major_type_code,
            type_name: row.type_name,
            description: row.description,
        }
    }
}

/// Changeset for major category renames.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = idiom_major_types)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct MajorTypeUpdate<'a> {
    pub type_name: &'a str,
    pub description: Option<&'a str>,
}

/// Changeset for minor category renames.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = idiom_minor_types)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct MinorTypeUpdate<'a> {
    pub type_name: &'a str,
    pub description: Option<&'a str>,
}
