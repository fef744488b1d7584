//! Category repository backed by two ordered maps.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{CategoryRepository, CategoryRepositoryError};
use crate::domain::{
    CategoryUpdate, MajorType, MinorType, NewMajorType, NewMinorType, TypeCodeFilter,
};

#[derive(Debug, Default)]
struct Tables {
    majors: BTreeMap<String, MajorType>,
    minors: BTreeMap<String, MinorType>,
}

/// Volatile [`CategoryRepository`].
///
/// Lists come back ordered by type code. Minor codes must be unique across
/// all majors and a minor row needs an existing parent.
#[derive(Debug, Default)]
pub struct InMemoryCategoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryCategoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list_major_types(
        &self,
        filter: &TypeCodeFilter,
    ) -> Result<Vec<MajorType>, CategoryRepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .majors
            .values()
            .filter(|major| filter.matches(&major.type_code))
            .cloned()
            .collect())
    }

    async fn list_minor_types(
        &self,
        filter: &TypeCodeFilter,
    ) -> Result<Vec<MinorType>, CategoryRepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .minors
            .values()
            .filter(|minor| filter.matches(&minor.type_code))
            .cloned()
            .collect())
    }

    async fn find_major_type(
        &self,
        type_code: &str,
    ) -> Result<Option<MajorType>, CategoryRepositoryError> {
        Ok(self.tables.read().await.majors.get(type_code).cloned())
    }

    async fn minor_types_of(
        &self,
        major_type_code: &str,
    ) -> Result<Vec<MinorType>, CategoryRepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .minors
            .values()
            .filter(|minor| minor.major_type_code == major_type_code)
            .cloned()
            .collect())
    }

    async fn insert_major_type(&self, new: &NewMajorType) -> Result<(), CategoryRepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.majors.contains_key(&new.type_code) {
            return Err(CategoryRepositoryError::duplicate_code(new.type_code.as_str()));
        }
        tables.majors.insert(new.type_code.clone(), new.to_entity());
        Ok(())
    }

    async fn insert_minor_type(&self, new: &NewMinorType) -> Result<(), CategoryRepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables.majors.contains_key(&new.major_type_code) {
            return Err(CategoryRepositoryError::missing_parent(
                new.major_type_code.as_str(),
            ));
        }
        if tables.minors.contains_key(&new.type_code) {
            return Err(CategoryRepositoryError::duplicate_code(new.type_code.as_str()));
        }
        tables.minors.insert(new.type_code.clone(), new.to_entity());
        Ok(())
    }

    async fn update_major_type(
        &self,
        type_code: &str,
        update: &CategoryUpdate,
    ) -> Result<bool, CategoryRepositoryError> {
        let mut tables = self.tables.write().await;
        Ok(tables.majors.get_mut(type_code).is_some_and(|major| {
            major.type_name.clone_from(&update.type_name);
            major.description.clone_from(&update.description);
            true
        }))
    }

    async fn update_minor_type(
        &self,
        type_code: &str,
        update: &CategoryUpdate,
    ) -> Result<bool, CategoryRepositoryError> {
        let mut tables = self.tables.write().await;
        Ok(tables.minors.get_mut(type_code).is_some_and(|minor| {
            minor.type_name.clone_from(&update.type_name);
            minor.description.clone_from(&update.description);
            true
        }))
    }
}
