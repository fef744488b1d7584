//! Category domain service.
//!
//! Enforces the taxonomy rules on top of a [`CategoryRepository`]: codes are
//! unique, a minor category needs an existing parent, and renames only apply
//! to known codes.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{CategoryCatalogue, CategoryRepository, CategoryRepositoryError};
use crate::domain::{
    CategoryUpdate, Error, MajorType, MinorType, NewMajorType, NewMinorType, TypeCodeFilter,
};

/// Category service implementing the driving port.
#[derive(Clone)]
pub struct CategoryService<R> {
    repository: Arc<R>,
}

impl<R> CategoryService<R> {
    /// Create a service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> CategoryService<R>
where
    R: CategoryRepository,
{
    fn map_repository_error(error: CategoryRepositoryError) -> Error {
        match error {
            CategoryRepositoryError::Connection { message } => {
                Error::internal(format!("category repository unavailable: {message}"))
            }
            CategoryRepositoryError::Query { message } => {
                Error::internal(format!("category repository error: {message}"))
            }
            CategoryRepositoryError::DuplicateCode { code } => {
                Error::conflict("Type code already exists")
                    .with_details(json!({ "typeCode": code, "code": "duplicate_type_code" }))
            }
            CategoryRepositoryError::MissingParent { code } => Self::missing_parent(&code),
        }
    }

    fn missing_parent(code: &str) -> Error {
        Error::not_found("Major type does not exist")
            .with_details(json!({ "majorTypeCode": code, "code": "unknown_major_type" }))
    }

    async fn require_major_type(&self, type_code: &str) -> Result<MajorType, Error> {
        self.repository
            .find_major_type(type_code)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found("Major type not found"))
    }
}

#[async_trait]
impl<R> CategoryCatalogue for CategoryService<R>
where
    R: CategoryRepository,
{
    async fn list_major_types(&self, filter: TypeCodeFilter) -> Result<Vec<MajorType>, Error> {
        self.repository
            .list_major_types(&filter)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn list_minor_types(&self, filter: TypeCodeFilter) -> Result<Vec<MinorType>, Error> {
        self.repository
            .list_minor_types(&filter)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn get_major_type(&self, type_code: &str) -> Result<MajorType, Error> {
        self.require_major_type(type_code).await
    }

    async fn minor_types_of(&self, major_type_code: &str) -> Result<Vec<MinorType>, Error> {
        self.repository
            .minor_types_of(major_type_code)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn create_major_type(&self, new: NewMajorType) -> Result<MajorType, Error> {
        self.repository
            .insert_major_type(&new)
            .await
            .map_err(Self::map_repository_error)?;
        info!(type_code = %new.type_code, "major type created");
        Ok(new.to_entity())
    }

    async fn create_minor_type(&self, new: NewMinorType) -> Result<MinorType, Error> {
        let parent = self
            .repository
            .find_major_type(&new.major_type_code)
            .await
            .map_err(Self::map_repository_error)?;
        if parent.is_none() {
            return Err(Self::missing_parent(&new.major_type_code));
        }
        self.repository
            .insert_minor_type(&new)
            .await
            .map_err(Self::map_repository_error)?;
        info!(
            type_code = %new.type_code,
            major_type_code = %new.major_type_code,
            "minor type created"
        );
        Ok(new.to_entity())
    }

    async fn update_major_type(&self, type_code: &str, update: CategoryUpdate) -> Result<(), Error> {
        let updated = self
            .repository
            .update_major_type(type_code, &update)
            .await
            .map_err(Self::map_repository_error)?;
        if updated {
            info!(type_code, "major type updated");
            Ok(())
        } else {
            Err(Error::not_found("Major type not found"))
        }
    }

    async fn update_minor_type(&self, type_code: &str, update: CategoryUpdate) -> Result<(), Error> {
        let updated = self
            .repository
            .update_minor_type(type_code, &update)
            .await
            .map_err(Self::map_repository_error)?;
        if updated {
            info!(type_code, "minor type updated");
            Ok(())
        } else {
            Err(Error::not_found("Minor type not found"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockCategoryRepository;
    use rstest::{fixture, rstest};

    fn service(repository: MockCategoryRepository) -> CategoryService<MockCategoryRepository> {
        CategoryService::new(Arc::new(repository))
    }

    fn animals() -> MajorType {
        MajorType {
            type_code: "DW".to_owned(),
            type_name: "动物".to_owned(),
            description: None,
        }
    }

    #[fixture]
    fn new_minor() -> NewMinorType {
        NewMinorType {
            type_code: "SUB_MA".to_owned(),
            major_type_code: "DW".to_owned(),
            type_name: "马".to_owned(),
            description: None,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn minor_type_with_unknown_parent_writes_nothing(new_minor: NewMinorType) {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_major_type()
            .withf(|code| code == "DW")
            .return_once(|_| Ok(None));
        repo.expect_insert_minor_type().never();

        let error = service(repo)
            .create_minor_type(new_minor)
            .await
            .expect_err("parent missing");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "Major type does not exist");
    }

    #[rstest]
    #[tokio::test]
    async fn minor_type_with_known_parent_is_created(new_minor: NewMinorType) {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_major_type()
            .return_once(|_| Ok(Some(animals())));
        repo.expect_insert_minor_type()
            .times(1)
            .return_once(|_| Ok(()));

        let created = service(repo)
            .create_minor_type(new_minor)
            .await
            .expect("created");
        assert_eq!(created.type_code, "SUB_MA");
        assert_eq!(created.major_type_code, "DW");
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_major_code_is_a_conflict() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_insert_major_type()
            .return_once(|new| Err(CategoryRepositoryError::duplicate_code(new.type_code.clone())));

        let new = NewMajorType {
            type_code: "DW".to_owned(),
            type_name: "动物".to_owned(),
            description: None,
        };
        let error = service(repo)
            .create_major_type(new)
            .await
            .expect_err("duplicate");
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(
            error.details(),
            Some(&json!({"typeCode": "DW", "code": "duplicate_type_code"}))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn parent_removed_mid_insert_is_not_found(new_minor: NewMinorType) {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_major_type()
            .return_once(|_| Ok(Some(animals())));
        repo.expect_insert_minor_type()
            .return_once(|new| Err(CategoryRepositoryError::missing_parent(new.major_type_code.clone())));

        let error = service(repo)
            .create_minor_type(new_minor)
            .await
            .expect_err("parent vanished");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[case(true, None)]
    #[case(false, Some(ErrorCode::NotFound))]
    #[tokio::test]
    async fn update_reports_unknown_codes(
        #[case] matched: bool,
        #[case] expected: Option<ErrorCode>,
    ) {
        let mut repo = MockCategoryRepository::new();
        repo.expect_update_major_type()
            .withf(|code, update| code == "DW" && update.type_name == "走兽")
            .return_once(move |_, _| Ok(matched));

        let update = CategoryUpdate {
            type_name: "走兽".to_owned(),
            description: None,
        };
        let result = service(repo).update_major_type("DW", update).await;
        assert_eq!(result.err().map(|error| error.code()), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_minor_update_is_not_found() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_update_minor_type().return_once(|_, _| Ok(false));
        let update = CategoryUpdate {
            type_name: "虎".to_owned(),
            description: Some("猛兽".to_owned()),
        };
        let error = service(repo)
            .update_minor_type("SUB_HU", update)
            .await
            .expect_err("unknown");
        assert_eq!(error.message(), "Minor type not found");
    }

    #[rstest]
    #[tokio::test]
    async fn get_major_type_maps_absence_to_not_found() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_major_type().return_once(|_| Ok(None));
        let error = service(repo)
            .get_major_type("ZZ")
            .await
            .expect_err("missing");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn list_passes_filter_through() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_list_major_types()
            .withf(|filter| *filter == TypeCodeFilter::Code("DW".to_owned()))
            .return_once(|_| Ok(vec![animals()]));
        let majors = service(repo)
            .list_major_types(TypeCodeFilter::Code("DW".to_owned()))
            .await
            .expect("listed");
        assert_eq!(majors, vec![animals()]);
    }

    #[rstest]
    #[tokio::test]
    async fn unavailable_store_is_an_internal_error() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_minor_types_of()
            .return_once(|_| Err(CategoryRepositoryError::connection("refused")));
        let error = service(repo)
            .minor_types_of("DW")
            .await
            .expect_err("unavailable");
        assert_eq!(error.code(), ErrorCode::InternalError);
    }
}
