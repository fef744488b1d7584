//! Idiom domain service.
//!
//! Implements [`IdiomCatalogue`] over an [`IdiomRepository`]: normalises keys,
//! applies the upsert rule and maps repository failures onto the error
//! taxonomy.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{IdiomCatalogue, IdiomRepository, IdiomRepositoryError, UpsertOutcome};
use crate::domain::{Error, Idiom, IdiomName, IdiomNameError, IdiomRecord};

/// Idiom service implementing the driving port.
#[derive(Clone)]
pub struct IdiomService<R> {
    repository: Arc<R>,
}

impl<R> IdiomService<R> {
    /// Create a service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> IdiomService<R>
where
    R: IdiomRepository,
{
    fn map_repository_error(error: IdiomRepositoryError) -> Error {
        match error {
            IdiomRepositoryError::Connection { message } => {
                Error::internal(format!("idiom repository unavailable: {message}"))
            }
            IdiomRepositoryError::Query { message } => {
                Error::internal(format!("idiom repository error: {message}"))
            }
            IdiomRepositoryError::Serialization { message } => {
                Error::internal(format!("idiom column encoding failed: {message}"))
            }
            IdiomRepositoryError::Duplicate { name } => {
                Error::internal(format!("unexpected idiom key conflict: {name}"))
            }
        }
    }

    fn map_name_error(error: IdiomNameError) -> Error {
        match error {
            IdiomNameError::Empty => Error::invalid_request("Idiom is required"),
        }
    }

    async fn replace(&self, record: &IdiomRecord) -> Result<UpsertOutcome, Error> {
        let updated = self
            .repository
            .update(record)
            .await
            .map_err(Self::map_repository_error)?;
        if updated {
            Ok(UpsertOutcome::Updated)
        } else {
            Err(Error::internal(format!(
                "idiom '{}' vanished during update",
                record.name()
            )))
        }
    }
}

#[async_trait]
impl<R> IdiomCatalogue for IdiomService<R>
where
    R: IdiomRepository,
{
    async fn list_idioms(&self) -> Result<Vec<Idiom>, Error> {
        self.repository
            .list_all()
            .await
            .map_err(Self::map_repository_error)
    }

    async fn get_idiom(&self, name: &str) -> Result<Idiom, Error> {
        let name = IdiomName::new(name)
            .map_err(|_| Error::invalid_request("Idiom parameter is required"))?;
        self.repository
            .find_by_name(&name)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found("Idiom not found"))
    }

    async fn upsert_idiom(&self, idiom: Idiom) -> Result<UpsertOutcome, Error> {
        let record = IdiomRecord::new(idiom).map_err(Self::map_name_error)?;
        let exists = self
            .repository
            .exists(record.name())
            .await
            .map_err(Self::map_repository_error)?;

        let outcome = if exists {
            self.replace(&record).await?
        } else {
            match self.repository.insert(&record).await {
                Ok(()) => UpsertOutcome::Inserted,
                Err(IdiomRepositoryError::Duplicate { .. }) => {
                    debug!(idiom = %record.name(), "insert lost a race; updating instead");
                    self.replace(&record).await?
                }
                Err(error) => return Err(Self::map_repository_error(error)),
            }
        };
        info!(idiom = %record.name(), ?outcome, "idiom saved");
        Ok(outcome)
    }
}
