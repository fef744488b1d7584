//! Driving port for idiom reads and upserts.

use async_trait::async_trait;

use crate::domain::{Error, Idiom};

/// Which branch an upsert took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No row existed for the key; one was inserted.
    Inserted,
    /// The existing row was replaced.
    Updated,
}

impl UpsertOutcome {
    /// Message reported to editors.
    pub fn message(self) -> &'static str {
        match self {
            Self::Inserted => "成语已插入",
            Self::Updated => "成语已更新",
        }
    }
}

/// Idiom use-cases consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdiomCatalogue: Send + Sync {
    /// Every idiom, ordered by major category code then by text.
    async fn list_idioms(&self) -> Result<Vec<Idiom>, Error>;

    /// One idiom by its (normalised) text.
    ///
    /// # Errors
    ///
    /// `invalid_request` for blank text, `not_found` when absent.
    async fn get_idiom(&self, name: &str) -> Result<Idiom, Error>;

    /// Insert the idiom if its key is unknown, otherwise replace the row.
    ///
    /// # Errors
    ///
    /// `invalid_request` for blank text.
    async fn upsert_idiom(&self, idiom: Idiom) -> Result<UpsertOutcome, Error>;
}
