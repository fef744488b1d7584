//! Whole-catalogue export with bounded retries.

use std::time::Duration;

use idiom_catalog::{Idiom, MajorType, MinorType};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::{IdiomApi, TypeFilter};
use crate::error::ClientError;

/// Every idiom and category at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueSnapshot {
    /// Idioms in the order the server returned them.
    pub idioms: Vec<Idiom>,
    /// Major categories.
    pub major_types: Vec<MajorType>,
    /// Minor categories.
    pub minor_types: Vec<MinorType>,
}

/// How often and how patiently a snapshot fetch is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first failure.
    pub retries: u32,
    /// Pause between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            delay: Duration::from_secs(2),
        }
    }
}

async fn fetch_once<A>(api: &A) -> Result<CatalogueSnapshot, ClientError>
where
    A: IdiomApi + ?Sized,
{
    Ok(CatalogueSnapshot {
        idioms: api.list_idioms().await?,
        major_types: api.list_major_types(TypeFilter::All).await?,
        minor_types: api.list_minor_types(TypeFilter::All).await?,
    })
}

/// Fetch idioms and categories, retrying transient failures.
///
/// # Errors
///
/// Returns the last error once attempts are exhausted, or immediately for
/// failures that retrying cannot fix.
pub async fn fetch_snapshot<A>(api: &A, policy: RetryPolicy) -> Result<CatalogueSnapshot, ClientError>
where
    A: IdiomApi + ?Sized,
{
    let mut attempt: u32 = 0;
    loop {
        match fetch_once(api).await {
            Ok(snapshot) => {
                info!(
                    attempts = attempt + 1,
                    idioms = snapshot.idioms.len(),
                    "catalogue snapshot fetched"
                );
                return Ok(snapshot);
            }
            Err(error) if error.is_transient() && attempt < policy.retries => {
                warn!(
                    %error,
                    retries_left = policy.retries - attempt,
                    "snapshot fetch failed; retrying"
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
