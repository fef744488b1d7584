//! Client-side access to the idiom catalogue API.
//!
//! [`IdiomApi`] is the seam between editor logic and the network:
//! [`HttpIdiomApi`] talks to a running backend, while tests substitute a
//! mock. [`BrowseSession`] is the view model an editor front-end drives with
//! explicit load, navigation and save actions. [`fetch_snapshot`] backs the
//! `fetch-snapshot` tool that exports the whole catalogue to JSON.

mod api;
mod error;
mod http;
mod session;
mod snapshot;

#[cfg(test)]
pub use api::MockIdiomApi;
pub use api::{
    CategoryUpdate, IdiomApi, ImageUpload, NewMajorType, NewMinorType, TypeFilter, UpdateOutcome,
};
pub use error::ClientError;
pub use http::HttpIdiomApi;
pub use session::{BrowseSession, Notice, NoticeKind, SAVE_TIMEOUT};
pub use snapshot::{CatalogueSnapshot, RetryPolicy, fetch_snapshot};
