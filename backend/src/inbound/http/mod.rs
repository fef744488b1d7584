//! HTTP inbound adapter exposing REST endpoints.
//!
//! Routes are mounted at the root of the application. [`configure`]
//! registers every handler together with JSON and query extractor settings
//! that report malformed input as `invalid_request` errors.

pub mod categories;
pub mod error;
pub mod health;
pub mod idioms;
pub mod schemas;
pub mod state;
pub mod uploads;
pub(crate) mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Default cap on JSON request bodies.
pub const DEFAULT_JSON_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Register the catalogue endpoints on `cfg`.
///
/// Health probes are registered separately because they depend on
/// [`health::HealthState`] rather than [`state::HttpState`].
pub fn configure(cfg: &mut web::ServiceConfig, json_limit_bytes: usize) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(json_limit_bytes)
            .error_handler(|err, _req| error::extractor_error(err)),
    )
    .app_data(web::QueryConfig::default().error_handler(|err, _req| error::extractor_error(err)))
    .service(idioms::list_idioms)
    .service(idioms::get_idiom)
    .service(idioms::upsert_idiom)
    .service(categories::list_major_types)
    .service(categories::list_minor_types)
    .service(categories::create_major_type)
    .service(categories::get_major_type)
    .service(categories::update_major_type)
    .service(categories::minor_types_of_major)
    .service(categories::create_minor_type)
    .service(categories::update_minor_type)
    .service(uploads::upload_image);
}
