//! Request middleware.
//!
//! [`Trace`] scopes a trace identifier around each request and [`Cors`]
//! opens the API to browser clients on other origins.

pub mod cors;
pub mod trace;

pub use cors::Cors;
pub use trace::Trace;
