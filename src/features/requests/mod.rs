//! Help-request feature.
//!
//! Requests are created open, carry the coordinates their requestor had at
//! creation time, and move through open -> pending -> closed/timeout. The
//! proximity service ranks open requests around a point by Haversine
//! distance.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod workers;

pub use services::{ProximityService, RequestService};
pub use workers::RequestTimeoutWorker;
