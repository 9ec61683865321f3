//! User account feature.
//!
//! Profiles carry the postal address and the coordinates the geocoder
//! resolved for it; help requests copy those coordinates at creation time.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::UserService;
