mod proximity_service;
mod request_service;

pub use proximity_service::{ProximityQuery, ProximityService};
pub use request_service::RequestService;
