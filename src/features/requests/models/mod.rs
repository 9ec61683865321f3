mod request;

pub use request::{CreateRequest, HelpRequest, NearbyRequest, RequestStatus};
