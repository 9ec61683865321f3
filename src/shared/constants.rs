/// Default number of requests returned by the nearby search
pub const DEFAULT_NEARBY_AMOUNT: i64 = 10;

/// Maximum number of requests a single nearby search may return
pub const MAX_NEARBY_AMOUNT: i64 = 100;

/// Default nearby search radius in meters
pub const DEFAULT_NEARBY_RADIUS_METERS: f64 = 2000.0;
