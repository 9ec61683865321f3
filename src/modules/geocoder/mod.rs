//! Modules layer - Infrastructure components for external integrations
//!
//! The geocoder client resolves postal addresses to coordinates via a
//! Nominatim-compatible endpoint.

mod nominatim;

pub use nominatim::{AddressQuery, ConfidenceLevel, GeocoderClient, ValidatedAddress};
