//! The seven domain detectors, one module per informational domain.

mod emotion;
mod fare;
mod geo;
mod safety;
mod transit;
mod trip;
mod weather;

pub use emotion::EmotionIntent;
pub use fare::FareIntent;
pub use geo::GeoIntent;
pub use safety::{implied_city, SafetyZoneIntent};
pub use transit::TransitIntent;
pub use trip::{TripPlanIntent, IMPLAUSIBLE_BUDGET_FLOOR};
pub use weather::WeatherIntent;
