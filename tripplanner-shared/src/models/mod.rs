//! Request and response bodies of the trip-planning API.

pub mod auth;
pub mod errors;
pub mod plan;
pub mod trip;

pub use auth::{Credentials, TokenResponse};
pub use errors::ErrorDetail;
pub use plan::{Itinerary, PlanResponse, PlanSource};
pub use trip::{TripField, TripFieldError, TripRequest, TripType};
